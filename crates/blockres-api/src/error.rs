//! # Design
//!
//! - Provide a single crate-level error type for server construction and serving failures.
//! - Keep error messages constant; capture operational context in structured fields.
//! - Preserve sources for diagnostics without double-logging.

use std::error::Error;
use std::fmt::{self, Display, Formatter};
use std::net::SocketAddr;

use blockres_catalog::IndexError;
use blockres_i18n::TranslationError;
use tokio::task::JoinError;

/// Result alias for resource server operations.
pub type ServerResult<T> = std::result::Result<T, ServerError>;

/// Errors raised while constructing or serving the resource server.
#[derive(Debug)]
pub enum ServerError {
    /// The translations source was missing or malformed.
    Translations {
        /// Underlying translation error.
        source: TranslationError,
    },
    /// Building the catalog index failed.
    Index {
        /// Underlying index error.
        source: IndexError,
    },
    /// Binding the listener failed.
    Bind {
        /// Address attempted.
        addr: SocketAddr,
        /// Underlying IO error.
        source: std::io::Error,
    },
    /// Serving requests failed.
    Serve {
        /// Underlying IO error.
        source: std::io::Error,
    },
    /// The serving task panicked or was cancelled.
    Task {
        /// Underlying join error.
        source: JoinError,
    },
}

impl Display for ServerError {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Translations { .. } => formatter.write_str("failed to load translations"),
            Self::Index { .. } => formatter.write_str("failed to build catalog index"),
            Self::Bind { .. } => formatter.write_str("failed to bind resource listener"),
            Self::Serve { .. } => formatter.write_str("resource server terminated unexpectedly"),
            Self::Task { .. } => formatter.write_str("resource server task failed"),
        }
    }
}

impl Error for ServerError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Translations { source } => Some(source),
            Self::Index { source } => Some(source),
            Self::Bind { source, .. } | Self::Serve { source } => Some(source),
            Self::Task { source } => Some(source),
        }
    }
}
