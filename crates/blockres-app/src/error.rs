//! # Design
//!
//! - Centralize application-level errors for configuration, logging, and serving.
//! - Keep error messages constant while carrying context fields for debugging.
//! - Preserve source errors without re-logging at call sites.

use thiserror::Error;

/// Result alias for application operations.
pub type AppResult<T> = Result<T, AppError>;

/// Application-level error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Resource server operations failed.
    #[error("resource server operation failed")]
    Server {
        /// Operation identifier.
        operation: &'static str,
        /// Source server error.
        source: blockres_api::ServerError,
    },
    /// Telemetry operations failed.
    #[error("telemetry operation failed")]
    Telemetry {
        /// Operation identifier.
        operation: &'static str,
        /// Source telemetry error.
        source: blockres_telemetry::TelemetryError,
    },
    /// Configuration values were invalid.
    #[error("invalid configuration")]
    InvalidConfig {
        /// Field name that failed validation.
        field: &'static str,
        /// Machine-readable reason for the failure.
        reason: &'static str,
        /// Optional value associated with the failure.
        value: Option<String>,
    },
}

impl AppError {
    pub(crate) const fn server(
        operation: &'static str,
        source: blockres_api::ServerError,
    ) -> Self {
        Self::Server { operation, source }
    }

    pub(crate) const fn telemetry(
        operation: &'static str,
        source: blockres_telemetry::TelemetryError,
    ) -> Self {
        Self::Telemetry { operation, source }
    }
}
