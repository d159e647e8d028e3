//! Error types for translation loading.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading a translation table.
#[derive(Debug, Error)]
pub enum TranslationError {
    /// The translations source could not be read.
    #[error("failed to read translations source")]
    Read {
        /// Path of the translations source.
        path: PathBuf,
        /// Underlying IO error.
        source: io::Error,
    },
    /// The translations source was not valid JSON of the expected shape.
    #[error("translations source is malformed")]
    Parse {
        /// Path of the translations source, when loaded from disk.
        path: Option<PathBuf>,
        /// Underlying serde error.
        source: serde_json::Error,
    },
}

/// Convenience alias for translation results.
pub type TranslationResult<T> = Result<T, TranslationError>;
