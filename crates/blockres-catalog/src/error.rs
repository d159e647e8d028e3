//! # Design
//!
//! - Assembly failures name the offending manifest path so operators can fix the source file.
//! - Index failures carry the `(catalog, locale)` cell that could not be built.
//! - Messages stay constant; context lives in fields.

use std::io;
use std::path::PathBuf;

use blockres_i18n::LocaleCode;
use thiserror::Error;

use crate::model::CatalogType;

/// Errors raised by a catalog assembler while scanning its source directory.
#[derive(Debug, Error)]
pub enum AssemblyError {
    /// Listing a catalog directory failed.
    #[error("failed to list catalog directory")]
    ReadDir {
        /// Directory being listed.
        path: PathBuf,
        /// Underlying IO error.
        source: io::Error,
    },
    /// Reading a manifest failed.
    #[error("failed to read catalog manifest")]
    ReadManifest {
        /// Manifest path.
        path: PathBuf,
        /// Underlying IO error.
        source: io::Error,
    },
    /// A manifest was not valid JSON.
    #[error("catalog manifest is not valid json")]
    ParseManifest {
        /// Manifest path.
        path: PathBuf,
        /// Underlying serde error.
        source: serde_json::Error,
    },
    /// A manifest parsed but violated the expected structure.
    #[error("catalog manifest is invalid")]
    InvalidManifest {
        /// Manifest path.
        path: PathBuf,
        /// Machine-readable reason for the failure.
        reason: &'static str,
    },
    /// Two manifests in one catalog declared the same identifier.
    #[error("duplicate catalog entry id")]
    DuplicateId {
        /// Manifest path of the second occurrence.
        path: PathBuf,
        /// Identifier declared twice.
        id: String,
    },
}

/// Errors raised while building the catalog index.
#[derive(Debug, Error)]
pub enum IndexError {
    /// No assembler was supplied for a catalog type.
    #[error("no assembler registered for catalog")]
    MissingAssembler {
        /// Catalog lacking an assembler.
        catalog: CatalogType,
    },
    /// More than one assembler claimed the same catalog type.
    #[error("multiple assemblers registered for catalog")]
    DuplicateAssembler {
        /// Catalog claimed twice.
        catalog: CatalogType,
    },
    /// An assembler failed for one cell of the index.
    #[error("catalog assembly failed")]
    Assembly {
        /// Catalog being assembled.
        catalog: CatalogType,
        /// Locale being assembled.
        locale: LocaleCode,
        /// Source assembler error.
        source: AssemblyError,
    },
    /// Serialising an assembled document failed.
    #[error("failed to serialize catalog document")]
    Serialize {
        /// Catalog being serialised.
        catalog: CatalogType,
        /// Locale being serialised.
        locale: LocaleCode,
        /// Underlying serde error.
        source: serde_json::Error,
    },
}

/// Convenience alias for index construction results.
pub type IndexResult<T> = Result<T, IndexError>;
