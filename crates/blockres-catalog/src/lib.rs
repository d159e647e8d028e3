#![forbid(unsafe_code)]
#![deny(
    warnings,
    dead_code,
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]

//! Device and extension catalogs, localized once per locale and held in memory.
//!
//! Layout: `model.rs` (catalog tags and documents), `assembler.rs` (assembler
//! contract and the built-in device/extension assemblers), `manifest.rs`
//! (manifest directory scanning), `index.rs` (precomputed `CatalogIndex`).

pub mod assembler;
pub mod error;
pub mod index;
pub mod manifest;
pub mod model;

pub use assembler::{CatalogAssembler, DeviceAssembler, ExtensionAssembler, default_assemblers};
pub use error::{AssemblyError, IndexError, IndexResult};
pub use index::CatalogIndex;
pub use model::{CatalogType, Document};
