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

//! Resource server bootstrap wiring.
//!
//! Layout: `cli.rs` (flags and environment), `bootstrap.rs` (startup and shutdown),
//! `error.rs` (application errors).

/// Application bootstrap.
pub mod bootstrap;
/// Command-line and environment configuration.
pub mod cli;
/// Application error types.
pub mod error;

pub use bootstrap::{run_app, serve};
pub use cli::ServerArgs;
pub use error::{AppError, AppResult};
