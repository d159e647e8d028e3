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

//! HTTP surface for the resource server: catalog routing, static assets, lifecycle.
//!
//! Layout: `server.rs` (construction and listening), `state.rs` (shared request
//! state), `http/` (router, catalog handler, constants), `error.rs`.

pub mod error;
pub mod http;
pub mod server;
pub(crate) mod state;

pub use error::{ServerError, ServerResult};
pub use http::catalog::resolve_document;
pub use server::{DEFAULT_BIND_IP, DEFAULT_PORT, ResourceServer, RunningServer, ServerEvent};
