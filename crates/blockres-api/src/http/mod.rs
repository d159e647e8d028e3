//! HTTP surface modules (router, handlers, constants).

/// Catalog document lookup and handler.
pub mod catalog;
/// Shared constants and header values.
pub mod constants;
/// Router construction and middleware stack.
pub mod router;
