//! Shared HTTP constants (path conventions, headers).

/// Characters stripped from the document segment to recover the locale (e.g. `.json`).
pub const LOCALE_SUFFIX_LEN: usize = 5;
/// Route serving catalog documents; shares its shape with static asset paths.
pub(crate) const CATALOG_ROUTE: &str = "/{catalog}/{document}";
/// Content type of catalog documents.
pub(crate) const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";
/// Request headers browsers may send cross-origin.
pub(crate) const ALLOWED_REQUEST_HEADERS: &str = "Origin, X-Requested-With, Content-Type, Accept";
pub(crate) const HEADER_X_REQUESTED_WITH: &str = "x-requested-with";
