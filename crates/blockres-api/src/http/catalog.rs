//! Catalog document lookup.
//!
//! `/{catalog}/{locale}.json` is answered straight from the precomputed index.
//! Misses fall through to the static asset service, which answers an empty `404`
//! when no file exists at that path either.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::{Path, Request, State, rejection::PathRejection},
    http::{HeaderValue, header::CONTENT_TYPE},
    response::{IntoResponse, Response},
};
use blockres_catalog::CatalogIndex;
use bytes::Bytes;
use tower::ServiceExt;
use tower_http::services::ServeDir;
use tracing::debug;

use crate::http::constants::{JSON_CONTENT_TYPE, LOCALE_SUFFIX_LEN};
use crate::state::ResourceState;

/// Look up the serialised document for a catalog tag and a locale segment.
///
/// The last [`LOCALE_SUFFIX_LEN`] characters (not bytes) of `locale_with_suffix` are dropped to
/// recover the locale code; the remainder must match a supported locale exactly.
#[must_use]
pub fn resolve_document(
    index: &CatalogIndex,
    catalog: &str,
    locale_with_suffix: &str,
) -> Option<Bytes> {
    let locale = strip_locale_suffix(locale_with_suffix)?;
    index.lookup(catalog, locale).cloned()
}

fn strip_locale_suffix(segment: &str) -> Option<&str> {
    segment
        .char_indices()
        .rev()
        .nth(LOCALE_SUFFIX_LEN - 1)
        .map(|(end, _)| &segment[..end])
}

pub(crate) async fn catalog_document(
    State(state): State<Arc<ResourceState>>,
    path: Result<Path<(String, String)>, PathRejection>,
    request: Request,
) -> Response {
    let Ok(Path((catalog, document))) = path else {
        debug!(
            path = %request.uri().path(),
            "undecodable catalog path; trying static assets"
        );
        return serve_asset(state.assets.clone(), request).await;
    };
    if let Some(body) = resolve_document(&state.index, &catalog, &document) {
        return (
            [(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE))],
            body,
        )
            .into_response();
    }
    debug!(
        catalog = %catalog,
        document = %document,
        "no catalog document; trying static assets"
    );
    serve_asset(state.assets.clone(), request).await
}

async fn serve_asset(assets: ServeDir, request: Request) -> Response {
    match assets.oneshot(request).await {
        Ok(response) => response.map(Body::new),
        Err(never) => match never {},
    }
}
