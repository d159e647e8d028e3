//! Router construction and middleware stack.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    Router,
    http::{
        HeaderName, HeaderValue, Method, Request,
        header::{ACCEPT, ACCESS_CONTROL_ALLOW_HEADERS, CONTENT_TYPE, ORIGIN},
    },
    response::Response,
    routing::get,
};
use blockres_telemetry::{
    REQUEST_ID_HEADER, build_sha, propagate_request_id_layer, set_request_id_layer,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};
use tracing::Span;

use crate::http::catalog::catalog_document;
use crate::http::constants::{ALLOWED_REQUEST_HEADERS, CATALOG_ROUTE, HEADER_X_REQUESTED_WITH};
use crate::state::ResourceState;

/// Build the router: catalog documents first, static assets for everything else.
pub(crate) fn build_router(state: Arc<ResourceState>) -> Router {
    let cors_layer = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::HEAD, Method::OPTIONS])
        .allow_headers([
            ORIGIN,
            HeaderName::from_static(HEADER_X_REQUESTED_WITH),
            CONTENT_TYPE,
            ACCEPT,
        ]);
    let allow_headers_layer = SetResponseHeaderLayer::if_not_present(
        ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static(ALLOWED_REQUEST_HEADERS),
    );
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<_>| {
            let request_id = request
                .headers()
                .get(REQUEST_ID_HEADER)
                .and_then(|value| value.to_str().ok())
                .unwrap_or("")
                .to_string();
            tracing::info_span!(
                "http.request",
                method = %request.method(),
                route = %request.uri().path(),
                request_id = %request_id,
                build_sha = %build_sha(),
                status_code = tracing::field::Empty,
                latency_ms = tracing::field::Empty
            )
        })
        .on_request(|_request: &Request<_>, _span: &Span| {})
        .on_response(|response: &Response, latency: Duration, span: &Span| {
            span.record("status_code", response.status().as_u16());
            let latency_ms = u64::try_from(latency.as_millis()).unwrap_or(u64::MAX);
            span.record("latency_ms", latency_ms);
        });

    let assets = state.assets.clone();
    Router::new()
        .route(CATALOG_ROUTE, get(catalog_document))
        .fallback_service(assets)
        .layer(
            ServiceBuilder::new()
                .layer(set_request_id_layer())
                .layer(trace_layer)
                .layer(propagate_request_id_layer())
                .layer(cors_layer)
                .layer(allow_headers_layer),
        )
        .with_state(state)
}
