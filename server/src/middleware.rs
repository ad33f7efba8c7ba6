//! Request middleware: CORS and per-request tracing.

use std::time::Instant;

use axum::{
    body::Body,
    extract::State,
    http::{HeaderValue, Method, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::Instrument;
use uuid::Uuid;

use crate::AppState;

pub const ALLOWED_METHODS: &str = "POST, OPTIONS, GET, PUT, DELETE, PATCH";
pub const ALLOWED_HEADERS: &str = "Content-Type, Content-Length, Accept-Encoding, X-CSRF-Token, \
Authorization, accept, origin, Cache-Control, X-Requested-With";

/// Sets the fixed CORS headers on every response and answers preflight
/// requests with 204 without reaching the handlers.
pub async fn cors_middleware(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let mut resp = if req.method() == Method::OPTIONS {
        StatusCode::NO_CONTENT.into_response()
    } else {
        next.run(req).await
    };

    let headers = resp.headers_mut();
    match HeaderValue::from_str(&state.config.allowed_origin) {
        Ok(origin) => {
            headers.insert("access-control-allow-origin", origin);
        }
        Err(e) => tracing::warn!(error = %e, "configured CORS origin is not a valid header value"),
    }
    headers.insert(
        "access-control-allow-credentials",
        HeaderValue::from_static("true"),
    );
    headers.insert(
        "access-control-allow-headers",
        HeaderValue::from_static(ALLOWED_HEADERS),
    );
    headers.insert(
        "access-control-allow-methods",
        HeaderValue::from_static(ALLOWED_METHODS),
    );
    resp
}

/// Wraps each request in an `http.request` span and echoes the generated
/// request id back as `x-request-id`.
pub async fn request_tracing_middleware(req: Request<Body>, next: Next) -> Response {
    let request_id = Uuid::new_v4().to_string();
    let method = req.method().to_string();
    let path = req.uri().path().to_string();
    let started = Instant::now();

    let span = tracing::info_span!(
        "http.request",
        request_id = %request_id,
        method = %method,
        path = %path,
    );

    let mut resp = next.run(req).instrument(span.clone()).await;

    span.in_scope(|| {
        tracing::info!(
            status = resp.status().as_u16(),
            latency_ms = started.elapsed().as_millis() as u64,
            "request completed"
        );
    });

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        resp.headers_mut().insert("x-request-id", value);
    }
    resp
}
