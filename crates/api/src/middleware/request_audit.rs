//! Request audit middleware for per-request correlation and timing.
//!
//! Assigns a UUID v4 to each request if not provided by an upstream proxy,
//! times the request, and emits one audit line with (request id, method,
//! path, status code, duration in milliseconds). The request ID is returned
//! in the response headers for client-side correlation.

use std::time::Instant;

use axum::{extract::Request, http::HeaderValue, middleware::Next, response::Response};
use uuid::Uuid;

/// The HTTP header name for request IDs.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Middleware that audits every request.
///
/// If the incoming request has an `x-request-id` header (from a load
/// balancer or another upstream proxy), that value is used. Otherwise, a new
/// UUID v4 is generated.
pub async fn request_audit_middleware(request: Request, next: Next) -> Response {
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|h| h.to_str().ok())
        .map_or_else(|| Uuid::new_v4().to_string(), String::from);

    let method = request.method().clone();
    let path = request.uri().path().to_owned();
    let started = Instant::now();

    let mut response = next.run(request).await;

    let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;
    tracing::info!(
        %request_id,
        %method,
        %path,
        status = response.status().as_u16(),
        elapsed_ms,
        "request completed"
    );

    // Add to response headers so clients can reference the request ID
    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    response
}
