//! Request/response logging middleware.

use std::time::Instant;

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;

/// Logs method, path, status and duration of every request.
///
/// Headers are never logged; they carry bearer tokens. Server errors are
/// logged at warn, identity rejections at debug.
pub async fn request_logging(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_owned();
    let start = Instant::now();

    let response = next.run(request).await;

    let status = response.status();
    let duration_ms = start.elapsed().as_millis() as u64;

    if status.is_server_error() {
        tracing::warn!(%method, %path, status = status.as_u16(), duration_ms, "HTTP request failed");
    } else if status.as_u16() == 401 {
        tracing::debug!(%method, %path, status = status.as_u16(), duration_ms, "HTTP request rejected");
    } else {
        tracing::info!(%method, %path, status = status.as_u16(), duration_ms, "HTTP request");
    }

    response
}
