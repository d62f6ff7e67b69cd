//! Identity gate for protected routes.

use axum::extract::{Request, State};
use axum::http::Method;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::error::ApiError;
use crate::extractors::auth::verify_parts;
use crate::state::AppState;

/// Rejects requests without a valid bearer token before any handler runs.
///
/// On success the caller's `AuthUser` is stored in request extensions, where
/// the extractor picks it up without verifying twice. CORS preflights pass
/// through untouched.
pub async fn require_identity(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    if request.method() == Method::OPTIONS {
        return next.run(request).await;
    }

    let (mut parts, body) = request.into_parts();
    match verify_parts(&parts, &state) {
        Ok(user) => {
            parts.extensions.insert(user);
            next.run(Request::from_parts(parts, body)).await
        }
        Err(rejection) => ApiError::from(rejection).into_response(),
    }
}
