//! Public handlers, reachable without a bearer token.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use sessiongate_core::types::{HealthStatus, PublicInfo, VerifyTokenRequest, VerifyTokenResponse};

use crate::error::ApiError;
use crate::state::AppState;

/// GET /api/health
pub async fn health() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "healthy".to_string(),
        timestamp: chrono::Utc::now().timestamp_millis(),
    })
}

/// GET /api/public/info
pub async fn public_info(State(state): State<AppState>) -> Json<PublicInfo> {
    Json(PublicInfo {
        message: "This is a public endpoint - no authentication required".to_string(),
        app: state.config.server.app_name.clone(),
    })
}

/// POST /api/public/verify-token
///
/// Diagnostic check of a token supplied in the body. Failure reasons are not
/// disclosed, same as on protected routes.
pub async fn verify_token(
    State(state): State<AppState>,
    Json(req): Json<VerifyTokenRequest>,
) -> Result<(StatusCode, Json<VerifyTokenResponse>), ApiError> {
    let token = req.token.as_deref().map(str::trim).unwrap_or_default();
    if token.is_empty() {
        return Ok((
            StatusCode::BAD_REQUEST,
            Json(VerifyTokenResponse {
                verified: None,
                payload: None,
                error: Some("Token is required".to_string()),
            }),
        ));
    }

    match state.verifier.verify(token) {
        Ok(claims) => Ok((
            StatusCode::OK,
            Json(VerifyTokenResponse {
                verified: Some(true),
                payload: Some(serde_json::to_value(&claims).map_err(|e| ApiError(e.into()))?),
                error: None,
            }),
        )),
        Err(reason) => {
            tracing::debug!(%reason, "Token failed verification");
            Ok((
                StatusCode::BAD_REQUEST,
                Json(VerifyTokenResponse {
                    verified: Some(false),
                    payload: None,
                    error: Some("Invalid token".to_string()),
                }),
            ))
        }
    }
}
