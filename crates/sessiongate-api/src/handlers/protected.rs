//! Protected handlers: identity-scoped data and long-lived token issuance.
//!
//! Every handler here takes an [`AuthUser`], which only exists for callers
//! whose token passed verification.

use axum::Json;
use axum::extract::State;

use sessiongate_core::types::{IssuanceDeclined, IssuanceResponse, ProtectedData, UserEcho};

use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/protected/user
pub async fn user_info(auth: AuthUser) -> Json<UserEcho> {
    Json(UserEcho {
        message: "You are authenticated!".to_string(),
        user_id: auth.user_id.to_string(),
        session_id: auth.session_label().to_string(),
    })
}

/// GET /api/protected/data
pub async fn protected_data(auth: AuthUser) -> Json<ProtectedData> {
    Json(ProtectedData {
        user_id: auth.user_id.to_string(),
        secret_data: "This is protected data only visible to authenticated users".to_string(),
        items: vec![
            "Item 1".to_string(),
            "Item 2".to_string(),
            "Item 3".to_string(),
        ],
    })
}

/// POST /api/protected/generate-long-lived-token
///
/// Always answers 200 once the caller is verified: either the token, or an
/// `{ error }` body. The raw token leaves the server only in this response.
pub async fn generate_long_lived_token(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Json<IssuanceResponse> {
    match state.issuer.issue(&auth.identity, auth.kind) {
        Ok(token) => Json(IssuanceResponse::Issued(token.into_response())),
        Err(e) => {
            tracing::warn!(
                user_id = %auth.user_id,
                session_id = %auth.session_label(),
                error = %e,
                "Long-lived token issuance declined"
            );
            Json(IssuanceResponse::Declined(IssuanceDeclined {
                error: e.to_string(),
            }))
        }
    }
}
