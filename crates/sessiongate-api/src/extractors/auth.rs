//! `AuthUser` extractor: the resolved identity of a verified caller.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use sessiongate_auth::{Claims, Rejection, TokenKind};
use sessiongate_core::types::Identity;

use crate::error::ApiError;
use crate::state::AppState;

/// Identity of a caller whose bearer token passed verification.
///
/// Only constructed from verified claims, either by the identity gate
/// middleware (which stores it in request extensions) or by this extractor
/// verifying the header itself when a route is not behind the gate.
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// Resolved `(user id, session id)`.
    pub identity: Identity,
    /// Lifetime class of the presented token.
    pub kind: TokenKind,
}

impl AuthUser {
    pub(crate) fn from_claims(claims: &Claims) -> Self {
        Self {
            identity: claims.identity(),
            kind: claims.kind,
        }
    }

    /// Returns the resolved identity.
    pub fn identity(&self) -> &Identity {
        &self.identity
    }
}

impl std::ops::Deref for AuthUser {
    type Target = Identity;
    fn deref(&self) -> &Self::Target {
        &self.identity
    }
}

/// Verifies the `Authorization` header of `parts`.
pub(crate) fn verify_parts(parts: &Parts, state: &AppState) -> Result<AuthUser, Rejection> {
    // A header that is present but not visible ASCII is malformed, not absent.
    let header = parts
        .headers
        .get(AUTHORIZATION)
        .map(|v| v.to_str().unwrap_or_default());

    let claims = state.verifier.verify_header(header).inspect_err(|reason| {
        tracing::debug!(%reason, path = %parts.uri.path(), "Rejected bearer credential");
    })?;

    Ok(AuthUser::from_claims(&claims))
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(user) = parts.extensions.get::<AuthUser>() {
            return Ok(user.clone());
        }
        Ok(verify_parts(parts, state)?)
    }
}
