//! Request signer. Attaches the current session token to outbound calls.

use reqwest::RequestBuilder;

use crate::principal::Principal;

/// Attaches `Authorization: Bearer <token>` for the signed-in principal.
///
/// The token is fetched from the principal's session on every call. When
/// nobody is signed in, or the session yields nothing, the request goes out
/// unsigned and the server decides. A provider error is logged and treated
/// the same way; the request is never blocked on the client side.
#[derive(Debug, Clone, Default)]
pub struct RequestSigner {
    principal: Option<Principal>,
}

impl RequestSigner {
    /// Creates a signer for `principal`.
    pub fn new(principal: Option<Principal>) -> Self {
        Self { principal }
    }

    /// Signer that never attaches a token.
    pub fn signed_out() -> Self {
        Self { principal: None }
    }

    /// The signed-in principal, if any.
    pub fn principal(&self) -> Option<&Principal> {
        self.principal.as_ref()
    }

    /// Returns `request` with a bearer header when a token is available.
    pub async fn sign(&self, request: RequestBuilder) -> RequestBuilder {
        match self.current_token().await {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn current_token(&self) -> Option<String> {
        let principal = self.principal.as_ref()?;
        match principal.session.get_token().await {
            Ok(Some(token)) if !token.trim().is_empty() => Some(token),
            Ok(_) => {
                tracing::debug!(user_id = %principal.user_id, "Session yielded no token");
                None
            }
            Err(e) => {
                tracing::warn!(
                    user_id = %principal.user_id,
                    error = %e,
                    "Token provider failed; sending request without credentials"
                );
                None
            }
        }
    }
}
