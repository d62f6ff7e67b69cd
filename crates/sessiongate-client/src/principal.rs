//! The signed-in user on the client side.

use std::sync::Arc;

use sessiongate_core::types::UserId;

use crate::provider::TokenProvider;

/// A signed-in user and the session handle that mints tokens for them.
///
/// Absent (`None` at the call sites) when nobody is signed in.
#[derive(Clone)]
pub struct Principal {
    /// User the session belongs to.
    pub user_id: UserId,
    /// Display name, when the provider knows it.
    pub first_name: Option<String>,
    /// Primary email, when the provider knows it.
    pub email: Option<String>,
    /// Session handle asked for a token before every request.
    pub session: Arc<dyn TokenProvider>,
}

impl Principal {
    /// Creates a principal with no profile details.
    pub fn new(user_id: impl Into<UserId>, session: Arc<dyn TokenProvider>) -> Self {
        Self {
            user_id: user_id.into(),
            first_name: None,
            email: None,
            session,
        }
    }

    /// Sets the display name.
    pub fn with_first_name(mut self, first_name: impl Into<String>) -> Self {
        self.first_name = Some(first_name.into());
        self
    }

    /// Sets the email.
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }
}

impl std::fmt::Debug for Principal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Principal")
            .field("user_id", &self.user_id)
            .field("first_name", &self.first_name)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}
