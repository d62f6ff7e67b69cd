//! The resolved caller identity handed to protected handlers.

use serde::{Deserialize, Serialize};

use super::id::{SessionId, UserId};

/// Placeholder rendered where a token carried no session id.
pub const UNKNOWN: &str = "unknown";

/// A caller identity produced only by successful token verification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Subject of the verified token.
    pub user_id: UserId,
    /// Session the token was minted for, when the token names one.
    pub session_id: Option<SessionId>,
}

impl Identity {
    /// Creates an identity bound to a session.
    pub fn new(user_id: impl Into<UserId>, session_id: impl Into<SessionId>) -> Self {
        Self {
            user_id: user_id.into(),
            session_id: Some(session_id.into()),
        }
    }

    /// Creates an identity without a session.
    pub fn without_session(user_id: impl Into<UserId>) -> Self {
        Self {
            user_id: user_id.into(),
            session_id: None,
        }
    }

    /// Session id as rendered in responses.
    pub fn session_label(&self) -> &str {
        self.session_id
            .as_ref()
            .map(SessionId::as_str)
            .unwrap_or(UNKNOWN)
    }
}
