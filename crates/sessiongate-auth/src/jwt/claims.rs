//! JWT claims carried by short-lived session tokens and long-lived tokens.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use sessiongate_core::types::{Identity, SessionId, UserId};

/// JWT claims payload.
///
/// Session tokens come from the token provider and carry no `kind`; they
/// deserialize as [`TokenKind::Session`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the user ID.
    pub sub: String,
    /// Session ID this token belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sid: Option<String>,
    /// Issuer.
    pub iss: String,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Not-before timestamp (seconds since epoch).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nbf: Option<i64>,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
    /// Authorized party (the origin the token was minted for).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub azp: Option<String>,
    /// JWT ID; unique per minted token.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jti: Option<String>,
    /// Token lifetime class.
    #[serde(default)]
    pub kind: TokenKind,
}

/// Distinguishes provider session tokens from issued long-lived tokens.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    /// Minutes-scale token minted per request by the token provider.
    #[default]
    Session,
    /// Weeks-scale token minted once by the issuance route.
    LongLived,
}

impl Claims {
    /// Returns the user ID from the subject claim.
    pub fn user_id(&self) -> UserId {
        UserId::new(self.sub.as_str())
    }

    /// Returns the session ID, if the token names one.
    pub fn session_id(&self) -> Option<SessionId> {
        self.sid.as_deref().map(SessionId::new)
    }

    /// Resolves the caller identity.
    pub fn identity(&self) -> Identity {
        Identity {
            user_id: self.user_id(),
            session_id: self.session_id(),
        }
    }

    /// Returns `iat` as a `DateTime<Utc>`.
    pub fn issued_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.iat, 0).unwrap_or(DateTime::<Utc>::MIN_UTC)
    }

    /// Returns the expiration as a `DateTime<Utc>`.
    pub fn expires_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.exp, 0).unwrap_or(DateTime::<Utc>::MAX_UTC)
    }

    /// Checks whether this token has expired at `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>, leeway_seconds: i64) -> bool {
        now.timestamp() >= self.exp.saturating_add(leeway_seconds)
    }

    /// Checks whether this token is not yet valid at `now`.
    pub fn is_premature_at(&self, now: DateTime<Utc>, leeway_seconds: i64) -> bool {
        self.nbf
            .is_some_and(|nbf| nbf.saturating_sub(leeway_seconds) > now.timestamp())
    }

    /// Returns the remaining TTL in seconds (0 if expired).
    pub fn remaining_ttl_seconds(&self, now: DateTime<Utc>) -> u64 {
        let remaining = self.exp - now.timestamp();
        if remaining > 0 { remaining as u64 } else { 0 }
    }
}
