//! Long-lived token issuance.
//!
//! A caller holding a currently-valid session token may exchange it for a
//! weeks-scale token meant for scripted access. Issuance is stateless: no
//! record of issued tokens is kept, so a long-lived token cannot be revoked
//! before its `exp`. It is never renewed either; a long-lived token cannot
//! be used to mint another one.

use chrono::{DateTime, Utc};
use tracing::info;

use sessiongate_core::config::AuthConfig;
use sessiongate_core::error::AppError;
use sessiongate_core::types::{Identity, IssuedToken};

use crate::jwt::{TokenKind, TokenMinter, token_lifetime};

/// Why a long-lived token was not issued.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IssuanceError {
    /// The presented token names no session.
    #[error("Session ID not found")]
    MissingSession,
    /// The presented token is itself a long-lived token.
    #[error("Long-lived tokens cannot be used to issue tokens")]
    NotSessionToken,
    /// No signing key is configured on this server.
    #[error("Token issuance is not configured")]
    SigningKeyUnavailable,
    /// The signing operation failed.
    #[error("Failed to generate token: {0}")]
    Signing(String),
}

/// A freshly issued long-lived token.
#[derive(Debug, Clone)]
pub struct LongLivedToken {
    /// The raw token. Returned to the caller once and never stored.
    pub jwt: String,
    /// Identity the token is bound to.
    pub identity: Identity,
    /// Issuance time (`iat`).
    pub issued_at: DateTime<Utc>,
    /// Absolute expiry (`exp`).
    pub expires_at: DateTime<Utc>,
    /// Lifetime granted at issuance.
    pub expires_in_seconds: u64,
}

impl LongLivedToken {
    /// Response body for the issuance route.
    pub fn into_response(self) -> IssuedToken {
        let session_id = self.identity.session_label().to_string();
        IssuedToken {
            jwt: self.jwt,
            user_id: self.identity.user_id.into_inner(),
            session_id,
            expires_in_seconds: self.expires_in_seconds,
        }
    }
}

/// Mints long-lived tokens bound to an already-verified identity.
#[derive(Debug, Clone)]
pub struct LongLivedIssuer {
    /// Absent when the server only holds verification material.
    minter: Option<TokenMinter>,
    /// Fixed lifetime of every issued token.
    ttl_seconds: u64,
}

impl LongLivedIssuer {
    /// Creates an issuer with an explicit minter.
    pub fn new(minter: Option<TokenMinter>, ttl_seconds: u64) -> Self {
        Self {
            minter,
            ttl_seconds,
        }
    }

    /// Creates an issuer from auth configuration.
    pub fn from_config(config: &AuthConfig) -> Result<Self, AppError> {
        config.validate()?;
        Ok(Self::new(
            TokenMinter::from_config(config)?,
            config.long_lived_ttl_seconds,
        ))
    }

    /// Whether this issuer can sign tokens at all.
    pub fn is_enabled(&self) -> bool {
        self.minter.is_some()
    }

    /// Lifetime of issued tokens in seconds.
    pub fn ttl_seconds(&self) -> u64 {
        self.ttl_seconds
    }

    /// Issues a token for the identity resolved from a presented token of `presented` kind.
    pub fn issue(
        &self,
        identity: &Identity,
        presented: TokenKind,
    ) -> Result<LongLivedToken, IssuanceError> {
        self.issue_at(identity, presented, Utc::now())
    }

    /// Issues a token as of `now`.
    pub fn issue_at(
        &self,
        identity: &Identity,
        presented: TokenKind,
        now: DateTime<Utc>,
    ) -> Result<LongLivedToken, IssuanceError> {
        if presented != TokenKind::Session {
            return Err(IssuanceError::NotSessionToken);
        }
        if identity.session_id.is_none() {
            return Err(IssuanceError::MissingSession);
        }
        let minter = self
            .minter
            .as_ref()
            .ok_or(IssuanceError::SigningKeyUnavailable)?;

        let ttl = token_lifetime(self.ttl_seconds)
            .map_err(|e| IssuanceError::Signing(e.message))?;
        let minted = minter
            .mint(identity, TokenKind::LongLived, ttl, now)
            .map_err(|e| IssuanceError::Signing(e.message))?;

        let claims = &minted.claims;
        let issued_at = claims.issued_at();
        let expires_at = claims.expires_at();
        info!(
            user_id = %identity.user_id,
            session_id = %identity.session_label(),
            jti = claims.jti.as_deref().unwrap_or_default(),
            expires_at = %expires_at,
            "Issued long-lived token"
        );

        let expires_in_seconds = u64::try_from(claims.exp.saturating_sub(claims.iat)).unwrap_or_default();
        Ok(LongLivedToken {
            jwt: minted.token,
            identity: identity.clone(),
            issued_at,
            expires_at,
            expires_in_seconds,
        })
    }
}
