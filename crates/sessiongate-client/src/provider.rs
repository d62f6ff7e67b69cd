//! Token providers: where the signer gets a proof of identity from.
//!
//! A provider is asked once per outbound request. It may refresh, re-mint or
//! fail; callers never cache what it returns.

use async_trait::async_trait;

use sessiongate_auth::TokenMinter;
use sessiongate_core::config::AuthConfig;
use sessiongate_core::error::AppError;
use sessiongate_core::types::Identity;

/// Failure to produce a token.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ProviderError {
    /// The provider could not be reached or has no usable session.
    #[error("Token provider unavailable: {0}")]
    Unavailable(String),
    /// Minting a fresh token failed.
    #[error("Failed to mint session token: {0}")]
    Minting(String),
}

/// Source of short-lived bearer tokens for the current session.
///
/// `Ok(None)` means nobody is signed in; the request goes out unsigned.
#[async_trait]
pub trait TokenProvider: Send + Sync + 'static {
    /// Returns a currently valid token, or `None` when signed out.
    async fn get_token(&self) -> Result<Option<String>, ProviderError>;
}

/// Hands out a fixed token, such as a long-lived token given to a script.
#[derive(Clone)]
pub struct StaticTokenProvider {
    token: String,
}

impl StaticTokenProvider {
    /// Creates a provider for `token`.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

impl std::fmt::Debug for StaticTokenProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticTokenProvider")
            .field("token", &"<redacted>")
            .finish()
    }
}

#[async_trait]
impl TokenProvider for StaticTokenProvider {
    async fn get_token(&self) -> Result<Option<String>, ProviderError> {
        Ok(Some(self.token.clone()))
    }
}

/// Local stand-in for the identity provider.
///
/// Mints a fresh short-lived token for a fixed identity on every call, so
/// tokens expire as they would in production.
#[derive(Debug, Clone)]
pub struct SigningTokenProvider {
    minter: TokenMinter,
    identity: Identity,
    ttl_seconds: u64,
}

impl SigningTokenProvider {
    /// Creates a provider minting `ttl_seconds` tokens for `identity`.
    pub fn new(minter: TokenMinter, identity: Identity, ttl_seconds: u64) -> Self {
        Self {
            minter,
            identity,
            ttl_seconds,
        }
    }

    /// Creates a provider from auth configuration.
    ///
    /// Fails when the configuration has no signing material.
    pub fn from_config(config: &AuthConfig, identity: Identity) -> Result<Self, AppError> {
        let minter = TokenMinter::from_config(config)?.ok_or_else(|| {
            AppError::configuration("No signing key configured; cannot mint session tokens")
        })?;
        Ok(Self::new(minter, identity, config.short_lived_ttl_seconds))
    }

    /// Identity every minted token carries.
    pub fn identity(&self) -> &Identity {
        &self.identity
    }
}

#[async_trait]
impl TokenProvider for SigningTokenProvider {
    async fn get_token(&self) -> Result<Option<String>, ProviderError> {
        let minted = self
            .minter
            .mint_session_token(&self.identity, self.ttl_seconds)
            .map_err(|e| ProviderError::Minting(e.message))?;
        Ok(Some(minted.token))
    }
}

/// Provider of a session that has ended.
#[derive(Debug, Clone, Copy, Default)]
pub struct SignedOutProvider;

#[async_trait]
impl TokenProvider for SignedOutProvider {
    async fn get_token(&self) -> Result<Option<String>, ProviderError> {
        Ok(None)
    }
}
