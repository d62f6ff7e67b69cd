//! JWT token creation with the issuer's signing key.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use uuid::Uuid;

use sessiongate_core::config::{AuthConfig, MAX_TOKEN_TTL_SECONDS};
use sessiongate_core::error::{AppError, ErrorKind};
use sessiongate_core::types::Identity;

use super::claims::{Claims, TokenKind};
use super::keys;

/// Creates signed tokens under the configured issuer.
#[derive(Clone)]
pub struct TokenMinter {
    /// Private half of the issuer's key (or the HMAC secret).
    encoding_key: EncodingKey,
    /// JOSE header carrying the signing algorithm.
    header: Header,
    /// Value written to `iss`.
    issuer: String,
}

impl std::fmt::Debug for TokenMinter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenMinter")
            .field("alg", &self.header.alg)
            .field("issuer", &self.issuer)
            .finish()
    }
}

/// A signed token together with the claims it carries.
#[derive(Debug, Clone)]
pub struct MintedToken {
    /// Compact JWS serialization.
    pub token: String,
    /// Claims embedded in `token`.
    pub claims: Claims,
}

/// Converts a lifetime in seconds to a `Duration`, rejecting zero and
/// anything above [`MAX_TOKEN_TTL_SECONDS`].
pub fn token_lifetime(seconds: u64) -> Result<Duration, AppError> {
    i64::try_from(seconds)
        .ok()
        .filter(|s| *s > 0 && seconds <= MAX_TOKEN_TTL_SECONDS)
        .and_then(Duration::try_seconds)
        .ok_or_else(|| {
            AppError::configuration(format!(
                "Token lifetime must be between 1 and {MAX_TOKEN_TTL_SECONDS} seconds, got {seconds}"
            ))
        })
}

impl TokenMinter {
    /// Creates a minter from auth configuration and an already-loaded key.
    pub fn new(config: &AuthConfig, encoding_key: EncodingKey) -> Self {
        Self {
            encoding_key,
            header: Header::new(keys::algorithm(config.algorithm)),
            issuer: config.issuer.clone(),
        }
    }

    /// Creates a minter if `config` provides signing material.
    pub fn from_config(config: &AuthConfig) -> Result<Option<Self>, AppError> {
        Ok(keys::encoding_key(config)?.map(|key| Self::new(config, key)))
    }

    /// The `iss` value written into minted tokens.
    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    /// Signs arbitrary claims.
    pub fn sign(&self, claims: &Claims) -> Result<String, jsonwebtoken::errors::Error> {
        encode(&self.header, claims, &self.encoding_key)
    }

    /// Mints a token of `kind` for `identity`, valid from `now` for `ttl`.
    ///
    /// Every call gets a fresh `jti`, so two tokens minted in the same second
    /// for the same identity still differ.
    pub fn mint(
        &self,
        identity: &Identity,
        kind: TokenKind,
        ttl: Duration,
        now: DateTime<Utc>,
    ) -> Result<MintedToken, AppError> {
        let expires_at = now
            .checked_add_signed(ttl)
            .ok_or_else(|| AppError::configuration("Token expiry is out of range"))?;
        let claims = Claims {
            sub: identity.user_id.to_string(),
            sid: identity.session_id.as_ref().map(ToString::to_string),
            iss: self.issuer.clone(),
            iat: now.timestamp(),
            nbf: Some(now.timestamp()),
            exp: expires_at.timestamp(),
            azp: None,
            jti: Some(Uuid::new_v4().to_string()),
            kind,
        };
        let token = self.sign(&claims).map_err(|e| {
            let message = format!("Failed to encode token: {e}");
            AppError::with_source(ErrorKind::Internal, message, e)
        })?;
        Ok(MintedToken { token, claims })
    }

    /// Mints a short-lived session token, as the token provider would.
    pub fn mint_session_token(
        &self,
        identity: &Identity,
        ttl_seconds: u64,
    ) -> Result<MintedToken, AppError> {
        let ttl = token_lifetime(ttl_seconds)?;
        self.mint(identity, TokenKind::Session, ttl, Utc::now())
    }
}
