//! Offline bearer-token verification.
//!
//! A request moves through these states:
//!
//! ```text
//! no header                                  -> Unauthenticated
//! header, not `Bearer <token>` / unparsable  -> Malformed
//! parsed, signature/issuer mismatch          -> InvalidSignature
//! signature ok, outside validity window      -> Expired
//! signature ok, within validity window       -> Accept(Claims)
//! ```
//!
//! The signature is always checked before the clock, so a forged token is
//! reported as `InvalidSignature` whatever expiry it claims.

use chrono::{DateTime, Utc};
use jsonwebtoken::errors::ErrorKind as JwtErrorKind;
use jsonwebtoken::{DecodingKey, Validation, decode};

use sessiongate_core::config::{AuthConfig, MAX_LEEWAY_SECONDS};
use sessiongate_core::error::AppError;

use super::claims::Claims;
use super::keys;

/// The only message ever returned to a rejected caller.
pub const UNAUTHORIZED_MESSAGE: &str = "Invalid or missing token";

/// Why a bearer credential was refused. Internal only; never rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Rejection {
    /// No credential presented.
    #[error("no bearer credential presented")]
    Unauthenticated,
    /// Credential present but unparsable.
    #[error("bearer credential is malformed")]
    Malformed,
    /// Signature, algorithm, issuer or authorized party does not match.
    #[error("token signature is not trusted")]
    InvalidSignature,
    /// Signature valid but `now` falls outside `[nbf, exp)`.
    #[error("token is outside its validity window")]
    Expired,
}

impl From<Rejection> for AppError {
    fn from(_: Rejection) -> Self {
        AppError::authentication(UNAUTHORIZED_MESSAGE)
    }
}

/// Extracts the token from an `Authorization` header value.
pub fn bearer_token(header: Option<&str>) -> Result<&str, Rejection> {
    let value = header.ok_or(Rejection::Unauthenticated)?;
    let (scheme, token) = value
        .trim()
        .split_once(|c: char| c.is_ascii_whitespace())
        .ok_or(Rejection::Malformed)?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return Err(Rejection::Malformed);
    }
    let token = token.trim();
    if token.is_empty() {
        return Err(Rejection::Malformed);
    }
    Ok(token)
}

/// Validates bearer tokens against the issuer's public key material.
///
/// Immutable after construction; share it behind an `Arc`.
#[derive(Clone)]
pub struct TokenVerifier {
    /// Public half of the issuer's key (or the HMAC secret).
    decoding_key: DecodingKey,
    /// Signature, algorithm and issuer checks. Time checks are done here.
    validation: Validation,
    /// Clock skew tolerance in seconds.
    leeway_seconds: i64,
    /// Accepted `azp` values; empty disables the check.
    authorized_parties: Vec<String>,
}

impl std::fmt::Debug for TokenVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenVerifier")
            .field("validation", &self.validation)
            .field("leeway_seconds", &self.leeway_seconds)
            .field("authorized_parties", &self.authorized_parties)
            .finish()
    }
}

impl TokenVerifier {
    /// Creates a verifier from auth configuration and an already-loaded key.
    pub fn new(config: &AuthConfig, decoding_key: DecodingKey) -> Self {
        let mut validation = Validation::new(keys::algorithm(config.algorithm));
        // exp/nbf are checked against an explicit clock in `verify_at`.
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.validate_aud = false;
        validation.leeway = 0;
        validation.set_issuer(&[config.issuer.as_str()]);
        validation.set_required_spec_claims(&["exp", "sub", "iss"]);

        Self {
            decoding_key,
            validation,
            // Bounded by MAX_LEEWAY_SECONDS, so the cast cannot wrap.
            leeway_seconds: config.leeway_seconds.min(MAX_LEEWAY_SECONDS) as i64,
            authorized_parties: config.authorized_parties.clone(),
        }
    }

    /// Creates a verifier, loading the key described by `config`.
    pub fn from_config(config: &AuthConfig) -> Result<Self, AppError> {
        config.validate()?;
        let key = keys::decoding_key(config)?;
        Ok(Self::new(config, key))
    }

    /// Verifies a raw `Authorization` header value against the wall clock.
    pub fn verify_header(&self, header: Option<&str>) -> Result<Claims, Rejection> {
        self.verify_header_at(header, Utc::now())
    }

    /// Verifies a raw `Authorization` header value at `now`.
    pub fn verify_header_at(
        &self,
        header: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<Claims, Rejection> {
        let token = bearer_token(header)?;
        self.verify_at(token, now)
    }

    /// Verifies a bare token against the wall clock.
    pub fn verify(&self, token: &str) -> Result<Claims, Rejection> {
        self.verify_at(token, Utc::now())
    }

    /// Verifies a bare token at `now`.
    ///
    /// Pure in `(token, now, key material)`; performs no I/O.
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, Rejection> {
        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| classify(e.kind()))?
            .claims;

        if claims.sub.trim().is_empty() {
            return Err(Rejection::Malformed);
        }

        if let Some(azp) = claims.azp.as_deref() {
            if !self.authorized_parties.is_empty()
                && !self.authorized_parties.iter().any(|p| p == azp)
            {
                return Err(Rejection::InvalidSignature);
            }
        }

        if claims.is_expired_at(now, self.leeway_seconds)
            || claims.is_premature_at(now, self.leeway_seconds)
        {
            return Err(Rejection::Expired);
        }

        Ok(claims)
    }
}

fn classify(kind: &JwtErrorKind) -> Rejection {
    match kind {
        JwtErrorKind::InvalidSignature
        | JwtErrorKind::InvalidAlgorithm
        | JwtErrorKind::InvalidIssuer
        | JwtErrorKind::InvalidAudience
        | JwtErrorKind::InvalidSubject => Rejection::InvalidSignature,
        JwtErrorKind::ExpiredSignature | JwtErrorKind::ImmatureSignature => Rejection::Expired,
        _ => Rejection::Malformed,
    }
}
