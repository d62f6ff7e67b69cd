//! Token verification and issuance configuration.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Upper bound for any token lifetime (ten years).
pub const MAX_TOKEN_TTL_SECONDS: u64 = 10 * 365 * 24 * 60 * 60;

/// Upper bound for clock skew tolerance (one hour).
pub const MAX_LEEWAY_SECONDS: u64 = 60 * 60;

/// JWT signature algorithms accepted for issuer key material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SigningAlgorithm {
    /// HMAC with SHA-256 (shared secret).
    HS256,
    /// HMAC with SHA-384 (shared secret).
    HS384,
    /// HMAC with SHA-512 (shared secret).
    HS512,
    /// RSASSA-PKCS1-v1_5 with SHA-256.
    RS256,
    /// ECDSA over P-256 with SHA-256.
    ES256,
    /// Ed25519.
    EdDSA,
}

impl SigningAlgorithm {
    /// Whether the algorithm uses a shared secret instead of a key pair.
    pub fn is_symmetric(self) -> bool {
        matches!(self, Self::HS256 | Self::HS384 | Self::HS512)
    }
}

impl fmt::Display for SigningAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::HS256 => "HS256",
            Self::HS384 => "HS384",
            Self::HS512 => "HS512",
            Self::RS256 => "RS256",
            Self::ES256 => "ES256",
            Self::EdDSA => "EdDSA",
        };
        f.write_str(name)
    }
}

/// Issuer key material and token lifetimes.
///
/// The verifier only needs the public half (`public_key_path`, or `secret`
/// for HMAC). The signing half is optional; without it the long-lived
/// issuance route answers with an error payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Expected `iss` claim.
    #[serde(default = "default_issuer")]
    pub issuer: String,
    /// Signature algorithm of the issuer.
    #[serde(default = "default_algorithm")]
    pub algorithm: SigningAlgorithm,
    /// Shared secret for HMAC algorithms.
    #[serde(default)]
    pub secret: Option<String>,
    /// Path to the issuer's PEM public key (asymmetric algorithms).
    #[serde(default)]
    pub public_key_path: Option<String>,
    /// Path to the issuer's PEM private key (asymmetric algorithms, issuance only).
    #[serde(default)]
    pub private_key_path: Option<String>,
    /// Clock skew tolerance applied to `exp` and `nbf`.
    #[serde(default = "default_leeway")]
    pub leeway_seconds: u64,
    /// Lifetime of locally minted short-lived session tokens.
    #[serde(default = "default_short_lived_ttl")]
    pub short_lived_ttl_seconds: u64,
    /// Lifetime of long-lived tokens minted by the issuance route.
    #[serde(default = "default_long_lived_ttl")]
    pub long_lived_ttl_seconds: u64,
    /// Accepted `azp` values. Empty means the claim is not checked.
    #[serde(default)]
    pub authorized_parties: Vec<String>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            issuer: default_issuer(),
            algorithm: default_algorithm(),
            secret: None,
            public_key_path: None,
            private_key_path: None,
            leeway_seconds: default_leeway(),
            short_lived_ttl_seconds: default_short_lived_ttl(),
            long_lived_ttl_seconds: default_long_lived_ttl(),
            authorized_parties: Vec::new(),
        }
    }
}

impl AuthConfig {
    /// Rejects lifetimes and leeway that cannot be represented as timestamps.
    pub fn validate(&self) -> Result<(), AppError> {
        check_ttl("auth.short_lived_ttl_seconds", self.short_lived_ttl_seconds)?;
        check_ttl("auth.long_lived_ttl_seconds", self.long_lived_ttl_seconds)?;
        if self.leeway_seconds > MAX_LEEWAY_SECONDS {
            return Err(AppError::configuration(format!(
                "auth.leeway_seconds must be at most {MAX_LEEWAY_SECONDS}, got {}",
                self.leeway_seconds
            )));
        }
        Ok(())
    }
}

/// Validates a token lifetime in seconds.
pub fn check_ttl(name: &str, seconds: u64) -> Result<(), AppError> {
    if seconds == 0 || seconds > MAX_TOKEN_TTL_SECONDS {
        return Err(AppError::configuration(format!(
            "{name} must be between 1 and {MAX_TOKEN_TTL_SECONDS}, got {seconds}"
        )));
    }
    Ok(())
}

fn default_issuer() -> String {
    "https://sessiongate.local".to_string()
}

fn default_algorithm() -> SigningAlgorithm {
    SigningAlgorithm::HS256
}

fn default_leeway() -> u64 {
    5
}

fn default_short_lived_ttl() -> u64 {
    60
}

/// 30 days.
fn default_long_lived_ttl() -> u64 {
    30 * 24 * 60 * 60
}
