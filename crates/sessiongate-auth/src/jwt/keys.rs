//! Issuer key material loading.
//!
//! HMAC algorithms use `auth.secret` for both halves. Asymmetric algorithms
//! read PEM files: the public key is mandatory (verification), the private
//! key is optional (issuance only).

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey};

use sessiongate_core::config::{AuthConfig, SigningAlgorithm};
use sessiongate_core::error::AppError;

/// Maps the configured algorithm onto `jsonwebtoken`'s.
pub fn algorithm(alg: SigningAlgorithm) -> Algorithm {
    match alg {
        SigningAlgorithm::HS256 => Algorithm::HS256,
        SigningAlgorithm::HS384 => Algorithm::HS384,
        SigningAlgorithm::HS512 => Algorithm::HS512,
        SigningAlgorithm::RS256 => Algorithm::RS256,
        SigningAlgorithm::ES256 => Algorithm::ES256,
        SigningAlgorithm::EdDSA => Algorithm::EdDSA,
    }
}

/// Loads the verification key described by `config`.
pub fn decoding_key(config: &AuthConfig) -> Result<DecodingKey, AppError> {
    if config.algorithm.is_symmetric() {
        let secret = require_secret(config)?;
        return Ok(DecodingKey::from_secret(secret.as_bytes()));
    }

    let path = config.public_key_path.as_deref().ok_or_else(|| {
        AppError::configuration(format!(
            "auth.public_key_path is required for {}",
            config.algorithm
        ))
    })?;
    let pem = read_pem(path)?;
    decoding_key_from_pem(config.algorithm, &pem)
}

/// Loads the signing key described by `config`, if one is configured.
pub fn encoding_key(config: &AuthConfig) -> Result<Option<EncodingKey>, AppError> {
    if config.algorithm.is_symmetric() {
        let secret = require_secret(config)?;
        return Ok(Some(EncodingKey::from_secret(secret.as_bytes())));
    }

    match config.private_key_path.as_deref() {
        Some(path) => {
            let pem = read_pem(path)?;
            encoding_key_from_pem(config.algorithm, &pem).map(Some)
        }
        None => Ok(None),
    }
}

/// Parses a PEM public key for an asymmetric algorithm.
pub fn decoding_key_from_pem(alg: SigningAlgorithm, pem: &[u8]) -> Result<DecodingKey, AppError> {
    let key = match alg {
        SigningAlgorithm::RS256 => DecodingKey::from_rsa_pem(pem),
        SigningAlgorithm::ES256 => DecodingKey::from_ec_pem(pem),
        SigningAlgorithm::EdDSA => DecodingKey::from_ed_pem(pem),
        SigningAlgorithm::HS256 | SigningAlgorithm::HS384 | SigningAlgorithm::HS512 => {
            return Err(AppError::configuration(format!(
                "{alg} uses a shared secret, not a PEM key"
            )));
        }
    };
    key.map_err(|e| AppError::configuration(format!("Invalid {alg} public key: {e}")))
}

/// Parses a PEM private key for an asymmetric algorithm.
pub fn encoding_key_from_pem(alg: SigningAlgorithm, pem: &[u8]) -> Result<EncodingKey, AppError> {
    let key = match alg {
        SigningAlgorithm::RS256 => EncodingKey::from_rsa_pem(pem),
        SigningAlgorithm::ES256 => EncodingKey::from_ec_pem(pem),
        SigningAlgorithm::EdDSA => EncodingKey::from_ed_pem(pem),
        SigningAlgorithm::HS256 | SigningAlgorithm::HS384 | SigningAlgorithm::HS512 => {
            return Err(AppError::configuration(format!(
                "{alg} uses a shared secret, not a PEM key"
            )));
        }
    };
    key.map_err(|e| AppError::configuration(format!("Invalid {alg} private key: {e}")))
}

fn require_secret(config: &AuthConfig) -> Result<&str, AppError> {
    match config.secret.as_deref() {
        Some(secret) if !secret.is_empty() => Ok(secret),
        _ => Err(AppError::configuration(format!(
            "auth.secret is required for {}",
            config.algorithm
        ))),
    }
}

fn read_pem(path: &str) -> Result<Vec<u8>, AppError> {
    std::fs::read(path).map_err(|e| {
        AppError::with_source(
            sessiongate_core::error::ErrorKind::Configuration,
            format!("Failed to read key file '{path}'"),
            e,
        )
    })
}
