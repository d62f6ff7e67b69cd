//! Offline token commands: minting dev tokens and verifying tokens locally.

use chrono::{DateTime, Utc};
use clap::Args;
use serde::Serialize;

use sessiongate_auth::{Claims, TokenKind, TokenMinter, TokenVerifier};
use sessiongate_core::config::AppConfig;
use sessiongate_core::error::AppError;
use sessiongate_core::types::Identity;

use crate::output::{self, OutputFormat};

/// Arguments for `mint`
#[derive(Debug, Args)]
pub struct MintArgs {
    /// User id written to `sub`
    #[arg(long)]
    pub user: String,

    /// Session id written to `sid`
    #[arg(long, default_value = "sess_cli")]
    pub session: String,

    /// Lifetime in seconds (defaults to auth.short_lived_ttl_seconds)
    #[arg(long)]
    pub ttl: Option<u64>,
}

/// Arguments for `verify`
#[derive(Debug, Args)]
pub struct VerifyArgs {
    /// Compact JWT, with or without a `Bearer ` prefix
    pub token: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct MintedView {
    token: String,
    user_id: String,
    session_id: String,
    expires_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct VerifiedView {
    user_id: String,
    session_id: String,
    kind: TokenKind,
    issuer: String,
    expires_at: DateTime<Utc>,
    remaining_seconds: u64,
}

impl VerifiedView {
    fn new(claims: &Claims, now: DateTime<Utc>) -> Self {
        let identity = claims.identity();
        Self {
            user_id: identity.user_id.to_string(),
            session_id: identity.session_label().to_string(),
            kind: claims.kind,
            issuer: claims.iss.clone(),
            expires_at: claims.expires_at(),
            remaining_seconds: claims.remaining_ttl_seconds(now),
        }
    }
}

/// Mint a session token with the configured signing key.
pub fn mint(args: &MintArgs, config: &AppConfig, format: OutputFormat) -> Result<(), AppError> {
    let minter = TokenMinter::from_config(&config.auth)?.ok_or_else(|| {
        AppError::configuration(
            "No signing key configured (set auth.secret or auth.private_key_path)",
        )
    })?;
    let identity = Identity::new(args.user.as_str(), args.session.as_str());
    let ttl = args.ttl.unwrap_or(config.auth.short_lived_ttl_seconds);
    let minted = minter.mint_session_token(&identity, ttl)?;

    output::print_item(
        &MintedView {
            token: minted.token,
            user_id: identity.user_id.to_string(),
            session_id: identity.session_label().to_string(),
            expires_at: minted.claims.expires_at(),
        },
        format,
    )
}

/// Verify a token offline, reporting why it was rejected.
pub fn verify(args: &VerifyArgs, config: &AppConfig, format: OutputFormat) -> Result<(), AppError> {
    let verifier = TokenVerifier::from_config(&config.auth)?;
    let token = args.token.trim();
    let token = token
        .strip_prefix("Bearer ")
        .or_else(|| token.strip_prefix("bearer "))
        .unwrap_or(token);

    let now = Utc::now();
    match verifier.verify_at(token, now) {
        Ok(claims) => {
            output::print_success("Token verified");
            output::print_item(&VerifiedView::new(&claims, now), format)
        }
        Err(reason) => Err(AppError::authentication(format!("Token rejected: {reason}"))),
    }
}
