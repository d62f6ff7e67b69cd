//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use sessiongate_auth::{LongLivedIssuer, TokenVerifier};
use sessiongate_core::config::AppConfig;
use sessiongate_core::error::AppError;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`. Everything in here
/// is immutable after startup; no mutable state crosses requests.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Offline bearer-token verifier
    pub verifier: Arc<TokenVerifier>,
    /// Long-lived token issuer
    pub issuer: Arc<LongLivedIssuer>,
}

impl AppState {
    /// Builds state from explicit components.
    pub fn new(config: AppConfig, verifier: TokenVerifier, issuer: LongLivedIssuer) -> Self {
        Self {
            config: Arc::new(config),
            verifier: Arc::new(verifier),
            issuer: Arc::new(issuer),
        }
    }

    /// Loads key material described by `config` and builds state.
    pub fn from_config(config: AppConfig) -> Result<Self, AppError> {
        let verifier = TokenVerifier::from_config(&config.auth)?;
        let issuer = LongLivedIssuer::from_config(&config.auth)?;
        if !issuer.is_enabled() {
            tracing::warn!("No signing key configured; long-lived token issuance is disabled");
        }
        Ok(Self::new(config, verifier, issuer))
    }
}
