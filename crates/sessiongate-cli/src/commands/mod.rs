//! CLI command definitions and dispatch.

pub mod api;
pub mod token;

use std::sync::Arc;

use clap::{Args, Parser, Subcommand};

use sessiongate_client::{
    ApiClient, ClientError, Principal, SigningTokenProvider, StaticTokenProvider,
};
use sessiongate_core::config::AppConfig;
use sessiongate_core::error::AppError;
use sessiongate_core::types::Identity;

use crate::output::OutputFormat;

/// SessionGate: session-token propagation and verification
#[derive(Debug, Parser)]
#[command(name = "sessiongate", version, about, long_about = None)]
pub struct Cli {
    /// Directory holding default.toml and per-environment overlays
    #[arg(long, default_value = "config")]
    pub config_dir: String,

    /// Configuration environment overlay
    #[arg(long, env = "SESSIONGATE_ENV", default_value = "development")]
    pub env: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "pretty")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Mint a short-lived development session token
    Mint(token::MintArgs),
    /// Verify a token offline with the configured issuer key
    Verify(token::VerifyArgs),
    /// Call GET /api/public/info
    Public(CallerArgs),
    /// Call GET /api/health
    Health(CallerArgs),
    /// Call GET /api/protected/user
    Whoami(CallerArgs),
    /// Call GET /api/protected/data
    Data(CallerArgs),
    /// Request a long-lived token from POST /api/protected/generate-long-lived-token
    Issue(CallerArgs),
}

/// Who the API calls are made as
#[derive(Debug, Clone, Args)]
pub struct CallerArgs {
    /// Server base URL (defaults to client.base_url)
    #[arg(long)]
    pub base_url: Option<String>,

    /// Bearer token to send, e.g. a long-lived token
    #[arg(long, env = "SESSIONGATE_TOKEN", hide_env_values = true, conflicts_with = "user")]
    pub token: Option<String>,

    /// Mint a fresh session token per request for this user
    #[arg(long)]
    pub user: Option<String>,

    /// Session id for minted tokens
    #[arg(long, default_value = "sess_cli", requires = "user")]
    pub session: String,
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        let config = AppConfig::load_from(&self.config_dir, &self.env)?;
        match &self.command {
            Commands::Mint(args) => token::mint(args, &config, self.format),
            Commands::Verify(args) => token::verify(args, &config, self.format),
            Commands::Public(args) => api::public(&caller(args, &config)?, self.format).await,
            Commands::Health(args) => api::health(&caller(args, &config)?, self.format).await,
            Commands::Whoami(args) => api::whoami(&caller(args, &config)?, self.format).await,
            Commands::Data(args) => api::data(&caller(args, &config)?, self.format).await,
            Commands::Issue(args) => api::issue(&caller(args, &config)?, self.format).await,
        }
    }
}

/// Builds the API client for the principal described by `args`.
///
/// `--token` wins; `--user` signs in locally with the configured key;
/// otherwise calls go out signed out.
pub fn caller(args: &CallerArgs, config: &AppConfig) -> Result<ApiClient, AppError> {
    let principal = if let Some(token) = args.token.as_deref() {
        Some(Principal::new("cli", Arc::new(StaticTokenProvider::new(token))))
    } else if let Some(user) = args.user.as_deref() {
        let identity = Identity::new(user, args.session.as_str());
        let provider = SigningTokenProvider::from_config(&config.auth, identity)?;
        Some(Principal::new(user, Arc::new(provider)))
    } else {
        None
    };

    let mut client_config = config.client.clone();
    if let Some(base_url) = &args.base_url {
        client_config.base_url = base_url.clone();
    }
    tracing::debug!(
        base_url = %client_config.base_url,
        principal = principal.as_ref().map(|p| p.user_id.as_str()).unwrap_or("signed out"),
        "Calling SessionGate API"
    );

    ApiClient::from_config(&client_config, principal).map_err(client_error)
}

/// Maps client failures onto the CLI's error type.
pub fn client_error(err: ClientError) -> AppError {
    match err {
        ClientError::Unauthorized => AppError::authentication(
            "Unauthorized: token missing, expired or not issued by this server",
        ),
        ClientError::Configuration(msg) => AppError::configuration(msg),
        other => AppError::upstream(other.to_string()),
    }
}
