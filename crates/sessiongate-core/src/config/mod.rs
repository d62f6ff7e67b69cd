//! Layered configuration.
//!
//! Sources, lowest precedence first:
//! 1. `{dir}/default.toml`
//! 2. `{dir}/{env}.toml`
//! 3. `SESSIONGATE__SECTION__KEY` environment variables
//!
//! Every file is optional; a missing section falls back to its `Default`.

pub mod auth;
pub mod client;
pub mod logging;
pub mod server;

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

pub use self::auth::{AuthConfig, MAX_LEEWAY_SECONDS, MAX_TOKEN_TTL_SECONDS, SigningAlgorithm};
pub use self::client::ClientConfig;
pub use self::logging::{LogFormat, LoggingConfig};
pub use self::server::{CorsConfig, ServerConfig};

use crate::error::AppError;

/// Directory searched by [`AppConfig::load`].
pub const DEFAULT_CONFIG_DIR: &str = "config";

const ENV_PREFIX: &str = "SESSIONGATE";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub auth: AuthConfig,
    /// Used by the CLI and other programmatic callers, not by the server.
    pub client: ClientConfig,
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Loads `config/default.toml`, the `{env}` overlay and the environment.
    pub fn load(env: &str) -> Result<Self, AppError> {
        Self::load_from(DEFAULT_CONFIG_DIR, env)
    }

    /// Same as [`AppConfig::load`] with an explicit directory.
    pub fn load_from(dir: &str, env: &str) -> Result<Self, AppError> {
        let overrides = Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("__")
            .separator("__")
            .list_separator(",")
            .with_list_parse_key("auth.authorized_parties")
            .try_parsing(true);

        let merged = Config::builder()
            .add_source(File::with_name(&format!("{dir}/default")).required(false))
            .add_source(File::with_name(&format!("{dir}/{env}")).required(false))
            .add_source(overrides)
            .build()?;

        let config: Self = merged.try_deserialize()?;
        config.auth.validate()?;
        tracing::debug!(
            env,
            algorithm = %config.auth.algorithm,
            issuer = %config.auth.issuer,
            "Configuration loaded"
        );
        Ok(config)
    }
}
