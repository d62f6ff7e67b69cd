//! `sessiongate-server`: the bearer-token gated demo API.

use tracing_subscriber::{EnvFilter, fmt};

use sessiongate_core::config::{AppConfig, LogFormat};
use sessiongate_core::error::AppError;

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    tracing::info!("Starting SessionGate v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = sessiongate_api::run_server(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Load configuration from `config/` and the environment
fn load_configuration() -> Result<AppConfig, AppError> {
    let env = std::env::var("SESSIONGATE_ENV").unwrap_or_else(|_| "development".to_string());
    AppConfig::load(&env)
}

/// Installs the global subscriber. `RUST_LOG` wins over `logging.level`.
fn init_logging(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));
    let builder = fmt().with_env_filter(filter).with_target(true);

    match config.logging.format {
        LogFormat::Json => builder.json().with_current_span(false).init(),
        LogFormat::Pretty => builder.pretty().init(),
    }
}
