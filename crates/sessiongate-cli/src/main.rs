//! `sessiongate` command-line tool.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod commands;
mod output;

use commands::Cli;

/// Exit status when the server rejected the caller's token.
const EXIT_UNAUTHORIZED: u8 = 2;

#[tokio::main]
async fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match Cli::parse().execute().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::print_error(&e.to_string());
            if e.is_authentication() {
                ExitCode::from(EXIT_UNAUTHORIZED)
            } else {
                ExitCode::FAILURE
            }
        }
    }
}
