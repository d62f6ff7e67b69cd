//! Commands that call the SessionGate HTTP API.

use sessiongate_client::ApiClient;
use sessiongate_core::error::AppError;

use super::client_error;
use crate::output::{self, OutputFormat};

/// GET /api/public/info
pub async fn public(client: &ApiClient, format: OutputFormat) -> Result<(), AppError> {
    let info = client.public_info().await.map_err(client_error)?;
    output::print_item(&info, format)
}

/// GET /api/health
pub async fn health(client: &ApiClient, format: OutputFormat) -> Result<(), AppError> {
    let status = client.health().await.map_err(client_error)?;
    output::print_item(&status, format)
}

/// GET /api/protected/user
pub async fn whoami(client: &ApiClient, format: OutputFormat) -> Result<(), AppError> {
    let echo = client.user_info().await.map_err(client_error)?;
    output::print_item(&echo, format)
}

/// GET /api/protected/data
pub async fn data(client: &ApiClient, format: OutputFormat) -> Result<(), AppError> {
    let data = client.protected_data().await.map_err(client_error)?;
    output::print_item(&data, format)
}

/// POST /api/protected/generate-long-lived-token
pub async fn issue(client: &ApiClient, format: OutputFormat) -> Result<(), AppError> {
    let issued = client
        .generate_long_lived_token()
        .await
        .map_err(client_error)?;
    output::print_success(&format!(
        "Long-lived token issued for {} (expires in {}s); pass it with --token or SESSIONGATE_TOKEN",
        issued.user_id, issued.expires_in_seconds
    ));
    output::print_item(&issued, format)
}
