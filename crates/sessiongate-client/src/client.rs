//! Typed client for the SessionGate HTTP API.

use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;

use sessiongate_core::config::ClientConfig;
use sessiongate_core::types::{
    HealthStatus, IssuanceResponse, IssuedToken, ProtectedData, PublicInfo, UserEcho,
    VerifyTokenRequest, VerifyTokenResponse,
};

use crate::principal::Principal;
use crate::signer::RequestSigner;

/// Errors returned by [`ApiClient`].
///
/// Identity rejection and transport failure are kept apart so callers can
/// tell "sign in again" from "try again later".
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The server rejected the caller's identity (HTTP 401).
    #[error("Unauthorized: the server rejected the session token")]
    Unauthorized,
    /// The server could not be reached.
    #[error("Server unreachable: {0}")]
    Unreachable(#[source] reqwest::Error),
    /// The issuance route answered with an error payload.
    #[error("Token issuance declined: {0}")]
    IssuanceDeclined(String),
    /// Any other non-success status.
    #[error("Unexpected status {status}: {body}")]
    UnexpectedStatus {
        /// HTTP status code.
        status: u16,
        /// Response body as text.
        body: String,
    },
    /// The response body did not match the expected shape.
    #[error("Invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
    /// The client could not be constructed.
    #[error("Client configuration error: {0}")]
    Configuration(String),
}

/// HTTP client that signs every call for the current principal.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: Url,
    signer: RequestSigner,
}

impl ApiClient {
    /// Creates a client for `base_url`.
    pub fn new(base_url: &str, signer: RequestSigner) -> Result<Self, ClientError> {
        Self::with_timeout(base_url, signer, Duration::from_secs(30))
    }

    /// Creates a client from configuration.
    pub fn from_config(
        config: &ClientConfig,
        principal: Option<Principal>,
    ) -> Result<Self, ClientError> {
        Self::with_timeout(
            &config.base_url,
            RequestSigner::new(principal),
            Duration::from_secs(config.timeout_seconds),
        )
    }

    fn with_timeout(
        base_url: &str,
        signer: RequestSigner,
        timeout: Duration,
    ) -> Result<Self, ClientError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| ClientError::Configuration(format!("invalid base URL '{base_url}': {e}")))?;
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ClientError::Configuration(e.to_string()))?;
        Ok(Self {
            http,
            base_url,
            signer,
        })
    }

    /// Base URL all paths are resolved against.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// GET /api/health
    pub async fn health(&self) -> Result<HealthStatus, ClientError> {
        self.send_json(self.http.get(self.url("/api/health")?)).await
    }

    /// GET /api/public/info
    pub async fn public_info(&self) -> Result<PublicInfo, ClientError> {
        self.send_json(self.http.get(self.url("/api/public/info")?)).await
    }

    /// POST /api/public/verify-token
    ///
    /// The endpoint answers 400 for a missing or invalid token; that body is
    /// returned as a normal response with `verified` unset or `false`.
    pub async fn verify_token(&self, token: &str) -> Result<VerifyTokenResponse, ClientError> {
        let request = self
            .http
            .post(self.url("/api/public/verify-token")?)
            .json(&VerifyTokenRequest {
                token: Some(token.to_string()),
            });
        let response = self.send(request).await?;
        match response.status() {
            StatusCode::OK | StatusCode::BAD_REQUEST => decode(response).await,
            _ => Err(unexpected(response).await),
        }
    }

    /// GET /api/protected/user
    pub async fn user_info(&self) -> Result<UserEcho, ClientError> {
        self.send_json(self.http.get(self.url("/api/protected/user")?))
            .await
    }

    /// GET /api/protected/data
    pub async fn protected_data(&self) -> Result<ProtectedData, ClientError> {
        self.send_json(self.http.get(self.url("/api/protected/data")?))
            .await
    }

    /// POST /api/protected/generate-long-lived-token
    pub async fn generate_long_lived_token(&self) -> Result<IssuedToken, ClientError> {
        let request = self
            .http
            .post(self.url("/api/protected/generate-long-lived-token")?);
        match self.send_json(request).await? {
            IssuanceResponse::Issued(token) => Ok(token),
            IssuanceResponse::Declined(declined) => {
                Err(ClientError::IssuanceDeclined(declined.error))
            }
        }
    }

    fn url(&self, path: &str) -> Result<Url, ClientError> {
        self.base_url
            .join(path)
            .map_err(|e| ClientError::Configuration(format!("invalid path '{path}': {e}")))
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, ClientError> {
        let response = self
            .signer
            .sign(request)
            .await
            .send()
            .await
            .map_err(ClientError::Unreachable)?;
        if response.status() == StatusCode::UNAUTHORIZED {
            return Err(ClientError::Unauthorized);
        }
        Ok(response)
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, ClientError> {
        let response = self.send(request).await?;
        if !response.status().is_success() {
            return Err(unexpected(response).await);
        }
        decode(response).await
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let body = response.text().await.map_err(ClientError::Unreachable)?;
    Ok(serde_json::from_str(&body)?)
}

async fn unexpected(response: Response) -> ClientError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    ClientError::UnexpectedStatus { status, body }
}
