//! JSON bodies exchanged between the API and its clients.
//!
//! Field names are camelCase on the wire.

use serde::{Deserialize, Serialize};

/// Standard API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Machine-readable error code.
    pub error: String,
    /// Human-readable message.
    pub message: String,
    /// Optional details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// `GET /api/public/info`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicInfo {
    pub message: String,
    pub app: String,
}

/// `GET /api/health`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    /// Unix time in milliseconds.
    pub timestamp: i64,
}

/// `POST /api/public/verify-token` request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VerifyTokenRequest {
    #[serde(default)]
    pub token: Option<String>,
}

/// `POST /api/public/verify-token` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyTokenResponse {
    /// Absent when the request itself was invalid (no token supplied).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verified: Option<bool>,
    /// Verified claims.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// `GET /api/protected/user`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserEcho {
    pub message: String,
    pub user_id: String,
    pub session_id: String,
}

/// `GET /api/protected/data`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProtectedData {
    pub user_id: String,
    pub secret_data: String,
    pub items: Vec<String>,
}

/// A freshly minted long-lived token. The only place its value is ever sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssuedToken {
    pub jwt: String,
    pub user_id: String,
    pub session_id: String,
    pub expires_in_seconds: u64,
}

/// Issuance was refused; the request itself succeeded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssuanceDeclined {
    pub error: String,
}

/// `POST /api/protected/generate-long-lived-token`
///
/// Clients must treat the presence of `error` as an issuance failure,
/// distinct from a transport failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IssuanceResponse {
    Issued(IssuedToken),
    Declined(IssuanceDeclined),
}
