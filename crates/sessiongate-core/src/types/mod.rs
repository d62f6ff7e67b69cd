//! Core type definitions used across the SessionGate workspace.

pub mod id;
pub mod identity;
pub mod payload;

pub use id::{SessionId, UserId};
pub use identity::Identity;
pub use payload::{
    ApiErrorResponse, HealthStatus, IssuanceDeclined, IssuanceResponse, IssuedToken,
    ProtectedData, PublicInfo, UserEcho, VerifyTokenRequest, VerifyTokenResponse,
};
