//! # sessiongate-api
//!
//! HTTP API layer for SessionGate built on Axum.
//!
//! Public routes answer anyone. Everything under `/api/protected` sits
//! behind the identity gate: a bearer token is verified offline and the
//! resolved identity is the only thing handlers ever see.

pub mod app;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, run_server};
pub use error::ApiError;
pub use state::AppState;
