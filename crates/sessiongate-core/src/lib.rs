//! # sessiongate-core
//!
//! Core crate for SessionGate. Contains configuration schemas, the resolved
//! caller [`Identity`], the JSON payloads exchanged between client and
//! server, and the unified error system.
//!
//! This crate has **no** internal dependencies on other SessionGate crates.

pub mod config;
pub mod error;
pub mod types;

pub use error::AppError;
pub use types::Identity;
