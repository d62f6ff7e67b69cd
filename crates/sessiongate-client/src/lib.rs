//! # sessiongate-client
//!
//! Client side of the session-token protocol.
//!
//! ## Modules
//!
//! - `provider`: sources of short-lived tokens for the signed-in principal
//! - `principal`: the signed-in user and the session handle that mints tokens
//! - `signer`: attaches `Authorization: Bearer` to outbound requests
//! - `client`: typed calls against the SessionGate HTTP API

pub mod client;
pub mod principal;
pub mod provider;
pub mod signer;

pub use client::{ApiClient, ClientError};
pub use principal::Principal;
pub use provider::{
    ProviderError, SignedOutProvider, SigningTokenProvider, StaticTokenProvider, TokenProvider,
};
pub use signer::RequestSigner;
