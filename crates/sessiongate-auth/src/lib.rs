//! # sessiongate-auth
//!
//! Session-token verification and long-lived token issuance for SessionGate.
//!
//! ## Modules
//!
//! - `jwt`: claims, issuer key material, offline verification and minting
//! - `issuer`: long-lived token issuance from an already-verified session
//!
//! Verification never calls the token provider: a token is checked against
//! the issuer's public key material and the clock only.

pub mod issuer;
pub mod jwt;

pub use issuer::{IssuanceError, LongLivedIssuer, LongLivedToken};
pub use jwt::{Claims, Rejection, TokenKind, TokenMinter, TokenVerifier};
