//! JWT token encoding, decoding, claims and key management.

pub mod claims;
pub mod decoder;
pub mod encoder;
pub mod keys;

pub use claims::{Claims, TokenKind};
pub use decoder::{Rejection, TokenVerifier, UNAUTHORIZED_MESSAGE, bearer_token};
pub use encoder::{MintedToken, TokenMinter, token_lifetime};
