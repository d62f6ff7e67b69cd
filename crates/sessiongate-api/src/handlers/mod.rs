//! HTTP handlers.

pub mod protected;
pub mod public;
