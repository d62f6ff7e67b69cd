//! Error type shared by every SessionGate crate.
//!
//! Verifier rejections, issuance failures and client failures all end up as
//! an [`AppError`] before they cross a crate boundary.

use std::error::Error as StdError;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

type BoxedCause = Box<dyn StdError + Send + Sync>;

/// Broad category of an [`AppError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    /// The caller's session token was missing or not accepted.
    Authentication,
    /// Keys, secrets or settings are missing or unusable.
    Configuration,
    /// The SessionGate server could not be reached or answered unexpectedly.
    Upstream,
    /// Anything else.
    Internal,
}

impl ErrorKind {
    /// Stable upper-case code for logs and CLI output.
    pub fn code(self) -> &'static str {
        match self {
            Self::Authentication => "AUTHENTICATION",
            Self::Configuration => "CONFIGURATION",
            Self::Upstream => "UPSTREAM",
            Self::Internal => "INTERNAL",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Categorized error with an optional cause chain.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct AppError {
    /// Category.
    pub kind: ErrorKind,
    /// Human-readable message. Never contains token material.
    pub message: String,
    /// Underlying cause, if any.
    #[source]
    pub source: Option<BoxedCause>,
}

impl AppError {
    /// Error of `kind` with no cause.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Error of `kind` wrapping `cause`.
    pub fn with_source(
        kind: ErrorKind,
        message: impl Into<String>,
        cause: impl StdError + Send + Sync + 'static,
    ) -> Self {
        Self {
            source: Some(Box::new(cause)),
            ..Self::new(kind, message)
        }
    }

    pub fn authentication(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Authentication, message)
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    pub fn upstream(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Upstream, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }

    /// True for [`ErrorKind::Authentication`].
    pub fn is_authentication(&self) -> bool {
        self.kind == ErrorKind::Authentication
    }
}

/// The cause is not cloneable; clones keep kind and message only.
impl Clone for AppError {
    fn clone(&self) -> Self {
        Self::new(self.kind, self.message.clone())
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        let message = format!("Invalid configuration: {err}");
        Self::with_source(ErrorKind::Configuration, message, err)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        let message = format!("JSON error: {err}");
        Self::with_source(ErrorKind::Internal, message, err)
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        let message = format!("I/O failure: {err}");
        Self::with_source(ErrorKind::Internal, message, err)
    }
}
