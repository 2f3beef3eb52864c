//! Error types for the AI collaborator client.
//!
//! The taxonomy deliberately separates "not configured" from "failed this
//! time": callers tell users "feature unavailable" for the former and
//! "try again" for the latter instead of collapsing both into an empty
//! result.

use thiserror::Error;

/// Errors that can occur when calling the AI collaborator.
#[derive(Error, Debug)]
pub enum AiClientError {
    /// No credential configured. A valid, expected runtime state - checked
    /// before any I/O is attempted.
    #[error("No API credential configured (set {env_var})")]
    MissingCredential { env_var: &'static str },

    /// Transport-level failure (connection, TLS, timeout)
    #[error("Transport error calling AI service: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service answered with a non-success status
    #[error("AI service returned {status}: {message}")]
    Api { status: u16, message: String },

    /// The response body could not be interpreted against the contract
    #[error("Malformed AI response: {0}")]
    MalformedResponse(String),
}

impl AiClientError {
    /// Whether this failure means the feature is unconfigured rather than
    /// transiently broken.
    pub fn is_unconfigured(&self) -> bool {
        matches!(self, Self::MissingCredential { .. })
    }
}

/// Convenience type alias for Results in this crate.
pub type Result<T> = std::result::Result<T, AiClientError>;
