//! Cross-cutting error types for Vigil.
//!
//! Adapter-specific errors (`SlackError`, `FetchError`, `AssessError`) live in
//! their own crates and are converted into [`CapabilityError`] at the trait
//! boundary, so the pipeline only ever sees one error type per capability call.

use std::time::Duration;

use thiserror::Error;

/// Errors returned by the external capability traits.
#[derive(Debug, Error)]
pub enum CapabilityError {
    /// The capability answered, but with nothing usable (e.g. empty page text).
    #[error("{capability} returned no usable content")]
    Empty { capability: &'static str },

    /// The call did not complete within the configured stage timeout.
    #[error("{capability} timed out after {}s", .after.as_secs())]
    Timeout {
        capability: &'static str,
        after: Duration,
    },

    /// The capability rejected the request (API error, bad status, etc.).
    #[error("{capability} failed: {message}")]
    Failed {
        capability: &'static str,
        message: String,
    },

    /// Catch-all for adapter errors carried through unchanged.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CapabilityError {
    /// Shorthand for [`CapabilityError::Failed`].
    pub fn failed(capability: &'static str, message: impl Into<String>) -> Self {
        Self::Failed {
            capability,
            message: message.into(),
        }
    }
}

/// Errors that can be raised by any Vigil crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A pipeline stage transition was attempted that is not allowed.
    #[error("Invalid stage transition: {from} to {to}")]
    InvalidTransition { from: String, to: String },
}
