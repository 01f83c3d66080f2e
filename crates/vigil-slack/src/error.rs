//! Slack client error types.

use thiserror::Error;

/// Errors that can occur when talking to the Slack Web API.
#[derive(Debug, Error)]
pub enum SlackError {
    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Slack returned a non-success HTTP status code.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Response body.
        message: String,
    },

    /// Slack answered `ok: false`.
    #[error("{method} failed: {error}")]
    Slack {
        /// Web API method name (e.g. `reactions.add`).
        method: String,
        /// Slack error code (e.g. `channel_not_found`).
        error: String,
    },

    /// Failed to parse a Slack response.
    #[error("parse error: {0}")]
    Parse(String),

    /// No channel matched the configured name.
    #[error("channel '{0}' not found")]
    ChannelNotFound(String),

    /// Slack returned 429 Too Many Requests.
    #[error("rate limited, retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds to wait before retrying.
        retry_after_secs: u64,
    },
}

impl SlackError {
    /// Slack error code for `ok: false` responses.
    #[must_use]
    pub fn slack_code(&self) -> Option<&str> {
        match self {
            Self::Slack { error, .. } => Some(error),
            _ => None,
        }
    }
}
