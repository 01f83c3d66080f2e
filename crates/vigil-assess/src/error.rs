//! Assessor error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AssessError {
    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The endpoint returned a non-success HTTP status code.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The endpoint returned 429 Too Many Requests.
    #[error("rate limited, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    /// The completion carried no message content.
    #[error("completion contained no text")]
    EmptyCompletion,
}
