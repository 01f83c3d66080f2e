use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("{url} has no readable text")]
    Empty { url: String },

    #[error("invalid extraction pattern: {0}")]
    Pattern(#[from] regex::Error),
}

impl FetchError {
    /// Whether another attempt might succeed.
    ///
    /// Server errors, 429, timeouts and connection failures are transient;
    /// other client errors and empty pages are not.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Http(e) => e.is_timeout() || e.is_connect(),
            Self::Status { status, .. } => *status == 429 || *status >= 500,
            Self::Empty { .. } | Self::Pattern(_) => false,
        }
    }
}
