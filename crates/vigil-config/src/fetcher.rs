//! Content fetcher configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

const fn default_timeout_secs() -> u64 {
    25
}

const fn default_max_attempts() -> u32 {
    3
}

fn default_user_agent() -> String {
    String::from(
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
         (KHTML, like Gecko) Chrome/123.0.0.0 Safari/537.36",
    )
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FetcherConfig {
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// User agent sent with page requests.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Attempts per URL, including the first (transient failures only).
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
            max_attempts: default_max_attempts(),
        }
    }
}

impl FetcherConfig {
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
