//! # vigil-fetch
//!
//! Retrieves a linked page and reduces it to readable text for assessment.
//!
//! [`HttpFetcher`] implements [`ContentFetcher`]: it sends a browser-like
//! user agent, retries transient failures with capped backoff, and runs HTML
//! responses through [`TextExtractor`]. Non-HTML text bodies pass through
//! trimmed.

pub mod extract;
pub mod retry;

mod error;

pub use error::FetchError;
pub use extract::TextExtractor;
pub use retry::RetryConfig;

use async_trait::async_trait;
use vigil_config::FetcherConfig;
use vigil_core::capabilities::ContentFetcher;
use vigil_core::errors::CapabilityError;

use crate::extract::looks_like_html;

const CAPABILITY: &str = "fetch";

/// Page fetcher backed by `reqwest`.
#[derive(Debug)]
pub struct HttpFetcher {
    http: reqwest::Client,
    retry: RetryConfig,
    extractor: TextExtractor,
}

impl HttpFetcher {
    /// Build a fetcher from the `[fetcher]` config section.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] if the HTTP client cannot be built or an
    /// extraction pattern fails to compile.
    pub fn from_config(config: &FetcherConfig) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout())
            .build()?;
        let retry = RetryConfig {
            max_attempts: config.max_attempts,
            ..RetryConfig::default()
        };
        Ok(Self {
            http,
            retry,
            extractor: TextExtractor::new()?,
        })
    }

    /// Override the retry policy.
    #[must_use]
    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// Fetch `url` and return its readable text, retrying transient failures.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Status`] for a non-success response,
    /// [`FetchError::Empty`] if nothing readable remains after extraction, or
    /// [`FetchError::Http`] for transport failures.
    pub async fn fetch_text(&self, url: &str) -> Result<String, FetchError> {
        let text = self.retry.run(url, move || self.fetch_once(url)).await?;
        if text.trim().is_empty() {
            return Err(FetchError::Empty {
                url: url.to_string(),
            });
        }
        tracing::debug!(url, chars = text.chars().count(), "fetched page text");
        Ok(text)
    }

    async fn fetch_once(&self, url: &str) -> Result<String, FetchError> {
        let resp = self.http.get(url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let content_type = resp
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = resp.text().await?;

        if looks_like_html(content_type.as_deref(), &body) {
            Ok(self.extractor.extract(&body))
        } else {
            Ok(body.trim().to_string())
        }
    }
}

#[async_trait]
impl ContentFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String, CapabilityError> {
        self.fetch_text(url).await.map_err(|e| match e {
            FetchError::Empty { .. } => CapabilityError::Empty {
                capability: CAPABILITY,
            },
            FetchError::Status { status, .. } => {
                CapabilityError::failed(CAPABILITY, format!("HTTP {status}"))
            }
            other => CapabilityError::Other(other.into()),
        })
    }
}
