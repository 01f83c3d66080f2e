//! # vigil-slack
//!
//! Slack Web API client for Vigil.
//!
//! Covers the handful of methods the monitor needs:
//! - `auth.test` (own bot user id)
//! - `conversations.list` (channel name resolution)
//! - `conversations.history` (message windows)
//! - `chat.postMessage` (thread replies and direct messages)
//! - `reactions.add` (severity markers)
//! - `users.lookupByEmail` (alert recipients given as email)
//!
//! [`SlackClient`] implements [`MessageSource`] so the monitor can run against
//! it or against an in-memory fake.

pub mod auth;
pub mod channels;
pub mod chat;
pub mod history;
pub mod reactions;
pub mod users;

mod error;
mod http;

pub use error::SlackError;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use vigil_core::capabilities::{HistoryPage, MessageSource};
use vigil_core::errors::CapabilityError;

use crate::http::{check_response, decode_envelope};

/// Default Slack Web API base URL.
pub const DEFAULT_API_BASE_URL: &str = "https://slack.com/api";

/// Capability name reported in [`CapabilityError`]s.
const CAPABILITY: &str = "slack";

/// HTTP client for the Slack Web API, authenticated with a bot token.
#[derive(Debug, Clone)]
pub struct SlackClient {
    http: reqwest::Client,
    token: String,
    base_url: String,
}

impl SlackClient {
    /// Create a client for `base_url` (normally [`DEFAULT_API_BASE_URL`]).
    ///
    /// # Errors
    ///
    /// Returns [`SlackError::Http`] if the underlying `reqwest::Client`
    /// fails to build.
    pub fn new(token: impl Into<String>, base_url: &str) -> Result<Self, SlackError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("vigil/", env!("CARGO_PKG_VERSION")))
            .timeout(std::time::Duration::from_secs(30))
            .build()?;
        Ok(Self {
            http,
            token: token.into(),
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/{method}", self.base_url)
    }

    /// Call a read-style method with query parameters.
    async fn call_get<T: DeserializeOwned>(
        &self,
        method: &str,
        params: &[(&str, String)],
    ) -> Result<T, SlackError> {
        let query = params
            .iter()
            .map(|(key, value)| format!("{key}={}", urlencoding::encode(value)))
            .collect::<Vec<_>>()
            .join("&");
        let url = if query.is_empty() {
            self.method_url(method)
        } else {
            format!("{}?{query}", self.method_url(method))
        };

        let resp = check_response(self.http.get(&url).bearer_auth(&self.token).send().await?)
            .await?;
        let body: serde_json::Value = resp.json().await?;
        decode_envelope(method, body)
    }

    /// Call a write-style method with a JSON body.
    async fn call_post<T: DeserializeOwned>(
        &self,
        method: &str,
        body: &serde_json::Value,
    ) -> Result<T, SlackError> {
        let resp = check_response(
            self.http
                .post(self.method_url(method))
                .bearer_auth(&self.token)
                .json(body)
                .send()
                .await?,
        )
        .await?;
        let body: serde_json::Value = resp.json().await?;
        decode_envelope(method, body)
    }
}

fn to_capability(error: SlackError) -> CapabilityError {
    match error {
        SlackError::Slack { method, error } => {
            CapabilityError::failed(CAPABILITY, format!("{method}: {error}"))
        }
        other => CapabilityError::Other(other.into()),
    }
}

#[async_trait]
impl MessageSource for SlackClient {
    async fn fetch_history(
        &self,
        stream_id: &str,
        oldest: DateTime<Utc>,
        latest: DateTime<Utc>,
        cursor: Option<&str>,
    ) -> Result<HistoryPage, CapabilityError> {
        self.conversations_history(stream_id, oldest, latest, cursor)
            .await
            .map_err(to_capability)
    }

    async fn post_reply(
        &self,
        stream_id: &str,
        parent_id: &str,
        text: &str,
        blocks: Option<&serde_json::Value>,
    ) -> Result<(), CapabilityError> {
        self.post_message(stream_id, Some(parent_id), text, blocks)
            .await
            .map_err(to_capability)?;
        Ok(())
    }

    async fn add_marker(
        &self,
        stream_id: &str,
        item_id: &str,
        marker_name: &str,
    ) -> Result<(), CapabilityError> {
        self.add_reaction(stream_id, item_id, marker_name)
            .await
            .map_err(to_capability)
    }

    async fn send_direct(&self, recipient: &str, text: &str) -> Result<(), CapabilityError> {
        let user_id = self.resolve_recipient(recipient).await.map_err(to_capability)?;
        self.post_message(&user_id, None, text, None)
            .await
            .map_err(to_capability)?;
        Ok(())
    }
}
