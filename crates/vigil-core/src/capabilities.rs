//! External capability traits consumed by the monitoring pipeline.
//!
//! Concrete clients (`vigil-slack`, `vigil-fetch`, `vigil-assess`) are built
//! once at startup and handed to the monitor as `Arc<dyn Trait>`; tests pass
//! in-memory fakes instead.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::Message;
use crate::errors::CapabilityError;

/// One page of stream history.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryPage {
    /// Messages on this page, newest first.
    pub messages: Vec<Message>,
    /// Cursor for the next (older) page, if any.
    pub next_cursor: Option<String>,
}

/// The monitored message stream.
#[async_trait]
pub trait MessageSource: Send + Sync {
    /// Fetch one page of history between `oldest` and `latest`, newest first.
    async fn fetch_history(
        &self,
        stream_id: &str,
        oldest: DateTime<Utc>,
        latest: DateTime<Utc>,
        cursor: Option<&str>,
    ) -> Result<HistoryPage, CapabilityError>;

    /// Post `text` (with optional rich blocks) as a threaded reply to `parent_id`.
    async fn post_reply(
        &self,
        stream_id: &str,
        parent_id: &str,
        text: &str,
        blocks: Option<&serde_json::Value>,
    ) -> Result<(), CapabilityError>;

    /// Attach a marker to a message. Re-adding an existing marker succeeds.
    async fn add_marker(
        &self,
        stream_id: &str,
        item_id: &str,
        marker_name: &str,
    ) -> Result<(), CapabilityError>;

    /// Send a private notification to one recipient.
    async fn send_direct(&self, recipient: &str, text: &str) -> Result<(), CapabilityError>;
}

/// Retrieves readable text for a URL.
#[async_trait]
pub trait ContentFetcher: Send + Sync {
    /// Fetch `url` and return its extracted text.
    async fn fetch(&self, url: &str) -> Result<String, CapabilityError>;
}

/// Produces a free-form assessment for a fetched document.
#[async_trait]
pub trait Assessor: Send + Sync {
    /// Generate an assessment of `text`, which was fetched from `url`.
    async fn assess(&self, url: &str, text: &str) -> Result<String, CapabilityError>;
}
