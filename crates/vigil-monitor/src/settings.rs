//! Runtime settings for one monitored stream.

use std::path::PathBuf;
use std::time::Duration;

use chrono::TimeDelta;
use vigil_config::{MarkersConfig, VigilConfig};

/// Everything the monitor needs to know about the stream it watches, resolved
/// from configuration plus the identities discovered at startup.
#[derive(Debug, Clone)]
pub struct MonitorSettings {
    /// Resolved stream (channel) id.
    pub stream_id: String,
    /// The bot's own user id; its messages are never scanned.
    pub own_user_id: Option<String>,
    /// Trailing window for message lookback and seen-item expiry.
    pub retention: TimeDelta,
    /// Cap on messages kept per pass. 0 means unbounded.
    pub max_items: usize,
    pub page_delay: Duration,
    pub poll_interval: Duration,
    /// Per external call. `None` disables the limit.
    pub stage_timeout: Option<Duration>,
    pub max_content_chars: usize,
    pub recipients: Vec<String>,
    pub markers: MarkersConfig,
    pub state_dir: PathBuf,
}

impl MonitorSettings {
    #[must_use]
    pub fn from_config(
        config: &VigilConfig,
        stream_id: impl Into<String>,
        own_user_id: Option<String>,
    ) -> Self {
        let monitor = &config.monitor;
        Self {
            stream_id: stream_id.into(),
            own_user_id: own_user_id.filter(|id| !id.is_empty()),
            retention: monitor.retention(),
            max_items: monitor.max_messages,
            page_delay: monitor.page_delay(),
            poll_interval: monitor.poll_interval(),
            stage_timeout: monitor.stage_timeout(),
            max_content_chars: monitor.max_content_chars,
            recipients: monitor.recipients(),
            markers: config.markers.clone(),
            state_dir: monitor.state_dir.clone(),
        }
    }
}
