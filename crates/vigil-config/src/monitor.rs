//! Monitor loop configuration.

use std::path::PathBuf;
use std::time::Duration;

use chrono::TimeDelta;
use serde::{Deserialize, Serialize};
use vigil_core::duration::parse_duration;

const fn default_poll_interval_secs() -> u64 {
    60
}

fn default_max_message_age() -> String {
    String::from("7d")
}

const fn default_page_delay_ms() -> u64 {
    800
}

const fn default_stage_timeout_secs() -> u64 {
    300
}

const fn default_max_content_chars() -> usize {
    7000
}

fn default_state_dir() -> PathBuf {
    PathBuf::from("data")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MonitorConfig {
    /// Seconds to sleep between polling iterations.
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,

    /// Retention window as a compact duration (`7d`, `24h`, `3w`, `1m`).
    ///
    /// Bounds both the message lookback and seen-item expiry.
    #[serde(default = "default_max_message_age")]
    pub max_message_age: String,

    /// Maximum top-level messages scanned per iteration (0 = unbounded).
    #[serde(default)]
    pub max_messages: usize,

    /// Courtesy delay between history pages, in milliseconds.
    #[serde(default = "default_page_delay_ms")]
    pub page_delay_ms: u64,

    /// Timeout for each external call in the per-target pipeline (0 = none).
    #[serde(default = "default_stage_timeout_secs")]
    pub stage_timeout_secs: u64,

    /// Maximum characters of fetched text handed to the assessor.
    #[serde(default = "default_max_content_chars")]
    pub max_content_chars: usize,

    /// Recipients (emails or user ids) for high-urgency private alerts.
    #[serde(default)]
    pub alert_recipients: Vec<String>,

    /// Directory holding the seen store and audit log.
    #[serde(default = "default_state_dir")]
    pub state_dir: PathBuf,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: default_poll_interval_secs(),
            max_message_age: default_max_message_age(),
            max_messages: 0,
            page_delay_ms: default_page_delay_ms(),
            stage_timeout_secs: default_stage_timeout_secs(),
            max_content_chars: default_max_content_chars(),
            alert_recipients: Vec::new(),
            state_dir: default_state_dir(),
        }
    }
}

impl MonitorConfig {
    /// Retention window parsed from `max_message_age`. Never fails.
    #[must_use]
    pub fn retention(&self) -> TimeDelta {
        parse_duration(Some(&self.max_message_age))
    }

    #[must_use]
    pub const fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    #[must_use]
    pub const fn page_delay(&self) -> Duration {
        Duration::from_millis(self.page_delay_ms)
    }

    /// Per-stage timeout, or `None` when disabled.
    #[must_use]
    pub const fn stage_timeout(&self) -> Option<Duration> {
        if self.stage_timeout_secs == 0 {
            None
        } else {
            Some(Duration::from_secs(self.stage_timeout_secs))
        }
    }

    /// Recipients with blanks removed.
    #[must_use]
    pub fn recipients(&self) -> Vec<String> {
        self.alert_recipients
            .iter()
            .map(|r| r.trim())
            .filter(|r| !r.is_empty())
            .map(String::from)
            .collect()
    }
}
