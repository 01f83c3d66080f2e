//! Slack workspace configuration.

use serde::{Deserialize, Serialize};

/// Default Slack Web API base URL.
fn default_api_base_url() -> String {
    String::from("https://slack.com/api")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SlackConfig {
    /// Bot token (`xoxb-...`).
    #[serde(default)]
    pub bot_token: String,

    /// Channel to monitor, by name (`threat-intel`) or id (`C0123ABC`).
    #[serde(default)]
    pub channel: String,

    /// Web API base URL (overridable for tests and proxies).
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
}

impl Default for SlackConfig {
    fn default() -> Self {
        Self {
            bot_token: String::new(),
            channel: String::new(),
            api_base_url: default_api_base_url(),
        }
    }
}

impl SlackConfig {
    /// Check if the Slack config has the minimum required fields.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.bot_token.is_empty() && !self.channel.trim().is_empty()
    }
}
