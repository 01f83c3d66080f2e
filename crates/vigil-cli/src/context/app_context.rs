use std::sync::Arc;

use anyhow::Context;
use vigil_assess::ChatAssessor;
use vigil_config::{ConfigError, VigilConfig};
use vigil_core::capabilities::MessageSource;
use vigil_fetch::HttpFetcher;
use vigil_monitor::{Monitor, MonitorSettings};
use vigil_slack::SlackClient;
use vigil_store::StatePaths;

/// Shared runtime state for commands that talk to Slack.
pub struct AppContext {
    pub config: VigilConfig,
    pub slack: Arc<SlackClient>,
    /// Resolved channel id.
    pub channel_id: String,
}

impl AppContext {
    /// Build the Slack client and resolve the configured channel.
    ///
    /// Channels already given as ids resolve without a network call.
    pub async fn init(config: VigilConfig) -> anyhow::Result<Self> {
        if !config.slack.is_configured() {
            return Err(ConfigError::NotConfigured {
                section: "slack".into(),
            }
            .into());
        }

        let slack = SlackClient::new(&config.slack.bot_token, &config.slack.api_base_url)
            .context("failed to build Slack client")?;
        let channel_id = slack
            .resolve_channel(&config.slack.channel)
            .await
            .with_context(|| format!("failed to resolve channel '{}'", config.slack.channel))?;

        tracing::debug!(channel = %channel_id, "resolved channel");

        Ok(Self {
            config,
            slack: Arc::new(slack),
            channel_id,
        })
    }

    /// State file locations for the resolved channel.
    #[must_use]
    pub fn state_paths(&self) -> StatePaths {
        StatePaths::for_stream(&self.config.monitor.state_dir, &self.channel_id)
    }

    /// Wire the fetcher and assessor and attach a monitor to the channel state.
    ///
    /// The bot's own user id comes from `auth.test`; if that fails the bot's
    /// messages are still filtered by their `bot_id`.
    pub async fn monitor(&self) -> anyhow::Result<Monitor> {
        self.config.ensure_ready()?;

        let own_user_id = match self.slack.auth_test().await {
            Ok(user_id) => Some(user_id),
            Err(error) => {
                tracing::warn!(%error, "auth.test failed; own messages filtered by bot id only");
                None
            }
        };

        let fetcher = HttpFetcher::from_config(&self.config.fetcher)
            .context("failed to build content fetcher")?;
        let assessor = ChatAssessor::from_config(&self.config.assessor)
            .context("failed to build assessor client")?;

        let settings = MonitorSettings::from_config(&self.config, &self.channel_id, own_user_id);
        let monitor = Monitor::new(
            Arc::clone(&self.slack) as Arc<dyn MessageSource>,
            Arc::new(fetcher),
            Arc::new(assessor),
            settings,
        )?;
        Ok(monitor)
    }
}

#[cfg(test)]
mod tests {
    use vigil_config::VigilConfig;

    use super::AppContext;

    #[tokio::test]
    async fn wires_monitor_for_channel_id_without_bot_identity() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = VigilConfig::default();
        config.slack.bot_token = "xoxb-test".into();
        config.slack.channel = "C0123ABCDE".into();
        // Nothing listens here, so auth.test fails and the monitor runs without an own id.
        config.slack.api_base_url = "http://127.0.0.1:9/api".into();
        config.assessor.base_url = "http://127.0.0.1:9/v1".into();
        config.assessor.model = "test-model".into();
        config.monitor.state_dir = dir.path().to_path_buf();

        let ctx = AppContext::init(config).await.unwrap();
        assert_eq!(ctx.channel_id, "C0123ABCDE");
        assert_eq!(
            ctx.state_paths().seen,
            dir.path().join("seen_C0123ABCDE.json")
        );

        let monitor = ctx.monitor().await.unwrap();
        assert_eq!(monitor.settings().stream_id, "C0123ABCDE");
        assert_eq!(monitor.settings().own_user_id, None);
    }

    #[tokio::test]
    async fn init_requires_slack_section() {
        let err = AppContext::init(VigilConfig::default()).await.err().unwrap();
        assert!(err.to_string().contains("slack"));
    }
}
