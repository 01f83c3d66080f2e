//! `reactions.add` with tolerance for duplicate and renamed emoji.

use serde::Deserialize;
use serde_json::json;

use crate::{SlackClient, error::SlackError};

#[derive(Deserialize)]
struct Empty {}

/// Older workspaces only know the `large_*` circle names.
#[must_use]
pub fn fallback_reaction(name: &str) -> Option<&'static str> {
    match name {
        "green_circle" => Some("large_green_circle"),
        "orange_circle" => Some("large_orange_circle"),
        "blue_circle" => Some("large_blue_circle"),
        _ => None,
    }
}

impl SlackClient {
    /// Add the `name` reaction to the message `ts` in `channel`.
    ///
    /// `already_reacted` counts as success. On `invalid_name` the call is
    /// retried once with [`fallback_reaction`] if one exists.
    ///
    /// # Errors
    ///
    /// Returns [`SlackError`] for any other failure.
    pub async fn add_reaction(&self, channel: &str, ts: &str, name: &str) -> Result<(), SlackError> {
        match self.reactions_add(channel, ts, name).await {
            Err(e) if e.slack_code() == Some("invalid_name") => {
                let Some(fallback) = fallback_reaction(name) else {
                    return Err(e);
                };
                tracing::debug!(name, fallback, "reaction name rejected, retrying");
                self.reactions_add(channel, ts, fallback).await
            }
            other => other,
        }
    }

    async fn reactions_add(&self, channel: &str, ts: &str, name: &str) -> Result<(), SlackError> {
        let body = json!({
            "channel": channel,
            "timestamp": ts,
            "name": name,
        });
        match self.call_post::<Empty>("reactions.add", &body).await {
            Ok(_) => Ok(()),
            Err(e) if e.slack_code() == Some("already_reacted") => {
                tracing::debug!(name, ts, "reaction already present");
                Ok(())
            }
            Err(e) => Err(e),
        }
    }
}
