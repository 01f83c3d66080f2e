//! `chat.postMessage`: threaded replies and direct messages.

use serde::Deserialize;
use serde_json::json;

use crate::{SlackClient, error::SlackError};

#[derive(Deserialize)]
struct PostMessageResponse {
    #[serde(default)]
    ts: Option<String>,
}

impl SlackClient {
    /// Post `text` to `channel`, optionally in the thread rooted at
    /// `thread_ts` and with Block Kit `blocks`.
    ///
    /// Posting to a user id delivers a direct message from the bot.
    /// Returns the new message's timestamp when Slack reports one.
    ///
    /// # Errors
    ///
    /// Returns [`SlackError`] if the request fails or Slack rejects it.
    pub async fn post_message(
        &self,
        channel: &str,
        thread_ts: Option<&str>,
        text: &str,
        blocks: Option<&serde_json::Value>,
    ) -> Result<Option<String>, SlackError> {
        let mut body = json!({
            "channel": channel,
            "text": text,
        });
        if let Some(ts) = thread_ts {
            body["thread_ts"] = json!(ts);
        }
        if let Some(blocks) = blocks {
            body["blocks"] = blocks.clone();
        }

        let resp: PostMessageResponse = self.call_post("chat.postMessage", &body).await?;
        Ok(resp.ts)
    }
}
