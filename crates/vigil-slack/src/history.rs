//! `conversations.history`: one page of a channel's message window.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use vigil_core::capabilities::HistoryPage;
use vigil_core::entities::{Message, datetime_to_timestamp};

use crate::channels::ResponseMetadata;
use crate::{SlackClient, error::SlackError};

/// Messages requested per page.
pub const HISTORY_PAGE_LIMIT: u32 = 200;

#[derive(Deserialize)]
struct HistoryResponse {
    #[serde(default)]
    messages: Vec<SlackMessage>,
    #[serde(default)]
    has_more: bool,
    #[serde(default)]
    response_metadata: Option<ResponseMetadata>,
}

#[derive(Deserialize)]
struct SlackMessage {
    ts: String,
    #[serde(default)]
    user: Option<String>,
    #[serde(default)]
    text: String,
    #[serde(default)]
    thread_ts: Option<String>,
    #[serde(default)]
    subtype: Option<String>,
    #[serde(default)]
    bot_id: Option<String>,
}

impl From<SlackMessage> for Message {
    fn from(m: SlackMessage) -> Self {
        Self {
            id: m.ts,
            user: m.user,
            text: m.text,
            thread_id: m.thread_ts,
            subtype: m.subtype,
            bot_id: m.bot_id,
        }
    }
}

impl HistoryResponse {
    fn into_page(self) -> HistoryPage {
        let next_cursor = if self.has_more {
            self.response_metadata.and_then(ResponseMetadata::cursor)
        } else {
            None
        };
        HistoryPage {
            messages: self.messages.into_iter().map(Message::from).collect(),
            next_cursor,
        }
    }
}

impl SlackClient {
    /// Fetch one page of `channel` history between `oldest` and `latest`,
    /// newest first.
    ///
    /// # Errors
    ///
    /// Returns [`SlackError`] if the request fails, Slack rate-limits the
    /// call, or the channel is not accessible.
    pub async fn conversations_history(
        &self,
        channel: &str,
        oldest: DateTime<Utc>,
        latest: DateTime<Utc>,
        cursor: Option<&str>,
    ) -> Result<HistoryPage, SlackError> {
        let mut params = vec![
            ("channel", channel.to_string()),
            ("limit", HISTORY_PAGE_LIMIT.to_string()),
            ("oldest", datetime_to_timestamp(oldest)),
            ("latest", datetime_to_timestamp(latest)),
        ];
        if let Some(c) = cursor {
            params.push(("cursor", c.to_string()));
        }

        let resp: HistoryResponse = self.call_get("conversations.history", &params).await?;
        let page = resp.into_page();
        tracing::debug!(
            channel,
            messages = page.messages.len(),
            more = page.next_cursor.is_some(),
            "fetched history page"
        );
        Ok(page)
    }
}
