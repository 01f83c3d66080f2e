//! Channel name resolution via `conversations.list`.

use serde::Deserialize;

use crate::{SlackClient, error::SlackError};

const PAGE_LIMIT: u32 = 1000;

#[derive(Deserialize)]
struct ListResponse {
    #[serde(default)]
    channels: Vec<ChannelInfo>,
    #[serde(default)]
    response_metadata: Option<ResponseMetadata>,
}

#[derive(Deserialize)]
struct ChannelInfo {
    id: String,
    #[serde(default)]
    name: String,
}

#[derive(Deserialize)]
pub(crate) struct ResponseMetadata {
    #[serde(default)]
    pub(crate) next_cursor: String,
}

impl ResponseMetadata {
    /// Slack signals the last page with an empty cursor.
    pub(crate) fn cursor(self) -> Option<String> {
        Some(self.next_cursor).filter(|c| !c.is_empty())
    }
}

/// Whether `channel` already looks like a conversation id (`C…`, `G…`, `D…`).
#[must_use]
pub fn is_channel_id(channel: &str) -> bool {
    let mut chars = channel.chars();
    matches!(chars.next(), Some('C' | 'G' | 'D'))
        && channel.len() >= 9
        && chars.all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
}

impl SlackClient {
    /// Resolve a channel name (with or without `#`) to its id.
    ///
    /// Values that already look like a channel id are returned unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`SlackError::ChannelNotFound`] if no visible channel has that
    /// name, or another [`SlackError`] if listing fails.
    pub async fn resolve_channel(&self, channel: &str) -> Result<String, SlackError> {
        if is_channel_id(channel) {
            return Ok(channel.to_string());
        }
        let wanted = channel.trim_start_matches('#');

        let mut cursor: Option<String> = None;
        loop {
            let mut params = vec![
                ("types", "public_channel,private_channel".to_string()),
                ("exclude_archived", "true".to_string()),
                ("limit", PAGE_LIMIT.to_string()),
            ];
            if let Some(c) = &cursor {
                params.push(("cursor", c.clone()));
            }

            let page: ListResponse = self.call_get("conversations.list", &params).await?;
            if let Some(found) = page.channels.into_iter().find(|c| c.name == wanted) {
                tracing::debug!(channel = wanted, id = %found.id, "resolved channel");
                return Ok(found.id);
            }

            cursor = page.response_metadata.and_then(ResponseMetadata::cursor);
            if cursor.is_none() {
                return Err(SlackError::ChannelNotFound(wanted.to_string()));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognises_channel_ids() {
        assert!(is_channel_id("C0123ABCDE"));
        assert!(is_channel_id("G01234567"));
        assert!(!is_channel_id("threat-intel"));
        assert!(!is_channel_id("#general"));
        assert!(!is_channel_id("C01"));
        assert!(!is_channel_id("Cabcdefghij"));
    }

    #[test]
    fn empty_cursor_ends_pagination() {
        let meta: ResponseMetadata = serde_json::from_str(r#"{"next_cursor": ""}"#).unwrap();
        assert!(meta.cursor().is_none());
        let meta: ResponseMetadata =
            serde_json::from_str(r#"{"next_cursor": "dGVhbTpD"}"#).unwrap();
        assert_eq!(meta.cursor().as_deref(), Some("dGVhbTpD"));
    }
}
