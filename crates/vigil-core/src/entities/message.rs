use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Subtype the message source uses for integration/bot posts.
const BOT_MESSAGE_SUBTYPE: &str = "bot_message";

/// An item from the monitored stream.
///
/// `id` is the source's timestamp identifier (`"1712345678.000200"`), which
/// doubles as the message's posting time and as the parent for thread replies.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Message {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    #[serde(default)]
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thread_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtype: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bot_id: Option<String>,
}

impl Message {
    /// Posting time decoded from the `seconds.micros` identifier.
    ///
    /// Returns `None` if the identifier is not a decimal timestamp.
    #[must_use]
    pub fn posted_at(&self) -> Option<DateTime<Utc>> {
        timestamp_to_datetime(&self.id)
    }

    /// Whether this is a reply inside a thread rather than a top-level post.
    ///
    /// Thread parents carry a `thread_id` equal to their own `id`; they are
    /// top-level.
    #[must_use]
    pub fn is_thread_reply(&self) -> bool {
        self.thread_id
            .as_deref()
            .is_some_and(|thread| thread != self.id)
    }

    /// Whether the message was produced by a bot, including our own.
    #[must_use]
    pub fn is_bot_message(&self, own_user_id: Option<&str>) -> bool {
        if self.subtype.as_deref() == Some(BOT_MESSAGE_SUBTYPE) || self.bot_id.is_some() {
            return true;
        }
        match (own_user_id, self.user.as_deref()) {
            (Some(own), Some(author)) => !own.is_empty() && own == author,
            _ => false,
        }
    }
}

/// Decode a `seconds.micros` timestamp identifier.
#[must_use]
pub fn timestamp_to_datetime(ts: &str) -> Option<DateTime<Utc>> {
    let (secs, frac) = ts.split_once('.').unwrap_or((ts, ""));
    let secs: i64 = secs.parse().ok()?;
    let micros: u32 = if frac.is_empty() {
        0
    } else {
        let padded: String = frac.chars().chain(std::iter::repeat('0')).take(6).collect();
        padded.parse().ok()?
    };
    DateTime::from_timestamp(secs, micros * 1_000)
}

/// Encode an instant as a `seconds.micros` timestamp identifier.
#[must_use]
pub fn datetime_to_timestamp(at: DateTime<Utc>) -> String {
    format!("{}.{:06}", at.timestamp(), at.timestamp_subsec_micros())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn message(id: &str) -> Message {
        Message {
            id: id.to_string(),
            user: Some("U123".to_string()),
            text: "hello".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn decodes_timestamp_identifier() {
        let msg = message("1712345678.000200");
        let at = msg.posted_at().unwrap();
        assert_eq!(at.timestamp(), 1_712_345_678);
        assert_eq!(at.timestamp_subsec_micros(), 200);
    }

    #[test]
    fn rejects_non_numeric_identifier() {
        assert!(message("abc").posted_at().is_none());
        assert!(message("12.x").posted_at().is_none());
    }

    #[test]
    fn encodes_and_decodes_consistently() {
        let at = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
        let ts = datetime_to_timestamp(at);
        assert_eq!(ts, format!("{}.000000", at.timestamp()));
        assert_eq!(timestamp_to_datetime(&ts), Some(at));
    }

    #[test]
    fn thread_parent_is_top_level() {
        let mut msg = message("100.000001");
        assert!(!msg.is_thread_reply());
        msg.thread_id = Some("100.000001".to_string());
        assert!(!msg.is_thread_reply());
        msg.thread_id = Some("99.000001".to_string());
        assert!(msg.is_thread_reply());
    }

    #[test]
    fn detects_bot_messages() {
        let mut msg = message("1.0");
        assert!(!msg.is_bot_message(None));
        assert!(!msg.is_bot_message(Some("")));
        assert!(msg.is_bot_message(Some("U123")));

        msg.subtype = Some("bot_message".to_string());
        assert!(msg.is_bot_message(None));

        let mut integration = message("2.0");
        integration.user = None;
        integration.bot_id = Some("B1".to_string());
        assert!(integration.is_bot_message(Some("U999")));
    }
}
