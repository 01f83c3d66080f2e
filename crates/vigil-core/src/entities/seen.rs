use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// A previously processed target and when it was first seen.
///
/// The timestamp is kept as the raw persisted string so entries written by
/// older tools (naive ISO-8601 without an offset) or with a corrupted value
/// survive a load/save cycle untouched.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SeenEntry {
    #[serde(rename = "url")]
    pub target: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

impl SeenEntry {
    /// Create an entry stamped with `first_seen_at`.
    #[must_use]
    pub fn new(target: impl Into<String>, first_seen_at: DateTime<Utc>) -> Self {
        Self {
            target: target.into(),
            timestamp: Some(first_seen_at.to_rfc3339()),
        }
    }

    /// Decoded first-seen time.
    ///
    /// Accepts RFC 3339 and naive ISO-8601 (interpreted as UTC). Returns
    /// `None` if the timestamp is absent or undecodable.
    #[must_use]
    pub fn first_seen_at(&self) -> Option<DateTime<Utc>> {
        let raw = self.timestamp.as_deref()?.trim();
        if let Ok(at) = DateTime::parse_from_rfc3339(raw) {
            return Some(at.with_timezone(&Utc));
        }
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
            .ok()
            .map(|naive| naive.and_utc())
    }
}
