//! Discovery of unprocessed targets in a message batch.

use std::collections::HashSet;

use regex::Regex;
use serde::Serialize;
use vigil_core::entities::Message;

/// Stops at whitespace and at the `<url|label>` delimiters Slack wraps
/// links in.
const TARGET_PATTERN: &str = r"https?://[^\s<>|]+";

/// A target found in a message, with the message it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiscoveredTarget {
    pub message_id: String,
    pub target: String,
}

#[derive(Debug, Clone)]
pub struct TargetExtractor {
    pattern: Regex,
}

impl TargetExtractor {
    /// # Errors
    ///
    /// Returns [`regex::Error`] if the target pattern fails to compile.
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            pattern: Regex::new(TARGET_PATTERN)?,
        })
    }

    /// Every target in `messages` that `is_seen` rejects, in discovery order.
    ///
    /// A target appearing more than once in the batch is reported only for
    /// its first message.
    pub fn extract_targets(
        &self,
        messages: &[Message],
        is_seen: impl Fn(&str) -> bool,
    ) -> Vec<DiscoveredTarget> {
        let mut emitted = HashSet::new();
        let mut found = Vec::new();
        for message in messages {
            for m in self.pattern.find_iter(&message.text) {
                let target = m.as_str();
                if is_seen(target) || !emitted.insert(target) {
                    continue;
                }
                found.push(DiscoveredTarget {
                    message_id: message.id.clone(),
                    target: target.to_string(),
                });
            }
        }
        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn message(id: &str, text: &str) -> Message {
        Message {
            id: id.into(),
            text: text.into(),
            ..Default::default()
        }
    }

    fn targets(found: &[DiscoveredTarget]) -> Vec<(&str, &str)> {
        found
            .iter()
            .map(|d| (d.message_id.as_str(), d.target.as_str()))
            .collect()
    }

    #[test]
    fn stops_at_slack_link_delimiters() {
        let extractor = TargetExtractor::new().unwrap();
        let messages = [message(
            "1.0",
            "see <https://a.example/x?y=1|advisory> and <http://b.example>",
        )];
        let found = extractor.extract_targets(&messages, |_| false);
        assert_eq!(
            targets(&found),
            vec![
                ("1.0", "https://a.example/x?y=1"),
                ("1.0", "http://b.example")
            ]
        );
    }

    #[test]
    fn skips_seen_and_dedupes_within_batch() {
        let extractor = TargetExtractor::new().unwrap();
        let messages = [
            message("3.0", "https://new.example https://old.example"),
            message("2.0", "again https://new.example"),
            message("1.0", "https://other.example"),
        ];
        let found = extractor.extract_targets(&messages, |t| t == "https://old.example");
        assert_eq!(
            targets(&found),
            vec![
                ("3.0", "https://new.example"),
                ("1.0", "https://other.example")
            ]
        );
    }

    #[test]
    fn no_targets_in_plain_text() {
        let extractor = TargetExtractor::new().unwrap();
        let messages = [message("1.0", "ftp://nope and example.com")];
        assert!(extractor.extract_targets(&messages, |_| false).is_empty());
    }

    #[test]
    fn targets_are_not_normalized() {
        let extractor = TargetExtractor::new().unwrap();
        let messages = [message("1.0", "https://A.example/ https://a.example")];
        assert_eq!(extractor.extract_targets(&messages, |_| false).len(), 2);
    }
}
