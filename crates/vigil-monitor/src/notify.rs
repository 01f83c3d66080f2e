//! Notification delivery for a processed target.
//!
//! A threaded reply with Block Kit fields, one marker per decided
//! [`Marker`](vigil_core::enums::Marker), and a direct alert to each
//! recipient when the decision calls for it. Every action is attempted
//! independently; failures are logged and reported, never raised.

use std::time::Duration;

use serde::Serialize;
use serde_json::{Value, json};
use vigil_config::MarkersConfig;
use vigil_core::capabilities::MessageSource;
use vigil_core::entities::Assessment;

use crate::classify::AlertDecision;
use crate::timeout::within;

/// Longest impact excerpt carried in a direct alert.
const ALERT_IMPACT_CHARS: usize = 200;

const MISSING: &str = "N/A";

/// Where and what to notify about.
#[derive(Debug, Clone, Copy)]
pub struct NotifyContext<'a> {
    pub stream_id: &'a str,
    pub message_id: &'a str,
    pub target: &'a str,
    pub markers: &'a MarkersConfig,
    pub recipients: &'a [String],
    pub timeout: Option<Duration>,
}

/// What was delivered, and what failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotifyReport {
    pub decision: AlertDecision,
    pub reply_posted: bool,
    pub markers_added: Vec<String>,
    pub direct_sent: Vec<String>,
    pub failures: Vec<String>,
}

impl NotifyReport {
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Fallback text for the threaded reply.
#[must_use]
pub fn reply_text(target: &str) -> String {
    format!("Link assessment for {target}")
}

fn or_missing(value: &str) -> &str {
    if value.trim().is_empty() {
        MISSING
    } else {
        value
    }
}

/// Block Kit layout for the threaded reply.
#[must_use]
pub fn build_blocks(target: &str, assessment: &Assessment) -> Value {
    json!([
        {
            "type": "header",
            "text": {"type": "plain_text", "text": "Link Intelligence Assessment"}
        },
        {
            "type": "section",
            "text": {"type": "mrkdwn", "text": format!("*URL:* <{target}>")}
        },
        {"type": "divider"},
        {
            "type": "section",
            "fields": [
                {
                    "type": "mrkdwn",
                    "text": format!("*Summary:*\n{}", or_missing(&assessment.summary))
                },
                {
                    "type": "mrkdwn",
                    "text": format!("*Impact:*\n{}", or_missing(&assessment.potential_impact))
                },
                {
                    "type": "mrkdwn",
                    "text": format!("*Relevance:*\n{}", or_missing(&assessment.relevance))
                },
                {
                    "type": "mrkdwn",
                    "text": format!("*Actions:*\n{}", or_missing(&assessment.recommended_actions))
                }
            ]
        }
    ])
}

/// Text of the direct alert sent for high-severity targets.
#[must_use]
pub fn alert_text(target: &str, assessment: &Assessment) -> String {
    let impact = assessment.potential_impact.trim();
    let mut excerpt: String = impact.chars().take(ALERT_IMPACT_CHARS).collect();
    if excerpt.len() < impact.len() {
        excerpt.push_str("...");
    }
    format!(
        ":rotating_light: *High-severity link detected*\n<{target}>\n\
         Severity: {}\nRelevance: {}\nImpact: {}",
        or_missing(&assessment.severity),
        or_missing(&assessment.relevance),
        or_missing(&excerpt),
    )
}

/// Run every notification action for one target.
pub async fn deliver(
    source: &dyn MessageSource,
    ctx: &NotifyContext<'_>,
    assessment: &Assessment,
    decision: AlertDecision,
) -> NotifyReport {
    let mut report = NotifyReport {
        decision,
        reply_posted: false,
        markers_added: Vec::new(),
        direct_sent: Vec::new(),
        failures: Vec::new(),
    };

    let blocks = build_blocks(ctx.target, assessment);
    let fallback = reply_text(ctx.target);
    let reply = source.post_reply(ctx.stream_id, ctx.message_id, &fallback, Some(&blocks));
    match within("slack", ctx.timeout, reply).await {
        Ok(()) => report.reply_posted = true,
        Err(error) => {
            tracing::error!(url = ctx.target, %error, "failed to post assessment reply");
            report.failures.push(format!("reply: {error}"));
        }
    }

    for &marker in &report.decision.markers {
        let name = ctx.markers.name_for(marker);
        let add = source.add_marker(ctx.stream_id, ctx.message_id, name);
        match within("slack", ctx.timeout, add).await {
            Ok(()) => report.markers_added.push(name.to_string()),
            Err(error) => {
                tracing::warn!(
                    url = ctx.target,
                    marker = name,
                    %error,
                    "failed to add marker"
                );
                report.failures.push(format!("marker {name}: {error}"));
            }
        }
    }

    if report.decision.dm_worthy {
        if ctx.recipients.is_empty() {
            tracing::debug!(url = ctx.target, "alert-worthy but no recipients configured");
        }
        let text = alert_text(ctx.target, assessment);
        for recipient in ctx.recipients {
            match within("slack", ctx.timeout, source.send_direct(recipient, &text)).await {
                Ok(()) => {
                    tracing::info!(url = ctx.target, recipient, "sent direct alert");
                    report.direct_sent.push(recipient.clone());
                }
                Err(error) => {
                    tracing::warn!(
                        url = ctx.target,
                        recipient,
                        %error,
                        "failed to send direct alert"
                    );
                    report.failures.push(format!("direct {recipient}: {error}"));
                }
            }
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn blocks_fill_missing_fields() {
        let assessment = Assessment {
            summary: "Proxy RCE".into(),
            relevance: "5".into(),
            ..Default::default()
        };
        let blocks = build_blocks("https://a.example", &assessment);
        assert_eq!(blocks[0]["type"], "header");
        assert_eq!(blocks[1]["text"]["text"], "*URL:* <https://a.example>");
        assert_eq!(blocks[2]["type"], "divider");

        let fields = blocks[3]["fields"].as_array().unwrap();
        assert_eq!(fields.len(), 4);
        assert_eq!(fields[0]["text"], "*Summary:*\nProxy RCE");
        assert_eq!(fields[1]["text"], "*Impact:*\nN/A");
        assert_eq!(fields[2]["text"], "*Relevance:*\n5");
        assert_eq!(fields[3]["text"], "*Actions:*\nN/A");
    }

    #[test]
    fn alert_truncates_long_impact() {
        let assessment = Assessment {
            severity: "critical".into(),
            relevance: "5".into(),
            potential_impact: "x".repeat(500),
            ..Default::default()
        };
        let text = alert_text("https://a.example", &assessment);
        assert!(text.contains("<https://a.example>"));
        assert!(text.contains("Severity: critical"));
        assert!(text.contains("Relevance: 5"));
        let impact = text.rsplit("Impact: ").next().unwrap();
        assert_eq!(impact, format!("{}...", "x".repeat(200)));
    }

    #[test]
    fn short_impact_is_not_marked_truncated() {
        let assessment = Assessment {
            potential_impact: "Édge outage".into(),
            ..Default::default()
        };
        assert!(alert_text("https://a.example", &assessment).ends_with("Impact: Édge outage"));
    }

    #[test]
    fn reply_text_names_target() {
        assert_eq!(
            reply_text("https://a.example"),
            "Link assessment for https://a.example"
        );
    }
}
