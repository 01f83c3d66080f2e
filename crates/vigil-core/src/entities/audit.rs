use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Assessment;
use crate::enums::Outcome;

/// An append-only record of one target's terminal pipeline outcome.
///
/// Written after every run, successful or not, for forensic replay. Failed
/// runs carry no assessment and an `error` describing the failing stage.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuditRecord {
    #[serde(rename = "url")]
    pub target: String,
    #[serde(rename = "timestamp")]
    pub processed_at: DateTime<Utc>,
    #[serde(default)]
    pub severity: String,
    #[serde(default)]
    pub relevance: String,
    #[serde(rename = "analysis", default)]
    pub assessment: Option<Assessment>,
    pub outcome: Outcome,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AuditRecord {
    /// Record for a run that produced an assessment.
    #[must_use]
    pub fn delivered(
        target: impl Into<String>,
        processed_at: DateTime<Utc>,
        assessment: Assessment,
    ) -> Self {
        Self {
            target: target.into(),
            processed_at,
            severity: assessment.severity.trim().to_string(),
            relevance: assessment.relevance.trim().to_string(),
            assessment: Some(assessment),
            outcome: Outcome::Delivered,
            error: None,
        }
    }

    /// Record for a run that stopped before an assessment existed.
    #[must_use]
    pub fn failed(
        target: impl Into<String>,
        processed_at: DateTime<Utc>,
        outcome: Outcome,
        error: impl Into<String>,
    ) -> Self {
        Self {
            target: target.into(),
            processed_at,
            severity: String::new(),
            relevance: String::new(),
            assessment: None,
            outcome,
            error: Some(error.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn delivered_record_copies_trimmed_verdict() {
        let assessment = Assessment {
            severity: " red ".into(),
            relevance: "4 ".into(),
            ..Default::default()
        };
        let record = AuditRecord::delivered("https://a", Utc::now(), assessment.clone());
        assert_eq!(record.severity, "red");
        assert_eq!(record.relevance, "4");
        assert_eq!(record.assessment, Some(assessment));
        assert_eq!(record.outcome, Outcome::Delivered);
    }

    #[test]
    fn failed_record_serializes_null_analysis() {
        let record = AuditRecord::failed("https://a", Utc::now(), Outcome::FetchFailed, "timeout");
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["url"], "https://a");
        assert!(json["analysis"].is_null());
        assert_eq!(json["outcome"], "fetch_failed");
        assert_eq!(json["error"], "timeout");
    }
}
