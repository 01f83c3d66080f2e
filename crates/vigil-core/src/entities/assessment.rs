use serde::{Deserialize, Serialize};

/// The enrichment produced for one target.
///
/// Every field is always present (possibly empty). `relevance` is expected to
/// reduce to an integer 0-5 and `severity` to one of `green`, `amber`, `red`,
/// `critical`, but free text that violates this is kept as-is.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Assessment {
    #[serde(rename = "Summary", default)]
    pub summary: String,
    #[serde(rename = "Potential Impact", default)]
    pub potential_impact: String,
    #[serde(rename = "Relevance", default)]
    pub relevance: String,
    #[serde(rename = "Severity", default)]
    pub severity: String,
    #[serde(rename = "Recommended Actions", default)]
    pub recommended_actions: String,
}

impl Assessment {
    /// Whether no field carries any content.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        [
            &self.summary,
            &self.potential_impact,
            &self.relevance,
            &self.severity,
            &self.recommended_actions,
        ]
        .iter()
        .all(|field| field.is_empty())
    }
}
