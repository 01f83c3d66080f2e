//! Pipeline stages, alert markers, and outcomes.
//!
//! All enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`.
//! [`Stage`] provides `allowed_next_states()` so the processor can enforce
//! strictly-forward transitions.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::CoreError;

// ---------------------------------------------------------------------------
// Stage
// ---------------------------------------------------------------------------

/// Stage of a single target's enrichment pipeline.
///
/// ```text
/// fetching → assessing → parsing → notifying → persisting → done
///          ↘ persisting (fetch failed)
///                      ↘ persisting (assess failed)
/// ```
///
/// Every path to `done` passes through `persisting`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Fetching,
    Assessing,
    Parsing,
    Notifying,
    Persisting,
    Done,
}

impl Stage {
    /// Valid next states from the current state.
    #[must_use]
    pub const fn allowed_next_states(self) -> &'static [Self] {
        match self {
            Self::Fetching => &[Self::Assessing, Self::Persisting],
            Self::Assessing => &[Self::Parsing, Self::Persisting],
            Self::Parsing => &[Self::Notifying],
            Self::Notifying => &[Self::Persisting],
            Self::Persisting => &[Self::Done],
            Self::Done => &[],
        }
    }

    /// Check whether transitioning to `next` is allowed.
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self.allowed_next_states().contains(&next)
    }

    /// Move to `next`, rejecting backward or skipping transitions.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidTransition`] if `next` is not in
    /// [`allowed_next_states`](Self::allowed_next_states).
    pub fn advance(self, next: Self) -> Result<Self, CoreError> {
        if self.can_transition_to(next) {
            Ok(next)
        } else {
            Err(CoreError::InvalidTransition {
                from: self.to_string(),
                to: next.to_string(),
            })
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Fetching => "fetching",
            Self::Assessing => "assessing",
            Self::Parsing => "parsing",
            Self::Notifying => "notifying",
            Self::Persisting => "persisting",
            Self::Done => "done",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Marker
// ---------------------------------------------------------------------------

/// Alert marker attached to the originating message.
///
/// The concrete reaction name for each marker is configurable; see
/// `vigil_config::MarkersConfig`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Marker {
    HighAlert,
    DoubleAlert,
    MediumAlert,
    LowAlert,
}

impl Marker {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::HighAlert => "high_alert",
            Self::DoubleAlert => "double_alert",
            Self::MediumAlert => "medium_alert",
            Self::LowAlert => "low_alert",
        }
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Outcome
// ---------------------------------------------------------------------------

/// Terminal outcome of one target's pipeline run, recorded in the audit log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// Assessment parsed and notifications attempted.
    Delivered,
    /// Content fetch failed or returned empty text.
    FetchFailed,
    /// Assessment generation failed or returned empty output.
    AssessFailed,
}

impl Outcome {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Delivered => "delivered",
            Self::FetchFailed => "fetch_failed",
            Self::AssessFailed => "assess_failed",
        }
    }

    /// Whether the run produced an assessment.
    #[must_use]
    pub const fn is_delivered(self) -> bool {
        matches!(self, Self::Delivered)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn happy_path_is_strictly_forward() {
        let path = [
            Stage::Fetching,
            Stage::Assessing,
            Stage::Parsing,
            Stage::Notifying,
            Stage::Persisting,
            Stage::Done,
        ];
        for pair in path.windows(2) {
            assert!(pair[0].can_transition_to(pair[1]), "{} -> {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn failures_jump_to_persisting() {
        assert!(Stage::Fetching.can_transition_to(Stage::Persisting));
        assert!(Stage::Assessing.can_transition_to(Stage::Persisting));
        assert!(!Stage::Parsing.can_transition_to(Stage::Persisting));
    }

    #[test]
    fn no_backward_or_terminal_transitions() {
        assert!(!Stage::Assessing.can_transition_to(Stage::Fetching));
        assert!(!Stage::Persisting.can_transition_to(Stage::Notifying));
        assert!(Stage::Done.allowed_next_states().is_empty());
    }

    #[test]
    fn done_is_only_reachable_from_persisting() {
        let all = [
            Stage::Fetching,
            Stage::Assessing,
            Stage::Parsing,
            Stage::Notifying,
            Stage::Persisting,
            Stage::Done,
        ];
        let sources: Vec<Stage> = all
            .into_iter()
            .filter(|s| s.can_transition_to(Stage::Done))
            .collect();
        assert_eq!(sources, vec![Stage::Persisting]);
    }

    #[test]
    fn advance_rejects_skips() {
        let err = Stage::Fetching.advance(Stage::Notifying).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid stage transition: fetching to notifying"
        );
        assert_eq!(Stage::Notifying.advance(Stage::Persisting).unwrap(), Stage::Persisting);
    }

    #[test]
    fn enums_serialize_snake_case() {
        assert_eq!(serde_json::to_string(&Marker::DoubleAlert).unwrap(), "\"double_alert\"");
        assert_eq!(serde_json::to_string(&Outcome::FetchFailed).unwrap(), "\"fetch_failed\"");
        assert_eq!(serde_json::to_string(&Stage::Persisting).unwrap(), "\"persisting\"");
    }
}
