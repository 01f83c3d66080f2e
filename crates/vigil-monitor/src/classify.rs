//! Maps a parsed assessment onto notification intensity.

use serde::Serialize;
use vigil_core::enums::Marker;

/// Which markers to attach, and whether recipients get a direct alert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlertDecision {
    pub markers: Vec<Marker>,
    pub dm_worthy: bool,
}

impl AlertDecision {
    fn new(markers: &[Marker], dm_worthy: bool) -> Self {
        Self {
            markers: markers.to_vec(),
            dm_worthy,
        }
    }
}

/// Decide markers from the severity label, falling back to relevance when
/// the label is not one of `critical`, `red`, `amber` or `green`.
#[must_use]
pub fn classify(severity: &str, relevance: &str) -> AlertDecision {
    use Marker::{DoubleAlert, HighAlert, LowAlert, MediumAlert};

    match severity.trim().to_lowercase().as_str() {
        "critical" => AlertDecision::new(&[HighAlert, DoubleAlert], true),
        "red" => AlertDecision::new(&[HighAlert], true),
        "amber" => AlertDecision::new(&[MediumAlert], false),
        "green" => AlertDecision::new(&[LowAlert], false),
        _ => match relevance_score(relevance) {
            5.. => AlertDecision::new(&[HighAlert, DoubleAlert], true),
            4 => AlertDecision::new(&[HighAlert], true),
            3 => AlertDecision::new(&[MediumAlert], false),
            _ => AlertDecision::new(&[LowAlert], false),
        },
    }
}

/// First integer in `text`; 0 if there is none, saturating when it does
/// not fit.
fn relevance_score(text: &str) -> u32 {
    let digits: String = text
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(char::is_ascii_digit)
        .collect();
    if digits.is_empty() {
        return 0;
    }
    digits.parse().unwrap_or(u32::MAX)
}
