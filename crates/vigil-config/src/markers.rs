//! Reaction names used for alert markers.

use serde::{Deserialize, Serialize};
use vigil_core::enums::Marker;

fn default_high_alert() -> String {
    String::from("red_circle")
}

fn default_double_alert() -> String {
    String::from("bangbang")
}

fn default_medium_alert() -> String {
    String::from("large_orange_circle")
}

fn default_low_alert() -> String {
    String::from("large_green_circle")
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct MarkersConfig {
    #[serde(default = "default_high_alert")]
    pub high_alert: String,
    #[serde(default = "default_double_alert")]
    pub double_alert: String,
    #[serde(default = "default_medium_alert")]
    pub medium_alert: String,
    #[serde(default = "default_low_alert")]
    pub low_alert: String,
}

impl Default for MarkersConfig {
    fn default() -> Self {
        Self {
            high_alert: default_high_alert(),
            double_alert: default_double_alert(),
            medium_alert: default_medium_alert(),
            low_alert: default_low_alert(),
        }
    }
}

impl MarkersConfig {
    /// Reaction name for `marker`.
    #[must_use]
    pub fn name_for(&self, marker: Marker) -> &str {
        match marker {
            Marker::HighAlert => &self.high_alert,
            Marker::DoubleAlert => &self.double_alert,
            Marker::MediumAlert => &self.medium_alert,
            Marker::LowAlert => &self.low_alert,
        }
    }
}
