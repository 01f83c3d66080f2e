//! Assessment model configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

const fn default_max_tokens() -> u32 {
    500
}

const fn default_temperature() -> f32 {
    0.7
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AssessorConfig {
    /// Base URL of an OpenAI-compatible API (e.g. `http://localhost:4000/v1`).
    #[serde(default)]
    pub base_url: String,

    /// Bearer token, if the endpoint requires one.
    #[serde(default)]
    pub api_key: String,

    /// Model identifier passed through to the endpoint.
    #[serde(default)]
    pub model: String,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Optional file describing the monitored organisation's infrastructure,
    /// embedded in the system prompt.
    #[serde(default)]
    pub context_path: Option<PathBuf>,
}

impl Default for AssessorConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            api_key: String::new(),
            model: String::new(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            context_path: None,
        }
    }
}

impl AssessorConfig {
    /// Check if the assessor config has the minimum required fields.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.base_url.is_empty() && !self.model.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_not_configured() {
        let config = AssessorConfig::default();
        assert!(!config.is_configured());
        assert_eq!(config.max_tokens, 500);
        assert!((config.temperature - 0.7).abs() < f32::EPSILON);
    }

    #[test]
    fn api_key_is_optional() {
        let config = AssessorConfig {
            base_url: "http://localhost:4000/v1".into(),
            model: "claude-sonnet".into(),
            ..Default::default()
        };
        assert!(config.is_configured());
    }
}
