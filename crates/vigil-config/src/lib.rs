//! # vigil-config
//!
//! Layered configuration loading for Vigil using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`VIGIL_*` prefix, `__` as separator)
//! 2. Working-directory `vigil.toml`
//! 3. User-level `~/.config/vigil/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `VIGIL_SLACK__BOT_TOKEN` -> `slack.bot_token`,
//! `VIGIL_MONITOR__MAX_MESSAGE_AGE` -> `monitor.max_message_age`, etc.
//! Lists use figment's array syntax:
//! `VIGIL_MONITOR__ALERT_RECIPIENTS='[soc@example.com, U0123]'`.
//!
//! # Usage
//!
//! ```no_run
//! use vigil_config::VigilConfig;
//!
//! let config = VigilConfig::load_with_dotenv().expect("config");
//! config.ensure_ready().expect("slack and assessor configured");
//! println!("watching {}", config.slack.channel);
//! ```

mod assessor;
mod error;
mod fetcher;
mod markers;
mod monitor;
mod slack;

pub use assessor::AssessorConfig;
pub use error::ConfigError;
pub use fetcher::FetcherConfig;
pub use markers::MarkersConfig;
pub use monitor::MonitorConfig;
pub use slack::SlackConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Project-local config file, relative to the working directory.
const LOCAL_CONFIG_FILE: &str = "vigil.toml";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct VigilConfig {
    #[serde(default)]
    pub slack: SlackConfig,
    #[serde(default)]
    pub monitor: MonitorConfig,
    #[serde(default)]
    pub fetcher: FetcherConfig,
    #[serde(default)]
    pub assessor: AssessorConfig,
    #[serde(default)]
    pub markers: MarkersConfig,
}

impl VigilConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`load_with_dotenv`](Self::load_with_dotenv)
    /// if you need `.env` file loading.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] if a source is malformed or a value has
    /// the wrong type.
    pub fn load() -> Result<Self, ConfigError> {
        Self::figment().extract().map_err(ConfigError::from)
    }

    /// Load configuration with `.env` file support.
    ///
    /// A missing `.env` is not an error.
    ///
    /// # Errors
    ///
    /// See [`load`](Self::load).
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// This is public so tests can inspect the figment directly or add
    /// additional providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Working-directory config
        let local_path = PathBuf::from(LOCAL_CONFIG_FILE);
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed("VIGIL_").split("__"))
    }

    /// Check that everything the monitor needs at runtime is present.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotConfigured`] for a missing `slack` or
    /// `assessor` section and [`ConfigError::InvalidValue`] for values the
    /// monitor cannot run with.
    pub fn ensure_ready(&self) -> Result<(), ConfigError> {
        if !self.slack.is_configured() {
            return Err(ConfigError::NotConfigured {
                section: "slack".into(),
            });
        }
        if !self.assessor.is_configured() {
            return Err(ConfigError::NotConfigured {
                section: "assessor".into(),
            });
        }
        if self.monitor.poll_interval_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "monitor.poll_interval_secs".into(),
                reason: "must be at least 1 second".into(),
            });
        }
        if self.monitor.max_content_chars == 0 {
            return Err(ConfigError::InvalidValue {
                field: "monitor.max_content_chars".into(),
                reason: "must be greater than zero".into(),
            });
        }
        if self.fetcher.max_attempts == 0 {
            return Err(ConfigError::InvalidValue {
                field: "fetcher.max_attempts".into(),
                reason: "must be at least 1".into(),
            });
        }
        Ok(())
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("vigil").join("config.toml"))
    }
}
