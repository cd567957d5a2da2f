use std::path::{Path, PathBuf};

use chrono::Weekday;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::service::meetings_api::DEFAULT_BASE_URL;
use crate::ui::text::ClockFormat;

pub const APP_DIR: &str = "calendar-brief";
pub const BASE_URL_ENV: &str = "CALENDAR_BRIEF_BASE_URL";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub service: ServiceConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

/// Missing keys take their default value, so partial files stay usable.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ServiceConfig {
    pub base_url: String,
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct UiConfig {
    pub first_day_of_week: String,
    pub time_format: String,
    pub theme: String,
}

impl Config {
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::from)
    }

    pub fn load_or_create() -> Result<Self, ConfigError> {
        let config_path = Self::config_path();

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            let config = Self::default();
            config.save_to(&config_path)?;
            tracing::info!("Wrote default config to {}", config_path.display());
            Ok(config)
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR)
            .join("config.toml")
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, toml::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Environment first, then the command line; the last non-empty value wins.
    pub fn with_base_url_overrides(mut self, env_value: Option<String>, cli_value: Option<String>) -> Self {
        for candidate in [env_value, cli_value].into_iter().flatten() {
            let trimmed = candidate.trim();
            if !trimmed.is_empty() {
                self.service.base_url = trimmed.to_string();
            }
        }
        self
    }

    pub fn week_start(&self) -> Weekday {
        self.ui.first_day_of_week.parse().unwrap_or_else(|_| {
            tracing::warn!("Unknown first_day_of_week '{}', using Sunday", self.ui.first_day_of_week);
            Weekday::Sun
        })
    }

    pub fn clock(&self) -> ClockFormat {
        ClockFormat::from_config(&self.ui.time_format)
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout_secs: 10,
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            first_day_of_week: "Sunday".to_string(),
            time_format: "24h".to_string(),
            theme: "default".to_string(),
        }
    }
}
