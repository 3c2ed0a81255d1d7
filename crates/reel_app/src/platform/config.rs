//! Front-end configuration: a RON file plus an environment override for the key.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use reel_engine::{ApiConfig, DEFAULT_BASE_URL};
use reel_logging::reel_info;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const CONFIG_FILENAME: &str = "reel.ron";
pub const API_KEY_ENV: &str = "REEL_API_KEY";

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api: ApiSection,
    pub log_to_terminal: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiSection {
    pub base_url: String,
    pub api_key: String,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
}

impl Default for ApiSection {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: String::new(),
            connect_timeout_secs: 10,
            request_timeout_secs: 30,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: ron::error::SpannedError,
    },
    #[error("no API key configured; set REEL_API_KEY or api.api_key in reel.ron")]
    MissingApiKey,
}

impl AppConfig {
    /// Loads `path`; a missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        let config = ron::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        reel_info!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    /// A non-empty environment value replaces the configured key.
    pub fn with_api_key_override(mut self, key: Option<String>) -> Self {
        if let Some(key) = key.filter(|key| !key.trim().is_empty()) {
            self.api.api_key = key.trim().to_string();
        }
        self
    }

    pub fn api_config(&self) -> Result<ApiConfig, ConfigError> {
        if self.api.api_key.trim().is_empty() {
            return Err(ConfigError::MissingApiKey);
        }
        let mut config =
            ApiConfig::new(self.api.api_key.trim()).with_base_url(self.api.base_url.clone());
        config.connect_timeout = Duration::from_secs(self.api.connect_timeout_secs);
        config.request_timeout = Duration::from_secs(self.api.request_timeout_secs);
        Ok(config)
    }
}
