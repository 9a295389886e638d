//! Application configuration, read from a RON file with environment overrides.

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use insight_engine::{request_url, FetchError, FetchSettings};
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::logging::LogDestination;

const CONFIG_FILENAME: &str = "insight.ron";
const ENV_CONFIG_PATH: &str = "INSIGHT_CONFIG";
const ENV_BASE_URL: &str = "INSIGHT_BASE_URL";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: ron::error::SpannedError,
    },
    #[error("unusable base url {url:?}: {source}")]
    BaseUrl { url: String, source: FetchError },
    #[error("unknown log level {0:?}")]
    LogLevel(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Where the insight service lives, e.g. `http://localhost:8080`.
    pub base_url: String,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub max_response_bytes: u64,
    /// ANSI colours and syntax highlighting.
    pub color: bool,
    pub log: LogDestination,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        let fetch = FetchSettings::default();
        Self {
            base_url: fetch.base_url,
            connect_timeout_secs: fetch.connect_timeout.as_secs(),
            request_timeout_secs: fetch.request_timeout.as_secs(),
            max_response_bytes: fetch.max_bytes,
            color: true,
            log: LogDestination::File,
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    pub fn fetch_settings(&self) -> FetchSettings {
        FetchSettings {
            base_url: self.base_url.clone(),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            max_bytes: self.max_response_bytes,
        }
    }

    pub fn level_filter(&self) -> Result<LevelFilter, ConfigError> {
        LevelFilter::from_str(&self.log_level)
            .map_err(|_| ConfigError::LogLevel(self.log_level.clone()))
    }
}

/// Loads the configuration using the process environment.
///
/// `INSIGHT_CONFIG` names the file (it must then exist); otherwise
/// `./insight.ron` is used when present. `INSIGHT_BASE_URL` wins over the file.
pub fn load() -> Result<AppConfig, ConfigError> {
    let explicit = std::env::var_os(ENV_CONFIG_PATH).map(PathBuf::from);
    let base_url = std::env::var(ENV_BASE_URL).ok();
    load_from(explicit.as_deref(), Path::new(CONFIG_FILENAME), base_url)
}

pub(crate) fn load_from(
    explicit: Option<&Path>,
    fallback: &Path,
    base_url_override: Option<String>,
) -> Result<AppConfig, ConfigError> {
    let mut config = match explicit {
        Some(path) => read_file(path)?,
        None => match fs::read_to_string(fallback) {
            Ok(text) => parse(fallback, &text)?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => AppConfig::default(),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: fallback.to_path_buf(),
                    source,
                })
            }
        },
    };

    if let Some(url) = base_url_override.filter(|url| !url.trim().is_empty()) {
        config.base_url = url.trim().to_string();
    }

    request_url(&config.base_url, "").map_err(|source| ConfigError::BaseUrl {
        url: config.base_url.clone(),
        source,
    })?;
    config.level_filter()?;
    Ok(config)
}

fn read_file(path: &Path) -> Result<AppConfig, ConfigError> {
    let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse(path, &text)
}

fn parse(path: &Path, text: &str) -> Result<AppConfig, ConfigError> {
    ron::from_str(text).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
