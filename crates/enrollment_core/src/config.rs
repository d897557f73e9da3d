use std::{collections::HashMap, fs, path::Path, time::Duration};

use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8080";
pub const DEFAULT_SETTINGS_FILE: &str = "enrollment.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EnrollmentSettings {
    pub api_url: String,
    pub request_timeout_secs: u64,
    pub log_level: String,
}

impl Default for EnrollmentSettings {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.into(),
            request_timeout_secs: 30,
            log_level: "info".into(),
        }
    }
}

impl EnrollmentSettings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read settings file '{path}': {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse settings file '{path}': {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },
    #[error("invalid request timeout '{0}'; expected whole seconds")]
    InvalidTimeout(String),
}

/// Defaults, then `enrollment.toml` in the working directory, then the environment.
pub fn load_settings() -> Result<EnrollmentSettings, ConfigError> {
    load_settings_from(Path::new(DEFAULT_SETTINGS_FILE), |key| std::env::var(key).ok())
}

pub fn load_settings_from(
    path: &Path,
    env: impl Fn(&str) -> Option<String>,
) -> Result<EnrollmentSettings, ConfigError> {
    let mut settings = EnrollmentSettings::default();

    if path.exists() {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let file_cfg =
            toml::from_str::<HashMap<String, toml::Value>>(&raw).map_err(|source| {
                ConfigError::Parse {
                    path: path.display().to_string(),
                    source,
                }
            })?;
        if let Some(v) = file_cfg.get("api_url").and_then(toml::Value::as_str) {
            settings.api_url = v.to_string();
        }
        if let Some(v) = file_cfg.get("request_timeout_secs") {
            settings.request_timeout_secs = match v {
                toml::Value::Integer(secs) if *secs > 0 => *secs as u64,
                other => return Err(ConfigError::InvalidTimeout(other.to_string())),
            };
        }
        if let Some(v) = file_cfg.get("log_level").and_then(toml::Value::as_str) {
            settings.log_level = v.to_string();
        }
    }

    if let Some(v) = env("SAVEPETS_API_URL") {
        settings.api_url = v;
    }
    if let Some(v) = env("APP__API_URL") {
        settings.api_url = v;
    }

    if let Some(v) = env("APP__REQUEST_TIMEOUT_SECS") {
        settings.request_timeout_secs = parse_timeout(&v)?;
    }

    if let Some(v) = env("APP__LOG_LEVEL") {
        settings.log_level = v;
    }

    settings.api_url = normalize_api_url(&settings.api_url);
    Ok(settings)
}

pub fn normalize_api_url(raw_api_url: &str) -> String {
    let trimmed = raw_api_url.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return DEFAULT_API_URL.to_string();
    }
    if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("http://{trimmed}")
    }
}

fn parse_timeout(raw: &str) -> Result<u64, ConfigError> {
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(secs),
        _ => Err(ConfigError::InvalidTimeout(raw.to_string())),
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
