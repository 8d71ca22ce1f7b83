use std::fs;
use std::path::{Path, PathBuf};

use reqwest::Url;
use thiserror::Error;

use crate::config::types::{ApiConfig, Config};

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config validation failed: {message}")]
    ValidationError { message: String },
}

impl Config {
    /// Returns the path to the configuration file.
    ///
    /// Uses `~/.config/portal-state/config.toml` on Unix/macOS,
    /// or equivalent on other platforms via `dirs::config_dir()`.
    /// Falls back to current directory if config_dir is unavailable.
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.join("portal-state").join("config.toml")
    }

    /// Loads configuration from the default config file.
    ///
    /// If the file doesn't exist, returns `Config::default()`.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::config_path();

        if !path.exists() {
            return Ok(Config::default());
        }

        Self::load_from(&path)
    }

    /// Reads, parses and validates the file at `path`.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// Checks:
    /// - The API base URL is an absolute http(s) URL
    /// - Every endpoint path starts with `/`
    /// - Timeouts are non-zero
    /// - The beacon URL, if any, parses
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.api.base()?;

        for (name, path) in self.api.paths() {
            if !path.starts_with('/') {
                return Err(ConfigError::ValidationError {
                    message: format!("api.{name} must start with '/', got '{path}'"),
                });
            }
        }

        if self.api.csrf_header.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                message: "api.csrf_header must not be empty".to_string(),
            });
        }

        if self.api.timeout_seconds == 0 || self.api.connect_timeout_seconds == 0 {
            return Err(ConfigError::ValidationError {
                message: "api timeouts must be greater than zero".to_string(),
            });
        }

        if let Some(beacon) = &self.telemetry.beacon_url {
            Url::parse(beacon).map_err(|e| ConfigError::ValidationError {
                message: format!("telemetry.beacon_url '{beacon}' is invalid: {e}"),
            })?;
        }

        Ok(())
    }
}

impl ApiConfig {
    /// Parsed base URL.
    pub fn base(&self) -> Result<Url, ConfigError> {
        let url = Url::parse(&self.base_url).map_err(|e| ConfigError::ValidationError {
            message: format!("api.base_url '{}' is invalid: {e}", self.base_url),
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::ValidationError {
                message: format!("api.base_url must use http or https, got '{}'", url.scheme()),
            });
        }
        Ok(url)
    }

    /// Resolve a configured path against the base URL.
    pub fn endpoint(&self, path: &str) -> Result<Url, ConfigError> {
        self.base()?.join(path).map_err(|e| ConfigError::ValidationError {
            message: format!("endpoint '{path}' is invalid: {e}"),
        })
    }

    fn paths(&self) -> [(&'static str, &str); 6] {
        [
            ("activity_path", &self.activity_path),
            ("csrf_path", &self.csrf_path),
            ("terms_path", &self.terms_path),
            ("address_fields_path", &self.address_fields_path),
            ("agreement_registration_path", &self.agreement_registration_path),
            ("agreement_validation_path", &self.agreement_validation_path),
        ]
    }
}
