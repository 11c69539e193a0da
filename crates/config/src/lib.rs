#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Configuration management for papermc
//!
//! This crate handles loading and merging configuration from:
//! - Default values (hard-coded)
//! - Configuration file (~/.config/papermc/config.toml)
//! - Environment variables
//! - CLI flags (applied by the front end via [`Config::apply_overrides`])

use papermc_errors::{ConfigError, Error};
use papermc_types::{Channel, QueryOptions};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs;

pub const DEFAULT_BASE_URL: &str = "https://fill.papermc.io";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub query: QueryConfig,

    #[serde(default)]
    pub download: DownloadConfig,
}

/// Metadata service connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout")]
    pub timeout: u64, // seconds
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout: u64, // seconds
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

/// Defaults for list and lookup queries
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct QueryConfig {
    pub limit: Option<usize>,
    pub channel: Option<Channel>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DownloadConfig {
    pub destination: Option<PathBuf>,
}

/// Values supplied on the command line, highest precedence
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub base_url: Option<String>,
    pub timeout: Option<u64>,
    pub limit: Option<usize>,
    pub channel: Option<Channel>,
    pub destination: Option<PathBuf>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout: default_timeout(),
            connect_timeout: default_connect_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_user_agent() -> String {
    format!("papermc/{}", env!("CARGO_PKG_VERSION"))
}

impl ApiConfig {
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    #[must_use]
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout)
    }
}

impl Config {
    /// Get the default config file path
    ///
    /// # Errors
    ///
    /// Returns an error if the system config directory cannot be determined.
    pub fn default_path() -> Result<PathBuf, Error> {
        let config_dir = dirs::config_dir().ok_or_else(|| ConfigError::NotFound {
            path: "config directory".to_string(),
        })?;
        Ok(config_dir.join("papermc").join("config.toml"))
    }

    /// Load configuration from file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the file contents
    /// contain invalid TOML syntax that cannot be parsed.
    pub async fn load_from_file(path: &Path) -> Result<Self, Error> {
        let contents = fs::read_to_string(path)
            .await
            .map_err(|_| ConfigError::NotFound {
                path: path.display().to_string(),
            })?;

        let config: Self = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        config.validate()?;
        tracing::debug!(path = %path.display(), "loaded configuration file");
        Ok(config)
    }

    /// Load configuration with fallback to defaults
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file exists but cannot be read
    /// or contains invalid TOML syntax.
    pub async fn load() -> Result<Self, Error> {
        let config_path = Self::default_path()?;

        if config_path.exists() {
            Self::load_from_file(&config_path).await
        } else {
            tracing::debug!("no configuration file, using defaults");
            Ok(Self::default())
        }
    }

    /// Load configuration from an optional path or use default
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be read or parsed
    pub async fn load_or_default(path: Option<&Path>) -> Result<Self, Error> {
        match path {
            Some(config_path) => Self::load_from_file(config_path).await,
            None => Self::load().await,
        }
    }

    /// Merge with `PAPERMC_*` environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if environment variables contain invalid values
    /// that cannot be parsed into the expected types.
    pub fn merge_env(&mut self) -> Result<(), Error> {
        self.merge_env_from(std::env::vars())
    }

    /// Merge from an explicit set of variables
    ///
    /// # Errors
    ///
    /// Returns an error if a recognised variable has an invalid value.
    pub fn merge_env_from<I, K, V>(&mut self, vars: I) -> Result<(), Error>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        for (key, value) in vars {
            let value = value.into();
            match key.as_ref() {
                "PAPERMC_BASE_URL" => self.api.base_url = value,
                "PAPERMC_TIMEOUT" => self.api.timeout = parse_env("PAPERMC_TIMEOUT", value)?,
                "PAPERMC_LIMIT" => self.query.limit = Some(parse_env("PAPERMC_LIMIT", value)?),
                "PAPERMC_CHANNEL" => {
                    self.query.channel = Some(parse_env("PAPERMC_CHANNEL", value)?);
                }
                "PAPERMC_DESTINATION" => self.download.destination = Some(PathBuf::from(value)),
                _ => continue,
            }
            tracing::debug!(variable = key.as_ref(), "applied environment override");
        }
        self.validate()
    }

    /// Apply command-line values on top of everything else
    ///
    /// # Errors
    ///
    /// Returns an error if the merged configuration is invalid.
    pub fn apply_overrides(&mut self, overrides: Overrides) -> Result<(), Error> {
        if let Some(base_url) = overrides.base_url {
            self.api.base_url = base_url;
        }
        if let Some(timeout) = overrides.timeout {
            self.api.timeout = timeout;
        }
        if overrides.limit.is_some() {
            self.query.limit = overrides.limit;
        }
        if overrides.channel.is_some() {
            self.query.channel = overrides.channel;
        }
        if overrides.destination.is_some() {
            self.download.destination = overrides.destination;
        }
        self.validate()
    }

    /// Immutable query options derived from this configuration
    #[must_use]
    pub fn query_options(&self) -> QueryOptions {
        QueryOptions::new(self.query.limit, self.query.channel)
    }

    /// Directory downloads land in when no destination is given
    #[must_use]
    pub fn destination_dir(&self) -> PathBuf {
        self.download
            .destination
            .clone()
            .unwrap_or_else(|| PathBuf::from("."))
    }

    fn validate(&self) -> Result<(), Error> {
        if self.api.base_url.trim().is_empty() {
            return Err(invalid("api.base_url", &self.api.base_url));
        }
        if self.api.timeout == 0 {
            return Err(invalid("api.timeout", "0"));
        }
        if self.query.limit == Some(0) {
            return Err(invalid("query.limit", "0"));
        }
        Ok(())
    }
}

fn parse_env<T: std::str::FromStr>(field: &str, value: String) -> Result<T, Error> {
    value
        .trim()
        .parse()
        .map_err(|_| invalid(field, &value))
}

fn invalid(field: &str, value: &str) -> Error {
    ConfigError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
    }
    .into()
}
