//! Configuration module for woo-edge.
//!
//! Configuration is loaded from an optional YAML file and then overridden by
//! environment variables. The store credentials are normally supplied only
//! through the environment (`WOO_URL`, `WOO_CONSUMER_KEY`,
//! `WOO_CONSUMER_SECRET`).

mod logging;
mod server;
mod store;

pub use logging::{LogFormat, LogLevel, LogOutput, LoggingConfig};
pub use server::ServerConfig;
pub use store::{Bindings, StoreConfig};

use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

use crate::error::{Result, WooError};

/// Environment variable for the configuration file path.
pub const ENV_CONFIG_PATH: &str = "WOO_EDGE_CONFIG";

/// Configuration file looked up in the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "woo-edge.yaml";

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Server configuration.
    pub server: ServerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Store configuration.
    pub store: StoreConfig,
}

impl Config {
    /// Loads configuration with the following priority:
    /// 1. Explicit path (if provided)
    /// 2. WOO_EDGE_CONFIG environment variable
    /// 3. ./woo-edge.yaml
    ///
    /// Falls back to defaults if no file exists. Environment overrides are
    /// applied last.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        let mut config = match Self::resolve_config_path(explicit_path) {
            Some(path) if path.exists() => Self::load_from_path(&path)?,
            Some(path) if explicit_path.is_some() || env::var_os(ENV_CONFIG_PATH).is_some() => {
                return Err(WooError::config(format!(
                    "Configuration file not found: {}",
                    path.display()
                )));
            }
            _ => Config::default(),
        };

        config.apply_overrides(|name| env::var(name).ok());
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a YAML file.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            WooError::config_with_source(
                format!("Failed to read config file: {}", path.display()),
                e,
            )
        })?;

        Self::load_from_str(&content)
    }

    /// Loads configuration from a YAML string.
    pub fn load_from_str(content: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(content)
            .map_err(|e| WooError::config_with_source("Failed to parse config", e))?;

        config.validate()?;
        Ok(config)
    }

    fn resolve_config_path(explicit_path: Option<&Path>) -> Option<PathBuf> {
        if let Some(path) = explicit_path {
            return Some(path.to_path_buf());
        }

        if let Some(env_path) = env::var_os(ENV_CONFIG_PATH) {
            return Some(PathBuf::from(env_path));
        }

        Some(PathBuf::from(DEFAULT_CONFIG_PATH))
    }

    /// Applies environment overrides, reading variables through `lookup`.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        // Store bindings
        if let Some(url) = lookup("WOO_URL") {
            self.store.url = Some(url);
        }
        if let Some(key) = lookup("WOO_CONSUMER_KEY") {
            self.store.consumer_key = Some(key);
        }
        if let Some(secret) = lookup("WOO_CONSUMER_SECRET") {
            self.store.consumer_secret = Some(SecretString::from(secret));
        }
        if let Some(enabled) = lookup("WOO_QUERY_STRING_AUTH") {
            if let Ok(enabled) = enabled.parse() {
                self.store.query_string_auth = enabled;
            }
        }

        // Server settings
        if let Some(bind) = lookup("WOO_EDGE_BIND") {
            self.server.bind = bind;
        }
        if let Some(port) = lookup("WOO_EDGE_PORT") {
            if let Ok(port) = port.parse() {
                self.server.port = port;
            }
        }

        // Logging settings
        if let Some(level) = lookup("WOO_EDGE_LOG_LEVEL") {
            if let Ok(level) = level.parse() {
                self.logging.level = level;
            }
        }
        if let Some(format) = lookup("WOO_EDGE_LOG_FORMAT") {
            if let Ok(format) = format.parse() {
                self.logging.format = format;
            }
        }
        if let Some(output) = lookup("WOO_EDGE_LOG_OUTPUT") {
            if let Ok(output) = output.parse() {
                self.logging.output = output;
            }
        }
    }

    /// Validates the configuration.
    ///
    /// Missing store credentials are not an error here; they are checked
    /// when a client is needed.
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(WooError::config("server.port must be > 0"));
        }

        if self.server.products_per_page == 0 {
            return Err(WooError::config("server.products_per_page must be > 0"));
        }

        if let Some(url) = &self.store.url {
            let parsed = reqwest::Url::parse(url).map_err(|e| {
                WooError::config_with_source(format!("store.url is not a valid URL: {}", url), e)
            })?;
            if !matches!(parsed.scheme(), "http" | "https") {
                return Err(WooError::config(format!(
                    "store.url must use http or https: {}",
                    url
                )));
            }
        }

        if self.store.version.trim_matches('/').is_empty() {
            return Err(WooError::config("store.version must not be empty"));
        }

        Ok(())
    }

    /// Returns the store bindings, failing if any credential is missing.
    pub fn bindings(&self) -> Result<Bindings> {
        self.store.bindings()
    }
}
