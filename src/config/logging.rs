//! Logging configuration and filter construction.
//!
//! The effective filter comes from `RUST_LOG` when it parses, otherwise from
//! the `-v`/`-q` flags, otherwise from `logging.level`. HTTP transport crates
//! are held at `warn` below `trace` so request logs stay readable.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing_subscriber::EnvFilter;

use crate::error::{Result, WooError};

/// Transport crates that are chatty at `debug`.
const QUIET_TARGETS: &[&str] = &["hyper", "hyper_util", "h2", "rustls", "reqwest"];

/// Logging configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level.
    pub level: LogLevel,

    /// Log format.
    pub format: LogFormat,

    /// Log output destination.
    pub output: LogOutput,
}

impl LoggingConfig {
    /// Builds the filter directive for a flag level, falling back to the
    /// configured level.
    pub fn directive(&self, flag_level: Option<&str>) -> String {
        let level = flag_level.unwrap_or(self.level.as_str());
        if level == LogLevel::Trace.as_str() {
            return level.to_string();
        }

        QUIET_TARGETS.iter().fold(level.to_string(), |mut directive, target| {
            directive.push(',');
            directive.push_str(target);
            directive.push_str("=warn");
            directive
        })
    }

    /// Builds the subscriber filter. A `rust_log` value that fails to parse
    /// is ignored.
    pub fn env_filter(&self, flag_level: Option<&str>, rust_log: Option<&str>) -> Result<EnvFilter> {
        if let Some(filter) = rust_log
            .filter(|value| !value.trim().is_empty())
            .and_then(|value| EnvFilter::try_new(value).ok())
        {
            return Ok(filter);
        }

        let directive = self.directive(flag_level);
        EnvFilter::try_new(&directive).map_err(|e| {
            WooError::config_with_source(format!("Invalid log filter '{}'", directive), e)
        })
    }
}

/// Log level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Returns the level as a filter directive.
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl FromStr for LogLevel {
    type Err = WooError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(unknown("log level", s, "trace, debug, info, warn, error")),
        }
    }
}

/// Log format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// One JSON object per event.
    Json,
    /// Human-readable lines.
    #[default]
    Text,
}

impl FromStr for LogFormat {
    type Err = WooError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "json" => Ok(LogFormat::Json),
            "text" => Ok(LogFormat::Text),
            _ => Err(unknown("log format", s, "text, json")),
        }
    }
}

/// Log output destination.
///
/// `stderr` by default so `woo-edge request` keeps stdout for the response.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogOutput {
    Stdout,
    #[default]
    Stderr,
}

impl FromStr for LogOutput {
    type Err = WooError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "stdout" => Ok(LogOutput::Stdout),
            "stderr" => Ok(LogOutput::Stderr),
            _ => Err(unknown("log output", s, "stdout, stderr")),
        }
    }
}

fn unknown(what: &str, value: &str, expected: &str) -> WooError {
    WooError::config(format!("Unknown {} '{}' (expected one of: {})", what, value, expected))
}
