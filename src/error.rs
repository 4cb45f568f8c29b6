//! Error types and error handling for woo-edge.
//!
//! This module defines the error type shared by the client, the route layer
//! and the CLI, together with error codes, the JSON error envelope returned
//! by the HTTP routes, and CLI exit codes.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

/// Error codes used in API error responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCode {
    /// W001: Configuration is invalid or incomplete
    #[serde(rename = "W001")]
    ConfigInvalid,

    /// W002: The upstream store could not be reached
    #[serde(rename = "W002")]
    TransportError,

    /// W003: The request was cancelled before it completed
    #[serde(rename = "W003")]
    Cancelled,

    /// W004: The upstream store answered with a non-2xx status
    #[serde(rename = "W004")]
    UpstreamError,

    /// W005: The upstream body was not valid JSON
    #[serde(rename = "W005")]
    DecodeError,

    /// W006: The request could not be built
    #[serde(rename = "W006")]
    InvalidRequest,

    /// W007: Local I/O failed
    #[serde(rename = "W007")]
    IoError,
}

impl ErrorCode {
    /// Returns the error code as a string (e.g., "W001").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::ConfigInvalid => "W001",
            ErrorCode::TransportError => "W002",
            ErrorCode::Cancelled => "W003",
            ErrorCode::UpstreamError => "W004",
            ErrorCode::DecodeError => "W005",
            ErrorCode::InvalidRequest => "W006",
            ErrorCode::IoError => "W007",
        }
    }

    /// Returns the HTTP status the route layer answers with for this error.
    pub fn http_status(&self) -> u16 {
        match self {
            ErrorCode::ConfigInvalid => 500,
            ErrorCode::TransportError => 502,
            ErrorCode::Cancelled => 503,
            ErrorCode::UpstreamError => 502,
            ErrorCode::DecodeError => 502,
            ErrorCode::InvalidRequest => 400,
            ErrorCode::IoError => 500,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// CLI exit codes.
pub mod exit_code {
    /// Success
    pub const SUCCESS: i32 = 0;
    /// General error
    pub const GENERAL_ERROR: i32 = 1;
    /// Configuration error
    pub const CONFIG_ERROR: i32 = 2;
    /// Transport error
    pub const TRANSPORT_ERROR: i32 = 3;
    /// Upstream answered with an error status
    pub const UPSTREAM_ERROR: i32 = 4;
    /// Request was cancelled
    pub const CANCELLED: i32 = 130;
}

/// The main error type for woo-edge.
#[derive(Debug, Error)]
pub enum WooError {
    /// Configuration is invalid or cannot be loaded.
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Network-level failure talking to the store.
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The caller's cancellation token fired before the call completed.
    #[error("Request cancelled")]
    Cancelled,

    /// The store answered with a status outside 200-299.
    #[error("WooCommerce request failed: {status} {status_text} {body}")]
    Upstream {
        status: u16,
        status_text: String,
        body: String,
    },

    /// A 2xx body was not valid JSON for the expected type.
    #[error("JSON decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// The request could not be built (bad URL, header, etc.).
    #[error("Invalid request: {message}")]
    InvalidRequest { message: String },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error.
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl WooError {
    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            WooError::Config { .. } | WooError::Yaml(_) => ErrorCode::ConfigInvalid,
            WooError::Transport(_) => ErrorCode::TransportError,
            WooError::Cancelled => ErrorCode::Cancelled,
            WooError::Upstream { .. } => ErrorCode::UpstreamError,
            WooError::Decode(_) => ErrorCode::DecodeError,
            WooError::InvalidRequest { .. } => ErrorCode::InvalidRequest,
            WooError::Io(_) => ErrorCode::IoError,
        }
    }

    /// Returns the CLI exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            WooError::Config { .. } | WooError::Yaml(_) => exit_code::CONFIG_ERROR,
            WooError::Transport(_) => exit_code::TRANSPORT_ERROR,
            WooError::Upstream { .. } => exit_code::UPSTREAM_ERROR,
            WooError::Cancelled => exit_code::CANCELLED,
            _ => exit_code::GENERAL_ERROR,
        }
    }

    /// Creates a configuration error with a message.
    pub fn config(message: impl Into<String>) -> Self {
        WooError::Config {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a configuration error with a message and source.
    pub fn config_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        WooError::Config {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Creates an invalid request error.
    pub fn invalid_request(message: impl Into<String>) -> Self {
        WooError::InvalidRequest {
            message: message.into(),
        }
    }

    /// Returns the upstream HTTP status, if the store answered at all.
    pub fn upstream_status(&self) -> Option<u16> {
        match self {
            WooError::Upstream { status, .. } => Some(*status),
            WooError::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Error details for API responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetails {
    /// Additional context fields.
    #[serde(flatten)]
    pub fields: HashMap<String, serde_json::Value>,
}

impl ErrorDetails {
    /// Creates empty error details.
    pub fn new() -> Self {
        Self {
            fields: HashMap::new(),
        }
    }

    /// Adds a field to the error details.
    pub fn with_field(
        mut self,
        key: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }
}

impl Default for ErrorDetails {
    fn default() -> Self {
        Self::new()
    }
}

/// Error response structure for the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code (e.g., "W004").
    pub code: ErrorCode,

    /// Human-readable error message.
    pub message: String,

    /// Additional error details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<ErrorDetails>,
}

impl ErrorResponse {
    /// Creates a new error response.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Creates an error response from a WooError.
    pub fn from_error(error: &WooError) -> Self {
        let code = error.code();
        let message = error.to_string();

        let details = match error {
            WooError::Upstream {
                status,
                status_text,
                body,
            } => Some(
                ErrorDetails::new()
                    .with_field("upstream_status", *status)
                    .with_field("upstream_status_text", status_text.clone())
                    .with_field("upstream_body", body.clone()),
            ),
            WooError::Transport(e) => e
                .url()
                .map(|url| ErrorDetails::new().with_field("host", url.host_str().unwrap_or(""))),
            _ => None,
        };

        Self {
            code,
            message,
            details,
        }
    }
}

/// Result type alias for woo-edge operations.
pub type Result<T> = std::result::Result<T, WooError>;
