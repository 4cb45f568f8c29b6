//! Command-line interface definition for woo-edge.
//!
//! This module defines the CLI structure using clap derive macros,
//! including all subcommands and their arguments.

use clap::{Args, Parser, Subcommand};
use serde_json::Value;
use std::path::PathBuf;

use crate::client::{HttpMethod, ParamValue, QueryParams, Scalar};
use crate::error::{Result, WooError};

/// woo-edge - WooCommerce REST client and edge route
///
/// Serves a read-only products route backed by a WooCommerce store, or
/// issues single requests against the store API.
#[derive(Debug, Parser)]
#[command(name = "woo-edge")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true, env = "WOO_EDGE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (can be repeated: -v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Returns the log level requested by flags, if any.
    pub fn log_level(&self) -> Option<&'static str> {
        if self.quiet {
            return Some("error");
        }

        match self.verbose {
            0 => None,
            1 => Some("debug"),
            _ => Some("trace"),
        }
    }
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start the HTTP server exposing the products route
    Serve(ServeArgs),

    /// Send a single request to the store API and print the JSON response
    Request(RequestArgs),

    /// Configuration operations
    #[command(subcommand)]
    Config(ConfigCommands),
}

/// Arguments for the `serve` subcommand.
#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Bind address (overrides configuration)
    #[arg(long)]
    pub bind: Option<String>,

    /// Listen port (overrides configuration)
    #[arg(long)]
    pub port: Option<u16>,
}

/// Arguments for the `request` subcommand.
#[derive(Debug, Args)]
pub struct RequestArgs {
    /// HTTP method (GET, POST, PUT, DELETE)
    #[arg(value_parser = parse_method)]
    pub method: HttpMethod,

    /// Endpoint path relative to the API version (e.g., "products/42")
    pub endpoint: String,

    /// Query parameter as key=value; repeat a key to send a list
    #[arg(short, long = "param", value_name = "KEY=VALUE")]
    pub params: Vec<String>,

    /// Query parameter whose value is JSON, as key=<json>
    #[arg(long = "json-param", value_name = "KEY=JSON")]
    pub json_params: Vec<String>,

    /// JSON request body
    #[arg(short, long)]
    pub body: Option<String>,

    /// Extra header as name:value
    #[arg(short = 'H', long = "header", value_name = "NAME:VALUE")]
    pub headers: Vec<String>,

    /// Send credentials as query parameters instead of a Basic header
    #[arg(long)]
    pub query_string_auth: bool,
}

impl RequestArgs {
    /// Builds the query parameters from `--param` and `--json-param`.
    pub fn query_params(&self) -> Result<Option<QueryParams>> {
        let mut grouped: Vec<(String, Vec<String>)> = Vec::new();
        for raw in &self.params {
            let (key, value) = split_pair(raw, '=')?;
            match grouped.iter_mut().find(|(k, _)| k == key) {
                Some((_, values)) => values.push(value.to_string()),
                None => grouped.push((key.to_string(), vec![value.to_string()])),
            }
        }

        let mut params: QueryParams = grouped
            .into_iter()
            .map(|(key, mut values)| {
                let value = if values.len() == 1 {
                    ParamValue::Scalar(Scalar::Str(values.remove(0)))
                } else {
                    ParamValue::List(values.into_iter().map(Scalar::Str).collect())
                };
                (key, value)
            })
            .collect();

        for raw in &self.json_params {
            let (key, value) = split_pair(raw, '=')?;
            let json: Value = serde_json::from_str(value).map_err(|e| {
                WooError::invalid_request(format!("Invalid JSON for parameter '{}': {}", key, e))
            })?;
            params.insert_opt(key, ParamValue::from_json(json));
        }

        Ok((!params.is_empty()).then_some(params))
    }

    /// Parses the `--body` JSON.
    pub fn body(&self) -> Result<Option<Value>> {
        self.body
            .as_deref()
            .map(|raw| {
                serde_json::from_str(raw)
                    .map_err(|e| WooError::invalid_request(format!("Invalid JSON body: {}", e)))
            })
            .transpose()
    }

    /// Parses the `--header` values.
    pub fn headers(&self) -> Result<Vec<(String, String)>> {
        self.headers
            .iter()
            .map(|raw| {
                split_pair(raw, ':').map(|(name, value)| (name.trim().to_string(), value.trim().to_string()))
            })
            .collect()
    }
}

/// Configuration subcommands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Validate the configuration
    Validate,

    /// Show the effective configuration (secrets redacted)
    Show,
}

fn split_pair(raw: &str, separator: char) -> Result<(&str, &str)> {
    match raw.split_once(separator) {
        Some((key, value)) if !key.trim().is_empty() => Ok((key, value)),
        _ => Err(WooError::invalid_request(format!(
            "Expected '<name>{}<value>', got '{}'",
            separator, raw
        ))),
    }
}

/// Parse an HTTP method from string.
fn parse_method(s: &str) -> std::result::Result<HttpMethod, String> {
    s.parse().map_err(|e: WooError| e.to_string())
}
