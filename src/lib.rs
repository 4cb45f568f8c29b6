//! woo-edge - WooCommerce REST client and edge route
//!
//! This crate provides a thin client for the WooCommerce REST API and a
//! minimal HTTP route layer that exposes a read-only subset of it.
//!
//! # Overview
//!
//! The client turns method calls into authenticated, parameterized HTTP
//! requests (HTTP Basic or query-string credentials) and decodes JSON
//! responses. The route layer builds a client per inbound request from the
//! store bindings supplied by the environment and relays the store's JSON.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface definitions
//! - [`client`] - WooCommerce REST API client
//! - [`config`] - Configuration file parsing and environment overrides
//! - [`error`] - Error types and error handling
//! - [`server`] - HTTP routes

pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod server;

#[cfg(test)]
pub(crate) mod testing;

// Re-exports for convenience
pub use cli::Cli;
pub use client::{ClientOptions, HttpMethod, QueryParams, RequestOptions, WooApi, WooClient};
pub use config::Config;
pub use error::{ErrorCode, Result, WooError};
pub use server::serve;
