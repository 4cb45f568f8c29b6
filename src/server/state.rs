//! Application state management.
//!
//! The state holds only what the hosting environment supplies; a fresh
//! store client is built from it for every inbound request.

use crate::client::WooClient;
use crate::config::{Config, StoreConfig};
use crate::error::Result;
use reqwest::Client;

/// Shared application state.
pub struct AppState {
    /// Source of the per-request store bindings.
    pub store: StoreConfig,
    /// Number of products returned by the products route.
    pub products_per_page: u32,
    /// Connection pool shared by the per-request clients.
    http: Client,
}

impl AppState {
    /// Creates a new application state from configuration.
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            store: config.store.clone(),
            products_per_page: config.server.products_per_page,
            http: Client::builder().build()?,
        })
    }

    /// Builds a store client from the current bindings.
    pub fn client(&self) -> Result<WooClient> {
        let bindings = self.store.bindings()?;
        Ok(WooClient::with_http_client(
            bindings.client_options(),
            self.http.clone(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::WooError;

    #[test]
    fn test_app_state_new() {
        let config = Config::default();
        let state = AppState::new(&config).unwrap();

        assert_eq!(state.products_per_page, 5);
        assert!(state.store.url.is_none());
    }

    #[test]
    fn test_client_requires_bindings() {
        let state = AppState::new(&Config::default()).unwrap();
        let err = state.client().unwrap_err();
        assert!(matches!(err, WooError::Config { .. }));
    }

    #[test]
    fn test_client_from_bindings() {
        let mut config = Config::default();
        config.apply_overrides(|name| match name {
            "WOO_URL" => Some("https://shop.test/".to_string()),
            "WOO_CONSUMER_KEY" => Some("ck".to_string()),
            "WOO_CONSUMER_SECRET" => Some("cs".to_string()),
            _ => None,
        });
        let state = AppState::new(&config).unwrap();

        let client = state.client().unwrap();
        assert_eq!(client.base_url(), "https://shop.test");
    }
}
