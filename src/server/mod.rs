//! HTTP Server module - the edge route layer.
//!
//! This module exposes a read-only subset of the store API over HTTP,
//! building a fresh client from the environment bindings per request.

pub mod handlers;
pub mod response;
pub mod state;

#[cfg(test)]
mod handlers_tests;

use crate::config::Config;
use crate::error::{Result, WooError};
use axum::{routing::get, Router};
use state::AppState;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Creates the API router with all endpoints.
pub fn create_router(state: Arc<AppState>) -> Router {
    let api = Router::new()
        .route("/", get(handlers::index))
        .route("/products", get(handlers::products));

    Router::new()
        .nest("/woo-api", api)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Starts the HTTP server.
pub async fn serve(config: &Config) -> Result<()> {
    let state = Arc::new(AppState::new(config)?);
    let router = create_router(state);

    let addr = SocketAddr::new(
        config
            .server
            .bind
            .parse()
            .map_err(|e| WooError::config(format!("Invalid bind address: {}", e)))?,
        config.server.port,
    );

    if config.store.bindings().is_err() {
        tracing::warn!("Store bindings are incomplete; /woo-api/products will fail until WOO_URL, WOO_CONSUMER_KEY and WOO_CONSUMER_SECRET are set");
    }

    info!("Starting HTTP server on {}", addr);

    let listener = TcpListener::bind(addr).await?;

    axum::serve(listener, router).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_router() {
        let state = Arc::new(AppState::new(&Config::default()).unwrap());
        let _router = create_router(state);
    }
}
