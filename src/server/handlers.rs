//! HTTP request handlers.
//!
//! This module contains the endpoint handlers exposed under `/woo-api`.

use crate::client::{QueryParams, WooApi};
use crate::error::Result;
use crate::server::response::ApiError;
use crate::server::state::AppState;
use axum::{extract::State, Json};
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info};
use uuid::Uuid;

/// Greeting handler.
///
/// GET /woo-api
pub async fn index() -> &'static str {
    "Hello from woo-edge!"
}

/// Products handler - relays the first page of the store's products.
///
/// GET /woo-api/products
pub async fn products(State(state): State<Arc<AppState>>) -> std::result::Result<Json<Value>, ApiError> {
    let request_id = Uuid::new_v4();
    let start_time = Instant::now();

    let client = state
        .client()
        .map_err(|err| {
            error!(request_id = %request_id, error = %err, "Store bindings unavailable");
            ApiError::new(err, request_id)
        })?;

    match fetch_products(&client, state.products_per_page).await {
        Ok(products) => {
            info!(
                request_id = %request_id,
                duration_ms = start_time.elapsed().as_millis() as u64,
                "Relayed products"
            );
            Ok(Json(products))
        }
        Err(err) => {
            error!(
                request_id = %request_id,
                error = %err,
                upstream_status = ?err.upstream_status(),
                "Products request failed"
            );
            Err(ApiError::new(err, request_id))
        }
    }
}

/// Fetches one page of products. A 204 from the store becomes `null`.
pub async fn fetch_products(api: &dyn WooApi, per_page: u32) -> Result<Value> {
    let params = QueryParams::new().with("per_page", per_page);
    let products = api.get("products", Some(params)).await?;
    Ok(products.unwrap_or(Value::Null))
}
