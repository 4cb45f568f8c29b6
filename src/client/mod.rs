//! HTTP Client module for woo-edge.
//!
//! This module provides the WooCommerce REST API client and the
//! [`WooApi`] trait the route layer depends on.

pub mod api;
pub mod options;
pub mod params;
pub mod request;


pub use api::WooClient;
pub use options::ClientOptions;
pub use params::{ParamValue, QueryParams, Scalar};
pub use request::{HttpMethod, PreparedRequest, RequestOptions};

use crate::error::Result;
use async_trait::async_trait;
use serde_json::Value;

/// The operations of a store client, with responses kept as opaque JSON.
#[async_trait]
pub trait WooApi: Send + Sync {
    /// Performs a request. `Ok(None)` means the store answered 204.
    async fn request(
        &self,
        method: HttpMethod,
        endpoint: &str,
        options: RequestOptions,
    ) -> Result<Option<Value>>;

    /// GET an endpoint.
    async fn get(&self, endpoint: &str, params: Option<QueryParams>) -> Result<Option<Value>> {
        let options = RequestOptions {
            params,
            ..Default::default()
        };
        self.request(HttpMethod::Get, endpoint, options).await
    }

    /// POST a JSON body to an endpoint.
    async fn post(
        &self,
        endpoint: &str,
        body: Option<Value>,
        params: Option<QueryParams>,
    ) -> Result<Option<Value>> {
        let options = RequestOptions {
            params,
            body,
            ..Default::default()
        };
        self.request(HttpMethod::Post, endpoint, options).await
    }

    /// PUT a JSON body to an endpoint.
    async fn put(
        &self,
        endpoint: &str,
        body: Option<Value>,
        params: Option<QueryParams>,
    ) -> Result<Option<Value>> {
        let options = RequestOptions {
            params,
            body,
            ..Default::default()
        };
        self.request(HttpMethod::Put, endpoint, options).await
    }

    /// DELETE an endpoint.
    async fn delete(&self, endpoint: &str, params: Option<QueryParams>) -> Result<Option<Value>> {
        let options = RequestOptions {
            params,
            ..Default::default()
        };
        self.request(HttpMethod::Delete, endpoint, options).await
    }
}

#[async_trait]
impl WooApi for WooClient {
    async fn request(
        &self,
        method: HttpMethod,
        endpoint: &str,
        options: RequestOptions,
    ) -> Result<Option<Value>> {
        WooClient::request::<Value>(self, method, endpoint, options).await
    }
}
