//! WooCommerce REST API client.
//!
//! Turns logical REST calls into authenticated, parameterized HTTP requests
//! against a store and decodes the JSON responses.

use super::options::{normalize_base_url, normalize_prefix, normalize_version, ClientOptions};
use super::params::{QueryParams, QueryPairs};
use super::request::{HttpMethod, PreparedRequest, RequestOptions};
use crate::error::{Result, WooError};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, StatusCode, Url};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

/// WooCommerce REST API client.
///
/// The client holds no per-request state and can be shared or cloned freely.
#[derive(Debug, Clone)]
pub struct WooClient {
    /// HTTP client.
    http: Client,
    /// Store base URL without trailing slash.
    base_url: String,
    /// Consumer key.
    consumer_key: String,
    /// Consumer secret.
    consumer_secret: SecretString,
    /// API version without surrounding slashes.
    api_version: String,
    /// REST prefix with one leading and one trailing slash.
    wp_api_prefix: String,
    /// Credentials go in the query string instead of a Basic header.
    query_string_auth: bool,
}

impl WooClient {
    /// Creates a new client from options.
    ///
    /// No request timeout is configured; callers bound calls with a
    /// cancellation token.
    pub fn new(options: ClientOptions) -> Result<Self> {
        let http = Client::builder().build()?;
        Ok(Self::with_http_client(options, http))
    }

    /// Creates a new client reusing an existing `reqwest::Client`.
    pub fn with_http_client(options: ClientOptions, http: Client) -> Self {
        Self {
            http,
            base_url: normalize_base_url(&options.url),
            consumer_key: options.consumer_key,
            consumer_secret: options.consumer_secret,
            api_version: normalize_version(&options.version),
            wp_api_prefix: normalize_prefix(&options.wp_api_prefix),
            query_string_auth: options.query_string_auth,
        }
    }

    /// Returns the normalized store base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Builds the full request URL for an endpoint.
    pub fn build_url(&self, endpoint: &str, params: Option<&QueryParams>) -> Result<Url> {
        let endpoint = endpoint.trim_start_matches('/');
        let raw = format!(
            "{}{}{}/{}",
            self.base_url, self.wp_api_prefix, self.api_version, endpoint
        );
        let mut url = Url::parse(&raw)
            .map_err(|e| WooError::invalid_request(format!("Invalid URL '{}': {}", raw, e)))?;

        let mut pairs = QueryPairs::default();
        if self.query_string_auth {
            pairs.set("consumer_key", self.consumer_key.clone());
            pairs.set(
                "consumer_secret",
                self.consumer_secret.expose_secret().to_string(),
            );
        }
        if let Some(params) = params {
            pairs.extend_params(params);
        }

        if !pairs.is_empty() {
            url.query_pairs_mut().extend_pairs(pairs.into_pairs());
        }

        Ok(url)
    }

    /// Returns the Basic auth header value, unless query-string auth is used.
    fn auth_header(&self) -> Option<String> {
        if self.query_string_auth {
            return None;
        }
        let token = STANDARD.encode(format!(
            "{}:{}",
            self.consumer_key,
            self.consumer_secret.expose_secret()
        ));
        Some(format!("Basic {}", token))
    }

    /// Builds the request without sending it.
    pub fn prepare(
        &self,
        method: HttpMethod,
        endpoint: &str,
        options: &RequestOptions,
    ) -> Result<PreparedRequest> {
        let url = self.build_url(endpoint, options.params.as_ref())?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(auth) = self.auth_header() {
            let mut value = HeaderValue::from_str(&auth)
                .map_err(|_| WooError::invalid_request("Credentials are not a valid header value"))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }
        for (name, value) in &options.headers {
            let header_name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| WooError::invalid_request(format!("Invalid header name '{}': {}", name, e)))?;
            let header_value = HeaderValue::from_str(value).map_err(|e| {
                WooError::invalid_request(format!("Invalid value for header '{}': {}", name, e))
            })?;
            headers.insert(header_name, header_value);
        }

        let body = options.body.as_ref().map(serde_json::to_vec).transpose()?;

        Ok(PreparedRequest {
            method,
            url,
            headers,
            body,
        })
    }

    /// Performs a request and decodes the JSON response.
    ///
    /// Returns `Ok(None)` when the store answers 204 No Content. The decoded
    /// shape is whatever `T` accepts; use `serde_json::Value` to keep it
    /// opaque.
    pub async fn request<T: DeserializeOwned>(
        &self,
        method: HttpMethod,
        endpoint: &str,
        options: RequestOptions,
    ) -> Result<Option<T>> {
        match options.signal.clone() {
            Some(token) => {
                if token.is_cancelled() {
                    debug!(method = %method, endpoint = %endpoint, "Request cancelled before sending");
                    return Err(WooError::Cancelled);
                }
                let prepared = self.prepare(method, endpoint, &options)?;
                tokio::select! {
                    biased;
                    _ = token.cancelled() => {
                        debug!(method = %method, endpoint = %endpoint, "Request cancelled in flight");
                        Err(WooError::Cancelled)
                    }
                    result = self.execute(prepared) => result,
                }
            }
            None => {
                let prepared = self.prepare(method, endpoint, &options)?;
                self.execute(prepared).await
            }
        }
    }

    /// Sends a prepared request and decodes the response.
    async fn execute<T: DeserializeOwned>(&self, prepared: PreparedRequest) -> Result<Option<T>> {
        let method = prepared.method;
        let log_url = prepared.redacted_url();
        debug!(method = %method, url = %log_url, "Sending WooCommerce request");

        let mut builder = self
            .http
            .request(method.into(), prepared.url)
            .headers(prepared.headers);
        if let Some(body) = prepared.body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(|e| self.transport_error(e))?;
        let status = response.status();
        debug!(method = %method, url = %log_url, status = status.as_u16(), "Received WooCommerce response");

        if !status.is_success() {
            let status_text = status.canonical_reason().unwrap_or_default().to_string();
            let body = response.text().await.unwrap_or_default();
            warn!(
                method = %method,
                url = %log_url,
                status = status.as_u16(),
                "WooCommerce request failed"
            );
            return Err(WooError::Upstream {
                status: status.as_u16(),
                status_text,
                body,
            });
        }

        if status == StatusCode::NO_CONTENT {
            return Ok(None);
        }

        let bytes = response.bytes().await.map_err(|e| self.transport_error(e))?;
        let value = serde_json::from_slice(&bytes)?;
        Ok(Some(value))
    }

    /// Wraps a transport error, dropping the URL when it carries credentials.
    fn transport_error(&self, error: reqwest::Error) -> WooError {
        if self.query_string_auth {
            WooError::Transport(error.without_url())
        } else {
            WooError::Transport(error)
        }
    }

    /// GET an endpoint.
    pub async fn get<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: Option<QueryParams>,
    ) -> Result<Option<T>> {
        let options = RequestOptions {
            params,
            ..Default::default()
        };
        self.request(HttpMethod::Get, endpoint, options).await
    }

    /// POST a JSON body to an endpoint.
    pub async fn post<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        body: Option<Value>,
        params: Option<QueryParams>,
    ) -> Result<Option<T>> {
        let options = RequestOptions {
            params,
            body,
            ..Default::default()
        };
        self.request(HttpMethod::Post, endpoint, options).await
    }

    /// PUT a JSON body to an endpoint.
    pub async fn put<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        body: Option<Value>,
        params: Option<QueryParams>,
    ) -> Result<Option<T>> {
        let options = RequestOptions {
            params,
            body,
            ..Default::default()
        };
        self.request(HttpMethod::Put, endpoint, options).await
    }

    /// DELETE an endpoint.
    pub async fn delete<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: Option<QueryParams>,
    ) -> Result<Option<T>> {
        let options = RequestOptions {
            params,
            ..Default::default()
        };
        self.request(HttpMethod::Delete, endpoint, options).await
    }
}
