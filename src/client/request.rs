//! Request descriptors.

use super::params::QueryParams;
use reqwest::header::HeaderMap;
use reqwest::Url;
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use tokio_util::sync::CancellationToken;

use crate::error::WooError;

/// HTTP methods supported by the store API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    /// GET
    Get,
    /// POST
    Post,
    /// PUT
    Put,
    /// DELETE
    Delete,
}

impl HttpMethod {
    /// Returns the method as an uppercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = WooError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "GET" => Ok(HttpMethod::Get),
            "POST" => Ok(HttpMethod::Post),
            "PUT" => Ok(HttpMethod::Put),
            "DELETE" => Ok(HttpMethod::Delete),
            _ => Err(WooError::invalid_request(format!(
                "Invalid method '{}'. Valid methods: GET, POST, PUT, DELETE",
                s
            ))),
        }
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Delete => reqwest::Method::DELETE,
        }
    }
}

/// Optional parts of a request.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// Query parameters.
    pub params: Option<QueryParams>,
    /// JSON body. No body is sent when `None`.
    pub body: Option<Value>,
    /// Extra headers, applied in order after the defaults.
    pub headers: Vec<(String, String)>,
    /// Cancels the in-flight request when fired.
    pub signal: Option<CancellationToken>,
}

impl RequestOptions {
    /// Creates empty options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the query parameters.
    pub fn params(mut self, params: QueryParams) -> Self {
        self.params = Some(params);
        self
    }

    /// Sets the JSON body.
    pub fn body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Adds an extra header.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Sets the cancellation token.
    pub fn signal(mut self, token: CancellationToken) -> Self {
        self.signal = Some(token);
        self
    }
}

/// A fully built request, ready to send.
#[derive(Debug, Clone)]
pub struct PreparedRequest {
    /// HTTP method.
    pub method: HttpMethod,
    /// Final URL including query string.
    pub url: Url,
    /// Request headers.
    pub headers: HeaderMap,
    /// Serialized JSON body.
    pub body: Option<Vec<u8>>,
}

impl PreparedRequest {
    /// Returns the URL with credential query parameters masked, for logging.
    pub fn redacted_url(&self) -> String {
        if self.url.query().is_none() {
            return self.url.to_string();
        }
        let mut url = self.url.clone();
        let pairs: Vec<(String, String)> = self
            .url
            .query_pairs()
            .map(|(k, v)| {
                let v = if k == "consumer_secret" {
                    "[REDACTED]".to_string()
                } else {
                    v.into_owned()
                };
                (k.into_owned(), v)
            })
            .collect();
        url.query_pairs_mut().clear().extend_pairs(pairs);
        url.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_parse() {
        assert_eq!("get".parse::<HttpMethod>().unwrap(), HttpMethod::Get);
        assert_eq!("POST".parse::<HttpMethod>().unwrap(), HttpMethod::Post);
        assert_eq!("Put".parse::<HttpMethod>().unwrap(), HttpMethod::Put);
        assert_eq!("delete".parse::<HttpMethod>().unwrap(), HttpMethod::Delete);
        assert!("PATCH".parse::<HttpMethod>().is_err());
    }

    #[test]
    fn test_method_display() {
        assert_eq!(HttpMethod::Delete.to_string(), "DELETE");
        assert_eq!(reqwest::Method::from(HttpMethod::Put), reqwest::Method::PUT);
    }

    #[test]
    fn test_request_options_builder() {
        let options = RequestOptions::new()
            .body(serde_json::json!({"name": "Hat"}))
            .header("X-Trace", "1")
            .header("X-Trace", "2");

        assert!(options.params.is_none());
        assert!(options.signal.is_none());
        assert_eq!(options.headers.len(), 2);
        assert_eq!(options.body.unwrap()["name"], "Hat");
    }

    #[test]
    fn test_redacted_url() {
        let request = PreparedRequest {
            method: HttpMethod::Get,
            url: Url::parse("https://shop.test/wp-json/wc/v3/products?consumer_key=ck&consumer_secret=cs&per_page=5")
                .unwrap(),
            headers: HeaderMap::new(),
            body: None,
        };

        let redacted = request.redacted_url();
        assert!(!redacted.contains("=cs"));
        assert!(redacted.contains("consumer_key=ck"));
        assert!(redacted.contains("per_page=5"));
    }
}
