//! Client construction options.

use secrecy::SecretString;

/// Default REST API version.
pub const DEFAULT_VERSION: &str = "wc/v3";

/// Default WordPress REST prefix.
pub const DEFAULT_WP_API_PREFIX: &str = "/wp-json/";

/// Options used to construct a [`WooClient`](super::WooClient).
///
/// `Debug` never prints the consumer secret.
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Store base URL (e.g., "https://shop.example.com").
    pub url: String,
    /// Consumer key.
    pub consumer_key: String,
    /// Consumer secret.
    pub consumer_secret: SecretString,
    /// API version (e.g., "wc/v3").
    pub version: String,
    /// WordPress REST prefix (e.g., "/wp-json/").
    pub wp_api_prefix: String,
    /// Send credentials as query parameters instead of an Authorization header.
    pub query_string_auth: bool,
}

impl ClientOptions {
    /// Creates options with the three required credentials and default
    /// version, prefix and auth mode.
    pub fn new(
        url: impl Into<String>,
        consumer_key: impl Into<String>,
        consumer_secret: impl Into<String>,
    ) -> Self {
        Self {
            url: url.into(),
            consumer_key: consumer_key.into(),
            consumer_secret: SecretString::from(consumer_secret.into()),
            version: DEFAULT_VERSION.to_string(),
            wp_api_prefix: DEFAULT_WP_API_PREFIX.to_string(),
            query_string_auth: false,
        }
    }

    /// Sets the API version.
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Sets the WordPress REST prefix.
    pub fn wp_api_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.wp_api_prefix = prefix.into();
        self
    }

    /// Selects query-string auth (`true`) or HTTP Basic auth (`false`).
    pub fn query_string_auth(mut self, enabled: bool) -> Self {
        self.query_string_auth = enabled;
        self
    }
}

/// Strips trailing slashes from the store base URL.
pub(crate) fn normalize_base_url(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}

/// Strips leading and trailing slashes from the API version.
pub(crate) fn normalize_version(version: &str) -> String {
    version.trim_matches('/').to_string()
}

/// Wraps the prefix in exactly one leading and one trailing slash.
pub(crate) fn normalize_prefix(prefix: &str) -> String {
    let inner = prefix.trim_matches('/');
    if inner.is_empty() {
        "/".to_string()
    } else {
        format!("/{}/", inner)
    }
}
