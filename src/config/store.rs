//! Store connection configuration.
//!
//! Holds the credentials the route layer turns into a client on every
//! request.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::client::options::{DEFAULT_VERSION, DEFAULT_WP_API_PREFIX};
use crate::client::ClientOptions;
use crate::error::{Result, WooError};

/// Store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Store base URL.
    pub url: Option<String>,

    /// Consumer key.
    pub consumer_key: Option<String>,

    /// Consumer secret.
    #[serde(
        serialize_with = "serialize_redacted",
        deserialize_with = "deserialize_secret"
    )]
    pub consumer_secret: Option<SecretString>,

    /// API version.
    pub version: String,

    /// WordPress REST prefix.
    pub wp_api_prefix: String,

    /// Send credentials as query parameters.
    pub query_string_auth: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            url: None,
            consumer_key: None,
            consumer_secret: None,
            version: DEFAULT_VERSION.to_string(),
            wp_api_prefix: DEFAULT_WP_API_PREFIX.to_string(),
            query_string_auth: false,
        }
    }
}

impl StoreConfig {
    /// Returns the three required credentials, failing if any is missing.
    pub fn bindings(&self) -> Result<Bindings> {
        let url = non_empty(self.url.as_deref())
            .ok_or_else(|| WooError::config("store.url (WOO_URL) is not set"))?;
        let consumer_key = non_empty(self.consumer_key.as_deref())
            .ok_or_else(|| WooError::config("store.consumer_key (WOO_CONSUMER_KEY) is not set"))?;
        let consumer_secret = self
            .consumer_secret
            .as_ref()
            .filter(|s| !s.expose_secret().is_empty())
            .cloned()
            .ok_or_else(|| {
                WooError::config("store.consumer_secret (WOO_CONSUMER_SECRET) is not set")
            })?;

        Ok(Bindings {
            url: url.to_string(),
            consumer_key: consumer_key.to_string(),
            consumer_secret,
            version: self.version.clone(),
            wp_api_prefix: self.wp_api_prefix.clone(),
            query_string_auth: self.query_string_auth,
        })
    }
}

/// Store credentials supplied by the hosting environment.
#[derive(Debug, Clone)]
pub struct Bindings {
    /// Store base URL.
    pub url: String,
    /// Consumer key.
    pub consumer_key: String,
    /// Consumer secret.
    pub consumer_secret: SecretString,
    /// API version.
    pub version: String,
    /// WordPress REST prefix.
    pub wp_api_prefix: String,
    /// Send credentials as query parameters.
    pub query_string_auth: bool,
}

impl Bindings {
    /// Returns client options for these bindings.
    pub fn client_options(&self) -> ClientOptions {
        ClientOptions {
            url: self.url.clone(),
            consumer_key: self.consumer_key.clone(),
            consumer_secret: self.consumer_secret.clone(),
            version: self.version.clone(),
            wp_api_prefix: self.wp_api_prefix.clone(),
            query_string_auth: self.query_string_auth,
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

fn serialize_redacted<S: Serializer>(
    value: &Option<SecretString>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    value.as_ref().map(|_| "[REDACTED]").serialize(serializer)
}

fn deserialize_secret<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<Option<SecretString>, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.map(SecretString::from))
}
