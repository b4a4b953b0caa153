//! The resource-level Gumroad client.
//!
//! [`GumroadClient`] owns an [`HttpClient`] dispatcher and the immutable
//! [`ClientConfig`]. Each accessor (see the `resources` modules) builds one
//! request, parses the response [`Envelope`], and projects the resource out
//! of it.

use std::path::Path;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use crate::clients::{json_type_name, ApiRequest, HttpClient, HttpMethod, Transport};
use crate::config::{ClientConfig, Credentials};
use crate::rest::{Envelope, GumroadError};

/// Client exposing one method per Gumroad API resource action.
///
/// # Thread Safety
///
/// `GumroadClient` is `Send + Sync` and cheap to clone. Each call is awaited
/// to completion before the next request of the same call is issued.
///
/// # Example
///
/// ```rust,ignore
/// use gumroad_api::{ClientConfig, Credentials, GumroadClient};
///
/// let credentials = Credentials::new("api.gumroad.com", "your-access-token")?;
/// let client = GumroadClient::new(credentials, ClientConfig::default())?;
///
/// let products = client.retrieve_all_products().await?;
/// for product in products.unwrap_or_default() {
///     println!("{:?}", product.name);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct GumroadClient {
    http_client: HttpClient,
    config: ClientConfig,
}

// Verify GumroadClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<GumroadClient>();
};

impl GumroadClient {
    /// Creates a client sending through the default `reqwest` transport.
    ///
    /// # Errors
    ///
    /// Returns [`GumroadError::Http`] if the HTTP client cannot be created.
    pub fn new(credentials: Credentials, config: ClientConfig) -> Result<Self, GumroadError> {
        let http_client = HttpClient::new(&credentials, &config)?;
        Ok(Self {
            http_client,
            config,
        })
    }

    /// Creates a client from a JSON secrets file of the form
    /// `{"gumroad": {"host": "...", "token": "..."}}`.
    ///
    /// # Errors
    ///
    /// Returns [`GumroadError::Config`] if the file cannot be read or is
    /// missing a field, and [`GumroadError::Http`] if the HTTP client cannot
    /// be created.
    pub fn from_secrets_file(
        path: impl AsRef<Path>,
        config: ClientConfig,
    ) -> Result<Self, GumroadError> {
        let credentials = Credentials::from_file(path)?;
        Self::new(credentials, config)
    }

    /// Creates a client sending through the given transport.
    #[must_use]
    pub fn with_transport(
        credentials: Credentials,
        config: ClientConfig,
        transport: Arc<dyn Transport>,
    ) -> Self {
        let http_client = HttpClient::with_transport(&credentials, &config, transport);
        Self {
            http_client,
            config,
        }
    }

    /// Returns the underlying dispatcher.
    #[must_use]
    pub const fn http_client(&self) -> &HttpClient {
        &self.http_client
    }

    /// Returns the client configuration.
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Sends one request and parses its envelope.
    pub(crate) async fn call(
        &self,
        method: HttpMethod,
        path: &str,
        payload: Option<Value>,
    ) -> Result<Envelope, GumroadError> {
        let request = ApiRequest {
            http_method: method,
            path: path.to_string(),
            headers: None,
            payload,
        };

        let response = self.http_client.request(request).await?;
        Envelope::from_response(&response)
    }
}

/// Encodes typed parameters as a request payload mapping.
pub(crate) fn encode_params<P: Serialize>(params: &P) -> Result<Value, GumroadError> {
    let value = serde_json::to_value(params)?;
    if value.is_object() {
        Ok(value)
    } else {
        Err(GumroadError::InvalidParams(serde::ser::Error::custom(format!(
            "parameters must encode as a mapping, found {}",
            json_type_name(&value)
        ))))
    }
}
