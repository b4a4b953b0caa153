//! HTTP client for Gumroad API communication.
//!
//! This module provides the [`HttpClient`] dispatcher: it merges headers and
//! the authentication payload into each request, sends it through a
//! [`Transport`], and retries on connection-level failures.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::{Map, Value};

use crate::clients::errors::{HttpError, MaxRetriesExceededError};
use crate::clients::http_request::{ApiRequest, HttpMethod};
use crate::clients::http_response::HttpResponse;
use crate::clients::payload::{merge_headers, merge_payload, ACCESS_TOKEN_KEY};
use crate::clients::retry::RetryPolicy;
use crate::clients::transport::{PreparedRequest, ReqwestTransport, Transport};
use crate::config::{ClientConfig, Credentials};

/// HTTP dispatcher for the Gumroad API.
///
/// The client handles:
/// - Base URI construction from the credential host and configured base path
/// - Default headers (`User-Agent`, `Accept`)
/// - Injection of the `access_token` payload into every request
/// - Retry of connect failures and timeouts, up to `max_attempts` sends
/// - Diagnostic dumps for responses with an unexpected status
///
/// Status codes never cause an error or a retry: every response that comes
/// back is returned to the caller.
///
/// # Thread Safety
///
/// `HttpClient` is `Send + Sync`. Each call keeps its own attempt counter, so
/// concurrent calls through one client never share retry state.
///
/// # Example
///
/// ```rust,ignore
/// use gumroad_api::{ClientConfig, Credentials};
/// use gumroad_api::clients::{ApiRequest, HttpClient, HttpMethod};
///
/// let credentials = Credentials::new("api.gumroad.com", "token")?;
/// let client = HttpClient::new(&credentials, &ClientConfig::default())?;
///
/// let request = ApiRequest::builder(HttpMethod::Get, "/products").build()?;
/// let response = client.request(request).await?;
/// ```
#[derive(Debug, Clone)]
pub struct HttpClient {
    /// The transport performing individual send attempts.
    transport: Arc<dyn Transport>,
    /// Base URI (e.g., `https://api.gumroad.com`).
    base_uri: String,
    /// Base path (e.g., "/v2").
    base_path: String,
    /// Default headers to include in all requests.
    default_headers: BTreeMap<String, String>,
    /// Payload fields included in all requests.
    auth_payload: Map<String, Value>,
    /// Retry policy for transport failures.
    retry: RetryPolicy,
    /// Dump every exchange, not only unexpected ones.
    dump_responses: bool,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a dispatcher sending through a [`ReqwestTransport`].
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Transport`] if the underlying HTTP client cannot
    /// be created (e.g., TLS initialization failure).
    pub fn new(credentials: &Credentials, config: &ClientConfig) -> Result<Self, HttpError> {
        let transport = ReqwestTransport::new(config)?;
        Ok(Self::with_transport(credentials, config, Arc::new(transport)))
    }

    /// Creates a dispatcher sending through the given transport.
    #[must_use]
    pub fn with_transport(
        credentials: &Credentials,
        config: &ClientConfig,
        transport: Arc<dyn Transport>,
    ) -> Self {
        let mut default_headers = BTreeMap::new();
        default_headers.insert("User-Agent".to_string(), config.user_agent().to_string());
        default_headers.insert("Accept".to_string(), "application/json".to_string());

        let mut auth_payload = Map::new();
        auth_payload.insert(
            ACCESS_TOKEN_KEY.to_string(),
            Value::String(credentials.token().as_ref().to_string()),
        );

        Self {
            transport,
            base_uri: credentials.host().base_uri(),
            base_path: config.base_path().to_string(),
            default_headers,
            auth_payload,
            retry: RetryPolicy::from_config(config),
            dump_responses: config.dump_responses(),
        }
    }

    /// Returns the base URI for this client.
    #[must_use]
    pub fn base_uri(&self) -> &str {
        &self.base_uri
    }

    /// Returns the base path for this client.
    #[must_use]
    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// Returns the default headers for this client.
    #[must_use]
    pub const fn default_headers(&self) -> &BTreeMap<String, String> {
        &self.default_headers
    }

    /// Returns the retry policy for this client.
    #[must_use]
    pub const fn retry_policy(&self) -> &RetryPolicy {
        &self.retry
    }

    /// Sends a request described by loose arguments.
    ///
    /// This is the untyped entry point: `method` is parsed case-insensitively
    /// and `headers`/`payload` must be JSON objects (`Value::Null` means
    /// "none").
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::InvalidArgument`] for an unsupported method or a
    /// non-mapping `headers`/`payload`, before anything is sent. See
    /// [`HttpClient::request`] for the remaining cases.
    pub async fn execute(
        &self,
        endpoint: &str,
        method: &str,
        headers: Value,
        payload: Value,
    ) -> Result<HttpResponse, HttpError> {
        let request = ApiRequest {
            http_method: method.parse::<HttpMethod>()?,
            path: endpoint.to_string(),
            headers: Some(headers).filter(|v| !v.is_null()),
            payload: Some(payload).filter(|v| !v.is_null()),
        };

        self.request(request).await
    }

    /// Sends a request to the Gumroad API.
    ///
    /// This method handles:
    /// - Request validation
    /// - Header and payload merging (caller wins)
    /// - Retry of connect failures and timeouts
    /// - Diagnostics for unexpected status codes
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if:
    /// - Request validation fails (`InvalidArgument`); nothing is sent
    /// - Every allowed attempt fails to connect or times out (`MaxRetries`)
    /// - A non-retryable transport failure occurs (`Transport`)
    pub async fn request(&self, request: ApiRequest) -> Result<HttpResponse, HttpError> {
        let prepared = self.prepare(&request)?;

        let mut attempt: u32 = 0;
        loop {
            attempt += 1;

            match self.transport.send(&prepared).await {
                Ok(response) => {
                    self.inspect(&prepared, &response);
                    return Ok(response);
                }
                Err(error) if self.retry.should_retry(&error, attempt) => {
                    tracing::warn!(
                        "Packet loss when attempting to reach the Gumroad API (attempt {}/{}): {}",
                        attempt,
                        self.retry.max_attempts,
                        error
                    );
                    let delay = self.retry.delay_after(attempt);
                    if !delay.is_zero() {
                        tokio::time::sleep(delay).await;
                    }
                }
                Err(error) if error.is_retryable() => {
                    tracing::error!(
                        "Unable to reach the Gumroad API after {} tries. Consider increasing the timeout.",
                        attempt
                    );
                    return Err(HttpError::MaxRetries(MaxRetriesExceededError {
                        tries: attempt,
                        last_error: error,
                    }));
                }
                Err(error) => return Err(HttpError::Transport(error)),
            }
        }
    }

    /// Validates and merges a request into its wire form.
    fn prepare(&self, request: &ApiRequest) -> Result<PreparedRequest, HttpError> {
        let header_overrides = request.header_overrides()?;
        let payload_overrides = request.payload_overrides()?;

        if payload_overrides.contains_key(ACCESS_TOKEN_KEY) {
            tracing::warn!(
                "Caller payload for {} overrides the configured access token",
                request.path
            );
        }

        Ok(PreparedRequest {
            method: request.http_method,
            url: self.url_for(&request.path),
            headers: merge_headers(&self.default_headers, &header_overrides),
            payload: merge_payload(&self.auth_payload, &payload_overrides),
        })
    }

    fn url_for(&self, path: &str) -> String {
        let path = path.trim_start_matches('/');
        format!("{}{}/{}", self.base_uri, self.base_path, path)
    }

    /// Emits diagnostics for a received response and returns the dump, if
    /// one was written.
    fn inspect(&self, prepared: &PreparedRequest, response: &HttpResponse) -> Option<String> {
        let unexpected = !prepared.method.is_expected_status(response.code);

        if unexpected {
            tracing::warn!(
                "Unexpected HTTP {} ({}) for {} {}",
                response.code,
                response.status_text(),
                prepared.method,
                prepared.url
            );
        }

        if !(unexpected || self.dump_responses) {
            return None;
        }
        let dump = prepared.dump(response);
        tracing::debug!("\n{}", dump);
        Some(dump)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::errors::TransportError;
    use async_trait::async_trait;
    use serde_json::json;
    use std::collections::{HashMap, VecDeque};
    use std::sync::Mutex;
    use std::time::Duration;

    /// Replays scripted outcomes and records every request it sees.
    #[derive(Debug, Default)]
    struct ScriptedTransport {
        outcomes: Mutex<VecDeque<Result<HttpResponse, TransportError>>>,
        seen: Mutex<Vec<PreparedRequest>>,
    }

    impl ScriptedTransport {
        fn new(outcomes: Vec<Result<HttpResponse, TransportError>>) -> Arc<Self> {
            Arc::new(Self {
                outcomes: Mutex::new(outcomes.into()),
                seen: Mutex::new(Vec::new()),
            })
        }

        fn calls(&self) -> usize {
            self.seen.lock().unwrap().len()
        }

        fn last(&self) -> PreparedRequest {
            self.seen.lock().unwrap().last().cloned().unwrap()
        }
    }

    #[async_trait]
    impl Transport for ScriptedTransport {
        async fn send(&self, request: &PreparedRequest) -> Result<HttpResponse, TransportError> {
            self.seen.lock().unwrap().push(request.clone());
            self.outcomes
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Ok(ok_response()))
        }
    }

    fn ok_response() -> HttpResponse {
        HttpResponse::new(200, HashMap::new(), json!({"success": true}))
    }

    fn connect_error() -> Result<HttpResponse, TransportError> {
        Err(TransportError::Connect("connection refused".to_string()))
    }

    fn test_config(max_attempts: u32) -> ClientConfig {
        ClientConfig::builder()
            .max_attempts(max_attempts)
            .initial_backoff(Duration::ZERO)
            .build()
            .unwrap()
    }

    fn client_with(transport: Arc<ScriptedTransport>, max_attempts: u32) -> HttpClient {
        let credentials = Credentials::new("api.gumroad.com", "test-token").unwrap();
        HttpClient::with_transport(&credentials, &test_config(max_attempts), transport)
    }

    #[test]
    fn test_client_construction() {
        let credentials = Credentials::new("api.gumroad.com", "test-token").unwrap();
        let client = HttpClient::new(&credentials, &ClientConfig::default()).unwrap();

        assert_eq!(client.base_uri(), "https://api.gumroad.com");
        assert_eq!(client.base_path(), "/v2");
        assert_eq!(client.retry_policy().max_attempts, 3);
    }

    #[test]
    fn test_default_headers() {
        let client = client_with(ScriptedTransport::new(vec![]), 3);

        let user_agent = client.default_headers().get("User-Agent").unwrap();
        assert!(user_agent.starts_with("gumroad-api-rust-v"));
        assert_eq!(
            client.default_headers().get("Accept"),
            Some(&"application/json".to_string())
        );
    }

    #[test]
    fn test_url_joins_base_path_and_endpoint() {
        let client = client_with(ScriptedTransport::new(vec![]), 3);
        assert_eq!(client.url_for("/products"), "https://api.gumroad.com/v2/products");
        assert_eq!(client.url_for("sales"), "https://api.gumroad.com/v2/sales");
    }

    #[tokio::test]
    async fn test_token_attached_for_every_method_with_empty_payload() {
        for method in ["GET", "POST", "PUT", "DELETE"] {
            let transport = ScriptedTransport::new(vec![]);
            let client = client_with(Arc::clone(&transport), 3);

            client
                .execute("/products", method, Value::Null, json!({}))
                .await
                .unwrap();

            let sent = transport.last();
            assert_eq!(
                sent.payload.get(ACCESS_TOKEN_KEY),
                Some(&json!("test-token")),
                "token missing for {method}"
            );
        }
    }

    #[tokio::test]
    async fn test_caller_payload_merged_over_auth_payload() {
        let transport = ScriptedTransport::new(vec![]);
        let client = client_with(Arc::clone(&transport), 3);

        client
            .execute("/sales", "GET", Value::Null, json!({"page": 2, "access_token": "override"}))
            .await
            .unwrap();

        let sent = transport.last();
        assert_eq!(sent.payload.get("page"), Some(&json!(2)));
        assert_eq!(sent.payload.get(ACCESS_TOKEN_KEY), Some(&json!("override")));
    }

    #[tokio::test]
    async fn test_caller_headers_override_defaults() {
        let transport = ScriptedTransport::new(vec![]);
        let client = client_with(Arc::clone(&transport), 3);

        client
            .execute("/products", "GET", json!({"User-Agent": "custom"}), Value::Null)
            .await
            .unwrap();

        assert_eq!(
            transport.last().headers.get("User-Agent"),
            Some(&"custom".to_string())
        );
    }

    #[tokio::test]
    async fn test_retries_until_success() {
        let transport = ScriptedTransport::new(vec![connect_error(), connect_error(), Ok(ok_response())]);
        let client = client_with(Arc::clone(&transport), 3);

        let response = client
            .request(ApiRequest::builder(HttpMethod::Get, "/products").build().unwrap())
            .await
            .unwrap();

        assert_eq!(response.code, 200);
        assert_eq!(transport.calls(), 3);
    }

    #[tokio::test]
    async fn test_exhaustion_makes_exactly_max_attempts() {
        let transport = ScriptedTransport::new(vec![
            connect_error(),
            Err(TransportError::Timeout("read timed out".to_string())),
            connect_error(),
            connect_error(),
        ]);
        let client = client_with(Arc::clone(&transport), 3);

        let result = client
            .request(ApiRequest::builder(HttpMethod::Get, "/products").build().unwrap())
            .await;

        assert!(matches!(
            result,
            Err(HttpError::MaxRetries(MaxRetriesExceededError { tries: 3, .. }))
        ));
        assert_eq!(transport.calls(), 3);
    }

    #[tokio::test]
    async fn test_non_retryable_transport_error_is_returned_immediately() {
        let transport = ScriptedTransport::new(vec![Err(TransportError::Other("bad header".to_string()))]);
        let client = client_with(Arc::clone(&transport), 3);

        let result = client
            .request(ApiRequest::builder(HttpMethod::Get, "/products").build().unwrap())
            .await;

        assert!(matches!(result, Err(HttpError::Transport(TransportError::Other(_)))));
        assert_eq!(transport.calls(), 1);
    }

    #[tokio::test]
    async fn test_unexpected_status_is_returned_not_retried() {
        let transport = ScriptedTransport::new(vec![Ok(HttpResponse::new(
            500,
            HashMap::new(),
            json!({"success": false}),
        ))]);
        let client = client_with(Arc::clone(&transport), 3);

        let response = client
            .request(ApiRequest::builder(HttpMethod::Delete, "/products/1").build().unwrap())
            .await
            .unwrap();

        assert_eq!(response.code, 500);
        assert_eq!(transport.calls(), 1);
    }

    #[tokio::test]
    async fn test_invalid_arguments_send_nothing() {
        let transport = ScriptedTransport::new(vec![]);
        let client = client_with(Arc::clone(&transport), 3);

        let bad_headers = client
            .execute("/products", "GET", json!(["not", "a", "mapping"]), Value::Null)
            .await;
        let bad_payload = client
            .execute("/products", "POST", Value::Null, json!("access_token=abc"))
            .await;
        let bad_method = client
            .execute("/products", "PATCH", Value::Null, Value::Null)
            .await;

        assert!(matches!(bad_headers, Err(HttpError::InvalidArgument(_))));
        assert!(matches!(bad_payload, Err(HttpError::InvalidArgument(_))));
        assert!(matches!(bad_method, Err(HttpError::InvalidArgument(_))));
        assert_eq!(transport.calls(), 0);
    }

    fn client_dumping(dump_responses: bool) -> HttpClient {
        let credentials = Credentials::new("api.gumroad.com", "test-token").unwrap();
        let config = ClientConfig::builder()
            .dump_responses(dump_responses)
            .build()
            .unwrap();
        HttpClient::with_transport(&credentials, &config, ScriptedTransport::new(vec![]))
    }

    #[test]
    fn test_expected_status_dumped_only_when_enabled() {
        let request = ApiRequest::builder(HttpMethod::Get, "/products").build().unwrap();

        let quiet = client_dumping(false);
        let prepared = quiet.prepare(&request).unwrap();
        assert_eq!(quiet.inspect(&prepared, &ok_response()), None);

        let verbose = client_dumping(true);
        let prepared = verbose.prepare(&request).unwrap();
        let dump = verbose.inspect(&prepared, &ok_response()).unwrap();
        assert!(dump.contains("GET https://api.gumroad.com/v2/products"));
        assert!(dump.contains("\"success\":true"));
        assert!(!dump.contains("test-token"));
    }

    #[test]
    fn test_unexpected_status_always_dumped() {
        let client = client_dumping(false);
        let request = ApiRequest::builder(HttpMethod::Delete, "/products/1").build().unwrap();
        let prepared = client.prepare(&request).unwrap();

        let response = HttpResponse::new(200, HashMap::new(), json!({"success": true}));
        assert!(client.inspect(&prepared, &response).is_some());
    }

    #[test]
    fn test_client_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<HttpClient>();
    }
}
