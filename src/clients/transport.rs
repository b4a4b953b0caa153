//! The transport seam between the dispatcher and the network.
//!
//! [`HttpClient`](crate::clients::HttpClient) decides *what* to send and how
//! often; a [`Transport`] performs exactly one send attempt. The default
//! implementation is [`ReqwestTransport`]. Tests substitute scripted
//! transports to simulate connection failures and count attempts.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::clients::errors::TransportError;
use crate::clients::http_request::HttpMethod;
use crate::clients::http_response::HttpResponse;
use crate::clients::payload::{query_pairs, redact_token};
use crate::config::ClientConfig;

/// A fully merged request, ready to be put on the wire.
///
/// The dispatcher builds one `PreparedRequest` per call and re-sends the
/// identical value on every retry.
#[derive(Clone, Debug, PartialEq)]
pub struct PreparedRequest {
    /// The HTTP method.
    pub method: HttpMethod,
    /// The absolute URL.
    pub url: String,
    /// Effective headers (defaults merged with caller overrides).
    pub headers: BTreeMap<String, String>,
    /// Effective payload (authentication payload merged with caller fields).
    pub payload: Map<String, Value>,
}

impl PreparedRequest {
    /// Renders the request and a response as a human-readable dump.
    ///
    /// The access token is masked.
    #[must_use]
    pub fn dump(&self, response: &HttpResponse) -> String {
        let mut out = String::new();

        out.push_str(&format!("< {} {}\n", self.method, self.url));
        for (name, value) in &self.headers {
            out.push_str(&format!("< {name}: {value}\n"));
        }
        out.push_str(&format!(
            "< {}\n",
            Value::Object(redact_token(&self.payload))
        ));
        out.push('\n');

        out.push_str(&format!(
            "> HTTP {} {}\n",
            response.code,
            response.status_text()
        ));
        let mut header_names: Vec<&String> = response.headers.keys().collect();
        header_names.sort();
        for name in header_names {
            for value in &response.headers[name] {
                out.push_str(&format!("> {name}: {value}\n"));
            }
        }
        out.push_str(&format!("> {}\n", response.body));

        out
    }
}

/// Performs one send attempt.
///
/// Implementations must not retry on their own; retry policy belongs to the
/// dispatcher.
#[async_trait]
pub trait Transport: Send + Sync + fmt::Debug {
    /// Sends the request once and returns whatever response came back.
    ///
    /// # Errors
    ///
    /// Returns a [`TransportError`] if no HTTP response was received.
    async fn send(&self, request: &PreparedRequest) -> Result<HttpResponse, TransportError>;
}

/// [`Transport`] backed by a pooled `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Creates a transport honoring the configured timeout and TLS policy.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Other`] if the TLS backend cannot be
    /// initialized.
    pub fn new(config: &ClientConfig) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .timeout(config.timeout())
            .danger_accept_invalid_certs(!config.verify_tls())
            .build()
            .map_err(|e| TransportError::Other(e.to_string()))?;

        Ok(Self { client })
    }

    fn parse_response_headers(
        headers: &reqwest::header::HeaderMap,
    ) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(key).or_default().push(value);
        }
        result
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: &PreparedRequest) -> Result<HttpResponse, TransportError> {
        let mut req_builder = match request.method {
            HttpMethod::Get => self.client.get(&request.url),
            HttpMethod::Post => self.client.post(&request.url),
            HttpMethod::Put => self.client.put(&request.url),
            HttpMethod::Delete => self.client.delete(&request.url),
        };

        for (name, value) in &request.headers {
            req_builder = req_builder.header(name, value);
        }

        req_builder = if request.method.sends_json_body() {
            req_builder.json(&request.payload)
        } else {
            req_builder.query(&query_pairs(&request.payload))
        };

        let res = req_builder.send().await?;

        let code = res.status().as_u16();
        let headers = Self::parse_response_headers(res.headers());
        let body_text = res.text().await?;

        Ok(HttpResponse::from_text(code, headers, &body_text))
    }
}
