//! Request dispatching for Gumroad API communication.
//!
//! This module provides the transport layer under the resource accessors:
//! request validation, header and payload merging, the retry loop, and
//! response diagnostics.
//!
//! # Overview
//!
//! - [`HttpClient`]: The dispatcher executing one request with retry
//! - [`ApiRequest`]: A request to be sent to the API
//! - [`HttpResponse`]: A raw response from the API
//! - [`HttpMethod`]: Supported HTTP methods (GET, POST, PUT, DELETE)
//! - [`Transport`]: One send attempt; [`ReqwestTransport`] is the default
//! - [`RetryPolicy`]: Which failures are retried and how long to wait
//!
//! # Retry Behavior
//!
//! Only connection failures and timeouts are retried, up to `max_attempts`
//! sends in total, with capped exponential backoff between attempts. HTTP
//! status codes are never retried and never raise; a status outside the
//! method's expected set only produces a warning and a debug dump.
//!
//! # Example
//!
//! ```rust,ignore
//! use gumroad_api::{ClientConfig, Credentials};
//! use gumroad_api::clients::HttpClient;
//! use serde_json::json;
//!
//! let credentials = Credentials::new("api.gumroad.com", "token")?;
//! let client = HttpClient::new(&credentials, &ClientConfig::default())?;
//!
//! let response = client
//!     .execute("/sales", "GET", json!({}), json!({"page": 1}))
//!     .await?;
//! println!("HTTP {}: {}", response.code, response.body);
//! ```

mod errors;
mod http_client;
mod http_request;
mod http_response;
pub mod payload;
mod retry;
mod transport;

pub use errors::{HttpError, InvalidArgumentError, MaxRetriesExceededError, TransportError};
pub use http_client::HttpClient;
pub use http_request::{json_type_name, ApiRequest, ApiRequestBuilder, HttpMethod};
pub use http_response::{status_description, HttpResponse};
pub use retry::RetryPolicy;
pub use transport::{PreparedRequest, ReqwestTransport, Transport};
