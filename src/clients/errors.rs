//! HTTP-specific error types for the Gumroad API client.
//!
//! # Error Handling
//!
//! - [`InvalidArgumentError`]: A request failed validation before any I/O
//! - [`TransportError`]: A send attempt failed below the HTTP layer
//! - [`MaxRetriesExceededError`]: Every allowed attempt failed at the transport level
//! - [`HttpError`]: Unified error type encompassing all of the above
//!
//! Non-2xx status codes are *not* errors at this layer. The dispatcher
//! returns every response it receives and leaves interpretation to the
//! envelope parser.
//!
//! # Example
//!
//! ```rust,ignore
//! use gumroad_api::clients::HttpError;
//!
//! match client.request(request).await {
//!     Ok(response) => println!("HTTP {}", response.code),
//!     Err(HttpError::InvalidArgument(e)) => println!("Invalid request: {e}"),
//!     Err(HttpError::MaxRetries(e)) => println!("Gave up after {} tries", e.tries),
//!     Err(HttpError::Transport(e)) => println!("Transport error: {e}"),
//! }
//! ```

use thiserror::Error;

/// Error returned when a request fails validation before it is sent.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidArgumentError {
    /// The HTTP method is not one of GET, POST, PUT or DELETE.
    #[error("Invalid HTTP method passed to the dispatcher: {method}")]
    InvalidMethod {
        /// The method that was provided.
        method: String,
    },

    /// The headers argument is not a JSON object.
    #[error("headers passed to the dispatcher must be a mapping, found {found}")]
    HeadersNotMapping {
        /// The JSON type that was provided.
        found: &'static str,
    },

    /// A header value is not a string.
    #[error("header '{name}' must have a string value, found {found}")]
    HeaderValueNotString {
        /// The header name.
        name: String,
        /// The JSON type that was provided.
        found: &'static str,
    },

    /// The payload argument is not a JSON object.
    #[error("payload passed to the dispatcher must be a mapping, found {found}")]
    PayloadNotMapping {
        /// The JSON type that was provided.
        found: &'static str,
    },
}

/// A failure of one send attempt below the HTTP layer.
///
/// Only [`TransportError::Connect`] and [`TransportError::Timeout`] are
/// retried by the dispatcher.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// The connection could not be established.
    #[error("Connection error: {0}")]
    Connect(String),

    /// The connect or read timeout elapsed.
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// Any other failure (invalid header, body encoding, protocol error).
    #[error("Transport error: {0}")]
    Other(String),
}

impl TransportError {
    /// Returns `true` if the attempt may be repeated unchanged.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Connect(_) | Self::Timeout(_))
    }
}

/// The URL is stripped first: for GET it carries the access token.
impl From<reqwest::Error> for TransportError {
    fn from(error: reqwest::Error) -> Self {
        let error = error.without_url();
        if error.is_timeout() {
            Self::Timeout(error.to_string())
        } else if error.is_connect() {
            Self::Connect(error.to_string())
        } else {
            Self::Other(error.to_string())
        }
    }
}

/// Error returned when every allowed attempt failed at the transport level.
///
/// # Example
///
/// ```rust
/// use gumroad_api::clients::{MaxRetriesExceededError, TransportError};
///
/// let error = MaxRetriesExceededError {
///     tries: 3,
///     last_error: TransportError::Timeout("read timed out".to_string()),
/// };
///
/// assert!(error.to_string().contains("after 3 tries"));
/// ```
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Unable to reach the Gumroad API after {tries} tries. Consider increasing the timeout. Last error: {last_error}")]
pub struct MaxRetriesExceededError {
    /// The number of send attempts that were made.
    pub tries: u32,
    /// The failure of the final attempt.
    pub last_error: TransportError,
}

/// Unified error type for all dispatcher errors.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Request validation failed; nothing was sent.
    #[error(transparent)]
    InvalidArgument(#[from] InvalidArgumentError),

    /// Maximum attempts exhausted on retryable transport failures.
    #[error(transparent)]
    MaxRetries(#[from] MaxRetriesExceededError),

    /// A non-retryable transport failure.
    #[error(transparent)]
    Transport(#[from] TransportError),
}
