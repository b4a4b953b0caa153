//! Error types for resource accessors.
//!
//! [`GumroadError`] is returned by every accessor on
//! [`GumroadClient`](crate::rest::GumroadClient). It covers conditions the
//! caller cannot meaningfully continue from: bad configuration, transport
//! exhaustion, and bodies that are not a Gumroad envelope.
//!
//! An envelope reporting `success: false` is *not* an error. It surfaces as
//! [`ApiOutcome::Failed`](crate::rest::ApiOutcome::Failed).

use thiserror::Error;

use crate::clients::HttpError;
use crate::error::ConfigError;

/// Error type for resource accessor operations.
///
/// # Example
///
/// ```rust
/// use gumroad_api::rest::GumroadError;
///
/// let error = GumroadError::PaginationLimitExceeded { pages: 1000 };
/// assert!(error.to_string().contains("1000"));
/// ```
#[derive(Debug, Error)]
pub enum GumroadError {
    /// Client construction failed validation.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The dispatcher could not deliver the request.
    #[error(transparent)]
    Http(#[from] HttpError),

    /// The response body is not a Gumroad envelope, or its payload has an
    /// unexpected shape.
    #[error("Malformed response (HTTP {status}): {reason}")]
    MalformedResponse {
        /// HTTP status code of the response.
        status: u16,
        /// What was wrong with the body.
        reason: String,
    },

    /// Request parameters could not be encoded as a JSON mapping.
    #[error("Unable to encode request parameters: {0}")]
    InvalidParams(#[from] serde_json::Error),

    /// The server kept reporting a next page past the configured limit.
    #[error("Stopped following sales pages after {pages} pages; the server kept reporting a next_page_url")]
    PaginationLimitExceeded {
        /// Number of pages fetched before giving up.
        pages: u32,
    },

    /// A zero-length offer code was requested.
    #[error("Offer code length must be at least 1")]
    InvalidOfferCodeLength,

    /// Every possible offer code of the requested length is already taken.
    #[error("All {taken} possible offer codes of length {length} are already taken")]
    OfferCodeSpaceExhausted {
        /// Requested code length.
        length: usize,
        /// Number of existing codes of that length.
        taken: usize,
    },
}
