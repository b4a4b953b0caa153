//! Error types for the Gumroad API client.
//!
//! This module contains the configuration errors raised while building
//! credentials and client settings.
//!
//! # Error Handling
//!
//! All configuration constructors return `Result<T, ConfigError>` to enable
//! fail-fast validation before any request is sent.
//!
//! # Example
//!
//! ```rust
//! use gumroad_api::{AccessToken, ConfigError};
//!
//! let result = AccessToken::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyAccessToken)));
//! ```

use thiserror::Error;

/// Errors that can occur while configuring the client.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Access token cannot be empty.
    #[error("Access token cannot be empty. Please provide a valid Gumroad access token.")]
    EmptyAccessToken,

    /// API host cannot be empty.
    #[error("API host cannot be empty. Expected a host name such as 'api.gumroad.com'.")]
    EmptyHost,

    /// API host is malformed.
    #[error("Invalid API host '{host}'. Expected a host name such as 'api.gumroad.com' or a base URL with an http(s) scheme.")]
    InvalidHost {
        /// The invalid host that was provided.
        host: String,
    },

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the client.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },

    /// The secrets document could not be read or parsed.
    #[error("Unable to load Gumroad secrets from {source_name}: {reason}")]
    InvalidSecrets {
        /// Where the secrets came from (a file path or "inline JSON").
        source_name: String,
        /// What went wrong.
        reason: String,
    },

    /// A numeric setting is out of range.
    #[error("Invalid value for '{field}': {reason}")]
    InvalidSetting {
        /// The name of the offending setting.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
}
