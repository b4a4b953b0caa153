//! Credentials for authenticating against the Gumroad API.
//!
//! Credentials are either built in memory from a host and token, or loaded
//! from a secrets document shaped like:
//!
//! ```json
//! {
//!     "gumroad": {
//!         "host": "api.gumroad.com",
//!         "token": "your-access-token"
//!     }
//! }
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::config::{AccessToken, ApiHost};
use crate::error::ConfigError;

/// Default secrets file location, relative to the working directory.
pub const DEFAULT_SECRETS_FILE: &str = "./gumroad_secrets.json";

/// The `{host, token}` pair every client is constructed from.
///
/// Credentials are immutable once built. The token is masked in `Debug`
/// output.
///
/// # Example
///
/// ```rust
/// use gumroad_api::Credentials;
///
/// let credentials = Credentials::new("api.gumroad.com", "my-token").unwrap();
/// assert_eq!(credentials.host().as_ref(), "api.gumroad.com");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Credentials {
    host: ApiHost,
    token: AccessToken,
}

#[derive(Deserialize)]
struct SecretsDocument {
    gumroad: Option<SecretsSection>,
}

#[derive(Deserialize)]
struct SecretsSection {
    host: Option<String>,
    token: Option<String>,
}

impl Credentials {
    /// Creates credentials from a raw host and token.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if either value fails validation.
    pub fn new(host: impl Into<String>, token: impl Into<String>) -> Result<Self, ConfigError> {
        Ok(Self {
            host: ApiHost::new(host)?,
            token: AccessToken::new(token)?,
        })
    }

    /// Creates credentials from already validated parts.
    #[must_use]
    pub const fn from_parts(host: ApiHost, token: AccessToken) -> Self {
        Self { host, token }
    }

    /// Parses credentials from a JSON secrets document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidSecrets`] if the document is not valid
    /// JSON, [`ConfigError::MissingRequiredField`] if the `gumroad`, `host`
    /// or `token` keys are absent, and a validation error if a value is empty
    /// or malformed.
    pub fn from_secrets_json(json: &str) -> Result<Self, ConfigError> {
        Self::parse_secrets(json, "inline JSON")
    }

    /// Loads credentials from a JSON secrets file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidSecrets`] if the file cannot be read,
    /// plus every error [`Credentials::from_secrets_json`] can return.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source_name = path.display().to_string();

        let contents =
            std::fs::read_to_string(path).map_err(|e| ConfigError::InvalidSecrets {
                source_name: source_name.clone(),
                reason: e.to_string(),
            })?;

        tracing::debug!("Loaded Gumroad secrets from {}", source_name);

        Self::parse_secrets(&contents, &source_name)
    }

    /// Loads credentials from [`DEFAULT_SECRETS_FILE`].
    ///
    /// # Errors
    ///
    /// See [`Credentials::from_file`].
    pub fn from_default_file() -> Result<Self, ConfigError> {
        Self::from_file(DEFAULT_SECRETS_FILE)
    }

    /// Returns the API host.
    #[must_use]
    pub const fn host(&self) -> &ApiHost {
        &self.host
    }

    /// Returns the access token.
    #[must_use]
    pub const fn token(&self) -> &AccessToken {
        &self.token
    }

    fn parse_secrets(json: &str, source_name: &str) -> Result<Self, ConfigError> {
        let document: SecretsDocument =
            serde_json::from_str(json).map_err(|e| ConfigError::InvalidSecrets {
                source_name: source_name.to_string(),
                reason: e.to_string(),
            })?;

        let section = document
            .gumroad
            .ok_or(ConfigError::MissingRequiredField { field: "gumroad" })?;
        let host = section
            .host
            .ok_or(ConfigError::MissingRequiredField { field: "host" })?;
        let token = section
            .token
            .ok_or(ConfigError::MissingRequiredField { field: "token" })?;

        Self::new(host, token)
    }
}
