//! Validated newtype wrappers for credential values.
//!
//! This module provides type-safe wrappers around string values that validate
//! their contents on construction. Invalid values are rejected with clear error messages.

use crate::error::ConfigError;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A validated Gumroad API host.
///
/// Accepts either a bare host name (optionally with a port), which is
/// reached over HTTPS, or a full base URL with an explicit `http` or
/// `https` scheme. The latter form exists for local and self-signed test
/// hosts.
///
/// # Example
///
/// ```rust
/// use gumroad_api::ApiHost;
///
/// let host = ApiHost::new("api.gumroad.com").unwrap();
/// assert_eq!(host.base_uri(), "https://api.gumroad.com");
///
/// let local = ApiHost::new("http://127.0.0.1:8080/").unwrap();
/// assert_eq!(local.base_uri(), "http://127.0.0.1:8080");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiHost {
    host: String,
    has_scheme: bool,
}

impl ApiHost {
    /// Creates a new validated API host.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyHost`] if the host is empty, or
    /// [`ConfigError::InvalidHost`] if it is malformed.
    pub fn new(host: impl Into<String>) -> Result<Self, ConfigError> {
        let raw = host.into();
        let raw = raw.trim();

        match raw.split_once("://") {
            Some((scheme, rest)) => {
                let rest = rest.trim_end_matches('/');
                if scheme != "http" && scheme != "https" {
                    return Err(ConfigError::InvalidHost {
                        host: raw.to_string(),
                    });
                }
                let authority = rest.split('/').next().unwrap_or_default();
                if !Self::is_valid_authority(authority) {
                    return Err(ConfigError::InvalidHost {
                        host: raw.to_string(),
                    });
                }
                Ok(Self {
                    host: format!("{scheme}://{rest}"),
                    has_scheme: true,
                })
            }
            None => {
                let host = raw.trim_end_matches('/');
                if host.is_empty() {
                    return Err(ConfigError::EmptyHost);
                }
                if host.contains('/') || !Self::is_valid_authority(host) {
                    return Err(ConfigError::InvalidHost {
                        host: host.to_string(),
                    });
                }
                Ok(Self {
                    host: host.to_string(),
                    has_scheme: false,
                })
            }
        }
    }

    /// Returns the scheme-qualified base URI requests are sent to.
    #[must_use]
    pub fn base_uri(&self) -> String {
        if self.has_scheme {
            self.host.clone()
        } else {
            format!("https://{}", self.host)
        }
    }

    fn is_valid_authority(authority: &str) -> bool {
        if authority.is_empty() || authority.starts_with(':') || authority.ends_with(':') {
            return false;
        }

        authority
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | ':' | '[' | ']'))
    }
}

impl AsRef<str> for ApiHost {
    fn as_ref(&self) -> &str {
        &self.host
    }
}

impl Serialize for ApiHost {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.host)
    }
}

impl<'de> Deserialize<'de> for ApiHost {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::new(s).map_err(de::Error::custom)
    }
}

/// A validated Gumroad access token.
///
/// This newtype ensures the token is non-empty and masks its value in debug
/// output to prevent accidental exposure in logs.
///
/// # Example
///
/// ```rust
/// use gumroad_api::AccessToken;
///
/// let token = AccessToken::new("my-token").unwrap();
/// assert_eq!(format!("{:?}", token), "AccessToken(*****)");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    /// Creates a new validated access token.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyAccessToken`] if the token is empty.
    pub fn new(token: impl Into<String>) -> Result<Self, ConfigError> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(ConfigError::EmptyAccessToken);
        }
        Ok(Self(token))
    }
}

impl AsRef<str> for AccessToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(*****)")
    }
}

impl<'de> Deserialize<'de> for AccessToken {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::new(s).map_err(de::Error::custom)
    }
}
