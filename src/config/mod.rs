//! Configuration types for the Gumroad API client.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`ClientConfig`]: Immutable transport and pagination settings
//! - [`ClientConfigBuilder`]: A builder for constructing [`ClientConfig`] instances
//! - [`Credentials`]: The validated `{host, token}` pair
//! - [`ApiHost`]: A validated API host
//! - [`AccessToken`]: A validated access token with masked debug output
//!
//! # Example
//!
//! ```rust
//! use std::time::Duration;
//! use gumroad_api::ClientConfig;
//!
//! let config = ClientConfig::builder()
//!     .timeout(Duration::from_secs(10))
//!     .max_attempts(5)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.max_attempts(), 5);
//! ```

mod credentials;
mod newtypes;

pub use credentials::{Credentials, DEFAULT_SECRETS_FILE};
pub use newtypes::{AccessToken, ApiHost};

use std::time::Duration;

use crate::error::ConfigError;

/// Crate version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default per-attempt timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default number of send attempts per request.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Page size enforced on the server side.
pub const DEFAULT_MAX_RESULTS_PER_PAGE: u32 = 10;

/// Default API base path.
pub const DEFAULT_BASE_PATH: &str = "/v2";

/// Default upper bound on pages followed by `retrieve_all_sales`.
pub const DEFAULT_MAX_PAGES: u32 = 1000;

/// Immutable client settings.
///
/// Every field is resolved at construction time; there is no process-wide
/// default that can change afterwards.
///
/// # Defaults
///
/// - `user_agent`: `gumroad-api-rust-v{version}`
/// - `timeout`: 30 seconds per attempt
/// - `max_attempts`: 3
/// - `max_results_per_page`: 10
/// - `verify_tls`: `true`
/// - `base_path`: `/v2`
/// - `initial_backoff`: 250 ms, doubled per retry up to `max_backoff` (8 s)
/// - `max_pages`: 1000
/// - `dump_responses`: `false`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    user_agent: String,
    timeout: Duration,
    max_attempts: u32,
    max_results_per_page: u32,
    verify_tls: bool,
    base_path: String,
    initial_backoff: Duration,
    max_backoff: Duration,
    max_pages: u32,
    dump_responses: bool,
}

impl ClientConfig {
    /// Creates a new builder for constructing a `ClientConfig`.
    #[must_use]
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::new()
    }

    /// Returns the `User-Agent` header value.
    #[must_use]
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Returns the timeout applied to every attempt.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns the maximum number of send attempts per request.
    #[must_use]
    pub const fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Returns the server-side page size.
    #[must_use]
    pub const fn max_results_per_page(&self) -> u32 {
        self.max_results_per_page
    }

    /// Returns whether TLS certificates are verified.
    #[must_use]
    pub const fn verify_tls(&self) -> bool {
        self.verify_tls
    }

    /// Returns the API base path (e.g., "/v2").
    #[must_use]
    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// Returns the delay before the first retry.
    #[must_use]
    pub const fn initial_backoff(&self) -> Duration {
        self.initial_backoff
    }

    /// Returns the cap on the retry delay.
    #[must_use]
    pub const fn max_backoff(&self) -> Duration {
        self.max_backoff
    }

    /// Returns the maximum number of pages followed when collecting sales.
    #[must_use]
    pub const fn max_pages(&self) -> u32 {
        self.max_pages
    }

    /// Returns whether every response is dumped at debug level.
    #[must_use]
    pub const fn dump_responses(&self) -> bool {
        self.dump_responses
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            user_agent: format!("gumroad-api-rust-v{SDK_VERSION}"),
            timeout: DEFAULT_TIMEOUT,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            max_results_per_page: DEFAULT_MAX_RESULTS_PER_PAGE,
            verify_tls: true,
            base_path: DEFAULT_BASE_PATH.to_string(),
            initial_backoff: Duration::from_millis(250),
            max_backoff: Duration::from_secs(8),
            max_pages: DEFAULT_MAX_PAGES,
            dump_responses: false,
        }
    }
}

// Verify ClientConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ClientConfig>();
};

/// Builder for constructing [`ClientConfig`] instances.
///
/// All fields are optional; unset fields take the documented defaults.
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use gumroad_api::ClientConfig;
///
/// let config = ClientConfig::builder()
///     .user_agent("my-reporting-tool/1.0")
///     .verify_tls(false)
///     .initial_backoff(Duration::ZERO)
///     .build()
///     .unwrap();
///
/// assert!(!config.verify_tls());
/// ```
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
    user_agent: Option<String>,
    timeout: Option<Duration>,
    max_attempts: Option<u32>,
    max_results_per_page: Option<u32>,
    verify_tls: Option<bool>,
    base_path: Option<String>,
    initial_backoff: Option<Duration>,
    max_backoff: Option<Duration>,
    max_pages: Option<u32>,
    dump_responses: Option<bool>,
}

impl ClientConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the `User-Agent` header value.
    #[must_use]
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Sets the per-attempt timeout.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the maximum number of send attempts per request.
    #[must_use]
    pub const fn max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = Some(max_attempts);
        self
    }

    /// Sets the server-side page size.
    #[must_use]
    pub const fn max_results_per_page(mut self, max_results: u32) -> Self {
        self.max_results_per_page = Some(max_results);
        self
    }

    /// Enables or disables TLS certificate verification.
    ///
    /// Disable only for self-signed test hosts.
    #[must_use]
    pub const fn verify_tls(mut self, verify: bool) -> Self {
        self.verify_tls = Some(verify);
        self
    }

    /// Sets the API base path.
    #[must_use]
    pub fn base_path(mut self, base_path: impl Into<String>) -> Self {
        self.base_path = Some(base_path.into());
        self
    }

    /// Sets the delay before the first retry. `Duration::ZERO` disables backoff.
    #[must_use]
    pub const fn initial_backoff(mut self, delay: Duration) -> Self {
        self.initial_backoff = Some(delay);
        self
    }

    /// Sets the cap on the retry delay.
    #[must_use]
    pub const fn max_backoff(mut self, delay: Duration) -> Self {
        self.max_backoff = Some(delay);
        self
    }

    /// Sets the maximum number of pages followed when collecting sales.
    #[must_use]
    pub const fn max_pages(mut self, max_pages: u32) -> Self {
        self.max_pages = Some(max_pages);
        self
    }

    /// Dumps every request/response pair at debug level, not just unexpected ones.
    #[must_use]
    pub const fn dump_responses(mut self, dump: bool) -> Self {
        self.dump_responses = Some(dump);
        self
    }

    /// Builds the [`ClientConfig`], validating every numeric setting.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidSetting`] if `timeout`, `max_attempts`,
    /// `max_results_per_page` or `max_pages` is zero, or if `base_path` is
    /// empty.
    pub fn build(self) -> Result<ClientConfig, ConfigError> {
        let defaults = ClientConfig::default();

        let timeout = self.timeout.unwrap_or(defaults.timeout);
        if timeout.is_zero() {
            return Err(ConfigError::InvalidSetting {
                field: "timeout",
                reason: "must be greater than zero".to_string(),
            });
        }

        let max_attempts = Self::non_zero("max_attempts", self.max_attempts, defaults.max_attempts)?;
        let max_results_per_page = Self::non_zero(
            "max_results_per_page",
            self.max_results_per_page,
            defaults.max_results_per_page,
        )?;
        let max_pages = Self::non_zero("max_pages", self.max_pages, defaults.max_pages)?;

        let base_path = match self.base_path {
            Some(path) => normalize_base_path(&path)?,
            None => defaults.base_path,
        };

        let initial_backoff = self.initial_backoff.unwrap_or(defaults.initial_backoff);
        let max_backoff = self
            .max_backoff
            .unwrap_or(defaults.max_backoff)
            .max(initial_backoff);

        Ok(ClientConfig {
            user_agent: self.user_agent.unwrap_or(defaults.user_agent),
            timeout,
            max_attempts,
            max_results_per_page,
            verify_tls: self.verify_tls.unwrap_or(defaults.verify_tls),
            base_path,
            initial_backoff,
            max_backoff,
            max_pages,
            dump_responses: self.dump_responses.unwrap_or(defaults.dump_responses),
        })
    }

    fn non_zero(field: &'static str, value: Option<u32>, default: u32) -> Result<u32, ConfigError> {
        match value {
            Some(0) => Err(ConfigError::InvalidSetting {
                field,
                reason: "must be at least 1".to_string(),
            }),
            Some(value) => Ok(value),
            None => Ok(default),
        }
    }
}

/// Normalizes a base path to a single leading slash and no trailing slash.
fn normalize_base_path(path: &str) -> Result<String, ConfigError> {
    let trimmed = path.trim().trim_matches('/');
    if trimmed.is_empty() {
        return Err(ConfigError::InvalidSetting {
            field: "base_path",
            reason: "must not be empty".to_string(),
        });
    }
    Ok(format!("/{trimmed}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_provides_documented_defaults() {
        let config = ClientConfig::builder().build().unwrap();

        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert_eq!(config.max_attempts(), 3);
        assert_eq!(config.max_results_per_page(), 10);
        assert!(config.verify_tls());
        assert_eq!(config.base_path(), "/v2");
        assert_eq!(config.max_pages(), 1000);
        assert!(!config.dump_responses());
        assert!(config.user_agent().starts_with("gumroad-api-rust-v"));
    }

    #[test]
    fn test_builder_matches_default_impl() {
        assert_eq!(ClientConfig::builder().build().unwrap(), ClientConfig::default());
    }

    #[test]
    fn test_builder_rejects_zero_max_attempts() {
        let result = ClientConfig::builder().max_attempts(0).build();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidSetting { field: "max_attempts", .. })
        ));
    }

    #[test]
    fn test_builder_rejects_zero_timeout() {
        let result = ClientConfig::builder().timeout(Duration::ZERO).build();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidSetting { field: "timeout", .. })
        ));
    }

    #[test]
    fn test_builder_rejects_zero_max_pages() {
        let result = ClientConfig::builder().max_pages(0).build();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidSetting { field: "max_pages", .. })
        ));
    }

    #[test]
    fn test_base_path_is_normalized() {
        let config = ClientConfig::builder().base_path("v3/").build().unwrap();
        assert_eq!(config.base_path(), "/v3");

        let result = ClientConfig::builder().base_path("/").build();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidSetting { field: "base_path", .. })
        ));
    }

    #[test]
    fn test_max_backoff_never_below_initial() {
        let config = ClientConfig::builder()
            .initial_backoff(Duration::from_secs(2))
            .max_backoff(Duration::from_secs(1))
            .build()
            .unwrap();
        assert_eq!(config.max_backoff(), Duration::from_secs(2));
    }

    #[test]
    fn test_builder_with_all_optional_fields() {
        let config = ClientConfig::builder()
            .user_agent("reporting/1.0")
            .timeout(Duration::from_secs(5))
            .max_attempts(7)
            .max_results_per_page(25)
            .verify_tls(false)
            .initial_backoff(Duration::ZERO)
            .max_backoff(Duration::ZERO)
            .max_pages(3)
            .dump_responses(true)
            .build()
            .unwrap();

        assert_eq!(config.user_agent(), "reporting/1.0");
        assert_eq!(config.timeout(), Duration::from_secs(5));
        assert_eq!(config.max_attempts(), 7);
        assert_eq!(config.max_results_per_page(), 25);
        assert!(!config.verify_tls());
        assert_eq!(config.initial_backoff(), Duration::ZERO);
        assert_eq!(config.max_pages(), 3);
        assert!(config.dump_responses());
    }

    #[test]
    fn test_config_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ClientConfig>();
    }
}
