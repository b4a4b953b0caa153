//! Retry policy for transport-level failures.

use std::time::Duration;

use crate::clients::errors::TransportError;
use crate::config::ClientConfig;

/// Bounded retry policy used by [`HttpClient`](crate::clients::HttpClient).
///
/// Only connect failures and timeouts are retried; an HTTP status code, of
/// any value, ends the loop. `max_attempts` counts total sends, including the
/// first one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total number of send attempts allowed.
    pub max_attempts: u32,
    /// Delay before the first retry. Zero disables backoff.
    pub initial_backoff: Duration,
    /// Upper bound on any single delay.
    pub max_backoff: Duration,
}

impl RetryPolicy {
    /// Builds the policy from client configuration.
    #[must_use]
    pub const fn from_config(config: &ClientConfig) -> Self {
        Self {
            max_attempts: config.max_attempts(),
            initial_backoff: config.initial_backoff(),
            max_backoff: config.max_backoff(),
        }
    }

    /// Decides whether another attempt should follow attempt number `attempt` (1-based).
    #[must_use]
    pub const fn should_retry(&self, error: &TransportError, attempt: u32) -> bool {
        error.is_retryable() && attempt < self.max_attempts
    }

    /// Delay to wait after failed attempt number `attempt` (1-based).
    ///
    /// Doubles per attempt and saturates at `max_backoff`.
    #[must_use]
    pub fn delay_after(&self, attempt: u32) -> Duration {
        if self.initial_backoff.is_zero() {
            return Duration::ZERO;
        }
        let pow = 2u32.saturating_pow(attempt.saturating_sub(1));
        let millis = self
            .initial_backoff
            .as_millis()
            .saturating_mul(u128::from(pow))
            .min(self.max_backoff.as_millis());
        Duration::from_millis(u64::try_from(millis).unwrap_or(u64::MAX))
    }
}
