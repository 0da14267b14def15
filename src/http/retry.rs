//! Retry policy for transport failures.

use std::time::Duration;

use super::HttpError;

/// Configuration for exponential backoff retry behavior.
///
/// A call makes at most `max_retries + 1` attempts. The delay before
/// retry `n` (0-indexed) is `base_delay * 2^n`, so delays strictly grow:
/// `base, 2*base, 4*base, ...`.
///
/// # Defaults
///
/// - `max_retries`: 3
/// - `base_delay`: 1 second
///
/// # Example
///
/// ```
/// use xrpl_sale::http::RetryPolicy;
/// use std::time::Duration;
///
/// let policy = RetryPolicy::new()
///     .with_max_retries(2)
///     .with_base_delay(Duration::from_millis(500));
///
/// assert_eq!(policy.max_attempts(), 3);
/// assert_eq!(policy.delay_for_retry(1), Duration::from_secs(1));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Number of retries after the initial attempt.
    ///
    /// A value of 0 means only the initial attempt is made.
    pub max_retries: u32,

    /// Delay before the first retry.
    pub base_delay: Duration,
}

impl RetryPolicy {
    /// Default number of retries.
    pub const DEFAULT_MAX_RETRIES: u32 = 3;

    /// Default base delay (1 second).
    pub const DEFAULT_BASE_DELAY: Duration = Duration::from_secs(1);

    /// Factor applied to the delay after each retry.
    pub const BACKOFF_FACTOR: u32 = 2;

    /// Creates a new retry policy with default values.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            max_retries: Self::DEFAULT_MAX_RETRIES,
            base_delay: Self::DEFAULT_BASE_DELAY,
        }
    }

    /// Sets the number of retries.
    #[must_use]
    pub const fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Sets the delay before the first retry.
    ///
    /// # Panics
    ///
    /// Panics if `delay` is zero.
    #[must_use]
    pub const fn with_base_delay(mut self, delay: Duration) -> Self {
        assert!(!delay.is_zero(), "base_delay must be positive");
        self.base_delay = delay;
        self
    }

    /// Total number of attempts a call may make.
    #[must_use]
    pub const fn max_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }

    /// Computes the delay before a given retry (0-indexed).
    ///
    /// Saturates at [`Duration::MAX`] instead of overflowing.
    #[must_use]
    pub fn delay_for_retry(&self, retry: u32) -> Duration {
        let factor = Self::BACKOFF_FACTOR.saturating_pow(retry);
        self.base_delay.saturating_mul(factor)
    }

    /// Returns true if a failed attempt (0-indexed) may be followed by another.
    #[must_use]
    pub const fn should_retry(&self, attempt: u32) -> bool {
        attempt < self.max_retries
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new()
    }
}

/// Extension trait for checking if an error is retryable.
///
/// Only transport failures are candidates; HTTP error statuses are never
/// retried by the executor.
pub trait IsRetryable {
    /// Returns true if the error is potentially transient and should be retried.
    fn is_retryable(&self) -> bool;
}

impl IsRetryable for HttpError {
    fn is_retryable(&self) -> bool {
        match self {
            Self::Connection(_) | Self::Timeout => true,
            // Configuration problems do not go away on their own
            Self::InvalidUrl(_) | Self::Setup(_) => false,
        }
    }
}
