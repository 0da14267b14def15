//! Time abstraction for testability.
//!
//! This module provides a [`Sleeper`] trait so retry backoff can be
//! skipped or recorded in tests while using real timers in production.

use std::time::Duration;

/// Abstraction over asynchronous delays.
///
/// The request executor waits through a [`Sleeper`] between retry
/// attempts, which lets tests inject a sleeper that returns immediately.
///
/// # Example
///
/// ```
/// use xrpl_sale::time::{InstantSleeper, Sleeper};
/// use std::time::Duration;
///
/// # async fn example() {
/// InstantSleeper.sleep(Duration::from_secs(60)).await; // returns at once
/// # }
/// ```
pub trait Sleeper: Send + Sync {
    /// Waits for the given duration.
    fn sleep(&self, duration: Duration) -> impl std::future::Future<Output = ()> + Send;
}

/// Production sleeper backed by [`tokio::time::sleep`].
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Sleeper that never waits.
///
/// Useful in tests that exercise retry counts without caring about
/// wall-clock delays.
#[derive(Debug, Clone, Copy, Default)]
pub struct InstantSleeper;

impl Sleeper for InstantSleeper {
    async fn sleep(&self, _duration: Duration) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn tokio_sleeper_advances_virtual_time() {
        let start = tokio::time::Instant::now();

        TokioSleeper.sleep(Duration::from_secs(5)).await;

        assert_eq!(start.elapsed(), Duration::from_secs(5));
    }

    #[tokio::test(start_paused = true)]
    async fn instant_sleeper_does_not_advance_time() {
        let start = tokio::time::Instant::now();

        InstantSleeper.sleep(Duration::from_secs(5)).await;

        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[test]
    fn sleepers_are_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<TokioSleeper>();
        assert_send_sync::<InstantSleeper>();
    }
}
