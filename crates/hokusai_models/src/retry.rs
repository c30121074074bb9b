//! Backoff shared by the HTTP clients.

use std::time::Duration;
use tokio_retry2::strategy::{ExponentialBackoff, jitter};

const MAX_DELAY_SECS: u64 = 10;

/// Exponential backoff with jitter, capped at ten seconds per wait.
pub(crate) fn backoff(initial_ms: u64, max_retries: usize) -> impl Iterator<Item = Duration> {
    ExponentialBackoff::from_millis(initial_ms.max(1))
        .factor(2)
        .max_delay(Duration::from_secs(MAX_DELAY_SECS))
        .map(jitter)
        .take(max_retries)
}
