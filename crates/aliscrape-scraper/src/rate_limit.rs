//! Retry and pacing utilities for the data API client.
//!
//! Provides exponential backoff with jitter for transient HTTP errors such as
//! 429 responses, plus a randomized pause between consecutive requests.
//! Non-retriable errors (parse failures, 404s, API-level errors) are
//! propagated immediately.

use std::future::Future;
use std::time::Duration;

use crate::error::ScraperError;

/// Upper bound for a single backoff sleep.
const MAX_DELAY_MS: u64 = 120_000;

/// Returns `true` if `err` represents a transient condition that should be
/// retried after a backoff delay.
///
/// Retriable errors:
/// - [`ScraperError::RateLimited`]: HTTP 429.
/// - [`ScraperError::Http`]: network-level failure (timeout, reset, etc.).
/// - [`ScraperError::UnexpectedStatus`] with a 5xx status.
///
/// Everything else is returned immediately.
pub(crate) fn is_retriable(err: &ScraperError) -> bool {
    match err {
        ScraperError::RateLimited { .. } | ScraperError::Http(_) => true,
        ScraperError::UnexpectedStatus { status, .. } => (500..600).contains(status),
        ScraperError::Deserialize { .. }
        | ScraperError::NotFound { .. }
        | ScraperError::Api { .. }
        | ScraperError::EmptySearch { .. }
        | ScraperError::MissingIdentity { .. }
        | ScraperError::InvalidBaseUrl { .. } => false,
    }
}

/// Computes the sleep before retry number `attempt` (1-based).
///
/// The base schedule is `backoff_base_ms * 2^(attempt - 1)` with ±25 % jitter.
/// A rate-limit error raises the delay to at least its `Retry-After` value.
/// The result never exceeds [`MAX_DELAY_MS`].
fn backoff_delay_ms(attempt: u32, backoff_base_ms: u64, err: &ScraperError) -> u64 {
    let computed = backoff_base_ms.saturating_mul(1u64 << attempt.saturating_sub(1).min(10));
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    let jittered = (computed.min(MAX_DELAY_MS) as f64 * (rand::random::<f64>() * 0.5 + 0.75)) as u64;

    let floor = match err {
        ScraperError::RateLimited { retry_after_secs } => retry_after_secs.saturating_mul(1_000),
        _ => 0,
    };
    jittered.max(floor).min(MAX_DELAY_MS)
}

/// Executes `operation`, retrying transient errors up to `max_retries`
/// additional times with exponential backoff.
///
/// With `max_retries = 3` the operation is attempted at most 4 times total.
/// Non-retriable errors are returned without sleeping.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    max_retries: u32,
    backoff_base_ms: u64,
    mut operation: F,
) -> Result<T, ScraperError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ScraperError>>,
{
    let mut attempt = 0u32;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if !is_retriable(&err) || attempt >= max_retries {
                    return Err(err);
                }
                attempt += 1;
                let delay_ms = backoff_delay_ms(attempt, backoff_base_ms, &err);
                tracing::warn!(
                    attempt,
                    max_retries,
                    delay_ms,
                    error = %err,
                    "transient data API error, retrying after backoff"
                );
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            }
        }
    }
}

/// Sleeps for `base_ms` scaled by a random factor in `[0.5, 1.5)`.
///
/// Spreads consecutive API calls out the way a person clicking through
/// listings would. A zero base returns immediately.
pub(crate) async fn pause_between_requests(base_ms: u64) {
    if base_ms == 0 {
        return;
    }
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    let delay_ms = (base_ms as f64 * (rand::random::<f64>() + 0.5)) as u64;
    tracing::debug!(delay_ms, "pausing before next data API request");
    tokio::time::sleep(Duration::from_millis(delay_ms)).await;
}
