//! Exponential backoff for transient fetch failures.
//!
//! Network failures, HTTP 429 and 5xx responses are retried. Anything else
//! (404, invalid selector, missing document) is returned immediately.

use std::future::Future;
use std::time::Duration;

use crate::error::PageError;

fn is_retriable(err: &PageError) -> bool {
    match err {
        PageError::Http(_) => true,
        PageError::HttpStatus { status, .. } => *status == 429 || *status >= 500,
        _ => false,
    }
}

/// Runs `operation`, retrying retriable failures up to `max_retries` extra
/// times and sleeping `backoff_base_ms * 2^attempt` milliseconds between
/// attempts. The last error is returned once retries are exhausted.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    max_retries: u32,
    backoff_base_ms: u64,
    mut operation: F,
) -> Result<T, PageError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, PageError>>,
{
    let mut attempt = 0u32;

    loop {
        let err = match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => err,
        };
        if !is_retriable(&err) || attempt >= max_retries {
            return Err(err);
        }

        let delay_ms = backoff_base_ms.saturating_mul(1u64 << attempt.min(62));
        tracing::warn!(
            attempt,
            max_retries,
            delay_ms,
            error = %err,
            "transient fetch error, retrying after backoff"
        );
        tokio::time::sleep(Duration::from_millis(delay_ms)).await;
        attempt += 1;
    }
}
