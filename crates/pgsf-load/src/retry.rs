//! Shared retry-with-exponential-backoff primitive: base
//! 1s, multiplier 1, clamped to [4s, 60s], up to 3 attempts. Used by
//! both the PUT upload and the COPY INTO steps so the two never drift
//! apart in policy.

use std::future::Future;
use std::time::Duration;

pub const MAX_ATTEMPTS: u32 = 3;

fn backoff_delay(attempt: u32) -> Duration {
    let secs = (2f64.powi(attempt as i32)).clamp(4.0, 60.0);
    Duration::from_secs_f64(secs)
}

/// Run `op` up to `MAX_ATTEMPTS` times, sleeping with exponential
/// backoff between attempts whose error satisfies `is_retryable`. The
/// first non-retryable error, or the last attempt's error, is returned
/// as-is.
pub async fn retry_with_backoff<F, Fut, T, E>(op: F, is_retryable: impl Fn(&E) -> bool) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    retry_with_backoff_counted(op, is_retryable)
        .await
        .map(|(value, _retries)| value)
}

/// Same as [`retry_with_backoff`] but also returns the number of
/// retries actually performed (0 on a first-try success), so callers
/// can surface it on a per-file `MigrationResult`.
pub async fn retry_with_backoff_counted<F, Fut, T, E>(
    mut op: F,
    is_retryable: impl Fn(&E) -> bool,
) -> Result<(T, u32), E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let mut attempt = 0;
    loop {
        attempt += 1;
        match op().await {
            Ok(value) => return Ok((value, attempt - 1)),
            Err(err) if attempt < MAX_ATTEMPTS && is_retryable(&err) => {
                tokio::time::sleep(backoff_delay(attempt)).await;
            }
            Err(err) => return Err(err),
        }
    }
}

#[cfg(test)]
#[path = "retry_test.rs"]
mod tests;
