use super::*;

use std::cell::Cell;

#[tokio::test]
async fn succeeds_without_retry_on_first_try() {
    let calls = Cell::new(0);
    let result: Result<i32, &str> = retry_with_backoff(
        || {
            calls.set(calls.get() + 1);
            async { Ok(42) }
        },
        |_: &&str| true,
    )
    .await;
    assert_eq!(result, Ok(42));
    assert_eq!(calls.get(), 1);
}

#[tokio::test]
async fn stops_retrying_after_max_attempts() {
    let calls = Cell::new(0);
    let result: Result<i32, &str> = retry_with_backoff(
        || {
            calls.set(calls.get() + 1);
            async { Err("boom") }
        },
        |_: &&str| true,
    )
    .await;
    assert_eq!(result, Err("boom"));
    assert_eq!(calls.get(), MAX_ATTEMPTS);
}

#[tokio::test]
async fn does_not_retry_non_retryable_errors() {
    let calls = Cell::new(0);
    let result: Result<i32, &str> = retry_with_backoff(
        || {
            calls.set(calls.get() + 1);
            async { Err("fatal") }
        },
        |_: &&str| false,
    )
    .await;
    assert_eq!(result, Err("fatal"));
    assert_eq!(calls.get(), 1);
}

#[test]
fn delay_is_clamped_to_configured_bounds() {
    assert_eq!(backoff_delay(1), Duration::from_secs(4));
    assert_eq!(backoff_delay(2), Duration::from_secs(4));
    assert_eq!(backoff_delay(3), Duration::from_secs(8));
    assert_eq!(backoff_delay(10), Duration::from_secs(60));
}
