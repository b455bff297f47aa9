// Retry helper for provider requests
//
// Transient network failures get a small number of retries with
// exponential backoff before the error is surfaced to the caller.

use std::future::Future;
use std::time::Duration;

use anyhow::Result;

/// Base delay; doubles after each failed attempt.
const BASE_DELAY_MS: u64 = 500;

/// Run an async operation, retrying on failure with exponential backoff.
///
/// `max_attempts` counts the initial try; it is clamped to at least one.
pub async fn with_retry_attempts<F, Fut, T>(max_attempts: u32, mut operation: F) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let max_attempts = max_attempts.max(1);
    let mut last_error = None;

    for attempt in 1..=max_attempts {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(e) => {
                if attempt < max_attempts {
                    let delay = Duration::from_millis(BASE_DELAY_MS * 2u64.pow(attempt - 1));
                    tracing::warn!(
                        "Request attempt {}/{} failed: {}. Retrying in {:?}",
                        attempt,
                        max_attempts,
                        e,
                        delay
                    );
                    tokio::time::sleep(delay).await;
                } else {
                    tracing::error!("Request failed after {} attempts: {}", max_attempts, e);
                }
                last_error = Some(e);
            }
        }
    }

    Err(last_error.unwrap_or_else(|| anyhow::anyhow!("retry loop exited without an error")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[tokio::test]
    async fn test_succeeds_first_attempt() {
        let calls = AtomicU32::new(0);
        let result = with_retry_attempts(2, || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Ok::<_, anyhow::Error>(42) }
        })
        .await;
        assert_eq!(result.unwrap(), 42);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_retries_then_succeeds() {
        let calls = AtomicU32::new(0);
        let result = with_retry_attempts(3, || {
            let n = calls.fetch_add(1, Ordering::SeqCst);
            async move {
                if n < 2 {
                    anyhow::bail!("transient failure")
                }
                Ok(7)
            }
        })
        .await;
        assert_eq!(result.unwrap(), 7);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_gives_up_after_max_attempts() {
        let calls = AtomicU32::new(0);
        let result: Result<()> = with_retry_attempts(2, || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { anyhow::bail!("persistent failure") }
        })
        .await;
        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_zero_attempts_clamped_to_one() {
        let calls = AtomicU32::new(0);
        let result: Result<()> = with_retry_attempts(0, || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { anyhow::bail!("fails") }
        })
        .await;
        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
