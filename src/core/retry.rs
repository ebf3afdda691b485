//! Bounded retry with exponential backoff
//!
//! Shared by the chat client and the tool backends for transient
//! network failures. Delays grow exponentially from the configured base
//! with random jitter added to avoid thundering retries.

use std::future::Future;
use std::time::Duration;

use rand::Rng;

use crate::core::config::RetryConfig;
use crate::core::error::Result;

/// Run `op`, retrying up to `policy.max_retries` additional times on
/// transient failures.
///
/// Permanent errors (API rejections, parse failures) are returned
/// immediately; the last error is returned unchanged once the budget is
/// spent.
pub async fn with_backoff<T, Fut>(policy: &RetryConfig, mut op: impl FnMut() -> Fut) -> Result<T>
where
    Fut: Future<Output = Result<T>>,
{
    let mut attempt = 0;
    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(e) if e.is_transient() && attempt < policy.max_retries => {
                tokio::time::sleep(backoff_delay(policy.base_delay_ms, attempt)).await;
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}

/// Delay before retry number `attempt` (0-indexed): base * 2^attempt plus
/// up to 50% jitter.
fn backoff_delay(base_ms: u64, attempt: u32) -> Duration {
    let exp = base_ms.saturating_mul(1u64 << attempt.min(6));
    let jitter = rand::rng().random_range(0..=exp / 2);
    Duration::from_millis(exp.saturating_add(jitter))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::WayfareError;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[tokio::test]
    async fn test_succeeds_first_try() {
        let policy = RetryConfig {
            max_retries: 3,
            base_delay_ms: 1,
        };
        let calls = AtomicU32::new(0);
        let result = with_backoff(&policy, || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Ok::<_, WayfareError>(42) }
        })
        .await;
        assert_eq!(result.unwrap(), 42);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_retries_then_succeeds() {
        let policy = RetryConfig {
            max_retries: 2,
            base_delay_ms: 1,
        };
        let calls = AtomicU32::new(0);
        let result = with_backoff(&policy, || {
            let n = calls.fetch_add(1, Ordering::SeqCst);
            async move {
                if n < 2 {
                    Err(WayfareError::unavailable("overloaded"))
                } else {
                    Ok("ok")
                }
            }
        })
        .await;
        assert_eq!(result.unwrap(), "ok");
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_budget_exhausted_returns_last_error() {
        let policy = RetryConfig {
            max_retries: 1,
            base_delay_ms: 1,
        };
        let calls = AtomicU32::new(0);
        let result: Result<()> = with_backoff(&policy, || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err(WayfareError::unavailable("still down")) }
        })
        .await;
        assert!(matches!(result, Err(WayfareError::LlmUnavailable(_))));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_permanent_error_not_retried() {
        let policy = RetryConfig {
            max_retries: 3,
            base_delay_ms: 1,
        };
        let calls = AtomicU32::new(0);
        let result: Result<()> = with_backoff(&policy, || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err(WayfareError::llm("401 Unauthorized")) }
        })
        .await;
        assert!(matches!(result, Err(WayfareError::Llm(_))));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_backoff_delay_grows() {
        let first = backoff_delay(100, 0);
        let third = backoff_delay(100, 2);
        assert!(first >= Duration::from_millis(100));
        assert!(first <= Duration::from_millis(150));
        assert!(third >= Duration::from_millis(400));
        assert!(third <= Duration::from_millis(600));
    }
}
