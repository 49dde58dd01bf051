// Shared helpers

use std::future::Future;
use std::time::Duration;

use crate::error::ProphetError;

/// Fixed-delay bounded retry. No backoff, no jitter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub attempts: usize,
    pub delay: Duration,
}

impl RetryPolicy {
    pub const fn new(attempts: usize, delay: Duration) -> Self {
        Self { attempts, delay }
    }

    /// Match detail fetches: 5 attempts, 10ms apart.
    pub const fn game_detail() -> Self {
        Self::new(5, Duration::from_millis(10))
    }

    /// Current summoner confirmation when a connection opens: 5 attempts, 1s apart.
    pub const fn identity() -> Self {
        Self::new(5, Duration::from_secs(1))
    }
}

pub async fn retry_fixed<T, F, Fut>(policy: RetryPolicy, mut op: F) -> Result<T, ProphetError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ProphetError>>,
{
    let attempts = policy.attempts.max(1);
    let mut last_err = None;
    for attempt in 1..=attempts {
        match op().await {
            Ok(value) => return Ok(value),
            Err(e) => {
                tracing::debug!("attempt {}/{} failed: {}", attempt, attempts, e);
                last_err = Some(e);
                if attempt < attempts {
                    tokio::time::sleep(policy.delay).await;
                }
            }
        }
    }
    Err(last_err.unwrap_or_else(|| ProphetError::Request("retry made no attempts".to_string())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn stops_at_first_success() {
        let calls = AtomicUsize::new(0);
        let result = retry_fixed(RetryPolicy::new(5, Duration::ZERO), || async {
            let n = calls.fetch_add(1, Ordering::SeqCst);
            if n < 2 {
                Err(ProphetError::Request("flaky".to_string()))
            } else {
                Ok(n)
            }
        })
        .await;
        assert_eq!(result.unwrap(), 2);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn gives_up_after_budget() {
        let calls = AtomicUsize::new(0);
        let result: Result<(), _> = retry_fixed(RetryPolicy::new(5, Duration::ZERO), || async {
            calls.fetch_add(1, Ordering::SeqCst);
            Err(ProphetError::Request("down".to_string()))
        })
        .await;
        assert!(matches!(result, Err(ProphetError::Request(_))));
        assert_eq!(calls.load(Ordering::SeqCst), 5);
    }
}
