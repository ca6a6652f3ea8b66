use crate::config::CrawlerConfig;
use crate::{HarvestError, Result};
use std::future::Future;
use std::time::Duration;

/// Bounded retry with a fixed delay between attempts
///
/// Only errors for which [`HarvestError::is_retryable`] holds are retried. Any other
/// error is returned immediately. When every attempt fails the last error is
/// wrapped in [`HarvestError::RetryExhausted`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            delay: Duration::from_secs(10),
        }
    }
}

impl RetryPolicy {
    /// Creates a policy; at least one attempt is always made
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            delay,
        }
    }

    pub fn from_config(config: &CrawlerConfig) -> Self {
        Self::new(config.retry_attempts, config.retry_delay())
    }

    /// Runs `operation` until it succeeds, fails permanently or runs out of attempts
    ///
    /// The closure receives the 1-based attempt number.
    pub async fn run<T, F, Fut>(&self, mut operation: F) -> Result<T>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let mut attempt = 1;
        loop {
            match operation(attempt).await {
                Ok(value) => return Ok(value),
                Err(e) if !e.is_retryable() => return Err(e),
                Err(e) if attempt >= self.max_attempts => {
                    return Err(HarvestError::RetryExhausted {
                        attempts: attempt,
                        last: Box::new(e),
                    });
                }
                Err(e) => {
                    tracing::warn!(
                        "Attempt {}/{} failed: {}; retrying in {:?}",
                        attempt,
                        self.max_attempts,
                        e,
                        self.delay
                    );
                    if !self.delay.is_zero() {
                        tokio::time::sleep(self.delay).await;
                    }
                    attempt += 1;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unrecoverable() -> HarvestError {
        HarvestError::Unrecoverable {
            page: 0,
            message: "detail page vanished".to_string(),
        }
    }

    #[tokio::test]
    async fn test_first_attempt_succeeds() {
        let policy = RetryPolicy::new(5, Duration::ZERO);
        let mut calls = 0;
        let result = policy
            .run(|_| {
                calls += 1;
                async { Ok(42) }
            })
            .await;
        assert_eq!(result.unwrap(), 42);
        assert_eq!(calls, 1);
    }

    #[tokio::test]
    async fn test_succeeds_after_transient_failures() {
        let policy = RetryPolicy::new(5, Duration::ZERO);
        let mut seen = Vec::new();
        let result = policy
            .run(|attempt| {
                seen.push(attempt);
                async move {
                    if attempt < 3 {
                        Err(unrecoverable())
                    } else {
                        Ok("page")
                    }
                }
            })
            .await;
        assert_eq!(result.unwrap(), "page");
        assert_eq!(seen, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_exhausted_after_max_attempts() {
        let policy = RetryPolicy::new(5, Duration::ZERO);
        let mut calls = 0;
        let result: Result<()> = policy
            .run(|_| {
                calls += 1;
                async { Err(unrecoverable()) }
            })
            .await;

        assert_eq!(calls, 5);
        match result {
            Err(HarvestError::RetryExhausted { attempts, last }) => {
                assert_eq!(attempts, 5);
                assert!(matches!(*last, HarvestError::Unrecoverable { .. }));
            }
            other => panic!("expected RetryExhausted, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_non_retryable_error_is_returned_immediately() {
        let policy = RetryPolicy::new(5, Duration::ZERO);
        let mut calls = 0;
        let result: Result<()> = policy
            .run(|_| {
                calls += 1;
                async {
                    Err(HarvestError::UnexpectedStatus {
                        status: 503,
                        url: "http://localhost/".to_string(),
                    })
                }
            })
            .await;

        assert_eq!(calls, 1);
        assert!(matches!(result, Err(HarvestError::UnexpectedStatus { status: 503, .. })));
    }

    #[test]
    fn test_at_least_one_attempt() {
        assert_eq!(RetryPolicy::new(0, Duration::ZERO).max_attempts, 1);
    }

    #[test]
    fn test_from_config() {
        let policy = RetryPolicy::from_config(&CrawlerConfig::default());
        assert_eq!(policy, RetryPolicy::default());
    }
}
