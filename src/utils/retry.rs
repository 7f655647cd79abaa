// src/utils/retry.rs

//! Bounded retries with capped exponential backoff and per-attempt timeouts.

use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;
use tracing::warn;

use crate::error::{AppError, Result};
use crate::models::RetryConfig;

/// Base delay before the first retry.
const BASE_DELAY_MS: u64 = 500;

/// Upper bound on any single backoff delay.
const MAX_DELAY_MS: u64 = 3_000;

/// Retry policy applied to content fetches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first attempt; total attempts is `max_retries + 1`
    pub max_retries: u32,
    /// Ceiling for each attempt
    pub timeout: Duration,
    /// Optional ceiling on time spent across attempts and backoffs
    pub budget: Option<Duration>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            timeout: Duration::from_millis(30_000),
            budget: None,
        }
    }
}

impl From<&RetryConfig> for RetryPolicy {
    fn from(config: &RetryConfig) -> Self {
        Self {
            max_retries: config.max_retries,
            timeout: Duration::from_millis(config.timeout_ms),
            budget: config.budget_ms.map(Duration::from_millis),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_retries: u32, timeout: Duration) -> Self {
        Self {
            max_retries,
            timeout,
            budget: None,
        }
    }

    pub fn with_budget(mut self, budget: Duration) -> Self {
        self.budget = Some(budget);
        self
    }
}

/// Delay before retrying after the zero-based `attempt` failed.
///
/// Yields 500, 1000, 2000, 3000, 3000, ... milliseconds.
pub fn backoff_delay(attempt: u32) -> Duration {
    let factor = 1u64.checked_shl(attempt).unwrap_or(u64::MAX);
    Duration::from_millis(BASE_DELAY_MS.saturating_mul(factor).min(MAX_DELAY_MS))
}

/// Run `op` until it succeeds or the policy gives up.
///
/// Attempts are strictly sequential. Each one is raced against the policy
/// timeout; a future that loses the race is dropped.
pub async fn with_retry<T, F, Fut>(policy: &RetryPolicy, mut op: F) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let started = Instant::now();
    let timeout_ms = policy.timeout.as_millis() as u64;
    let mut last_error: Option<AppError> = None;
    let mut attempts = 0;

    for attempt in 0..=policy.max_retries {
        attempts = attempt + 1;
        let outcome = match tokio::time::timeout(policy.timeout, op()).await {
            Ok(result) => result,
            Err(_) => Err(AppError::timeout(timeout_ms)),
        };

        let error = match outcome {
            Ok(value) => return Ok(value),
            Err(error) => error,
        };

        if attempt == policy.max_retries {
            last_error = Some(error);
            break;
        }

        let delay = backoff_delay(attempt);
        if let Some(budget) = policy.budget {
            if started.elapsed() + delay > budget {
                warn!(
                    attempt = attempts,
                    budget_ms = budget.as_millis() as u64,
                    error = %error,
                    "Retry budget exhausted, giving up"
                );
                last_error = Some(error);
                break;
            }
        }

        warn!(
            attempt = attempts,
            delay_ms = delay.as_millis() as u64,
            error = %error,
            "Content fetch failed, retrying"
        );
        last_error = Some(error);
        tokio::time::sleep(delay).await;
    }

    match last_error {
        Some(source) => Err(AppError::RetriesExhausted {
            attempts,
            source: Box::new(source),
        }),
        None => Err(AppError::UnknownRetryFailure),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicU32, Ordering};

    use super::*;

    #[test]
    fn test_backoff_schedule() {
        let delays: Vec<u64> = (0..6).map(|a| backoff_delay(a).as_millis() as u64).collect();
        assert_eq!(delays, vec![500, 1000, 2000, 3000, 3000, 3000]);
        assert_eq!(backoff_delay(200), Duration::from_millis(3000));
    }

    #[tokio::test(start_paused = true)]
    async fn test_always_failing_runs_max_retries_plus_one() {
        let calls = Arc::new(AtomicU32::new(0));
        let policy = RetryPolicy::default();

        let counter = Arc::clone(&calls);
        let result: Result<()> = with_retry(&policy, || {
            let counter = Arc::clone(&counter);
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Err(AppError::fetch_failed(503, "https://cms.example"))
            }
        })
        .await;

        assert_eq!(calls.load(Ordering::SeqCst), 4);
        match result {
            Err(AppError::RetriesExhausted { attempts, source }) => {
                assert_eq!(attempts, 4);
                assert!(matches!(*source, AppError::FetchFailed { status: 503, .. }));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_delays_between_attempts_follow_schedule() {
        let stamps = Arc::new(Mutex::new(Vec::new()));
        let start = Instant::now();
        let policy = RetryPolicy::new(5, Duration::from_secs(30));

        let recorded = Arc::clone(&stamps);
        let _: Result<()> = with_retry(&policy, || {
            let recorded = Arc::clone(&recorded);
            async move {
                recorded.lock().unwrap().push(start.elapsed().as_millis() as u64);
                Err(AppError::fetch_failed(500, "https://cms.example"))
            }
        })
        .await;

        let stamps = stamps.lock().unwrap();
        let gaps: Vec<u64> = stamps.windows(2).map(|w| w[1] - w[0]).collect();
        let expected = [500, 1000, 2000, 3000, 3000];
        assert_eq!(gaps.len(), expected.len());
        for (gap, want) in gaps.iter().zip(expected) {
            assert!(*gap >= want && *gap <= want + 2, "gap {gap}ms, expected {want}ms");
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_recovers_after_transient_failures() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = Arc::clone(&calls);

        let value = with_retry(&RetryPolicy::default(), || {
            let counter = Arc::clone(&counter);
            async move {
                if counter.fetch_add(1, Ordering::SeqCst) < 2 {
                    Err(AppError::fetch_failed(502, "https://cms.example"))
                } else {
                    Ok("content")
                }
            }
        })
        .await
        .unwrap();

        assert_eq!(value, "content");
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_hanging_attempt_times_out() {
        let policy = RetryPolicy::new(0, Duration::from_millis(250));
        let start = Instant::now();

        let result: Result<()> =
            with_retry(&policy, || futures::future::pending::<Result<()>>()).await;

        let err = result.unwrap_err();
        assert!(err.is_timeout());
        assert!(start.elapsed() < Duration::from_millis(260));
    }

    #[tokio::test(start_paused = true)]
    async fn test_each_attempt_bounded_by_timeout() {
        let policy = RetryPolicy::new(2, Duration::from_millis(1_000));
        let start = Instant::now();

        let result: Result<()> =
            with_retry(&policy, || futures::future::pending::<Result<()>>()).await;

        assert!(result.unwrap_err().is_timeout());
        // three timed-out attempts plus 500ms and 1000ms of backoff
        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_millis(4_500));
        assert!(elapsed < Duration::from_millis(4_520));
    }

    #[tokio::test(start_paused = true)]
    async fn test_budget_stops_retrying_early() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = Arc::clone(&calls);
        let policy = RetryPolicy::new(3, Duration::from_secs(30))
            .with_budget(Duration::from_millis(1_200));

        let result: Result<()> = with_retry(&policy, || {
            let counter = Arc::clone(&counter);
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Err(AppError::fetch_failed(500, "https://cms.example"))
            }
        })
        .await;

        // 500ms after the first failure fits, 500 + 1000 does not
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert!(matches!(
            result,
            Err(AppError::RetriesExhausted { attempts: 2, .. })
        ));
    }
}
