//! Exponential-backoff retry policy for upstream platform calls
//!
//! A single logical API call is retried with growing delays until it
//! succeeds or the elapsed-time budget runs out. Retries are purely local
//! to the call: they log a warning but reset no higher-level state, and
//! exhausting the budget surfaces the last error to the caller.

use std::fmt;
use std::future::Future;
use std::time::{Duration, Instant};

use tracing::warn;

/// Tunable parameters for the exponential-backoff strategy.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Delay before the second attempt.
    pub initial_delay: Duration,
    /// Upper bound on the delay between attempts.
    pub max_delay: Duration,
    /// Factor by which the delay grows after each failure.
    pub multiplier: f64,
    /// Total time budget across all attempts; once an attempt would push
    /// past this, the last error is returned instead.
    pub max_elapsed: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            initial_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(30),
            multiplier: 2.0,
            max_elapsed: Duration::from_secs(60),
        }
    }
}

/// Calculate the next backoff delay from the current delay and policy.
///
/// The result is clamped to [`RetryPolicy::max_delay`].
pub fn next_delay(current: Duration, policy: &RetryPolicy) -> Duration {
    let next_ms = (current.as_millis() as f64 * policy.multiplier) as u64;
    Duration::from_millis(next_ms).min(policy.max_delay)
}

impl RetryPolicy {
    /// Runs `op` until it succeeds or the elapsed budget is exhausted.
    ///
    /// A successful result is returned immediately and never retried.
    /// On failure the policy sleeps for the current delay, doubles it
    /// (clamped), and tries again; when the budget no longer covers the
    /// next delay, the most recent error is returned.
    pub async fn run<T, E, F, Fut>(&self, mut op: F) -> Result<T, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: fmt::Display,
    {
        let started = Instant::now();
        let mut delay = self.initial_delay;
        let mut attempt = 1u32;

        loop {
            match op().await {
                Ok(value) => return Ok(value),
                Err(error) => {
                    if started.elapsed() + delay > self.max_elapsed {
                        return Err(error);
                    }
                    warn!(
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        error = %error,
                        "retrying upstream call",
                    );
                    tokio::time::sleep(delay).await;
                    delay = next_delay(delay, self);
                    attempt += 1;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn fast_policy() -> RetryPolicy {
        RetryPolicy {
            initial_delay: Duration::from_millis(1),
            max_delay: Duration::from_millis(4),
            multiplier: 2.0,
            max_elapsed: Duration::from_secs(5),
        }
    }

    #[test]
    fn next_delay_doubles() {
        let policy = RetryPolicy::default();
        let d = next_delay(Duration::from_secs(1), &policy);
        assert_eq!(d, Duration::from_secs(2));
    }

    #[test]
    fn next_delay_clamps_at_max() {
        let policy = RetryPolicy {
            max_delay: Duration::from_secs(10),
            ..Default::default()
        };
        let d = next_delay(Duration::from_secs(8), &policy);
        assert_eq!(d, Duration::from_secs(10));
    }

    #[test]
    fn full_backoff_sequence() {
        let policy = RetryPolicy::default();
        let mut delay = policy.initial_delay;
        let expected_ms = [500, 1000, 2000, 4000, 8000, 16000, 30000, 30000];

        for &ms in &expected_ms {
            assert_eq!(delay, Duration::from_millis(ms));
            delay = next_delay(delay, &policy);
        }
    }

    #[tokio::test]
    async fn two_failures_then_success_takes_three_attempts() {
        let calls = AtomicU32::new(0);
        let result: Result<u32, String> = fast_policy()
            .run(|| {
                let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
                async move {
                    if n < 3 {
                        Err(format!("attempt {n} failed"))
                    } else {
                        Ok(n)
                    }
                }
            })
            .await;

        assert_eq!(result.unwrap(), 3);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn success_is_never_retried() {
        let calls = AtomicU32::new(0);
        let result: Result<&str, String> = fast_policy()
            .run(|| {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Ok("done") }
            })
            .await;

        assert_eq!(result.unwrap(), "done");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn exhausted_budget_returns_last_error() {
        let policy = RetryPolicy {
            max_elapsed: Duration::ZERO,
            ..fast_policy()
        };

        let calls = AtomicU32::new(0);
        let result: Result<(), String> = policy
            .run(|| {
                let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
                async move { Err(format!("attempt {n} failed")) }
            })
            .await;

        // A zero budget admits exactly one attempt, and its error surfaces.
        assert_eq!(result.unwrap_err(), "attempt 1 failed");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
