use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use rand::Rng;

use crate::application::ports::Retryable;

/// Exponential backoff with additive jitter.
///
/// The delay before retry `k` (1-based) is `backoff_base^k` seconds plus a uniform
/// jitter in `[0, jitter_max)`, capped at `max_delay`. With `backoff_base >= 2` and a
/// jitter bound of at most `backoff_base` seconds the delays never shrink.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub backoff_base: f64,
    pub jitter_max: Duration,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 4,
            backoff_base: 2.0,
            jitter_max: Duration::from_millis(1_000),
            max_delay: Duration::from_secs(60),
        }
    }
}

impl RetryPolicy {
    pub fn max_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }

    pub fn delay_for(&self, retry: u32, jitter: Duration) -> Duration {
        let base = self.backoff_base.max(1.0);
        let exponential = Duration::from_secs_f64(base.powi(retry as i32).min(u32::MAX as f64));
        (exponential + jitter.min(self.jitter_max)).min(self.max_delay)
    }

    /// Largest delay `delay_for(retry, _)` can produce.
    pub fn delay_ceiling(&self, retry: u32) -> Duration {
        self.delay_for(retry, self.jitter_max)
    }

    fn sample_jitter(&self) -> Duration {
        let bound = self.jitter_max.as_millis() as u64;
        if bound == 0 {
            return Duration::ZERO;
        }
        Duration::from_millis(rand::thread_rng().gen_range(0..bound))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RetryError<E: Display> {
    #[error("{last} (gave up after {attempts} attempts)")]
    Exhausted { attempts: u32, last: E },
    #[error("{error} (not retried)")]
    NonRetryable { attempts: u32, error: E },
}

impl<E: Display> RetryError<E> {
    pub fn attempts(&self) -> u32 {
        match self {
            RetryError::Exhausted { attempts, .. } | RetryError::NonRetryable { attempts, .. } => {
                *attempts
            }
        }
    }

    pub fn into_inner(self) -> E {
        match self {
            RetryError::Exhausted { last, .. } => last,
            RetryError::NonRetryable { error, .. } => error,
        }
    }
}

/// Runs `operation` until it succeeds, returns a non-retryable error, or the policy's
/// attempt budget is spent. `operation` receives the 1-based attempt number.
pub async fn call_with_retry<T, E, F, Fut>(
    policy: &RetryPolicy,
    operation_name: &str,
    mut operation: F,
) -> Result<T, RetryError<E>>
where
    E: Retryable + Display,
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let mut attempt: u32 = 0;

    loop {
        attempt += 1;

        match operation(attempt).await {
            Ok(value) => {
                if attempt > 1 {
                    tracing::info!(operation = operation_name, attempt, "Succeeded after retry");
                }
                return Ok(value);
            }
            Err(e) if !e.is_retryable() => {
                tracing::error!(
                    operation = operation_name,
                    attempt,
                    error = %e,
                    "Non-retryable failure"
                );
                return Err(RetryError::NonRetryable {
                    attempts: attempt,
                    error: e,
                });
            }
            Err(e) if attempt >= policy.max_attempts() => {
                tracing::error!(
                    operation = operation_name,
                    attempts = attempt,
                    error = %e,
                    "Retry budget exhausted"
                );
                return Err(RetryError::Exhausted {
                    attempts: attempt,
                    last: e,
                });
            }
            Err(e) => {
                let delay = policy.delay_for(attempt, policy.sample_jitter());
                tracing::warn!(
                    operation = operation_name,
                    attempt,
                    retries_left = policy.max_attempts() - attempt,
                    delay_ms = delay.as_millis() as u64,
                    error = %e,
                    "Attempt failed, backing off"
                );
                tokio::time::sleep(delay).await;
            }
        }
    }
}
