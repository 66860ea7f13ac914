use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use tategaki::application::ports::{ExtractionServiceError, Retryable};
use tategaki::application::services::{RetryError, RetryPolicy, call_with_retry};
use tokio::time::Instant;

#[test]
fn given_default_policy_when_inspecting_then_four_retries_base_two() {
    let policy = RetryPolicy::default();

    assert_eq!(policy.max_attempts(), 5);
    assert_eq!(policy.delay_for(1, Duration::ZERO), Duration::from_secs(2));
    assert_eq!(policy.delay_for(4, Duration::ZERO), Duration::from_secs(16));
    assert_eq!(policy.delay_ceiling(3), Duration::from_secs(9));
}

#[test]
fn given_large_jitter_when_computing_delay_then_jitter_is_bounded() {
    let policy = RetryPolicy::default();

    let delay = policy.delay_for(1, Duration::from_secs(30));

    assert_eq!(delay, Duration::from_secs(3));
}

#[test]
fn given_max_delay_when_computing_late_retry_then_capped() {
    let policy = RetryPolicy {
        max_delay: Duration::from_secs(10),
        ..RetryPolicy::default()
    };

    assert_eq!(policy.delay_for(6, Duration::ZERO), Duration::from_secs(10));
}

#[test]
fn given_unbounded_retry_count_when_counting_attempts_then_saturates() {
    let policy = RetryPolicy {
        max_retries: u32::MAX,
        ..RetryPolicy::default()
    };

    assert_eq!(policy.max_attempts(), u32::MAX);
}

#[test]
fn given_configuration_errors_when_classifying_then_not_retryable() {
    assert!(!ExtractionServiceError::Unauthorized("401".into()).is_retryable());
    assert!(!ExtractionServiceError::ModelNotFound("gpt-x".into()).is_retryable());
    assert!(!ExtractionServiceError::Rejected("400".into()).is_retryable());
    assert!(ExtractionServiceError::RateLimited.is_retryable());
    assert!(ExtractionServiceError::Server("503".into()).is_retryable());
    assert!(ExtractionServiceError::InvalidResponse("empty".into()).is_retryable());
}

#[tokio::test(start_paused = true)]
async fn given_always_failing_operation_when_retrying_then_attempts_and_delays_bounded() {
    let policy = RetryPolicy::default();
    let calls = AtomicU32::new(0);
    let mut stamps: Vec<Instant> = Vec::new();

    let outcome: Result<(), _> = call_with_retry(&policy, "flaky", |_| {
        calls.fetch_add(1, Ordering::SeqCst);
        stamps.push(Instant::now());
        async { Err(ExtractionServiceError::Server("503".into())) }
    })
    .await;

    assert_eq!(calls.load(Ordering::SeqCst), policy.max_retries + 1);
    match outcome {
        Err(RetryError::Exhausted { attempts, last }) => {
            assert_eq!(attempts, 5);
            assert_eq!(last, ExtractionServiceError::Server("503".into()));
        }
        other => panic!("expected exhaustion, got {other:?}"),
    }

    let gaps: Vec<Duration> = stamps.windows(2).map(|w| w[1] - w[0]).collect();
    assert_eq!(gaps.len(), 4);
    for (index, gap) in gaps.iter().enumerate() {
        let retry = index as u32 + 1;
        assert!(*gap >= policy.delay_for(retry, Duration::ZERO), "gap {retry} too short");
        assert!(*gap <= policy.delay_ceiling(retry), "gap {retry} too long");
    }
    assert!(gaps.windows(2).all(|w| w[0] <= w[1]));
}

#[tokio::test(start_paused = true)]
async fn given_non_retryable_error_when_retrying_then_single_attempt() {
    let policy = RetryPolicy::default();
    let calls = AtomicU32::new(0);

    let outcome: Result<(), _> = call_with_retry(&policy, "bad-model", |_| {
        calls.fetch_add(1, Ordering::SeqCst);
        async { Err(ExtractionServiceError::ModelNotFound("gpt-x".into())) }
    })
    .await;

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    let err = outcome.unwrap_err();
    assert!(matches!(err, RetryError::NonRetryable { attempts: 1, .. }));
}

#[tokio::test(start_paused = true)]
async fn given_transient_failures_when_retrying_then_eventually_succeeds() {
    let policy = RetryPolicy::default();

    let outcome = call_with_retry(&policy, "recovering", |attempt| async move {
        if attempt < 3 {
            Err(ExtractionServiceError::RateLimited)
        } else {
            Ok(attempt)
        }
    })
    .await;

    assert_eq!(outcome.unwrap(), 3);
}

#[tokio::test(start_paused = true)]
async fn given_zero_retries_when_failing_then_one_attempt_only() {
    let policy = RetryPolicy {
        max_retries: 0,
        ..RetryPolicy::default()
    };
    let calls = AtomicU32::new(0);

    let outcome: Result<(), _> = call_with_retry(&policy, "once", |_| {
        calls.fetch_add(1, Ordering::SeqCst);
        async { Err(ExtractionServiceError::Network("reset".into())) }
    })
    .await;

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(outcome.unwrap_err().attempts(), 1);
}
