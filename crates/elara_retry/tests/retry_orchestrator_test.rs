//! Behavioural tests for the retry loop.

use elara_error::{ElaraError, ModelError, ModelErrorKind};
use elara_retry::{RetryConfig, RetryOrchestrator};
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;
use tokio::time::Instant;

fn unavailable() -> ModelError {
    ModelError::new(ModelErrorKind::Http {
        status_code: 503,
        message: "Service Unavailable".to_string(),
    })
}

fn unauthorized() -> ModelError {
    ModelError::new(ModelErrorKind::Http {
        status_code: 401,
        message: "No auth credentials found".to_string(),
    })
}

/// Operation that fails transiently `failures` times, then succeeds.
fn flaky(
    calls: Arc<AtomicU32>,
    failures: u32,
) -> impl FnMut() -> std::pin::Pin<Box<dyn std::future::Future<Output = Result<String, ModelError>> + Send>>
{
    move || {
        let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
        Box::pin(async move {
            if n <= failures {
                Err(unavailable())
            } else {
                Ok(format!("success on call {}", n))
            }
        })
    }
}

#[tokio::test(start_paused = true)]
async fn succeeds_on_third_attempt_within_budget() {
    let calls = Arc::new(AtomicU32::new(0));
    let retry = RetryOrchestrator::new(3, Duration::from_millis(100));

    let value = retry
        .run("critique", flaky(calls.clone(), 2))
        .await
        .unwrap();

    assert_eq!(value, "success on call 3");
    assert_eq!(calls.load(Ordering::SeqCst), 3);
}

#[tokio::test(start_paused = true)]
async fn exhausted_budget_returns_last_failure_without_extra_call() {
    let calls = Arc::new(AtomicU32::new(0));
    let retry = RetryOrchestrator::new(2, Duration::from_millis(100));

    let err = retry
        .run("critique", flaky(calls.clone(), 2))
        .await
        .unwrap_err();

    assert!(matches!(
        err.kind,
        ModelErrorKind::Http {
            status_code: 503,
            ..
        }
    ));
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[tokio::test(start_paused = true)]
async fn fatal_error_fails_fast() {
    let calls = Arc::new(AtomicU32::new(0));
    let retry = RetryOrchestrator::new(5, Duration::from_millis(100));

    let counter = calls.clone();
    let err = retry
        .run("essay", move || {
            counter.fetch_add(1, Ordering::SeqCst);
            async { Err::<String, _>(unauthorized()) }
        })
        .await
        .unwrap_err();

    assert!(matches!(
        err.kind,
        ModelErrorKind::Http {
            status_code: 401,
            ..
        }
    ));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn first_success_makes_no_further_attempts() {
    let calls = Arc::new(AtomicU32::new(0));
    let retry = RetryOrchestrator::new(3, Duration::from_millis(100));

    let value = retry
        .run("reflection", flaky(calls.clone(), 0))
        .await
        .unwrap();

    assert_eq!(value, "success on call 1");
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn backoff_doubles_between_attempts() {
    let calls = Arc::new(AtomicU32::new(0));
    let retry = RetryOrchestrator::new(4, Duration::from_millis(1000));
    let started = Instant::now();

    retry
        .run("critique", flaky(calls.clone(), 3))
        .await
        .unwrap();

    // 1000 + 2000 + 4000 ms of backoff, no jitter
    let elapsed = started.elapsed();
    assert!(elapsed >= Duration::from_millis(7000), "elapsed {:?}", elapsed);
    assert!(elapsed < Duration::from_millis(7500), "elapsed {:?}", elapsed);
    assert_eq!(calls.load(Ordering::SeqCst), 4);
}

#[tokio::test(start_paused = true)]
async fn transport_timeouts_are_retried() {
    let calls = Arc::new(AtomicU32::new(0));
    let retry = RetryOrchestrator::new(3, Duration::from_millis(10));

    let counter = calls.clone();
    let value = retry
        .run("critique", move || {
            let n = counter.fetch_add(1, Ordering::SeqCst) + 1;
            async move {
                if n == 1 {
                    Err(ModelError::new(ModelErrorKind::Transport(
                        "error sending request: operation timed out".to_string(),
                    )))
                } else {
                    Ok(n)
                }
            }
        })
        .await
        .unwrap();

    assert_eq!(value, 2);
}

#[tokio::test(start_paused = true)]
async fn works_with_the_top_level_error_type() {
    let calls = Arc::new(AtomicU32::new(0));
    let retry = RetryOrchestrator::from_config(&RetryConfig {
        max_attempts: 3,
        base_delay_ms: 50,
    });

    let counter = calls.clone();
    let value = retry
        .run("critique", move || {
            let n = counter.fetch_add(1, Ordering::SeqCst) + 1;
            async move {
                if n < 3 {
                    Err(ElaraError::from(unavailable()))
                } else {
                    Ok("done")
                }
            }
        })
        .await
        .unwrap();

    assert_eq!(value, "done");
    assert_eq!(calls.load(Ordering::SeqCst), 3);
}
