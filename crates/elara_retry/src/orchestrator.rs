//! The retry loop.

use crate::RetryConfig;
use elara_error::RetryableError;
use std::future::Future;
use std::time::Duration;
use tokio_retry2::{Retry, RetryError};
use tracing::{error, info, instrument, warn};

/// Runs a fallible async operation under a bounded retry budget.
///
/// Holds no state between calls; each [`run`](Self::run) is independent.
/// Attempts are strictly sequential and the orchestrator sleeps between
/// them. Cancellation and call timeouts are the operation's concern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RetryOrchestrator {
    max_attempts: u32,
    base_delay: Duration,
}

impl Default for RetryOrchestrator {
    fn default() -> Self {
        Self::from_config(&RetryConfig::default())
    }
}

impl RetryOrchestrator {
    /// Create an orchestrator. A budget of zero attempts is raised to one.
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay,
        }
    }

    /// Create an orchestrator from configuration.
    pub fn from_config(config: &RetryConfig) -> Self {
        Self::new(config.max_attempts, config.base_delay())
    }

    /// Total attempts allowed per run.
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Delay before the second attempt.
    pub fn base_delay(&self) -> Duration {
        self.base_delay
    }

    /// Sleep applied after the given failed attempt (1-indexed):
    /// `base_delay * 2^(attempt-1)`.
    ///
    /// ```
    /// use elara_retry::RetryOrchestrator;
    /// use std::time::Duration;
    ///
    /// let retry = RetryOrchestrator::new(4, Duration::from_millis(2000));
    /// assert_eq!(retry.delay_after(1), Duration::from_millis(2000));
    /// assert_eq!(retry.delay_after(2), Duration::from_millis(4000));
    /// assert_eq!(retry.delay_after(3), Duration::from_millis(8000));
    /// ```
    pub fn delay_after(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(31);
        self.base_delay.saturating_mul(1u32 << exponent)
    }

    /// Run `operation` until it succeeds, fails with a non-transient error,
    /// or the attempt budget is spent.
    ///
    /// # Errors
    ///
    /// Returns the error of the last attempt made.
    #[instrument(skip(self, operation), fields(max_attempts = self.max_attempts))]
    pub async fn run<T, E, F, Fut>(&self, label: &str, mut operation: F) -> Result<T, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: RetryableError,
    {
        let max_attempts = self.max_attempts;
        let delays = (1..max_attempts).map(|attempt| self.delay_after(attempt));
        let mut attempt = 0u32;

        let outcome = Retry::spawn(delays, || {
            attempt += 1;
            let current = attempt;
            let backoff = self.delay_after(current);
            let pending = operation();
            async move {
                info!(label, attempt = current, max_attempts, "Attempting operation");
                match pending.await {
                    Ok(value) => {
                        info!(label, attempt = current, "Operation succeeded");
                        Ok(value)
                    }
                    Err(err) => {
                        let retryable = err.is_retryable();
                        warn!(
                            label,
                            attempt = current,
                            max_attempts,
                            retryable,
                            error = %err,
                            "Attempt failed"
                        );
                        if retryable && current < max_attempts {
                            info!(
                                label,
                                delay_ms = backoff.as_millis() as u64,
                                "Waiting before retry"
                            );
                            Err(RetryError::Transient {
                                err,
                                retry_after: None,
                            })
                        } else {
                            Err(RetryError::Permanent(err))
                        }
                    }
                }
            }
        })
        .await;

        if outcome.is_err() {
            error!(label, attempts = attempt, max_attempts, "Operation failed, giving up");
        }
        outcome
    }
}
