//! Retry budget configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Attempt budget and backoff base for model calls.
///
/// ```toml
/// [retry]
/// max_attempts = 3
/// base_delay_ms = 2000
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Total attempts, including the first call
    pub max_attempts: u32,
    /// Delay before the second attempt, in milliseconds; doubles afterwards
    pub base_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay_ms: 2000,
        }
    }
}

impl RetryConfig {
    /// Base delay as a [`Duration`].
    pub fn base_delay(&self) -> Duration {
        Duration::from_millis(self.base_delay_ms)
    }
}
