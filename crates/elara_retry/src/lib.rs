//! Retry orchestration for generative model calls.
//!
//! A single fallible async operation is attempted up to a fixed number of
//! times with pure exponential backoff (`base_delay * 2^(attempt-1)`, no
//! jitter). Failures are classified through [`RetryableError`]: transient
//! errors are retried while attempts remain, anything else fails fast. The
//! last error is always returned to the caller.
//!
//! ```no_run
//! use elara_retry::RetryOrchestrator;
//! use elara_error::{ModelError, ModelErrorKind};
//! use std::time::Duration;
//!
//! # async fn demo() -> Result<(), ModelError> {
//! let retry = RetryOrchestrator::new(3, Duration::from_secs(2));
//! let text = retry
//!     .run("literary critique", || async {
//!         Ok::<_, ModelError>("{\"summary\": \"ok\"}".to_string())
//!     })
//!     .await?;
//! # Ok(())
//! # }
//! ```
//!
//! [`RetryableError`]: elara_error::RetryableError

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod orchestrator;

pub use config::RetryConfig;
pub use orchestrator::RetryOrchestrator;
