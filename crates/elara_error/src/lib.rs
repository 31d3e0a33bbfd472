//! Error types for the Elara workspace.
//!
//! This crate provides the foundation error types used throughout Elara.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All errors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use elara_error::{ElaraResult, ModelError, ModelErrorKind};
//!
//! fn ask_model() -> ElaraResult<String> {
//!     Err(ModelError::new(ModelErrorKind::MissingApiKey("OPENROUTER_API_KEY".into())))?
//! }
//!
//! match ask_model() {
//!     Ok(text) => println!("Got: {}", text),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod model;
mod normalization;
mod retryable;
mod storage;

pub use config::ConfigError;
pub use error::{ElaraError, ElaraErrorKind, ElaraResult};
pub use model::{ModelError, ModelErrorKind};
pub use normalization::{NormalizationError, NormalizationErrorKind};
pub use retryable::{RetryableError, is_transient_message};
pub use storage::{StorageError, StorageErrorKind};
