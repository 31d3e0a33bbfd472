//! Elara - retry-wrapped generation with normalized, typed output.
//!
//! Elara asks a generative text model for content and turns its free-form,
//! frequently malformed output into a validated [`NormalizedResult`]. Model
//! calls run under a bounded exponential-backoff retry budget; responses go
//! through a ladder of repair-and-parse attempts; unrecoverable responses
//! leave a forensic artifact and degrade to a clearly marked fallback.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use elara::{ElaraConfig, GenerateRequest, OpenRouterClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ElaraConfig::load()?;
//!     let client = OpenRouterClient::from_env(config.model.clone())?;
//!     let pipeline = config.pipeline(client);
//!
//!     let record = pipeline
//!         .analyze(&GenerateRequest::from_prompt("Analyze this journal entry: ..."))
//!         .await?;
//!     println!("{}", serde_json::to_string_pretty(&record)?);
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - `elara_error` - Error types and transient-failure classification
//! - `elara_core` - Result and request data types
//! - `elara_interface` - `TextModel` trait
//! - `elara_retry` - Retry orchestrator
//! - `elara_models` - OpenRouter client and scripted test model
//! - `elara_normalize` - Repair pipeline, normalizer, coercer, failure reporter
//!
//! This crate re-exports everything and adds layered configuration and
//! logging setup.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod observability;

pub use config::ElaraConfig;
pub use observability::{LoggingConfig, init_logging};

pub use elara_core::{AnalysisRecord, FALLBACK_MARKER, GenerateRequest, NormalizedResult};
pub use elara_error::{
    ConfigError, ElaraError, ElaraErrorKind, ElaraResult, ModelError, ModelErrorKind,
    NormalizationError, NormalizationErrorKind, RetryableError, StorageError, StorageErrorKind,
};
pub use elara_interface::TextModel;
pub use elara_models::{OpenRouterClient, OpenRouterConfig, ScriptedModel};
pub use elara_normalize::{
    DiagnosticsConfig, FailureRecord, FailureReporter, GenerationPipeline, NormalizerConfig,
    RepairPipeline, RepairStage, ResponseNormalizer, SchemaCoercer,
};
pub use elara_retry::{RetryConfig, RetryOrchestrator};
