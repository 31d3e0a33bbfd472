//! Response normalization for generative model output.
//!
//! LLM responses that are supposed to be JSON routinely arrive wrapped in
//! markdown fences, surrounded by chatty prose, sprinkled with invisible
//! characters, or carrying trailing commas, unescaped quotation marks and
//! raw line breaks inside string values. This crate turns such text into a
//! [`NormalizedResult`](elara_core::NormalizedResult):
//!
//! 1. [`ResponseNormalizer`] runs a ladder of parse attempts, each more
//!    aggressive than the last, using the stages of [`RepairPipeline`].
//! 2. [`SchemaCoercer`] reconciles the parsed candidate with the result
//!    contract.
//! 3. [`FailureReporter`] writes a forensic artifact when nothing works, and
//!    the normalizer hands back an inert fallback (or an error in strict mode).
//!
//! [`GenerationPipeline`] ties this to a retry-wrapped model call.
//!
//! # Examples
//!
//! ```
//! use elara_normalize::{FailureReporter, NormalizerConfig, ResponseNormalizer};
//!
//! let normalizer = ResponseNormalizer::new(NormalizerConfig::default(), FailureReporter::disabled());
//!
//! let raw = "Here is the analysis:\n```json\n{\"summary\": \"Calm\", \"suggestions\": \"Cut the last line\",}\n```";
//! let result = normalizer.normalize(raw);
//!
//! assert_eq!(result.summary(), "Calm");
//! assert_eq!(result.suggestions(), &vec!["Cut the last line".to_string()]);
//! assert!(result.tags_for_search().is_empty());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod coerce;
mod generation;
mod normalizer;
pub mod repair;
mod report;

pub use coerce::SchemaCoercer;
pub use generation::GenerationPipeline;
pub use normalizer::{NormalizerConfig, ResponseNormalizer};
pub use repair::{RepairPipeline, RepairStage};
pub use report::{DiagnosticsConfig, FailureRecord, FailureReporter, parser_offset};
