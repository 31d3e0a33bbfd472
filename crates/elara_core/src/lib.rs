//! Core data types for the Elara response-normalization pipeline.
//!
//! This crate provides the plain records exchanged between the model call,
//! the normalizer and the callers that persist results.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod analysis;
mod request;
mod result;

pub use analysis::AnalysisRecord;
pub use request::GenerateRequest;
pub use result::{FALLBACK_MARKER, NormalizedResult};
