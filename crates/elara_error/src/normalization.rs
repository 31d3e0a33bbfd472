//! Response normalization errors.

use crate::RetryableError;

/// Ways in which raw model text fails to become a structured candidate.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum NormalizationErrorKind {
    /// Response was empty or whitespace only
    #[display("Model returned an empty response")]
    EmptyResponse,
    /// Every parse attempt failed; carries the last parser message and the
    /// text that parser was given
    #[display("Unparseable model response: {}", message)]
    Unparseable {
        /// Message of the last parser rejection
        message: String,
        /// Text the last parser attempt saw (after repair)
        attempted: String,
    },
    /// Text parsed, but to a scalar or null rather than a composite value
    #[display("Model response parsed to a {} instead of an object", _0)]
    NotComposite(String),
}

/// Normalization error with source location tracking.
///
/// # Examples
///
/// ```
/// use elara_error::{NormalizationError, NormalizationErrorKind};
///
/// let err = NormalizationError::new(NormalizationErrorKind::EmptyResponse);
/// assert!(format!("{}", err).contains("empty response"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Normalization Error: {} at line {} in {}", kind, line, file)]
pub struct NormalizationError {
    /// The kind of error that occurred
    pub kind: NormalizationErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl NormalizationError {
    /// Create a new NormalizationError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: NormalizationErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// The text the last parse attempt saw, when the failure was a parse failure.
    pub fn attempted_text(&self) -> Option<&str> {
        match &self.kind {
            NormalizationErrorKind::Unparseable { attempted, .. } => Some(attempted),
            _ => None,
        }
    }
}

impl RetryableError for NormalizationError {
    fn is_retryable(&self) -> bool {
        false
    }
}
