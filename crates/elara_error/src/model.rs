//! Generative-model call errors.

use crate::{RetryableError, is_transient_message};

/// Conditions under which a call to the generative model fails.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum ModelErrorKind {
    /// API key environment variable is not set
    #[display("API key not found: set the {} environment variable", _0)]
    MissingApiKey(String),
    /// Provider answered with a non-success HTTP status
    #[display("HTTP {} error: {}", status_code, message)]
    Http {
        /// HTTP status code
        status_code: u16,
        /// Response body or reason
        message: String,
    },
    /// Request never produced a response (connect, DNS, timeout, reset)
    #[display("Transport error: {}", _0)]
    Transport(String),
    /// Provider payload did not have the expected shape
    #[display("Malformed provider response: {}", _0)]
    MalformedResponse(String),
    /// Provider returned a completion with no text
    #[display("Model returned an empty completion")]
    EmptyCompletion,
    /// Failed to build the HTTP client or request
    #[display("Client construction failed: {}", _0)]
    ClientCreation(String),
}

impl ModelErrorKind {
    /// Whether this condition is worth another attempt.
    ///
    /// Classification inspects the rendered kind message for transient
    /// markers, so provider messages are judged the same way regardless
    /// of which variant carried them.
    pub fn is_retryable(&self) -> bool {
        is_transient_message(&self.to_string())
    }
}

/// Model error with source location tracking.
///
/// # Examples
///
/// ```
/// use elara_error::{ModelError, ModelErrorKind, RetryableError};
///
/// let err = ModelError::new(ModelErrorKind::Http {
///     status_code: 503,
///     message: "Service Unavailable".to_string(),
/// });
/// assert!(err.is_retryable());
///
/// let err = ModelError::new(ModelErrorKind::Http {
///     status_code: 401,
///     message: "Unauthorized".to_string(),
/// });
/// assert!(!err.is_retryable());
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Model Error: {} at line {} in {}", kind, line, file)]
pub struct ModelError {
    /// The kind of error that occurred
    pub kind: ModelErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl ModelError {
    /// Create a new ModelError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ModelErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}

impl RetryableError for ModelError {
    fn is_retryable(&self) -> bool {
        self.kind.is_retryable()
    }
}
