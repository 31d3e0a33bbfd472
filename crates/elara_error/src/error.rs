//! Top-level error wrapper types.

use crate::{ConfigError, ModelError, NormalizationError, RetryableError, StorageError};

/// Every error condition an Elara operation can surface.
///
/// # Examples
///
/// ```
/// use elara_error::{ElaraError, ConfigError};
///
/// let err: ElaraError = ConfigError::new("Missing field").into();
/// assert!(format!("{}", err).contains("Configuration Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum ElaraErrorKind {
    /// Generative model call failed
    #[from(ModelError)]
    Model(ModelError),
    /// Raw model text could not be normalized
    #[from(NormalizationError)]
    Normalization(NormalizationError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Diagnostic storage error
    #[from(StorageError)]
    Storage(StorageError),
}

/// Elara error with kind discrimination.
///
/// # Examples
///
/// ```
/// use elara_error::{ElaraResult, ConfigError};
///
/// fn might_fail() -> ElaraResult<()> {
///     Err(ConfigError::new("Missing field"))?
/// }
///
/// match might_fail() {
///     Ok(_) => println!("Success"),
///     Err(e) => println!("Error: {}", e),
/// }
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Elara Error: {}", _0)]
pub struct ElaraError(Box<ElaraErrorKind>);

impl ElaraError {
    /// Create a new error from a kind.
    pub fn new(kind: ElaraErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &ElaraErrorKind {
        &self.0
    }
}

// Generic From implementation for any type that converts to ElaraErrorKind
impl<T> From<T> for ElaraError
where
    T: Into<ElaraErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

impl RetryableError for ElaraError {
    fn is_retryable(&self) -> bool {
        match self.kind() {
            ElaraErrorKind::Model(e) => e.is_retryable(),
            _ => false,
        }
    }
}

/// Result type for Elara operations.
pub type ElaraResult<T> = std::result::Result<T, ElaraError>;
