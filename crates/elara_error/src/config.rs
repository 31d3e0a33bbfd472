//! Errors raised while loading Elara settings or installing the logger.

/// A layered settings source failed to build or deserialize, or a log
/// filter was rejected.
///
/// Carries the caller's location so a bad `elara.toml` key and a bad
/// `RUST_LOG` directive point at different call sites.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Configuration Error: {} at line {} in {}", message, line, file)]
pub struct ConfigError {
    /// What went wrong, including the offending source or directive
    pub message: String,
    /// Line of the call that raised it
    pub line: u32,
    /// File of the call that raised it
    pub file: &'static str,
}

impl ConfigError {
    /// Record a settings failure at the caller's location.
    ///
    /// # Examples
    ///
    /// ```
    /// use elara_error::ConfigError;
    ///
    /// let err = ConfigError::new("Failed to parse configuration: invalid type for retry.max_attempts");
    /// assert!(err.message.starts_with("Failed to parse configuration"));
    /// assert!(err.to_string().starts_with("Configuration Error: "));
    /// ```
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: location.line(),
            file: location.file(),
        }
    }
}
