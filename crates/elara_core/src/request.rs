//! Request type for text generation.

use serde::{Deserialize, Serialize};

/// A single-prompt generation request.
///
/// Unset overrides fall back to the model client's configured defaults.
///
/// # Examples
///
/// ```
/// use elara_core::GenerateRequest;
///
/// let request = GenerateRequest {
///     prompt: "Write a short reflection.".to_string(),
///     max_tokens: Some(512),
///     temperature: None,
///     model: None,
/// };
///
/// assert_eq!(request.max_tokens, Some(512));
/// assert_eq!(GenerateRequest::from_prompt("hi").prompt, "hi");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct GenerateRequest {
    /// Fully rendered prompt text
    pub prompt: String,
    /// Maximum number of tokens to generate
    pub max_tokens: Option<u32>,
    /// Sampling temperature
    pub temperature: Option<f32>,
    /// Model identifier to use
    pub model: Option<String>,
}

impl GenerateRequest {
    /// Request with only a prompt; every other setting uses client defaults.
    pub fn from_prompt(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            ..Default::default()
        }
    }
}
