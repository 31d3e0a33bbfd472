//! OpenRouter client settings.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Settings for [`OpenRouterClient`](super::OpenRouterClient).
///
/// ```toml
/// [model]
/// model = "mistralai/mistral-nemo:free"
/// temperature = 0.7
/// max_tokens = 2048
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct OpenRouterConfig {
    /// Chat-completions endpoint
    pub api_url: String,
    /// Default model identifier
    pub model: String,
    /// Default sampling temperature
    pub temperature: f32,
    /// Default completion token limit
    pub max_tokens: u32,
    /// Value of the `HTTP-Referer` attribution header
    pub referer: String,
    /// Value of the `X-Title` attribution header
    pub title: String,
    /// Environment variable holding the API key
    pub api_key_env: String,
    /// Whole-request timeout in seconds
    pub request_timeout_secs: u64,
}

impl Default for OpenRouterConfig {
    fn default() -> Self {
        Self {
            api_url: "https://openrouter.ai/api/v1/chat/completions".to_string(),
            model: "mistralai/mistral-nemo:free".to_string(),
            temperature: 0.7,
            max_tokens: 2048,
            referer: "https://jimmyjonezz.github.io/elara-journal-v2/".to_string(),
            title: "Elara Journal".to_string(),
            api_key_env: "OPENROUTER_API_KEY".to_string(),
            request_timeout_secs: 120,
        }
    }
}

impl OpenRouterConfig {
    /// Request timeout as a [`Duration`].
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
