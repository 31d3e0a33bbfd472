//! OpenRouter chat-completions client.

use super::{ChatMessage, ChatRequest, ChatResponse, OpenRouterConfig};
use async_trait::async_trait;
use elara_core::GenerateRequest;
use elara_error::{ElaraResult, ModelError, ModelErrorKind};
use elara_interface::TextModel;
use reqwest::Client;
use std::error::Error as _;
use tracing::{debug, instrument, warn};

/// OpenRouter chat-completions client.
///
/// Sends a single user message and returns the first choice's text,
/// trimmed. Non-success statuses surface as [`ModelErrorKind::Http`] so the
/// retry layer can classify them; transport failures carry the full
/// reqwest source chain in [`ModelErrorKind::Transport`].
#[derive(Debug, Clone)]
pub struct OpenRouterClient {
    client: Client,
    api_key: String,
    config: OpenRouterConfig,
}

impl OpenRouterClient {
    /// Creates a client, reading the API key from the configured
    /// environment variable.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The API key is not set in the environment
    /// - The HTTP client cannot be initialized
    #[instrument(skip_all)]
    pub fn from_env(config: OpenRouterConfig) -> ElaraResult<Self> {
        let api_key = std::env::var(&config.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                ModelError::new(ModelErrorKind::MissingApiKey(config.api_key_env.clone()))
            })?;
        Self::with_api_key(config, api_key)
    }

    /// Creates a client with an explicit API key.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    #[instrument(skip_all)]
    pub fn with_api_key(config: OpenRouterConfig, api_key: impl Into<String>) -> ElaraResult<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| ModelError::new(ModelErrorKind::ClientCreation(e.to_string())))?;

        debug!(model = %config.model, url = %config.api_url, "Created OpenRouter client");

        Ok(Self {
            client,
            api_key: api_key.into(),
            config,
        })
    }

    /// Client settings.
    pub fn config(&self) -> &OpenRouterConfig {
        &self.config
    }

    fn build_request(&self, req: &GenerateRequest) -> ElaraResult<ChatRequest> {
        let model = req.model.clone().unwrap_or_else(|| self.config.model.clone());
        ChatRequest::builder()
            .model(model)
            .messages(vec![ChatMessage::user(req.prompt.clone())])
            .temperature(req.temperature.unwrap_or(self.config.temperature))
            .max_tokens(req.max_tokens.unwrap_or(self.config.max_tokens))
            .build()
            .map_err(|e| ModelError::new(ModelErrorKind::ClientCreation(e.to_string())).into())
    }
}

/// Render a reqwest error with its whole source chain.
///
/// reqwest's own `Display` stops at "error sending request"; the detail that
/// identifies a reset, DNS failure or timeout lives in the sources.
fn describe_transport_error(err: &reqwest::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    if err.is_timeout() {
        message.push_str(" (timeout)");
    }
    message
}

#[async_trait]
impl TextModel for OpenRouterClient {
    #[instrument(skip(self, req), fields(model = %self.config.model, prompt_chars = req.prompt.chars().count()))]
    async fn generate(&self, req: &GenerateRequest) -> ElaraResult<String> {
        let body = self.build_request(req)?;
        debug!(url = %self.config.api_url, "Sending OpenRouter request");

        let response = self
            .client
            .post(&self.config.api_url)
            .bearer_auth(&self.api_key)
            .header("HTTP-Referer", &self.config.referer)
            .header("X-Title", &self.config.title)
            .json(&body)
            .send()
            .await
            .map_err(|e| ModelError::new(ModelErrorKind::Transport(describe_transport_error(&e))))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            let message = if status.as_u16() == 429 {
                format!("rate limit exceeded: {}", error_text)
            } else {
                error_text
            };
            warn!(status = status.as_u16(), "OpenRouter returned an error status");
            return Err(ModelError::new(ModelErrorKind::Http {
                status_code: status.as_u16(),
                message,
            })
            .into());
        }

        let payload: ChatResponse = response.json().await.map_err(|e| {
            ModelError::new(ModelErrorKind::MalformedResponse(describe_transport_error(&e)))
        })?;

        let text = payload
            .first_text()
            .map(str::trim)
            .ok_or_else(|| {
                ModelError::new(ModelErrorKind::MalformedResponse(
                    "response has no choices".to_string(),
                ))
            })?;

        if text.is_empty() {
            return Err(ModelError::new(ModelErrorKind::EmptyCompletion).into());
        }

        debug!(response_chars = text.chars().count(), "Received OpenRouter completion");
        Ok(text.to_string())
    }

    fn provider_name(&self) -> &'static str {
        "openrouter"
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_uses_config_defaults() {
        let client = OpenRouterClient::with_api_key(OpenRouterConfig::default(), "key").unwrap();
        let request = client
            .build_request(&GenerateRequest::from_prompt("Write"))
            .unwrap();
        assert_eq!(request.model(), "mistralai/mistral-nemo:free");
        assert_eq!(*request.max_tokens(), 2048);
        assert_eq!(request.messages()[0].content.as_deref(), Some("Write"));
    }

    #[test]
    fn test_request_overrides_win() {
        let client = OpenRouterClient::with_api_key(OpenRouterConfig::default(), "key").unwrap();
        let request = client
            .build_request(&GenerateRequest {
                prompt: "Critique".to_string(),
                max_tokens: Some(256),
                temperature: Some(0.2),
                model: Some("qwen/qwen3-8b:free".to_string()),
            })
            .unwrap();
        assert_eq!(request.model(), "qwen/qwen3-8b:free");
        assert_eq!(*request.max_tokens(), 256);
        assert_eq!(*request.temperature(), 0.2);
    }

    #[test]
    fn test_missing_api_key_is_reported() {
        let config = OpenRouterConfig {
            api_key_env: "ELARA_TEST_KEY_THAT_IS_NEVER_SET".to_string(),
            ..Default::default()
        };
        let err = OpenRouterClient::from_env(config).unwrap_err();
        assert!(format!("{}", err).contains("ELARA_TEST_KEY_THAT_IS_NEVER_SET"));
    }
}
