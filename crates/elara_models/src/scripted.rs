//! Replay backend for tests and offline runs.

use async_trait::async_trait;
use elara_core::GenerateRequest;
use elara_error::{ElaraResult, ModelError, ModelErrorKind};
use elara_interface::TextModel;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use tokio::sync::Mutex;

/// A model that replays a fixed script of outcomes, one per call.
///
/// Once the script is exhausted every further call fails with a
/// non-retryable error. Received prompts are recorded for inspection.
///
/// # Examples
///
/// ```
/// use elara_core::GenerateRequest;
/// use elara_interface::TextModel;
/// use elara_models::ScriptedModel;
///
/// # #[tokio::main]
/// # async fn main() {
/// let model = ScriptedModel::replying(["{\"summary\": \"ok\"}"]);
/// let text = model.generate(&GenerateRequest::from_prompt("hi")).await.unwrap();
/// assert!(text.contains("summary"));
/// assert_eq!(model.calls(), 1);
/// # }
/// ```
#[derive(Debug)]
pub struct ScriptedModel {
    script: Mutex<VecDeque<ElaraResult<String>>>,
    prompts: Mutex<Vec<String>>,
    calls: AtomicU32,
}

impl ScriptedModel {
    /// A model that yields the given outcomes in order.
    pub fn new(script: impl IntoIterator<Item = ElaraResult<String>>) -> Self {
        Self {
            script: Mutex::new(script.into_iter().collect()),
            prompts: Mutex::new(Vec::new()),
            calls: AtomicU32::new(0),
        }
    }

    /// A model that succeeds with each of the given texts in order.
    pub fn replying<S: Into<String>>(texts: impl IntoIterator<Item = S>) -> Self {
        Self::new(texts.into_iter().map(|text| Ok(text.into())))
    }

    /// Number of times `generate` has been called.
    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }

    /// Prompts received so far, in call order.
    pub async fn prompts(&self) -> Vec<String> {
        self.prompts.lock().await.clone()
    }
}

#[async_trait]
impl TextModel for ScriptedModel {
    async fn generate(&self, req: &GenerateRequest) -> ElaraResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().await.push(req.prompt.clone());
        self.script.lock().await.pop_front().unwrap_or_else(|| {
            Err(ModelError::new(ModelErrorKind::MalformedResponse(
                "scripted model has no more responses".to_string(),
            ))
            .into())
        })
    }

    fn provider_name(&self) -> &'static str {
        "scripted"
    }

    fn model_name(&self) -> &str {
        "scripted"
    }
}
