//! Retry-wrapped model calls followed by normalization.

use crate::ResponseNormalizer;
use crate::repair::{scrub_invisible, strip_code_fences};
use elara_core::{AnalysisRecord, GenerateRequest};
use elara_error::{ElaraResult, NormalizationError, NormalizationErrorKind};
use elara_interface::TextModel;
use elara_retry::RetryOrchestrator;
use tracing::{error, info, instrument};

/// Calls a [`TextModel`] under a retry budget and post-processes the text.
///
/// Structured calls go through the [`ResponseNormalizer`]; prose calls are
/// only unwrapped from fences and checked for emptiness.
///
/// # Examples
///
/// ```
/// use elara_core::GenerateRequest;
/// use elara_models::ScriptedModel;
/// use elara_normalize::{FailureReporter, GenerationPipeline, NormalizerConfig, ResponseNormalizer};
/// use elara_retry::RetryOrchestrator;
/// use std::time::Duration;
///
/// # #[tokio::main]
/// # async fn main() -> elara_error::ElaraResult<()> {
/// let model = ScriptedModel::replying(["```json\n{\"summary\": \"Tender\"}\n```"]);
/// let pipeline = GenerationPipeline::new(
///     model,
///     RetryOrchestrator::new(3, Duration::from_millis(1)),
///     ResponseNormalizer::new(NormalizerConfig::default(), FailureReporter::disabled()),
/// );
///
/// let record = pipeline.analyze(&GenerateRequest::from_prompt("Analyze this entry")).await?;
/// assert_eq!(record.result.summary(), "Tender");
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct GenerationPipeline<M> {
    model: M,
    retry: RetryOrchestrator,
    normalizer: ResponseNormalizer,
}

impl<M: TextModel> GenerationPipeline<M> {
    /// Assemble a pipeline.
    pub fn new(model: M, retry: RetryOrchestrator, normalizer: ResponseNormalizer) -> Self {
        Self {
            model,
            retry,
            normalizer,
        }
    }

    /// The wrapped model.
    pub fn model(&self) -> &M {
        &self.model
    }

    /// The normalizer applied to structured responses.
    pub fn normalizer(&self) -> &ResponseNormalizer {
        &self.normalizer
    }

    /// Raw model text, retried on transient failures.
    ///
    /// # Errors
    ///
    /// Returns the last model error once retries are exhausted or on the
    /// first fatal error.
    pub async fn raw_text(&self, request: &GenerateRequest, label: &str) -> ElaraResult<String> {
        self.retry
            .run(label, || self.model.generate(request))
            .await
    }

    /// Request a structured analysis; unparseable text yields a fallback.
    ///
    /// # Errors
    ///
    /// Only model-call failures are returned; normalization never fails here.
    #[instrument(skip_all, fields(model = self.model.model_name()))]
    pub async fn analyze(&self, request: &GenerateRequest) -> ElaraResult<AnalysisRecord> {
        let raw = self.raw_text(request, "analysis").await?;
        let result = self.normalizer.normalize(&raw);
        info!(fallback = result.is_fallback(), "Analysis normalized");
        Ok(AnalysisRecord::stamp(result))
    }

    /// Request a structured analysis; unparseable text is an error.
    ///
    /// # Errors
    ///
    /// Returns model-call failures and normalization failures.
    #[instrument(skip_all, fields(model = self.model.model_name()))]
    pub async fn analyze_strict(&self, request: &GenerateRequest) -> ElaraResult<AnalysisRecord> {
        let raw = self.raw_text(request, "analysis").await?;
        let result = self.normalizer.normalize_strict(&raw)?;
        Ok(AnalysisRecord::stamp(result))
    }

    /// Request free text, such as a journal entry or critique.
    ///
    /// Fences and invisible characters are removed and the text is trimmed.
    ///
    /// # Errors
    ///
    /// Returns model-call failures, and an empty-response error when nothing
    /// is left after cleanup.
    #[instrument(skip_all, fields(model = self.model.model_name(), label = label))]
    pub async fn generate_prose(&self, request: &GenerateRequest, label: &str) -> ElaraResult<String> {
        let raw = self.raw_text(request, label).await?;
        let text = strip_code_fences(&scrub_invisible(&raw));
        if text.is_empty() {
            error!(label, "Model returned no usable prose");
            return Err(NormalizationError::new(NormalizationErrorKind::EmptyResponse).into());
        }
        info!(label, chars = text.chars().count(), "Prose generated");
        Ok(text)
    }
}
