//! The parse ladder and its soft and strict entry points.

use crate::coerce::MISSING_SUMMARY;
use crate::{FailureReporter, RepairPipeline, SchemaCoercer};
use elara_core::NormalizedResult;
use elara_error::{NormalizationError, NormalizationErrorKind};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, instrument, warn};

/// Settings for [`ResponseNormalizer`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizerConfig {
    /// Longest response, in characters, fed to the parser; the rest is cut
    pub max_input_chars: usize,
    /// Summary used when a parsed response has none
    pub missing_summary: String,
    /// Reason placed after the fallback marker in soft mode
    pub fallback_summary: String,
    /// Add a final attempt that quotes bare identifier keys
    pub aggressive_key_quoting: bool,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            max_input_chars: 50_000,
            missing_summary: MISSING_SUMMARY.to_string(),
            fallback_summary: "model response could not be parsed".to_string(),
            aggressive_key_quoting: true,
        }
    }
}

/// Turns raw model text into a [`NormalizedResult`].
///
/// Parsing climbs a ladder and stops at the first rung that yields an
/// object or array:
///
/// 1. the text as-is
/// 2. the text after [`RepairPipeline::standard`]
/// 3. the text after [`RepairPipeline::aggressive`], when enabled
///
/// Every rung starts from the original text. Only the last rung's error is
/// kept for reporting.
#[derive(Debug, Clone)]
pub struct ResponseNormalizer {
    config: NormalizerConfig,
    rungs: Vec<RepairPipeline>,
    coercer: SchemaCoercer,
    reporter: FailureReporter,
}

impl ResponseNormalizer {
    /// Create a normalizer.
    pub fn new(config: NormalizerConfig, reporter: FailureReporter) -> Self {
        let mut rungs = vec![RepairPipeline::standard()];
        if config.aggressive_key_quoting {
            rungs.push(RepairPipeline::aggressive());
        }
        let coercer = SchemaCoercer::new(config.missing_summary.clone());
        Self {
            config,
            rungs,
            coercer,
            reporter,
        }
    }

    /// Active settings.
    pub fn config(&self) -> &NormalizerConfig {
        &self.config
    }

    /// Reporter used for failures.
    pub fn reporter(&self) -> &FailureReporter {
        &self.reporter
    }

    /// Run the parse ladder without coercion or reporting.
    ///
    /// # Errors
    ///
    /// Returns [`NormalizationErrorKind::EmptyResponse`] for blank input,
    /// otherwise the error from the last attempted rung.
    #[instrument(skip_all, fields(raw_len = raw.len()))]
    pub fn parse_candidate(&self, raw: &str) -> Result<Value, NormalizationError> {
        if raw.trim().is_empty() {
            return Err(NormalizationError::new(
                NormalizationErrorKind::EmptyResponse,
            ));
        }

        let mut last_error = match parse_composite(raw) {
            Ok(value) => {
                debug!(rung = 1, "Parsed response without repair");
                return Ok(value);
            }
            Err(e) => e,
        };

        for (index, pipeline) in self.rungs.iter().enumerate() {
            let rung = index + 2;
            let repaired = pipeline.apply(raw);
            match parse_composite(&repaired) {
                Ok(value) => {
                    debug!(rung, "Parsed response after repair");
                    return Ok(value);
                }
                Err(e) => {
                    debug!(rung, error = %e.kind, "Parse attempt failed");
                    last_error = e;
                }
            }
        }

        Err(last_error)
    }

    /// Normalize, substituting a marked fallback result on failure.
    ///
    /// Never fails. A failure is reported through the [`FailureReporter`]
    /// and the returned result satisfies
    /// [`NormalizedResult::is_fallback`].
    pub fn normalize(&self, raw: &str) -> NormalizedResult {
        match self.normalize_strict(raw) {
            Ok(result) => result,
            Err(e) => {
                warn!(error = %e.kind, "Substituting fallback result");
                NormalizedResult::fallback(&self.config.fallback_summary)
            }
        }
    }

    /// Normalize, surfacing the parse failure to the caller.
    ///
    /// The failure is still reported before the error is returned.
    #[instrument(skip_all, fields(raw_len = raw.len()))]
    pub fn normalize_strict(&self, raw: &str) -> Result<NormalizedResult, NormalizationError> {
        let bounded = self.bounded(raw);
        match self.parse_candidate(bounded) {
            Ok(candidate) => Ok(self.coercer.coerce(candidate)),
            Err(e) => {
                self.reporter.report(raw, &e);
                Err(e)
            }
        }
    }

    fn bounded<'a>(&self, raw: &'a str) -> &'a str {
        match raw.char_indices().nth(self.config.max_input_chars) {
            Some((cut, _)) => {
                warn!(
                    max_chars = self.config.max_input_chars,
                    "Response exceeds length limit, truncating"
                );
                &raw[..cut]
            }
            None => raw,
        }
    }
}

impl Default for ResponseNormalizer {
    fn default() -> Self {
        Self::new(NormalizerConfig::default(), FailureReporter::default())
    }
}

fn parse_composite(text: &str) -> Result<Value, NormalizationError> {
    match serde_json::from_str::<Value>(text) {
        Ok(value @ (Value::Object(_) | Value::Array(_))) => Ok(value),
        Ok(other) => Err(NormalizationError::new(
            NormalizationErrorKind::NotComposite(json_type(&other).to_string()),
        )),
        Err(e) => Err(NormalizationError::new(
            NormalizationErrorKind::Unparseable {
                message: e.to_string(),
                attempted: text.to_string(),
            },
        )),
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalizer() -> ResponseNormalizer {
        ResponseNormalizer::new(NormalizerConfig::default(), FailureReporter::disabled())
    }

    #[test]
    fn test_blank_input_is_empty_response() {
        let err = normalizer().parse_candidate(" \n\t").unwrap_err();
        assert_eq!(err.kind, NormalizationErrorKind::EmptyResponse);
    }

    #[test]
    fn test_scalar_json_is_not_composite() {
        let err = normalizer().parse_candidate("42").unwrap_err();
        assert!(matches!(err.kind, NormalizationErrorKind::NotComposite(_)));
    }

    #[test]
    fn test_unparseable_keeps_last_attempted_text() {
        let err = normalizer()
            .parse_candidate("```json\n{\"a\": }\n```")
            .unwrap_err();
        assert_eq!(err.attempted_text(), Some("{\"a\": }"));
    }

    #[test]
    fn test_bare_keys_need_aggressive_rung() {
        let config = NormalizerConfig {
            aggressive_key_quoting: false,
            ..NormalizerConfig::default()
        };
        let conservative = ResponseNormalizer::new(config, FailureReporter::disabled());
        assert!(conservative.parse_candidate("{summary: \"x\"}").is_err());
        assert!(normalizer().parse_candidate("{summary: \"x\"}").is_ok());
    }

    #[test]
    fn test_long_input_is_truncated_before_parsing() {
        let config = NormalizerConfig {
            max_input_chars: 24,
            ..NormalizerConfig::default()
        };
        let normalizer = ResponseNormalizer::new(config, FailureReporter::disabled());
        let raw = format!("{{\"summary\": \"{}\"}}", "x".repeat(100));
        assert!(normalizer.normalize(&raw).is_fallback());
        assert_eq!(normalizer.normalize("{\"summary\": \"ok\"}").summary(), "ok");
    }

    #[test]
    fn test_soft_mode_marks_fallback() {
        let result = normalizer().normalize("I cannot produce JSON today.");
        assert!(result.is_fallback());
        assert!(result.summary().contains("could not be parsed"));
        assert!(result.suggestions().is_empty());
        assert!(result.tags_for_search().is_empty());
        assert_eq!(result.next_context_suggestion(), &None);
    }
}
