//! The contract-bound output of response normalization.

use serde::{Deserialize, Serialize};

/// Prefix carried by the summary of every fallback result.
pub const FALLBACK_MARKER: &str = "[normalization-failed]";

/// Structured analysis produced from a model response.
///
/// Every field always holds a value of its declared type; a result handed
/// out by the normalizer never has a missing or wrongly typed field.
/// `tags_for_search` may contain duplicates; deduplication belongs to the
/// tag-statistics merge.
///
/// # Examples
///
/// ```
/// use elara_core::NormalizedResult;
///
/// let result = NormalizedResult::new(
///     "A calm, inward entry.",
///     vec!["Vary sentence length".to_string()],
///     vec!["memory".to_string()],
///     None,
/// );
///
/// let json = serde_json::to_value(&result).unwrap();
/// assert_eq!(json["summary"], "A calm, inward entry.");
/// assert!(json["next_context_suggestion"].is_null());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
pub struct NormalizedResult {
    /// Non-empty overall summary
    summary: String,
    /// Ordered improvement suggestions
    suggestions: Vec<String>,
    /// Tags for downstream search and statistics
    tags_for_search: Vec<String>,
    /// Seed for the next entry's context, if the model proposed one
    next_context_suggestion: Option<String>,
}

impl NormalizedResult {
    /// Assemble a result from already-normalized fields.
    pub fn new(
        summary: impl Into<String>,
        suggestions: Vec<String>,
        tags_for_search: Vec<String>,
        next_context_suggestion: Option<String>,
    ) -> Self {
        Self {
            summary: summary.into(),
            suggestions,
            tags_for_search,
            next_context_suggestion,
        }
    }

    /// Inert placeholder used when no structured value could be recovered.
    ///
    /// The summary is prefixed with [`FALLBACK_MARKER`]; lists are empty and
    /// the context suggestion is null so tag aggregation is unaffected.
    pub fn fallback(reason: &str) -> Self {
        Self {
            summary: format!("{} {}", FALLBACK_MARKER, reason),
            suggestions: Vec::new(),
            tags_for_search: Vec::new(),
            next_context_suggestion: None,
        }
    }

    /// Whether this result is a fallback placeholder.
    pub fn is_fallback(&self) -> bool {
        self.summary.starts_with(FALLBACK_MARKER)
    }
}
