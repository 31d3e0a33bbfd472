//! Schema coercion from loosely-shaped JSON to [`NormalizedResult`].

use elara_core::NormalizedResult;
use serde_json::{Map, Value};
use tracing::{debug, instrument};

const SUMMARY_KEYS: &[&str] = &["summary", "Summary"];
const SUGGESTION_KEYS: &[&str] = &["suggestions", "Suggestions"];
const TAG_KEYS: &[&str] = &[
    "tags_for_search",
    "tagsForSearch",
    "TagsForSearch",
    "searchTags",
    "search_tags",
];
const NEXT_CONTEXT_KEYS: &[&str] = &[
    "next_context_suggestion",
    "nextContextSuggestion",
    "NextContextSuggestion",
    "next_context",
];

/// Timestamp key the model sometimes invents; the caller stamps its own.
const GENERATED_AT_KEY: &str = "generated_at";

/// Default summary when the model omitted one.
pub const MISSING_SUMMARY: &str = "analysis unavailable";

/// Maps a parsed candidate onto the [`NormalizedResult`] contract.
///
/// Coercion never fails. Missing fields get defaults, scalar list fields are
/// wrapped into one-element lists, alternative key spellings are accepted,
/// and unrecognized keys are dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaCoercer {
    missing_summary: String,
}

impl SchemaCoercer {
    /// Create a coercer that substitutes `missing_summary` for an absent summary.
    pub fn new(missing_summary: impl Into<String>) -> Self {
        Self {
            missing_summary: missing_summary.into(),
        }
    }

    /// Coerce a parsed JSON value into a result.
    ///
    /// Arrays contribute their first object element; any other non-object
    /// value is treated as an empty object.
    #[instrument(skip_all)]
    pub fn coerce(&self, candidate: Value) -> NormalizedResult {
        let mut fields = into_fields(candidate);
        fields.remove(GENERATED_AT_KEY);

        let summary = take_first(&mut fields, SUMMARY_KEYS)
            .and_then(non_blank_string)
            .unwrap_or_else(|| {
                debug!("Summary missing, substituting default");
                self.missing_summary.clone()
            });
        let suggestions = string_list(take_first(&mut fields, SUGGESTION_KEYS));
        let tags_for_search = string_list(take_first(&mut fields, TAG_KEYS));
        let next_context_suggestion =
            take_first(&mut fields, NEXT_CONTEXT_KEYS).and_then(non_blank_string);

        if !fields.is_empty() {
            let dropped: Vec<&str> = fields.keys().map(String::as_str).collect();
            debug!(?dropped, "Dropping unrecognized fields");
        }

        NormalizedResult::new(
            summary,
            suggestions,
            tags_for_search,
            next_context_suggestion,
        )
    }
}

impl Default for SchemaCoercer {
    fn default() -> Self {
        Self::new(MISSING_SUMMARY)
    }
}

fn into_fields(candidate: Value) -> Map<String, Value> {
    match candidate {
        Value::Object(map) => map,
        Value::Array(items) => items
            .into_iter()
            .find_map(|item| match item {
                Value::Object(map) => Some(map),
                _ => None,
            })
            .unwrap_or_default(),
        _ => Map::new(),
    }
}

/// Remove every alias from `fields`, returning the first non-null value.
fn take_first(fields: &mut Map<String, Value>, keys: &[&str]) -> Option<Value> {
    let mut chosen = None;
    for key in keys {
        let Some(value) = fields.remove(*key) else {
            continue;
        };
        if chosen.is_none() && !value.is_null() {
            chosen = Some(value);
        }
    }
    chosen
}

fn non_blank_string(value: Value) -> Option<String> {
    match value {
        Value::String(text) if !text.trim().is_empty() => Some(text),
        _ => None,
    }
}

fn string_list(value: Option<Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items.into_iter().filter_map(scalar_text).collect(),
        Some(scalar) if is_truthy(&scalar) => scalar_text(scalar).into_iter().collect(),
        _ => Vec::new(),
    }
}

fn scalar_text(value: Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Null | Value::Array(_) | Value::Object(_) => false,
    }
}
