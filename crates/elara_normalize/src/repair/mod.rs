//! Text repair stages for malformed JSON.
//!
//! Every stage is a pure `&str -> String` transformation that is idempotent
//! on its own: running it twice gives the same text as running it once. Each
//! stage targets exactly one defect class, so a response with a single
//! defect is fixed by that stage alone.

mod boundary;
mod commas;
mod fences;
mod keys;
mod quotes;
mod scan;
mod scrub;
mod whitespace;

pub use boundary::extract_payload_span;
pub use commas::remove_trailing_commas;
pub use fences::strip_code_fences;
pub use keys::quote_bare_keys;
pub use quotes::escape_inner_quotes;
pub use scrub::scrub_invisible;
pub use whitespace::escape_string_whitespace;

use tracing::trace;

/// A single repair step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum RepairStage {
    /// Remove zero-width characters, byte-order marks and control characters.
    #[display("scrub_invisible")]
    ScrubInvisible,
    /// Strip markdown code fences wrapping the payload.
    #[display("strip_code_fences")]
    StripCodeFences,
    /// Cut leading and trailing prose around the outermost object.
    #[display("extract_payload_span")]
    ExtractPayloadSpan,
    /// Drop commas directly before a closing brace or bracket.
    #[display("remove_trailing_commas")]
    RemoveTrailingCommas,
    /// Quote bare identifier keys.
    #[display("quote_bare_keys")]
    QuoteBareKeys,
    /// Escape quotation marks that cannot be string terminators.
    #[display("escape_inner_quotes")]
    EscapeInnerQuotes,
    /// Escape raw line breaks and tabs inside string values.
    #[display("escape_string_whitespace")]
    EscapeStringWhitespace,
}

impl RepairStage {
    /// Apply this stage to `text`.
    pub fn apply(self, text: &str) -> String {
        match self {
            Self::ScrubInvisible => scrub_invisible(text),
            Self::StripCodeFences => strip_code_fences(text),
            Self::ExtractPayloadSpan => extract_payload_span(text),
            Self::RemoveTrailingCommas => remove_trailing_commas(text),
            Self::QuoteBareKeys => quote_bare_keys(text),
            Self::EscapeInnerQuotes => escape_inner_quotes(text),
            Self::EscapeStringWhitespace => escape_string_whitespace(text),
        }
    }
}

/// An ordered sequence of repair stages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepairPipeline {
    stages: Vec<RepairStage>,
}

impl RepairPipeline {
    /// Build a pipeline from explicit stages.
    pub fn new(stages: Vec<RepairStage>) -> Self {
        Self { stages }
    }

    /// The conservative pipeline used by the second parse attempt.
    ///
    /// Scrubbing runs again after fence stripping because models sometimes
    /// put invisible characters just inside the fence.
    pub fn standard() -> Self {
        Self::new(vec![
            RepairStage::ScrubInvisible,
            RepairStage::StripCodeFences,
            RepairStage::ScrubInvisible,
            RepairStage::ExtractPayloadSpan,
            RepairStage::RemoveTrailingCommas,
            RepairStage::EscapeInnerQuotes,
            RepairStage::EscapeStringWhitespace,
        ])
    }

    /// The standard pipeline plus bare-key quoting.
    pub fn aggressive() -> Self {
        Self::new(vec![
            RepairStage::ScrubInvisible,
            RepairStage::StripCodeFences,
            RepairStage::ScrubInvisible,
            RepairStage::ExtractPayloadSpan,
            RepairStage::RemoveTrailingCommas,
            RepairStage::QuoteBareKeys,
            RepairStage::EscapeInnerQuotes,
            RepairStage::EscapeStringWhitespace,
        ])
    }

    /// Stages in application order.
    pub fn stages(&self) -> &[RepairStage] {
        &self.stages
    }

    /// Run every stage in order.
    pub fn apply(&self, text: &str) -> String {
        self.stages.iter().fold(text.to_string(), |current, stage| {
            let repaired = stage.apply(&current);
            if repaired != current {
                trace!(
                    stage = %stage,
                    before_len = current.len(),
                    after_len = repaired.len(),
                    "Repair stage changed text"
                );
            }
            repaired
        })
    }
}

impl Default for RepairPipeline {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parses(text: &str) -> bool {
        serde_json::from_str::<serde_json::Value>(text).is_ok()
    }

    #[test]
    fn test_standard_pipeline_repairs_combined_defects() {
        let raw = "\u{feff}Sure! Here you go:\n```json\n{\n  \"summary\": \"He said \"hi\" to me\nand left\",\n  \"tags_for_search\": [\"a\", \"b\",],\n}\n```\nHope this helps.";
        let repaired = RepairPipeline::standard().apply(raw);
        assert!(parses(&repaired), "not repaired: {repaired}");
    }

    #[test]
    fn test_pipeline_is_idempotent() {
        let inputs = [
            "```json\n{\"a\": \"x \"y\" z\",}\n```",
            "noise {\"a\": [1, 2,],} trailing",
            "{\"a\": \"line one\nline two\"}",
            "{summary: \"bare\", tags_for_search: [\"t\"]}",
            "plain prose without any braces",
            "",
        ];
        for pipeline in [RepairPipeline::standard(), RepairPipeline::aggressive()] {
            for input in inputs {
                let once = pipeline.apply(input);
                let twice = pipeline.apply(&once);
                assert_eq!(once, twice, "not idempotent for {input:?}");
            }
        }
    }

    #[test]
    fn test_standard_pipeline_leaves_bare_keys_alone() {
        let repaired = RepairPipeline::standard().apply("{summary: \"x\"}");
        assert!(!parses(&repaired));
        let repaired = RepairPipeline::aggressive().apply("{summary: \"x\"}");
        assert!(parses(&repaired));
    }

    #[test]
    fn test_stage_display_names() {
        assert_eq!(RepairStage::StripCodeFences.to_string(), "strip_code_fences");
        assert_eq!(
            RepairPipeline::aggressive().stages().len(),
            RepairPipeline::standard().stages().len() + 1
        );
    }
}
