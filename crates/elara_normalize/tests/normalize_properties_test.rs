use elara_core::NormalizedResult;
use elara_normalize::repair::{
    escape_inner_quotes, escape_string_whitespace, extract_payload_span, quote_bare_keys,
    remove_trailing_commas, scrub_invisible, strip_code_fences,
};
use elara_normalize::{
    FailureReporter, NormalizerConfig, RepairPipeline, RepairStage, ResponseNormalizer,
};
use serde_json::{Value, json};

fn normalizer() -> ResponseNormalizer {
    ResponseNormalizer::new(NormalizerConfig::default(), FailureReporter::disabled())
}

fn expected() -> NormalizedResult {
    NormalizedResult::new(
        "A restless entry about the sea.",
        vec!["Shorten the second paragraph".to_string()],
        vec!["sea".to_string(), "insomnia".to_string()],
        Some("Write about the morning after".to_string()),
    )
}

fn parses(text: &str) -> bool {
    serde_json::from_str::<Value>(text).is_ok()
}

#[test]
fn well_formed_json_round_trips() {
    let raw = json!({
        "summary": "A restless entry about the sea.",
        "suggestions": ["Shorten the second paragraph"],
        "tags_for_search": ["sea", "insomnia"],
        "next_context_suggestion": "Write about the morning after",
    })
    .to_string();

    assert_eq!(normalizer().normalize(&raw), expected());
}

#[test]
fn fenced_json_normalizes_like_unfenced() {
    let body = r#"{"summary": "A restless entry about the sea.", "suggestions": ["Shorten the second paragraph"], "tags_for_search": ["sea", "insomnia"], "next_context_suggestion": "Write about the morning after"}"#;
    let fenced = format!("```json\n{body}\n```");

    assert_eq!(normalizer().normalize(&fenced), normalizer().normalize(body));
    assert_eq!(normalizer().normalize(&fenced), expected());
}

#[test]
fn fencing_preserves_bracket_commas_inside_strings() {
    let body = r#"{"summary": "Lists like [a, b, ] read as unfinished", "suggestions": ["Close the set {x, }"]}"#;
    let fenced = format!("```json\n{body}\n```");

    let plain = normalizer().normalize(body);
    assert_eq!(normalizer().normalize(&fenced), plain);
    assert_eq!(plain.summary(), "Lists like [a, b, ] read as unfinished");
    assert_eq!(plain.suggestions(), &vec!["Close the set {x, }".to_string()]);
}

#[test]
fn trailing_commas_are_tolerated() {
    let raw = r#"{"summary": "A restless entry about the sea.", "suggestions": ["Shorten the second paragraph",], "tags_for_search": ["sea", "insomnia",], "next_context_suggestion": "Write about the morning after",}"#;
    assert_eq!(normalizer().normalize(raw), expected());
}

#[test]
fn inner_quotes_keep_their_characters() {
    let raw = r#"{"summary": "He said "hi" to me", "suggestions": [], "tags_for_search": []}"#;
    let result = normalizer().normalize(raw);
    assert_eq!(result.summary(), r#"He said "hi" to me"#);
    assert!(!result.is_fallback());
}

#[test]
fn surrounding_prose_is_ignored() {
    let raw = "Sure! Here is my analysis:\n{\"summary\": \"A restless entry about the sea.\", \"suggestions\": [\"Shorten the second paragraph\"], \"tags_for_search\": [\"sea\", \"insomnia\"], \"next_context_suggestion\": \"Write about the morning after\"}\nLet me know if you need more.";
    assert_eq!(normalizer().normalize(raw), expected());
}

#[test]
fn scalar_list_fields_are_wrapped() {
    let raw = r#"{"summary": "x", "suggestions": "only one", "tags_for_search": "solitary"}"#;
    let result = normalizer().normalize(raw);
    assert_eq!(result.suggestions(), &vec!["only one".to_string()]);
    assert_eq!(result.tags_for_search(), &vec!["solitary".to_string()]);
}

#[test]
fn literal_newlines_in_strings_are_repaired() {
    let raw = "{\"summary\": \"first line\nsecond line\", \"suggestions\": []}";
    assert_eq!(normalizer().normalize(raw).summary(), "first line\nsecond line");
}

#[test]
fn smart_quotes_and_zero_width_characters_survive() {
    let raw = "\u{feff}{\"summary\": \"“Quoted” words\u{200b}\", \"tags_for_search\": [\"тишина\"]}";
    let result = normalizer().normalize(raw);
    assert_eq!(result.summary(), "“Quoted” words");
    assert_eq!(result.tags_for_search(), &vec!["тишина".to_string()]);
}

#[test]
fn top_level_array_uses_first_object() {
    let raw = r#"[{"summary": "first"}, {"summary": "second"}]"#;
    assert_eq!(normalizer().normalize(raw).summary(), "first");
}

#[test]
fn hopeless_text_yields_fallback_and_strict_error() {
    let raw = "I'm sorry, I can't help with that.";
    let result = normalizer().normalize(raw);
    assert!(result.is_fallback());
    assert!(result.suggestions().is_empty());
    assert!(normalizer().normalize_strict(raw).is_err());
}

#[test]
fn each_stage_fixes_its_own_defect() {
    let cases: [(fn(&str) -> String, &str); 7] = [
        (scrub_invisible, "\u{feff}{\"a\": 1\u{200b}}"),
        (strip_code_fences, "```json\n{\"a\": 1}\n```"),
        (extract_payload_span, "Result follows {\"a\": 1} hope that helps"),
        (remove_trailing_commas, "{\"a\": [1, 2,],}"),
        (quote_bare_keys, "{a: 1, b: [true]}"),
        (escape_inner_quotes, "{\"a\": \"say \"yes\" now\"}"),
        (escape_string_whitespace, "{\"a\": \"one\ntwo\"}"),
    ];

    for (stage, defective) in cases {
        assert!(!parses(defective), "case should start broken: {defective:?}");
        let repaired = stage(defective);
        assert!(parses(&repaired), "stage did not repair {defective:?}: {repaired:?}");
    }
}

#[test]
fn every_stage_is_idempotent() {
    let samples = [
        "\u{feff}```json\n{a: \"x \"y\" z\",\n \"b\": \"l1\nl2\", \"c\": [1,],}\n```\ntrailing",
        "{\"already\": \"clean\"}",
        "prose only",
        "",
    ];
    let stages = [
        RepairStage::ScrubInvisible,
        RepairStage::StripCodeFences,
        RepairStage::ExtractPayloadSpan,
        RepairStage::RemoveTrailingCommas,
        RepairStage::QuoteBareKeys,
        RepairStage::EscapeInnerQuotes,
        RepairStage::EscapeStringWhitespace,
    ];

    for stage in stages {
        for sample in samples {
            let once = stage.apply(sample);
            assert_eq!(stage.apply(&once), once, "{stage} not idempotent on {sample:?}");
        }
    }

    for sample in samples {
        let once = RepairPipeline::aggressive().apply(sample);
        assert_eq!(RepairPipeline::aggressive().apply(&once), once);
    }
}

#[test]
fn normalization_is_idempotent_on_its_own_output() {
    let raw = "```json\n{\"summary\": \"He said \"hi\"\", \"tags_for_search\": \"one\",}\n```";
    let first = normalizer().normalize(raw);
    let reencoded = serde_json::to_string(&first).unwrap();
    assert_eq!(normalizer().normalize(&reencoded), first);
}
