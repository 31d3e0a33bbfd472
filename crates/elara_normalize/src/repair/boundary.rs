/// Cut the text down to the outermost JSON payload.
///
/// Keeps everything from the first `{` through the last `}`. When the text
/// opens with an array instead (the first `[` comes before the first `{` and
/// the last `]` comes after the last `}`), the bracket span is kept. Text
/// with no such span is returned unchanged.
pub fn extract_payload_span(text: &str) -> String {
    let object = span(text, '{', '}');
    let array = span(text, '[', ']');

    let chosen = match (object, array) {
        (Some(object), Some(array)) if array.0 < object.0 && array.1 > object.1 => Some(array),
        (Some(object), _) => Some(object),
        (None, array) => array,
    };

    match chosen {
        Some((start, end)) => text[start..=end].to_string(),
        None => text.to_string(),
    }
}

fn span(text: &str, open: char, close: char) -> Option<(usize, usize)> {
    let start = text.find(open)?;
    let end = text.rfind(close)?;
    (end > start).then_some((start, end))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_object_from_prose() {
        let raw = "Here is the JSON: {\"a\": {\"b\": 1}} Let me know!";
        assert_eq!(extract_payload_span(raw), "{\"a\": {\"b\": 1}}");
    }

    #[test]
    fn test_extracts_array_when_it_encloses_objects() {
        let raw = "Result: [{\"a\": 1}, {\"a\": 2}] done";
        assert_eq!(extract_payload_span(raw), "[{\"a\": 1}, {\"a\": 2}]");
    }

    #[test]
    fn test_prefers_object_over_bracketed_prose() {
        let raw = "[note] {\"tags\": [\"x\"]}";
        assert_eq!(extract_payload_span(raw), "{\"tags\": [\"x\"]}");
    }

    #[test]
    fn test_no_span_returns_input() {
        assert_eq!(extract_payload_span("no json here"), "no json here");
        assert_eq!(extract_payload_span("} backwards {"), "} backwards {");
    }
}
