const FENCE: &str = "```";

/// Strip markdown code fences wrapping the whole payload.
///
/// Handles an optional language tag on the opening fence (` ```json `),
/// fences on the same line as the payload, and nested fence pairs. Text
/// that is not fenced is only trimmed.
pub fn strip_code_fences(text: &str) -> String {
    let mut current = text.trim();
    loop {
        let stripped = strip_once(current);
        if stripped == current {
            return stripped.to_string();
        }
        current = stripped;
    }
}

fn strip_once(text: &str) -> &str {
    let mut body = text;
    if let Some(rest) = body.strip_prefix(FENCE) {
        let tag_len = rest
            .find(|c: char| !(c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '+')))
            .unwrap_or(rest.len());
        body = &rest[tag_len..];
    }
    if let Some(rest) = body.trim_end().strip_suffix(FENCE) {
        body = rest;
    }
    body.trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_json_fence() {
        let raw = "```json\n{\"a\": 1}\n```";
        assert_eq!(strip_code_fences(raw), "{\"a\": 1}");
    }

    #[test]
    fn test_strip_untagged_fence_with_padding() {
        let raw = "  \n```\n{\"a\": 1}\n```  \n";
        assert_eq!(strip_code_fences(raw), "{\"a\": 1}");
    }

    #[test]
    fn test_strip_inline_fence() {
        assert_eq!(strip_code_fences("```{\"a\": 1}```"), "{\"a\": 1}");
    }

    #[test]
    fn test_strip_nested_fences() {
        let raw = "```json\n```json\n{\"a\": 1}\n```\n```";
        assert_eq!(strip_code_fences(raw), "{\"a\": 1}");
    }

    #[test]
    fn test_unfenced_text_is_trimmed_only() {
        assert_eq!(strip_code_fences("  {\"a\": 1} \n"), "{\"a\": 1}");
        assert_eq!(strip_code_fences("Prose ```json {} ```"), "Prose ```json {}");
    }
}
