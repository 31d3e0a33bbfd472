use super::scan::StringState;

/// Escape raw line breaks and tabs that appear inside string values.
///
/// Whitespace between tokens is left alone. A backslash immediately followed
/// by a raw line break becomes a `\n` escape.
pub fn escape_string_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 8);
    let mut state = StringState::default();

    for c in text.chars() {
        if !state.in_string() {
            if c == '"' {
                state.open();
            }
            out.push(c);
            continue;
        }

        if state.escaped() {
            state.feed(c);
            match c {
                '\n' => out.push('n'),
                '\r' => out.push('r'),
                '\t' => out.push('t'),
                _ => out.push(c),
            }
            continue;
        }

        match c {
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => {
                if state.feed(c) {
                    state.close();
                }
                out.push(c);
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escapes_newlines_inside_strings() {
        let raw = "{\"a\": \"line one\nline two\r\n\tend\"}";
        let repaired = escape_string_whitespace(raw);
        assert_eq!(repaired, "{\"a\": \"line one\\nline two\\r\\n\\tend\"}");
        assert!(serde_json::from_str::<serde_json::Value>(&repaired).is_ok());
    }

    #[test]
    fn test_leaves_structural_whitespace() {
        let raw = "{\n\t\"a\": \"b\",\n\t\"c\": 1\n}";
        assert_eq!(escape_string_whitespace(raw), raw);
    }

    #[test]
    fn test_backslash_line_break_becomes_escape() {
        let raw = "{\"a\": \"x\\\ny\"}";
        assert_eq!(escape_string_whitespace(raw), "{\"a\": \"x\\ny\"}");
    }
}
