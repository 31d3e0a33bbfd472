use super::scan::{StringState, next_significant};

/// Wrap bare identifier keys in quotation marks.
///
/// An identifier counts as a key when it follows `{` or `,` (ignoring
/// whitespace) and is itself followed by `:`. Array elements such as
/// `true` or `null` are untouched.
pub fn quote_bare_keys(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len() + 16);
    let mut state = StringState::default();
    let mut expecting_key = false;
    let mut index = 0;

    while index < chars.len() {
        let c = chars[index];

        if state.in_string() {
            if state.feed(c) {
                state.close();
            }
            out.push(c);
            index += 1;
            continue;
        }

        match c {
            '"' => {
                state.open();
                expecting_key = false;
                out.push(c);
            }
            '{' | ',' => {
                expecting_key = true;
                out.push(c);
            }
            c if expecting_key && (c.is_alphabetic() || c == '_' || c == '$') => {
                let end = chars[index..]
                    .iter()
                    .position(|c| !(c.is_alphanumeric() || matches!(c, '_' | '-' | '$')))
                    .map_or(chars.len(), |offset| index + offset);
                let is_key = next_significant(&chars, end).is_some_and(|at| chars[at] == ':');
                if is_key {
                    out.push('"');
                }
                out.extend(&chars[index..end]);
                if is_key {
                    out.push('"');
                }
                expecting_key = false;
                index = end;
                continue;
            }
            c if c.is_whitespace() => out.push(c),
            _ => {
                expecting_key = false;
                out.push(c);
            }
        }
        index += 1;
    }

    out
}
