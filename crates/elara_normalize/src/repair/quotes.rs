use super::scan::{StringState, literal_at, next_significant};

/// Escape quotation marks inside string values that cannot end the string.
///
/// A `"` met inside a string is treated as the terminator only when the next
/// significant character is structural: `:`, `}`, `]`, end of input, or a
/// `,` that is itself followed by the start of another JSON value. Every
/// other inner quote is escaped, so `"He said "hi" to me"` becomes
/// `"He said \"hi\" to me"`.
pub fn escape_inner_quotes(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len() + 8);
    let mut state = StringState::default();

    for (index, &c) in chars.iter().enumerate() {
        if !state.in_string() {
            if c == '"' {
                state.open();
            }
            out.push(c);
            continue;
        }

        if !state.feed(c) {
            out.push(c);
        } else if terminates_string(&chars, index + 1) {
            state.close();
            out.push(c);
        } else {
            out.push_str("\\\"");
        }
    }

    out
}

fn terminates_string(chars: &[char], after: usize) -> bool {
    let Some(next) = next_significant(chars, after) else {
        return true;
    };
    match chars[next] {
        ':' | '}' | ']' => true,
        ',' => match next_significant(chars, next + 1) {
            None => true,
            Some(value) => {
                matches!(chars[value], '"' | '{' | '[' | '}' | ']' | '-' | '0'..='9')
                    || literal_at(chars, value)
            }
        },
        _ => false,
    }
}
