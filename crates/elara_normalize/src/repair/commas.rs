use super::scan::StringState;

/// Remove commas that directly precede `}` or `]`, ignoring whitespace.
///
/// A run of commas and whitespace that closes a container collapses onto the
/// closing bracket. Text inside string values is copied unchanged.
pub fn remove_trailing_commas(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut state = StringState::default();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        if state.in_string() {
            if state.feed(c) {
                state.close();
            }
            out.push(c);
            i += 1;
            continue;
        }

        match c {
            '"' => {
                state.open();
                out.push(c);
            }
            ',' => {
                let run_end = chars[i..]
                    .iter()
                    .position(|c| *c != ',' && !c.is_whitespace())
                    .map(|offset| i + offset);
                match run_end {
                    Some(close) if matches!(chars[close], '}' | ']') => {
                        i = close;
                        continue;
                    }
                    _ => out.push(c),
                }
            }
            _ => out.push(c),
        }
        i += 1;
    }

    out
}
