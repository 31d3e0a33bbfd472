/// Remove invisible characters that break JSON parsing.
///
/// Drops byte-order marks, zero-width spaces and joiners, directional marks,
/// word joiners and any control character other than `\n`, `\r` and `\t`.
pub fn scrub_invisible(text: &str) -> String {
    text.chars().filter(|c| !is_invisible(*c)).collect()
}

fn is_invisible(c: char) -> bool {
    matches!(c, '\u{feff}' | '\u{200b}'..='\u{200f}' | '\u{2060}')
        || (c.is_control() && !matches!(c, '\n' | '\r' | '\t'))
}
