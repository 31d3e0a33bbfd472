//! Character-level helpers shared by the string-aware stages.

/// Index of the first non-whitespace character at or after `from`.
pub(crate) fn next_significant(chars: &[char], from: usize) -> Option<usize> {
    chars
        .iter()
        .enumerate()
        .skip(from)
        .find(|(_, c)| !c.is_whitespace())
        .map(|(index, _)| index)
}

/// Whether a JSON literal (`true`, `false`, `null`) starts at `at`.
pub(crate) fn literal_at(chars: &[char], at: usize) -> bool {
    ["true", "false", "null"].iter().any(|literal| {
        let len = literal.chars().count();
        chars.len() >= at + len
            && chars[at..at + len].iter().copied().eq(literal.chars())
            && chars
                .get(at + len)
                .is_none_or(|c| !c.is_alphanumeric() && *c != '_')
    })
}

/// Tracks whether a scan position is inside a JSON string literal.
#[derive(Debug, Default)]
pub(crate) struct StringState {
    in_string: bool,
    escaped: bool,
}

impl StringState {
    pub(crate) fn in_string(&self) -> bool {
        self.in_string
    }

    /// Whether the previous character inside the string was a backslash.
    pub(crate) fn escaped(&self) -> bool {
        self.escaped
    }

    pub(crate) fn open(&mut self) {
        self.in_string = true;
        self.escaped = false;
    }

    pub(crate) fn close(&mut self) {
        self.in_string = false;
        self.escaped = false;
    }

    /// Feed one character that lies inside a string.
    ///
    /// Returns `true` when the character is an unescaped quotation mark.
    pub(crate) fn feed(&mut self, c: char) -> bool {
        if self.escaped {
            self.escaped = false;
            return false;
        }
        match c {
            '\\' => {
                self.escaped = true;
                false
            }
            '"' => true,
            _ => false,
        }
    }
}
