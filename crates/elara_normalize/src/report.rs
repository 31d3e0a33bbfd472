//! Forensic artifacts for responses that could not be normalized.
//!
//! When every parse attempt fails, [`FailureReporter`] writes a plain-text
//! artifact to the diagnostics directory so the failure can be inspected
//! after the fact. The artifact records:
//!
//! - the failure timestamp and parser error message
//! - the character offset the parser complained about, when one is known
//! - a context window around that offset, with line breaks escaped
//! - a character-code dump around that offset, which exposes smart quotes,
//!   zero-width characters and other look-alikes
//! - the raw response, truncated to a configured length
//!
//! Reporting never fails the caller: write errors are logged and swallowed.

use chrono::{DateTime, Utc};
use elara_error::{NormalizationError, StorageError, StorageErrorKind};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::LazyLock;
use tracing::{debug, error, instrument, warn};

/// Highest artifact sequence number tried within one millisecond.
const MAX_SEQUENCE: u32 = 100;

static POSITION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bposition\s+(\d+)").expect("Valid position regex"));

static LINE_COLUMN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bline\s+(\d+)\s+column\s+(\d+)").expect("Valid line/column regex")
});

/// Settings for failure artifacts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiagnosticsConfig {
    /// Write artifacts at all
    pub enabled: bool,
    /// Directory receiving artifacts
    pub dir: PathBuf,
    /// Characters of the raw response kept in an artifact
    pub max_raw_chars: usize,
    /// Characters shown on each side of the failure offset
    pub context_radius: usize,
    /// Characters dumped as code points on each side of the failure offset
    pub char_dump_radius: usize,
}

impl Default for DiagnosticsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            dir: PathBuf::from("data/diagnostics"),
            max_raw_chars: 20_000,
            context_radius: 60,
            char_dump_radius: 8,
        }
    }
}

/// Character offset a parser error message points at, if it names one.
///
/// Understands `position N` and `line L column C` messages. Line and column
/// are mapped onto `text`; the result is a character index clamped to the
/// text length.
///
/// # Examples
///
/// ```
/// use elara_normalize::parser_offset;
///
/// let text = "{\n  \"a\": x\n}";
/// assert_eq!(parser_offset("expected value at line 2 column 8", text), Some(9));
/// assert_eq!(parser_offset("Unexpected token at position 3", text), Some(3));
/// assert_eq!(parser_offset("EOF while parsing", text), None);
/// ```
pub fn parser_offset(message: &str, text: &str) -> Option<usize> {
    let char_len = text.chars().count();

    if let Some(captures) = LINE_COLUMN.captures(message) {
        let line: usize = captures[1].parse().ok()?;
        let column: usize = captures[2].parse().ok()?;
        return Some(line_column_offset(text, line, column));
    }

    let captures = POSITION.captures(message)?;
    let position: usize = captures[1].parse().ok()?;
    Some(position.min(char_len))
}

fn line_column_offset(text: &str, line: usize, column: usize) -> usize {
    let line_start: usize = text
        .split_inclusive('\n')
        .take(line.saturating_sub(1))
        .map(str::len)
        .sum();
    let mut byte = (line_start + column.saturating_sub(1)).min(text.len());
    while !text.is_char_boundary(byte) {
        byte -= 1;
    }
    text[..byte].chars().count()
}

fn display_char(c: char) -> String {
    match c {
        '\n' => "\\n".to_string(),
        '\r' => "\\r".to_string(),
        '\t' => "\\t".to_string(),
        c if c.is_control() => c.escape_unicode().to_string(),
        c => c.to_string(),
    }
}

/// Escaped window around `at` with a caret line underneath.
fn context_window(chars: &[char], at: usize, radius: usize) -> String {
    let at = at.min(chars.len());
    let start = at.saturating_sub(radius);
    let end = at.saturating_add(radius).min(chars.len());

    let before: String = chars[start..at].iter().copied().map(display_char).collect();
    let after: String = chars[at..end].iter().copied().map(display_char).collect();
    let caret = " ".repeat(before.chars().count());

    format!("{before}{after}\n{caret}^")
}

/// One line per character around `at`; the offending character is marked.
fn char_codes(chars: &[char], at: usize, radius: usize) -> String {
    let at = at.min(chars.len());
    let start = at.saturating_sub(radius);
    let end = at.saturating_add(radius + 1).min(chars.len());

    if start == end {
        return "(no characters)".to_string();
    }

    chars[start..end]
        .iter()
        .enumerate()
        .map(|(i, c)| {
            let marker = if start + i == at { ">" } else { " " };
            format!("{marker} {:>6}  U+{:04X}  {:?}", start + i, u32::from(*c), c)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Everything captured about one normalization failure.
#[derive(Debug, Clone, PartialEq, Eq, derive_getters::Getters)]
pub struct FailureRecord {
    /// When the failure happened
    timestamp: DateTime<Utc>,
    /// Parser or normalizer message
    error: String,
    /// Character offset within the attempted text
    offset: Option<usize>,
    /// Escaped context window with caret, when an offset is known
    context: Option<String>,
    /// Code point dump around the offset, when an offset is known
    char_codes: Option<String>,
    /// Length of the raw response in characters
    raw_chars: usize,
    /// Raw response, truncated to the configured length
    raw_excerpt: String,
}

impl FailureRecord {
    /// Capture a failure happening now.
    pub fn capture(raw: &str, error: &NormalizationError, config: &DiagnosticsConfig) -> Self {
        Self::capture_at(Utc::now(), raw, error, config)
    }

    /// Capture a failure with an explicit timestamp.
    ///
    /// Offsets refer to the text the last parse attempt saw, which is the
    /// repaired text rather than the raw response.
    pub fn capture_at(
        timestamp: DateTime<Utc>,
        raw: &str,
        error: &NormalizationError,
        config: &DiagnosticsConfig,
    ) -> Self {
        let attempted = error.attempted_text().unwrap_or(raw);
        let message = error.kind.to_string();
        let offset = parser_offset(&message, attempted);
        let chars: Vec<char> = attempted.chars().collect();

        Self {
            timestamp,
            error: message,
            offset,
            context: offset.map(|at| context_window(&chars, at, config.context_radius)),
            char_codes: offset.map(|at| char_codes(&chars, at, config.char_dump_radius)),
            raw_chars: raw.chars().count(),
            raw_excerpt: raw.chars().take(config.max_raw_chars).collect(),
        }
    }

    /// Artifact file name for the given collision sequence number.
    ///
    /// Names sort chronologically: `parse-failure-20250314T093000.123Z-00.txt`.
    pub fn file_name(&self, sequence: u32) -> String {
        format!(
            "parse-failure-{}-{:02}.txt",
            self.timestamp.format("%Y%m%dT%H%M%S%.3fZ"),
            sequence
        )
    }

    /// Render the artifact body.
    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str("=== response normalization failure ===\n");
        out.push_str(&format!("timestamp: {}\n", self.timestamp.to_rfc3339()));
        out.push_str(&format!("error: {}\n", self.error));
        match self.offset {
            Some(offset) => out.push_str(&format!("offset: {}\n", offset)),
            None => out.push_str("offset: unknown\n"),
        }

        if let Some(context) = &self.context {
            out.push_str("\n--- context ---\n");
            out.push_str(context);
            out.push('\n');
        }
        if let Some(codes) = &self.char_codes {
            out.push_str("\n--- characters ---\n");
            out.push_str(codes);
            out.push('\n');
        }

        let shown = self.raw_excerpt.chars().count();
        if shown < self.raw_chars {
            out.push_str(&format!(
                "\n--- raw response ({} chars, first {} shown) ---\n",
                self.raw_chars, shown
            ));
        } else {
            out.push_str(&format!("\n--- raw response ({} chars) ---\n", self.raw_chars));
        }
        out.push_str(&self.raw_excerpt);
        out.push('\n');
        out
    }
}

/// Writes failure artifacts to the diagnostics directory.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FailureReporter {
    config: DiagnosticsConfig,
}

impl FailureReporter {
    /// Create a reporter with the given settings.
    pub fn new(config: DiagnosticsConfig) -> Self {
        Self { config }
    }

    /// A reporter that only logs.
    pub fn disabled() -> Self {
        Self::new(DiagnosticsConfig {
            enabled: false,
            ..DiagnosticsConfig::default()
        })
    }

    /// Active settings.
    pub fn config(&self) -> &DiagnosticsConfig {
        &self.config
    }

    /// Record a failure, returning the artifact path if one was written.
    ///
    /// Never panics and never returns an error; write failures are logged.
    #[instrument(skip_all, fields(error = %error.kind, raw_len = raw.len()))]
    pub fn report(&self, raw: &str, error: &NormalizationError) -> Option<PathBuf> {
        if !self.config.enabled {
            debug!("Failure artifacts disabled");
            return None;
        }

        let record = FailureRecord::capture(raw, error, &self.config);
        match self.write(&record) {
            Ok(path) => {
                warn!(path = %path.display(), offset = ?record.offset, "Wrote normalization failure artifact");
                Some(path)
            }
            Err(e) => {
                error!(error = %e, "Failed to write normalization failure artifact");
                None
            }
        }
    }

    /// Write a record under a fresh name, never overwriting an artifact.
    pub fn write(&self, record: &FailureRecord) -> Result<PathBuf, StorageError> {
        let dir = &self.config.dir;
        std::fs::create_dir_all(dir).map_err(|e| {
            StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                "{}: {}",
                dir.display(),
                e
            )))
        })?;

        let body = record.render();
        for sequence in 0..MAX_SEQUENCE {
            let path = dir.join(record.file_name(sequence));
            match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(mut file) => {
                    file.write_all(body.as_bytes()).map_err(|e| {
                        StorageError::new(StorageErrorKind::FileWrite(format!(
                            "{}: {}",
                            path.display(),
                            e
                        )))
                    })?;
                    return Ok(path);
                }
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => continue,
                Err(e) => {
                    return Err(StorageError::new(StorageErrorKind::FileWrite(format!(
                        "{}: {}",
                        path.display(),
                        e
                    ))));
                }
            }
        }

        Err(StorageError::new(StorageErrorKind::NameExhausted(format!(
            "{} in {}",
            record.file_name(MAX_SEQUENCE),
            dir.display()
        ))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use elara_error::NormalizationErrorKind;

    fn unparseable(message: &str, attempted: &str) -> NormalizationError {
        NormalizationError::new(NormalizationErrorKind::Unparseable {
            message: message.to_string(),
            attempted: attempted.to_string(),
        })
    }

    #[test]
    fn test_line_column_maps_to_char_offset() {
        let text = "{\"a\": 1,\n\"b\": x}";
        assert_eq!(parser_offset("expected value at line 2 column 6", text), Some(14));
    }

    #[test]
    fn test_offset_counts_chars_not_bytes() {
        let text = "{\"é\": x}";
        // 'x' is byte 7 but char 6
        assert_eq!(parser_offset("expected value at line 1 column 8", text), Some(6));
    }

    #[test]
    fn test_position_is_clamped() {
        assert_eq!(parser_offset("at position 999", "abc"), Some(3));
    }

    #[test]
    fn test_context_window_escapes_newlines() {
        let chars: Vec<char> = "ab\ncd".chars().collect();
        assert_eq!(context_window(&chars, 3, 10), "ab\\ncd\n    ^");
    }

    #[test]
    fn test_char_codes_mark_offset() {
        let chars: Vec<char> = "a\u{201c}b".chars().collect();
        let dump = char_codes(&chars, 1, 1);
        assert!(dump.contains("> "));
        assert!(dump.contains("U+201C"));
        assert_eq!(dump.lines().count(), 3);
    }

    #[test]
    fn test_record_render_contains_sections() {
        let timestamp = Utc.with_ymd_and_hms(2025, 3, 14, 9, 30, 0).unwrap();
        let error = unparseable("expected `:` at line 1 column 6", "{\"a\" 1}");
        let record = FailureRecord::capture_at(
            timestamp,
            "raw text {\"a\" 1}",
            &error,
            &DiagnosticsConfig::default(),
        );

        assert_eq!(record.offset(), &Some(5));
        assert_eq!(record.file_name(0), "parse-failure-20250314T093000.000Z-00.txt");

        let body = record.render();
        assert!(body.contains("expected `:` at line 1 column 6"));
        assert!(body.contains("--- context ---"));
        assert!(body.contains("--- characters ---"));
        assert!(body.contains("raw text {\"a\" 1}"));
    }

    #[test]
    fn test_raw_excerpt_is_truncated() {
        let config = DiagnosticsConfig {
            max_raw_chars: 4,
            ..DiagnosticsConfig::default()
        };
        let error = NormalizationError::new(NormalizationErrorKind::NotComposite("string".into()));
        let record = FailureRecord::capture("abcdefgh", &error, &config);
        assert_eq!(record.raw_excerpt(), "abcd");
        assert_eq!(record.offset(), &None);
        assert!(record.render().contains("8 chars, first 4 shown"));
    }

    #[test]
    fn test_disabled_reporter_writes_nothing() {
        let error = NormalizationError::new(NormalizationErrorKind::EmptyResponse);
        assert_eq!(FailureReporter::disabled().report("", &error), None);
    }
}
