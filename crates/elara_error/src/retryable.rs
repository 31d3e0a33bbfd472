//! Transient-failure classification.

use regex::Regex;
use std::sync::LazyLock;

static TRANSIENT_MARKERS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b50[234]\b|bad gateway|service unavailable|gateway time-?out|timeout|timed out|connection reset|econnreset|enotfound|dns error|failed to lookup address|name resolution",
    )
    .expect("Valid transient marker regex")
});

/// Returns true if an error message carries a known transient marker.
///
/// Markers cover gateway and service-unavailable statuses (502, 503, 504),
/// timeouts, connection resets and name-resolution failures. Status codes
/// only match as whole tokens.
///
/// # Examples
///
/// ```
/// use elara_error::is_transient_message;
///
/// assert!(is_transient_message("HTTP 503 error: Service Unavailable"));
/// assert!(is_transient_message("error sending request: operation timed out"));
/// assert!(!is_transient_message("HTTP 401 error: invalid api key"));
/// assert!(!is_transient_message("request id 15030 rejected"));
/// ```
pub fn is_transient_message(message: &str) -> bool {
    TRANSIENT_MARKERS.is_match(message)
}

/// Trait for errors that support retry logic.
///
/// Transient errors like 503 (service unavailable), 502/504 (gateway),
/// timeouts or connection resets should return true. Permanent errors like
/// 401 (unauthorized) or 400 (bad request) should return false.
///
/// The default implementation inspects the rendered error message.
pub trait RetryableError: std::fmt::Display {
    /// Returns true if this error should trigger a retry.
    fn is_retryable(&self) -> bool {
        is_transient_message(&self.to_string())
    }
}
