//! Normalize command handler.

use super::io::{emit, read_input, to_pretty_json};
use elara::{ElaraConfig, ElaraResult};
use std::path::Path;
use tracing::{info, instrument};

/// Normalize a saved response and print the result.
#[instrument(skip(config))]
pub fn run_normalize(config: &ElaraConfig, input: &Path, strict: bool) -> ElaraResult<()> {
    let raw = read_input(input)?;
    let normalizer = config.normalizer();

    let result = if strict {
        normalizer.normalize_strict(&raw)?
    } else {
        normalizer.normalize(&raw)
    };

    info!(fallback = result.is_fallback(), "Normalized response");
    emit(&to_pretty_json(&result)?, None)
}
