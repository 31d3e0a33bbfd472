//! Analyze and prose command handlers.

use super::io::{emit, read_input, to_pretty_json};
use elara::{ElaraConfig, ElaraResult, GenerateRequest, OpenRouterClient};
use std::path::Path;
use tracing::instrument;

/// Run the analysis step against the configured model.
#[instrument(skip(config))]
pub async fn run_analyze(
    config: &ElaraConfig,
    prompt: &Path,
    output: Option<&Path>,
    strict: bool,
) -> ElaraResult<()> {
    let request = GenerateRequest::from_prompt(read_input(prompt)?);
    let pipeline = config.pipeline(OpenRouterClient::from_env(config.model.clone())?);

    let record = if strict {
        pipeline.analyze_strict(&request).await?
    } else {
        pipeline.analyze(&request).await?
    };

    emit(&to_pretty_json(&record)?, output)
}

/// Run the prose step against the configured model.
#[instrument(skip(config))]
pub async fn run_prose(
    config: &ElaraConfig,
    prompt: &Path,
    label: &str,
    output: Option<&Path>,
) -> ElaraResult<()> {
    let request = GenerateRequest::from_prompt(read_input(prompt)?);
    let pipeline = config.pipeline(OpenRouterClient::from_env(config.model.clone())?);

    let text = pipeline.generate_prose(&request, label).await?;
    emit(&text, output)
}
