//! Layered configuration for the Elara pipeline.
//!
//! Configuration is loaded with the following precedence (highest first):
//! 1. Environment variables prefixed `ELARA_` (`ELARA_RETRY__MAX_ATTEMPTS=5`)
//! 2. `./elara.toml` in the current directory
//! 3. `~/.config/elara/elara.toml`
//! 4. Bundled defaults (include_str! from elara.toml)

use crate::LoggingConfig;
use config::builder::{ConfigBuilder, DefaultState};
use config::{Config, Environment, File, FileFormat};
use elara_error::{ConfigError, ElaraError, ElaraResult};
use elara_interface::TextModel;
use elara_models::OpenRouterConfig;
use elara_normalize::{
    DiagnosticsConfig, FailureReporter, GenerationPipeline, NormalizerConfig, ResponseNormalizer,
};
use elara_retry::{RetryConfig, RetryOrchestrator};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Bundled default configuration.
const DEFAULT_CONFIG: &str = include_str!("../../../elara.toml");

/// Complete Elara configuration.
///
/// Every section and field is optional in TOML; anything left out takes its
/// default.
///
/// # Example
///
/// ```toml
/// [retry]
/// max_attempts = 5
///
/// [diagnostics]
/// dir = "/var/log/elara"
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ElaraConfig {
    /// Retry budget for model calls
    pub retry: RetryConfig,
    /// Parse ladder settings
    pub normalize: NormalizerConfig,
    /// Failure artifact settings
    pub diagnostics: DiagnosticsConfig,
    /// OpenRouter client settings
    pub model: OpenRouterConfig,
    /// Log output settings
    pub logging: LoggingConfig,
}

impl ElaraConfig {
    /// Load configuration from every layer.
    ///
    /// # Errors
    ///
    /// Returns an error if a present file or variable cannot be parsed.
    pub fn load() -> ElaraResult<Self> {
        debug!("Loading configuration with precedence: env > current dir > home dir > bundled defaults");

        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/elara/elara.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder
            .add_source(File::with_name("elara").required(false))
            .add_source(
                Environment::with_prefix("ELARA")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );

        finish(builder)
    }

    /// Load configuration from one explicit file over the bundled defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing or invalid.
    pub fn from_file(path: impl AsRef<std::path::Path>) -> ElaraResult<Self> {
        debug!(path = %path.as_ref().display(), "Loading configuration from file");

        let builder = Config::builder()
            .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
            .add_source(File::from(path.as_ref()));
        finish(builder)
    }

    /// Parse configuration from TOML text over the bundled defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid configuration.
    pub fn from_toml_str(text: &str) -> ElaraResult<Self> {
        let builder = Config::builder()
            .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
            .add_source(File::from_str(text, FileFormat::Toml));
        finish(builder)
    }

    /// Retry orchestrator for model calls.
    pub fn retry_orchestrator(&self) -> RetryOrchestrator {
        RetryOrchestrator::from_config(&self.retry)
    }

    /// Normalizer wired to a reporter writing into the diagnostics directory.
    pub fn normalizer(&self) -> ResponseNormalizer {
        ResponseNormalizer::new(
            self.normalize.clone(),
            FailureReporter::new(self.diagnostics.clone()),
        )
    }

    /// Generation pipeline around `model`.
    pub fn pipeline<M: TextModel>(&self, model: M) -> GenerationPipeline<M> {
        GenerationPipeline::new(model, self.retry_orchestrator(), self.normalizer())
    }
}

fn finish(builder: ConfigBuilder<DefaultState>) -> ElaraResult<ElaraConfig> {
    builder
        .build()
        .map_err(|e| {
            ElaraError::from(ConfigError::new(format!(
                "Failed to build configuration: {}",
                e
            )))
        })?
        .try_deserialize()
        .map_err(|e| {
            ElaraError::from(ConfigError::new(format!(
                "Failed to parse configuration: {}",
                e
            )))
        })
}
