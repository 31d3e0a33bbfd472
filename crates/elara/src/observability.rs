//! Log output setup.

use elara_error::{ConfigError, ElaraResult};
use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

/// Settings for log output.
///
/// ```toml
/// [logging]
/// level = "info"
/// json = false
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is unset (e.g., "info", "elara_normalize=debug")
    pub level: String,
    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl LoggingConfig {
    /// Filter for this configuration.
    ///
    /// `verbose` forces `debug`; otherwise `RUST_LOG` wins over the
    /// configured level.
    pub fn filter(&self, verbose: bool) -> ElaraResult<EnvFilter> {
        if verbose {
            return Ok(EnvFilter::new("debug"));
        }
        match EnvFilter::try_from_default_env() {
            Ok(filter) => Ok(filter),
            Err(_) => EnvFilter::try_new(&self.level).map_err(|e| {
                ConfigError::new(format!("Invalid log level '{}': {}", self.level, e)).into()
            }),
        }
    }
}

/// Install the global subscriber, writing to stderr.
///
/// # Errors
///
/// Returns an error if the level is not a valid filter or a subscriber is
/// already installed.
pub fn init_logging(config: &LoggingConfig, verbose: bool) -> ElaraResult<()> {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(config.filter(verbose)?)
        .with_target(false)
        .with_writer(std::io::stderr);

    let installed = if config.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    installed.map_err(|e| ConfigError::new(format!("Failed to install logger: {}", e)).into())
}
