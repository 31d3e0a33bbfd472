//! Elara CLI binary.
//!
//! This binary provides command-line access to Elara's functionality:
//! - Normalize saved model responses
//! - Request structured analyses from the model
//! - Request free prose from the model

use clap::Parser;
use elara::{ElaraConfig, init_logging};

mod cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use cli::{Cli, Commands, run_analyze, run_normalize, run_prose};

    // Pick up OPENROUTER_API_KEY and ELARA_* from .env
    dotenvy::dotenv().ok();

    // Parse command-line arguments
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => ElaraConfig::from_file(path)?,
        None => ElaraConfig::load()?,
    };

    // Initialize tracing
    init_logging(&config.logging, cli.verbose)?;

    // Execute the requested command
    match cli.command {
        Commands::Normalize { input, strict } => {
            run_normalize(&config, &input, strict)?;
        }

        Commands::Analyze {
            prompt,
            output,
            strict,
        } => {
            run_analyze(&config, &prompt, output.as_deref(), strict).await?;
        }

        Commands::Prose {
            prompt,
            label,
            output,
        } => {
            run_prose(&config, &prompt, &label, output.as_deref()).await?;
        }
    }

    Ok(())
}
