//! CLI command definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Elara - generate with retries and normalize model output into typed records
#[derive(Parser, Debug)]
#[command(name = "elara")]
#[command(about = "Generate with retries and normalize model output into typed records", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file (replaces the home and current-directory layers)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Normalize a saved model response and print the result as JSON
    Normalize {
        /// Response file, or `-` for stdin
        input: PathBuf,

        /// Exit with an error instead of printing a fallback result
        #[arg(long)]
        strict: bool,
    },

    /// Request a structured analysis from the model
    Analyze {
        /// File containing the prompt
        #[arg(long)]
        prompt: PathBuf,

        /// Write the analysis record here instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,

        /// Fail instead of recording a fallback when the response is unusable
        #[arg(long)]
        strict: bool,
    },

    /// Request free prose (an entry, reflection or critique) from the model
    Prose {
        /// File containing the prompt
        #[arg(long)]
        prompt: PathBuf,

        /// Label used in logs
        #[arg(long, default_value = "prose")]
        label: String,

        /// Write the text here instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
}
