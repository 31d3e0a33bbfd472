//! Command-line interface module.
//!
//! This module provides the CLI structure and command handlers for the elara binary.

mod commands;
mod generate;
mod io;
mod normalize;

pub use commands::{Cli, Commands};
pub use generate::{run_analyze, run_prose};
pub use normalize::run_normalize;
