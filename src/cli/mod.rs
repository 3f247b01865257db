//! CLI module for sectiondb
//!
//! Provides the command-line interface:
//! - init: write a default config and create the data directories
//! - start: boot the stores and enter the serving loop

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command};
pub use commands::{init, run, run_command, start, Config};
pub use errors::{CliError, CliErrorCode, CliResult};
