//! CLI argument definitions using clap
//!
//! Commands:
//! - sectiondb init --config <path>
//! - sectiondb start --config <path>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// sectiondb - A versioned content store for structured site sections
#[derive(Parser, Debug)]
#[command(name = "sectiondb")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Initialize a new sectiondb data directory and config file
    Init {
        /// Path to configuration file
        #[arg(long, default_value = "./sectiondb.json")]
        config: PathBuf,
    },

    /// Start the sectiondb server
    Start {
        /// Path to configuration file
        #[arg(long, default_value = "./sectiondb.json")]
        config: PathBuf,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
