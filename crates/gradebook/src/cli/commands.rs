//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand};

/// Arguments for a form session.
#[derive(Debug, Default, Args)]
pub struct RunCommand {
    /// Read commands from this file instead of standard input
    #[arg(short, long, value_name = "FILE")]
    pub script: Option<PathBuf>,

    /// Never print the command prompt
    #[arg(long)]
    pub no_prompt: bool,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}
