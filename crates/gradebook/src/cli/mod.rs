//! Command-line interface for gradebook.
//!
//! This module provides the CLI structure for the `gradebook` binary and the
//! text renderings it prints.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{ConfigCommand, RunCommand};

use crate::config::Config;
use crate::error::Result;
use crate::logging::Verbosity;

/// gradebook - Track students and their grades
///
/// Opens a form with a student name field and a grade field. Type `help`
/// inside the session for the list of commands. Nothing is saved on exit.
#[derive(Debug, Parser)]
#[command(name = "gradebook")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute (defaults to `run`)
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Open a form session
    Run(RunCommand),

    /// View or check configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.quiet, self.verbose)
    }
}

/// Render the configuration for `config show`.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn render_config(config: &Config, json: bool) -> Result<String> {
    if json {
        return Ok(serde_json::to_string_pretty(config)?);
    }

    let lines = [
        "Current Configuration".to_string(),
        "=====================".to_string(),
        String::new(),
        "[Grades]".to_string(),
        format!("  Minimum:            {}", config.grades.min),
        format!("  Maximum:            {}", config.grades.max),
        String::new(),
        "[Display]".to_string(),
        format!("  Decimals:           {}", config.display.decimals),
        String::new(),
        "[Session]".to_string(),
        format!("  Prompt:             {:?}", config.session.prompt),
    ];
    Ok(lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn cli(verbose: u8, quiet: bool) -> Cli {
        Cli {
            config: None,
            verbose,
            quiet,
            command: None,
        }
    }

    #[test]
    fn test_cli_name() {
        let cli = Cli::command();
        assert_eq!(cli.get_name(), "gradebook");
    }

    #[test]
    fn test_cli_verify() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_verbosity_flags() {
        assert_eq!(cli(0, true).verbosity(), Verbosity::Quiet);
        assert_eq!(cli(0, false).verbosity(), Verbosity::Normal);
        assert_eq!(cli(1, false).verbosity(), Verbosity::Verbose);
        assert_eq!(cli(3, false).verbosity(), Verbosity::Trace);
    }

    #[test]
    fn test_parse_without_subcommand() {
        let cli = Cli::try_parse_from(["gradebook"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_parse_run_with_script() {
        let cli = Cli::try_parse_from(["gradebook", "run", "--script", "grades.txt"]).unwrap();
        match cli.command {
            Some(Command::Run(run)) => {
                assert_eq!(run.script, Some(PathBuf::from("grades.txt")));
                assert!(!run.no_prompt);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_config_show_json() {
        let cli = Cli::try_parse_from(["gradebook", "config", "show", "--json"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Command::Config(ConfigCommand::Show { json: true }))
        ));
    }

    #[test]
    fn test_parse_with_global_flags() {
        let cli = Cli::try_parse_from(["gradebook", "-c", "/custom/config.toml", "-v", "run"])
            .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/custom/config.toml")));
        assert_eq!(cli.verbose, 1);
    }

    #[test]
    fn test_render_config_text() {
        let text = render_config(&Config::default(), false).unwrap();
        assert!(text.contains("Minimum:            0"));
        assert!(text.contains("Maximum:            100"));
        assert!(text.contains("Decimals:           2"));
    }

    #[test]
    fn test_render_config_json() {
        let json = render_config(&Config::default(), true).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["display"]["decimals"], 2);
        assert_eq!(value["grades"]["max"], 100.0);
    }
}
