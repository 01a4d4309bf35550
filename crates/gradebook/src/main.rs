//! `gradebook` - CLI for the grade book
//!
//! Opens a terminal form session, or inspects configuration.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::fs::File;
use std::io::{self, BufRead, BufReader, IsTerminal, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use gradebook::cli::{render_config, Cli, Command, ConfigCommand, RunCommand};
use gradebook::{init_logging, Config, Form, GradeBook, Session, Terminal};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    match cli.command {
        Some(Command::Config(config_cmd)) => handle_config(cli.config, config_cmd),
        Some(Command::Run(run_cmd)) => handle_run(&Config::load_from(cli.config)?, &run_cmd),
        None => handle_run(&Config::load_from(cli.config)?, &RunCommand::default()),
    }
}

fn handle_run(config: &Config, cmd: &RunCommand) -> anyhow::Result<()> {
    let input: Box<dyn BufRead> = match &cmd.script {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("failed to open script {}", path.display()))?;
            Box::new(BufReader::new(file))
        }
        None => Box::new(io::stdin().lock()),
    };

    let interactive = cmd.script.is_none() && !cmd.no_prompt && io::stdin().is_terminal();
    let mut stdout = io::stdout().lock();
    if interactive {
        writeln!(stdout, "Student Grade Management System")?;
        writeln!(stdout, "Type 'help' for commands, 'quit' to leave.")?;
    }
    let prompt = interactive.then(|| config.session.prompt.clone());

    let form = Form::new(GradeBook::new(), config);
    let mut session = Session::new(form, Terminal::new(input, stdout, prompt));
    session.run()?;
    Ok(())
}

fn handle_config(config_path: Option<PathBuf>, cmd: ConfigCommand) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            let config = Config::load_from(config_path)?;
            println!("{}", render_config(&config, json)?);
        }
        ConfigCommand::Path => {
            let path = config_path.unwrap_or_else(Config::default_config_path);
            println!("{}", path.display());
        }
        ConfigCommand::Validate { file } => {
            let path = file
                .or(config_path)
                .unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            Config::load_from(Some(path.clone()))
                .with_context(|| format!("configuration {} is invalid", path.display()))?;
            println!("Configuration is valid.");
        }
    }
    Ok(())
}
