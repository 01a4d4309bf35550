//! Terminal session driving a [`Form`].
//!
//! A session reads one command per line. Field commands fill the form's
//! inputs, action commands press its buttons. Modal prompts read the next
//! line of input, and running out of input while a prompt is open cancels it.

use std::io::{BufRead, Write};

use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::form::{Action, Form, Prompter};

const HELP: &str = "\
Fields:
  name <text>            set the student name field
  grade <text>           set the grade field
  clear                  empty both fields
  fields                 show both fields
Actions:
  add-student [name]     Add Student
  add-grade [grade]      Add Grade
  view [name]            View Grades
  update                 Update Grade (prompts for old and new grade)
  delete-student [name]  Delete Student
  delete-grade           Delete Grade (prompts for the grade)
  view-all               View All Students
Other:
  help                   show this help
  quit                   end the session
";

/// Which field an action's inline argument fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Name,
    Grade,
}

/// A parsed session command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Set the name field.
    SetName(String),
    /// Set the grade field.
    SetGrade(String),
    /// Empty both fields.
    Clear,
    /// Print both fields.
    Fields,
    /// Fill the name field first when `name` is given, then run the action.
    Name {
        /// Action to run.
        action: Action,
        /// Inline name, if any.
        name: Option<String>,
    },
    /// Fill the grade field first when `grade` is given, then run the action.
    Grade {
        /// Action to run.
        action: Action,
        /// Inline grade, if any.
        grade: Option<String>,
    },
    /// Run an action that takes no inline argument.
    Press(Action),
    /// Print the command list.
    Help,
    /// End the session.
    Quit,
}

impl Command {
    /// Parse a non-blank input line.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownCommand`] for an unrecognised command word and
    /// [`Error::UnexpectedArgument`] when an argument-less command gets one.
    pub fn parse(line: &str) -> Result<Self> {
        let line = line.trim();
        let (word, rest) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(w, r)| (w, r.trim()));
        let arg = (!rest.is_empty()).then(|| rest.to_string());

        let has_arg = arg.is_some();
        let no_arg = |command: Command| {
            if has_arg {
                Err(Error::UnexpectedArgument {
                    command: word.to_string(),
                })
            } else {
                Ok(command)
            }
        };

        match word.to_ascii_lowercase().as_str() {
            "name" => Ok(Self::SetName(rest.to_string())),
            "grade" => Ok(Self::SetGrade(rest.to_string())),
            "clear" => no_arg(Self::Clear),
            "fields" => no_arg(Self::Fields),
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" => Ok(Self::Quit),
            other => match action_for(other) {
                Some((action, Some(Field::Name))) => Ok(Self::Name { action, name: arg }),
                Some((action, Some(Field::Grade))) => Ok(Self::Grade { action, grade: arg }),
                Some((action, None)) => no_arg(Self::Press(action)),
                None => Err(Error::UnknownCommand {
                    command: word.to_string(),
                }),
            },
        }
    }
}

fn action_for(word: &str) -> Option<(Action, Option<Field>)> {
    let entry = match word {
        "add-student" => (Action::AddStudent, Some(Field::Name)),
        "add-grade" => (Action::AddGrade, Some(Field::Grade)),
        "view" => (Action::ViewGrades, Some(Field::Name)),
        "update" => (Action::UpdateGrade, None),
        "delete-student" => (Action::DeleteStudent, Some(Field::Name)),
        "delete-grade" => (Action::DeleteGrade, None),
        "view-all" => (Action::ViewAll, None),
        _ => return None,
    };
    Some(entry)
}

/// Line-oriented terminal I/O. Answers the form's prompts from the same input
/// the commands come from.
#[derive(Debug)]
pub struct Terminal<R, W> {
    input: R,
    output: W,
    prompt: Option<String>,
}

impl<R: BufRead, W: Write> Terminal<R, W> {
    /// Wrap an input and an output. `prompt` is printed before each command.
    pub fn new(input: R, output: W, prompt: Option<String>) -> Self {
        Self {
            input,
            output,
            prompt,
        }
    }

    /// Read one line without its line ending. `None` at end of input.
    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }

    fn read_command(&mut self) -> Result<Option<String>> {
        if let Some(prompt) = &self.prompt {
            write!(self.output, "{prompt}")?;
            self.output.flush()?;
        }
        self.read_line()
    }
}

impl<R: BufRead, W: Write> Prompter for Terminal<R, W> {
    fn ask(&mut self, title: &str, prompt: &str) -> Option<String> {
        let shown = write!(self.output, "{title}: {prompt} ").and_then(|()| self.output.flush());
        if let Err(err) = shown {
            warn!(%err, "failed to show prompt");
            return None;
        }
        match self.read_line() {
            Ok(answer) => answer,
            Err(err) => {
                warn!(%err, "failed to read prompt answer");
                None
            }
        }
    }
}

/// A form bound to a terminal.
#[derive(Debug)]
pub struct Session<R, W> {
    form: Form,
    terminal: Terminal<R, W>,
}

impl<R: BufRead, W: Write> Session<R, W> {
    /// Create a session.
    pub fn new(form: Form, terminal: Terminal<R, W>) -> Self {
        Self { form, terminal }
    }

    /// Take the session apart.
    pub fn into_parts(self) -> (Form, W) {
        (self.form, self.terminal.output)
    }

    /// Process commands until `quit` or end of input.
    ///
    /// Rejected commands and failed actions are reported on the output and
    /// the session carries on.
    ///
    /// # Errors
    ///
    /// Returns an error only if reading input or writing output fails.
    pub fn run(&mut self) -> Result<()> {
        info!("session started");
        while let Some(line) = self.terminal.read_command()? {
            if line.trim().is_empty() {
                continue;
            }
            match Command::parse(&line) {
                Ok(Command::Quit) => break,
                Ok(command) => self.execute(command)?,
                Err(err) => writeln!(
                    self.terminal.output,
                    "[Warning] {err}. Type 'help' for commands."
                )?,
            }
        }
        info!(students = self.form.book().len(), "session ended");
        Ok(())
    }

    /// Execute one parsed command.
    ///
    /// # Errors
    ///
    /// Returns an error if writing output fails.
    pub fn execute(&mut self, command: Command) -> Result<()> {
        match command {
            Command::SetName(text) => self.form.set_name(text),
            Command::SetGrade(text) => self.form.set_grade(text),
            Command::Clear => self.form.clear_fields(),
            Command::Fields => writeln!(
                self.terminal.output,
                "Student Name: {}\nGrade: {}",
                self.form.name(),
                self.form.grade()
            )?,
            Command::Help => write!(self.terminal.output, "{HELP}")?,
            Command::Quit => {}
            Command::Name { action, name } => {
                if let Some(name) = name {
                    self.form.set_name(name);
                }
                self.press(action)?;
            }
            Command::Grade { action, grade } => {
                if let Some(grade) = grade {
                    self.form.set_grade(grade);
                }
                self.press(action)?;
            }
            Command::Press(action) => self.press(action)?,
        }
        Ok(())
    }

    fn press(&mut self, action: Action) -> Result<()> {
        let notice = self.form.dispatch(action, &mut self.terminal);
        let output = &mut self.terminal.output;
        if let Some(notice) = notice {
            writeln!(output, "{notice}")?;
        }
        if action.is_view() {
            write!(output, "{}", self.form.result())?;
        }
        Ok(())
    }
}
