//! The grade entry form.
//!
//! [`Form`] holds the two input fields (student name and grade), the result
//! area and the [`GradeBook`] it operates on. Each [`Action`] corresponds to a
//! button on the form: it reads the fields, validates them, calls the store and
//! reports back through a [`Notice`] or by replacing the result area.
//!
//! The form knows nothing about terminals. Modal prompts are delegated to a
//! [`Prompter`], which lets the same form be driven by a terminal session or by
//! a scripted prompter in tests.

use std::fmt;

use tracing::debug;

use crate::config::Config;
use crate::error::Error;
use crate::grade::{format_grade, format_grades, parse_grade, GradeRange};
use crate::store::GradeBook;

/// A button on the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Add the student named in the name field.
    AddStudent,
    /// Add the grade field's value to the named student.
    AddGrade,
    /// Show the named student's grades and average.
    ViewGrades,
    /// Replace one of the named student's grades (prompts for old and new).
    UpdateGrade,
    /// Delete the named student.
    DeleteStudent,
    /// Delete one of the named student's grades (prompts for the value).
    DeleteGrade,
    /// Show every student's grades and average.
    ViewAll,
}

impl Action {
    /// Every action, in the order the buttons appear on the form.
    pub const ALL: [Action; 7] = [
        Self::AddStudent,
        Self::AddGrade,
        Self::ViewGrades,
        Self::UpdateGrade,
        Self::DeleteStudent,
        Self::DeleteGrade,
        Self::ViewAll,
    ];

    /// Button label.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::AddStudent => "Add Student",
            Self::AddGrade => "Add Grade",
            Self::ViewGrades => "View Grades",
            Self::UpdateGrade => "Update Grade",
            Self::DeleteStudent => "Delete Student",
            Self::DeleteGrade => "Delete Grade",
            Self::ViewAll => "View All Students",
        }
    }

    /// Whether the action replaces the result area instead of raising a notice.
    #[must_use]
    pub fn is_view(&self) -> bool {
        matches!(self, Self::ViewGrades | Self::ViewAll)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Message raised by an action, shown to the user as a dialog or status line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// The action succeeded.
    Info {
        /// Dialog title.
        title: String,
        /// Message body.
        message: String,
    },
    /// The action was rejected; nothing changed.
    Warning {
        /// Message body.
        message: String,
    },
}

impl Notice {
    fn success(message: impl Into<String>) -> Self {
        Self::Info {
            title: "Success".to_string(),
            message: message.into(),
        }
    }

    fn warning(message: impl Into<String>) -> Self {
        Self::Warning {
            message: message.into(),
        }
    }

    /// Message body.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Info { message, .. } | Self::Warning { message } => message,
        }
    }

    /// Check if this is a warning.
    #[must_use]
    pub fn is_warning(&self) -> bool {
        matches!(self, Self::Warning { .. })
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info { title, message } => write!(f, "[{title}] {message}"),
            Self::Warning { message } => write!(f, "[Warning] {message}"),
        }
    }
}

/// Source of answers for the form's modal prompts.
pub trait Prompter {
    /// Ask the user for a line of text. `None` means the prompt was cancelled.
    fn ask(&mut self, title: &str, prompt: &str) -> Option<String>;
}

/// Warning for an action the grade book refused.
fn rejected(err: &Error, message: impl Into<String>) -> Notice {
    debug!(%err, not_found = err.is_not_found(), "grade book rejected action");
    Notice::warning(message)
}

/// The form: input fields, result area and the grade book behind them.
#[derive(Debug)]
pub struct Form {
    book: GradeBook,
    range: GradeRange,
    decimals: usize,
    name: String,
    grade: String,
    result: String,
}

impl Form {
    /// Create a form over `book`, using the grade range and display settings
    /// from `config`.
    #[must_use]
    pub fn new(book: GradeBook, config: &Config) -> Self {
        Self {
            book,
            range: config.grades,
            decimals: config.display.decimals,
            name: String::new(),
            grade: String::new(),
            result: String::new(),
        }
    }

    /// The grade book behind the form.
    #[must_use]
    pub fn book(&self) -> &GradeBook {
        &self.book
    }

    /// Contents of the name field.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Contents of the grade field.
    #[must_use]
    pub fn grade(&self) -> &str {
        &self.grade
    }

    /// Contents of the result area.
    #[must_use]
    pub fn result(&self) -> &str {
        &self.result
    }

    /// Replace the contents of the name field.
    pub fn set_name(&mut self, text: impl Into<String>) {
        self.name = text.into();
    }

    /// Replace the contents of the grade field.
    pub fn set_grade(&mut self, text: impl Into<String>) {
        self.grade = text.into();
    }

    /// Empty both input fields.
    pub fn clear_fields(&mut self) {
        self.name.clear();
        self.grade.clear();
    }

    /// Run the action behind a button.
    ///
    /// Returns the notice to show, or `None` when the action only updated the
    /// result area or a prompt was cancelled.
    pub fn dispatch(&mut self, action: Action, prompter: &mut dyn Prompter) -> Option<Notice> {
        debug!(%action, name = %self.name.trim(), "dispatching");
        match action {
            Action::AddStudent => Some(self.add_student()),
            Action::AddGrade => Some(self.add_grade()),
            Action::ViewGrades => {
                self.view_student();
                None
            }
            Action::UpdateGrade => self.update_grade(prompter),
            Action::DeleteStudent => Some(self.delete_student()),
            Action::DeleteGrade => self.delete_grade(prompter),
            Action::ViewAll => {
                self.view_all_students();
                None
            }
        }
    }

    fn trimmed_name(&self) -> String {
        self.name.trim().to_string()
    }

    fn add_student(&mut self) -> Notice {
        let name = self.trimmed_name();
        if name.is_empty() {
            debug!("rejected empty student name");
            return Notice::warning("Please enter a student name.");
        }

        let notice = match self.book.add_student(&name) {
            Ok(()) => Notice::success(format!("Student '{name}' added successfully.")),
            Err(err) => rejected(&err, format!("Student '{name}' already exists.")),
        };
        self.name.clear();
        notice
    }

    fn add_grade(&mut self) -> Notice {
        let name = self.trimmed_name();
        let notice = match parse_grade(&self.grade).and_then(|g| self.range.check(g)) {
            Ok(grade) => match self.book.add_grade(&name, grade) {
                Ok(()) => Notice::success(format!(
                    "Grade {} added for student '{name}'.",
                    format_grade(grade)
                )),
                Err(err) => rejected(&err, format!("Student '{name}' does not exist.")),
            },
            Err(Error::GradeOutOfRange { .. }) => self.out_of_range(),
            Err(_) => Notice::warning("Please enter a valid numeric grade."),
        };
        self.grade.clear();
        notice
    }

    fn out_of_range(&self) -> Notice {
        Notice::warning(format!(
            "Grade must be between {} and {}.",
            self.range.min, self.range.max
        ))
    }

    fn view_student(&mut self) {
        let name = self.trimmed_name();
        self.result = match self.book.view_student(&name) {
            Some(summary) => format!(
                "Grades for {name}: {}\nAverage: {:.*}\n",
                format_grades(&summary.grades),
                self.decimals,
                summary.average
            ),
            None => format!("Student '{name}' does not exist.\n"),
        };
    }

    fn update_grade(&mut self, prompter: &mut dyn Prompter) -> Option<Notice> {
        let name = self.trimmed_name();
        let old_input = prompter.ask("Update Grade", "Enter old grade:")?;
        let new_input = prompter.ask("Update Grade", "Enter new grade:")?;

        let (Ok(old), Ok(new)) = (parse_grade(&old_input), parse_grade(&new_input)) else {
            return Some(Notice::warning("Please enter valid numeric grades."));
        };
        if self.range.check(new).is_err() {
            return Some(self.out_of_range());
        }

        let notice = match self.book.update_grade(&name, old, new) {
            Ok(()) => Notice::success(format!(
                "Grade updated from {} to {} for student '{name}'.",
                format_grade(old),
                format_grade(new)
            )),
            Err(err) => rejected(
                &err,
                "Failed to update grade. Ensure the student and old grade exist.",
            ),
        };
        Some(notice)
    }

    fn delete_student(&mut self) -> Notice {
        let name = self.trimmed_name();
        match self.book.delete_student(&name) {
            Ok(_) => Notice::success(format!("Student '{name}' deleted successfully.")),
            Err(err) => rejected(&err, format!("Student '{name}' does not exist.")),
        }
    }

    fn delete_grade(&mut self, prompter: &mut dyn Prompter) -> Option<Notice> {
        let name = self.trimmed_name();
        let input = prompter.ask("Delete Grade", "Enter grade to delete:")?;

        let Ok(grade) = parse_grade(&input) else {
            return Some(Notice::warning("Please enter a valid numeric grade."));
        };

        let notice = match self.book.delete_grade(&name, grade) {
            Ok(()) => Notice::success(format!(
                "Grade {} removed for student '{name}'.",
                format_grade(grade)
            )),
            Err(err) => rejected(
                &err,
                "Failed to delete grade. Ensure the student and grade exist.",
            ),
        };
        Some(notice)
    }

    fn view_all_students(&mut self) {
        let all = self.book.view_all_students();
        let lines: Vec<String> = if all.is_empty() {
            vec!["No students found.".to_string()]
        } else {
            all.iter()
                .map(|summary| {
                    format!(
                        "Student: {}, Grades: {}, Average: {:.*}",
                        summary.name,
                        format_grades(&summary.grades),
                        self.decimals,
                        summary.average
                    )
                })
                .collect()
        };
        self.result = format!("All Students:\n{}\n", lines.join("\n"));
    }
}
