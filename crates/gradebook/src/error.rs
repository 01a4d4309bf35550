//! Error types for gradebook.
//!
//! This module defines all error types used throughout the gradebook crate.
//! Store and input errors are meant to be shown to the user as warnings;
//! configuration and I/O errors end the program.

use thiserror::Error;

use crate::grade::format_grade;

/// The main error type for gradebook operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Store Errors ===
    /// A student with this name is already recorded.
    #[error("student '{name}' already exists")]
    StudentExists {
        /// Name of the student.
        name: String,
    },

    /// No student with this name is recorded.
    #[error("student '{name}' does not exist")]
    StudentNotFound {
        /// Name of the student.
        name: String,
    },

    /// The student has no grade equal to the given value.
    #[error("student '{name}' has no grade {}", format_grade(*.grade))]
    GradeNotFound {
        /// Name of the student.
        name: String,
        /// The grade that was looked up.
        grade: f64,
    },

    // === Input Errors ===
    /// Grade text could not be parsed as a number.
    #[error("invalid grade '{input}': not a number")]
    InvalidGrade {
        /// The text that failed to parse.
        input: String,
    },

    /// Grade is outside the accepted range.
    #[error("grade {} is outside {min}..={max}", format_grade(*.grade))]
    GradeOutOfRange {
        /// The rejected grade.
        grade: f64,
        /// Lower bound (inclusive).
        min: f64,
        /// Upper bound (inclusive).
        max: f64,
    },

    // === Session Errors ===
    /// The session did not recognise a command.
    #[error("unknown command '{command}'")]
    UnknownCommand {
        /// The command word as typed.
        command: String,
    },

    /// A command that takes no argument was given one.
    #[error("'{command}' takes no argument")]
    UnexpectedArgument {
        /// The command word as typed.
        command: String,
    },

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === I/O Errors ===
    /// Reading input or writing output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // === Serialization Errors ===
    /// JSON serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for gradebook operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a student-exists error.
    #[must_use]
    pub fn student_exists(name: impl Into<String>) -> Self {
        Self::StudentExists { name: name.into() }
    }

    /// Create a student-not-found error.
    #[must_use]
    pub fn student_not_found(name: impl Into<String>) -> Self {
        Self::StudentNotFound { name: name.into() }
    }

    /// Create a grade-not-found error.
    #[must_use]
    pub fn grade_not_found(name: impl Into<String>, grade: f64) -> Self {
        Self::GradeNotFound {
            name: name.into(),
            grade,
        }
    }

    /// Check if this error means a student or grade was missing.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::StudentNotFound { .. } | Self::GradeNotFound { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::student_exists("Ada");
        assert_eq!(err.to_string(), "student 'Ada' already exists");

        let err = Error::student_not_found("Ada");
        assert_eq!(err.to_string(), "student 'Ada' does not exist");
    }

    #[test]
    fn test_grade_not_found_display() {
        let err = Error::grade_not_found("Ada", 70.0);
        assert_eq!(err.to_string(), "student 'Ada' has no grade 70.0");
    }

    #[test]
    fn test_grade_out_of_range_display() {
        let err = Error::GradeOutOfRange {
            grade: 101.5,
            min: 0.0,
            max: 100.0,
        };
        assert_eq!(err.to_string(), "grade 101.5 is outside 0..=100");
    }

    #[test]
    fn test_is_not_found() {
        assert!(Error::student_not_found("Ada").is_not_found());
        assert!(Error::grade_not_found("Ada", 1.0).is_not_found());
        assert!(!Error::student_exists("Ada").is_not_found());
        assert!(!Error::InvalidGrade {
            input: "abc".to_string()
        }
        .is_not_found());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
        assert!(err.to_string().contains("pipe closed"));
    }

    #[test]
    fn test_from_json_error() {
        let json_result: std::result::Result<i32, serde_json::Error> =
            serde_json::from_str("not valid json");
        if let Err(json_err) = json_result {
            let err: Error = json_err.into();
            assert!(matches!(err, Error::Json(_)));
        }
    }

    #[test]
    fn test_session_error_display() {
        let err = Error::UnknownCommand {
            command: "frobnicate".to_string(),
        };
        assert_eq!(err.to_string(), "unknown command 'frobnicate'");

        let err = Error::UnexpectedArgument {
            command: "view-all".to_string(),
        };
        assert_eq!(err.to_string(), "'view-all' takes no argument");
    }

    #[test]
    fn test_config_validation_error_display() {
        let err = Error::ConfigValidation {
            message: "min above max".to_string(),
        };
        assert!(err.to_string().contains("min above max"));
    }
}
