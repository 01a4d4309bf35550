//! `gradebook` - Track students and their numeric grades
//!
//! This library provides an in-memory grade book, the form that validates
//! input for it, and a terminal session that drives the form.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod cli;
pub mod config;
pub mod error;
pub mod form;
pub mod grade;
pub mod logging;
pub mod session;
pub mod store;

pub use config::Config;
pub use error::{Error, Result};
pub use form::{Action, Form, Notice, Prompter};
pub use logging::init_logging;
pub use session::{Session, Terminal};
pub use store::{GradeBook, Student, StudentSummary};
