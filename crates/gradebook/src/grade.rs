//! Grade input handling.
//!
//! Grades arrive as free text from the form. This module turns that text into
//! numbers, checks them against the accepted range and formats them back for
//! display.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};

/// Inclusive range of accepted grade values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GradeRange {
    /// Lowest accepted grade.
    pub min: f64,
    /// Highest accepted grade.
    pub max: f64,
}

impl Default for GradeRange {
    fn default() -> Self {
        Self {
            min: 0.0,
            max: 100.0,
        }
    }
}

impl GradeRange {
    /// Create a new range.
    #[must_use]
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Check whether `value` lies inside the range. NaN never does.
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        self.min <= value && value <= self.max
    }

    /// Return `value` unchanged if it is inside the range.
    ///
    /// # Errors
    ///
    /// Returns [`Error::GradeOutOfRange`] if the value is outside the range.
    pub fn check(&self, value: f64) -> Result<f64> {
        if self.contains(value) {
            Ok(value)
        } else {
            debug!(value, min = self.min, max = self.max, "grade out of range");
            Err(Error::GradeOutOfRange {
                grade: value,
                min: self.min,
                max: self.max,
            })
        }
    }
}

/// Parse grade text into a number.
///
/// Surrounding whitespace is ignored. `nan` and `inf` parse successfully and
/// are left for [`GradeRange::check`] to reject.
///
/// # Errors
///
/// Returns [`Error::InvalidGrade`] if the text is not a number.
pub fn parse_grade(input: &str) -> Result<f64> {
    input.trim().parse::<f64>().map_err(|_| {
        debug!(input, "rejected non-numeric grade");
        Error::InvalidGrade {
            input: input.to_string(),
        }
    })
}

/// Format a grade the way the form displays it: `70.0`, `72.5`.
///
/// Magnitudes at or above `1e16`, or below `1e-4`, switch to exponent
/// form (`1e16`, `1e-5`). Grades inside any sane range never get there.
#[must_use]
pub fn format_grade(value: f64) -> String {
    format!("{value:?}")
}

/// Format a grade list: `[70.0, 80.0]`.
#[must_use]
pub fn format_grades(values: &[f64]) -> String {
    let items: Vec<String> = values.iter().copied().map(format_grade).collect();
    format!("[{}]", items.join(", "))
}
