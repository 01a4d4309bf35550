//! In-memory record store for students and their grades.
//!
//! The store maps a student name to a [`Student`] record and keeps records in
//! the order they were added. It does not validate grade values; range checks
//! belong to whoever feeds it input (see [`crate::grade`]).

use serde::Serialize;
use tracing::debug;

use crate::error::{Error, Result};

/// A student and their grades in entry order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Student {
    /// Unique name of the student.
    pub name: String,
    /// Grades in the order they were entered. Duplicates are allowed.
    pub grades: Vec<f64>,
}

impl Student {
    /// Create a student with no grades.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            grades: Vec::new(),
        }
    }

    /// Arithmetic mean of the grades, or `0.0` when there are none.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn average(&self) -> f64 {
        if self.grades.is_empty() {
            return 0.0;
        }
        self.grades.iter().sum::<f64>() / self.grades.len() as f64
    }

    /// Position of the first grade exactly equal to `grade`.
    #[allow(clippy::float_cmp)]
    fn position_of(&self, grade: f64) -> Option<usize> {
        self.grades.iter().position(|&g| g == grade)
    }

    fn summary(&self) -> StudentSummary {
        StudentSummary {
            name: self.name.clone(),
            grades: self.grades.clone(),
            average: self.average(),
        }
    }
}

/// Snapshot of a student's grades together with their average.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StudentSummary {
    /// Name of the student.
    pub name: String,
    /// Grades in entry order.
    pub grades: Vec<f64>,
    /// Mean of `grades`, `0.0` when empty.
    pub average: f64,
}

/// The collection of all student records, keyed by name.
#[derive(Debug, Clone, Default)]
pub struct GradeBook {
    students: Vec<Student>,
}

impl GradeBook {
    /// Create an empty grade book.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of students.
    #[must_use]
    pub fn len(&self) -> usize {
        self.students.len()
    }

    /// Check if there are no students.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }

    /// Check if a student with this name exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.index_of(name).is_some()
    }

    /// Look up a student by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Student> {
        self.students.iter().find(|s| s.name == name)
    }

    fn index_of(&self, name: &str) -> Option<usize> {
        self.students.iter().position(|s| s.name == name)
    }

    fn get_mut(&mut self, name: &str) -> Result<&mut Student> {
        self.students
            .iter_mut()
            .find(|s| s.name == name)
            .ok_or_else(|| Error::student_not_found(name))
    }

    /// Add a student with no grades.
    ///
    /// The name is stored as given; callers trim it first.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StudentExists`] if the name is already taken.
    pub fn add_student(&mut self, name: &str) -> Result<()> {
        if self.contains(name) {
            return Err(Error::student_exists(name));
        }
        self.students.push(Student::new(name));
        debug!(name, "added student");
        Ok(())
    }

    /// Append a grade to a student's list.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StudentNotFound`] if there is no such student.
    pub fn add_grade(&mut self, name: &str, grade: f64) -> Result<()> {
        let student = self.get_mut(name)?;
        student.grades.push(grade);
        debug!(name, grade, count = student.grades.len(), "added grade");
        Ok(())
    }

    /// A student's grades and average, or `None` if there is no such student.
    #[must_use]
    pub fn view_student(&self, name: &str) -> Option<StudentSummary> {
        self.get(name).map(Student::summary)
    }

    /// Replace the first grade equal to `old` with `new`, keeping its position.
    ///
    /// Matching uses exact equality, so `70` and `70.0` are the same grade but
    /// `70.0001` is not.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StudentNotFound`] or [`Error::GradeNotFound`].
    pub fn update_grade(&mut self, name: &str, old: f64, new: f64) -> Result<()> {
        let student = self.get_mut(name)?;
        let index = student
            .position_of(old)
            .ok_or_else(|| Error::grade_not_found(name, old))?;
        student.grades[index] = new;
        debug!(name, old, new, index, "updated grade");
        Ok(())
    }

    /// Remove a student and all of their grades, returning the record.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StudentNotFound`] if there is no such student.
    pub fn delete_student(&mut self, name: &str) -> Result<Student> {
        let index = self
            .index_of(name)
            .ok_or_else(|| Error::student_not_found(name))?;
        let student = self.students.remove(index);
        debug!(name, grades = student.grades.len(), "deleted student");
        Ok(student)
    }

    /// Remove the first grade equal to `grade`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StudentNotFound`] or [`Error::GradeNotFound`].
    pub fn delete_grade(&mut self, name: &str, grade: f64) -> Result<()> {
        let student = self.get_mut(name)?;
        let index = student
            .position_of(grade)
            .ok_or_else(|| Error::grade_not_found(name, grade))?;
        student.grades.remove(index);
        debug!(name, grade, index, "deleted grade");
        Ok(())
    }

    /// Grades and averages of every student, in the order they were added.
    #[must_use]
    pub fn view_all_students(&self) -> Vec<StudentSummary> {
        self.students.iter().map(Student::summary).collect()
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    fn book_with(name: &str, grades: &[f64]) -> GradeBook {
        let mut book = GradeBook::new();
        book.add_student(name).unwrap();
        for &g in grades {
            book.add_grade(name, g).unwrap();
        }
        book
    }

    #[test]
    fn test_new_book_is_empty() {
        let book = GradeBook::new();
        assert!(book.is_empty());
        assert_eq!(book.len(), 0);
        assert!(book.view_all_students().is_empty());
    }

    #[test]
    fn test_add_student_twice_keeps_one_record() {
        let mut book = GradeBook::new();
        assert!(book.add_student("Ada").is_ok());

        let err = book.add_student("Ada").unwrap_err();
        assert!(matches!(err, Error::StudentExists { ref name } if name == "Ada"));
        assert_eq!(book.len(), 1);
    }

    #[test]
    fn test_names_are_case_sensitive() {
        let mut book = GradeBook::new();
        book.add_student("ada").unwrap();
        assert!(book.add_student("Ada").is_ok());
        assert_eq!(book.len(), 2);
    }

    #[test]
    fn test_new_student_average_is_zero() {
        let book = book_with("Ada", &[]);
        let summary = book.view_student("Ada").unwrap();
        assert!(summary.grades.is_empty());
        assert_eq!(summary.average, 0.0);
    }

    #[test]
    fn test_average_of_grades() {
        let book = book_with("Ada", &[70.0, 80.0, 90.0]);
        let summary = book.view_student("Ada").unwrap();
        assert_eq!(summary.grades, vec![70.0, 80.0, 90.0]);
        assert_eq!(summary.average, 80.0);
    }

    #[test]
    fn test_add_grade_allows_duplicates() {
        let book = book_with("Ada", &[60.0, 60.0]);
        assert_eq!(book.get("Ada").unwrap().grades, vec![60.0, 60.0]);
    }

    #[test]
    fn test_add_grade_unknown_student() {
        let mut book = GradeBook::new();
        let err = book.add_grade("Ghost", 50.0).unwrap_err();
        assert!(matches!(err, Error::StudentNotFound { .. }));
        assert!(book.is_empty());
    }

    #[test]
    fn test_store_accepts_any_value() {
        let book = book_with("Ada", &[150.0, -3.0]);
        assert_eq!(book.get("Ada").unwrap().grades, vec![150.0, -3.0]);
    }

    #[test]
    fn test_view_unknown_student() {
        let book = GradeBook::new();
        assert!(book.view_student("Ghost").is_none());
    }

    #[test]
    fn test_update_replaces_first_occurrence_only() {
        let mut book = book_with("Ada", &[60.0, 60.0, 70.0]);
        book.update_grade("Ada", 60.0, 65.0).unwrap();
        assert_eq!(book.get("Ada").unwrap().grades, vec![65.0, 60.0, 70.0]);
    }

    #[test]
    fn test_update_preserves_position() {
        let mut book = book_with("Ada", &[50.0, 60.0, 70.0]);
        book.update_grade("Ada", 70.0, 75.0).unwrap();
        assert_eq!(book.get("Ada").unwrap().grades, vec![50.0, 60.0, 75.0]);
    }

    #[test]
    fn test_update_missing_grade() {
        let mut book = book_with("Ada", &[60.0]);
        let err = book.update_grade("Ada", 61.0, 65.0).unwrap_err();
        assert!(matches!(err, Error::GradeNotFound { grade, .. } if grade == 61.0));
        assert_eq!(book.get("Ada").unwrap().grades, vec![60.0]);
    }

    #[test]
    fn test_update_unknown_student() {
        let mut book = GradeBook::new();
        let err = book.update_grade("Ghost", 1.0, 2.0).unwrap_err();
        assert!(matches!(err, Error::StudentNotFound { .. }));
    }

    #[test]
    fn test_update_uses_exact_matching() {
        let mut book = book_with("Ada", &[70.0]);
        assert!(book.update_grade("Ada", 70.000_001, 71.0).is_err());
        assert!(book.update_grade("Ada", 70.0, 71.0).is_ok());
    }

    #[test]
    fn test_delete_student_then_view_not_found() {
        let mut book = book_with("Ada", &[90.0]);
        let removed = book.delete_student("Ada").unwrap();
        assert_eq!(removed.grades, vec![90.0]);
        assert!(book.view_student("Ada").is_none());
        assert!(book.is_empty());
    }

    #[test]
    fn test_delete_unknown_student() {
        let mut book = book_with("Ada", &[]);
        assert!(book.delete_student("Bob").unwrap_err().is_not_found());
        assert_eq!(book.len(), 1);
    }

    #[test]
    fn test_re_adding_deleted_student_starts_empty() {
        let mut book = book_with("Ada", &[90.0]);
        book.delete_student("Ada").unwrap();
        book.add_student("Ada").unwrap();
        assert!(book.get("Ada").unwrap().grades.is_empty());
    }

    #[test]
    fn test_delete_grade_removes_first_occurrence() {
        let mut book = book_with("Ada", &[60.0, 70.0, 60.0]);
        book.delete_grade("Ada", 60.0).unwrap();
        assert_eq!(book.get("Ada").unwrap().grades, vec![70.0, 60.0]);
    }

    #[test]
    fn test_delete_missing_grade_leaves_grades_unchanged() {
        let mut book = book_with("Ada", &[60.0, 70.0]);
        let err = book.delete_grade("Ada", 80.0).unwrap_err();
        assert!(matches!(err, Error::GradeNotFound { .. }));
        assert_eq!(book.get("Ada").unwrap().grades, vec![60.0, 70.0]);
    }

    #[test]
    fn test_delete_grade_unknown_student() {
        let mut book = GradeBook::new();
        let err = book.delete_grade("Ghost", 60.0).unwrap_err();
        assert!(matches!(err, Error::StudentNotFound { .. }));
    }

    #[test]
    fn test_view_all_in_insertion_order() {
        let mut book = GradeBook::new();
        book.add_student("Zoe").unwrap();
        book.add_student("Ada").unwrap();
        book.add_grade("Ada", 90.0).unwrap();
        book.add_grade("Ada", 80.0).unwrap();

        let all = book.view_all_students();
        let names: Vec<&str> = all.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Zoe", "Ada"]);
        assert_eq!(all[0].average, 0.0);
        assert_eq!(all[1].average, 85.0);
    }

    #[test]
    fn test_summary_serializes() {
        let book = book_with("Ada", &[70.0, 80.0]);
        let json = serde_json::to_value(book.view_student("Ada").unwrap()).unwrap();
        assert_eq!(json["name"], "Ada");
        assert_eq!(json["average"], 75.0);
    }
}
