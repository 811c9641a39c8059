//! Field validation for catalog items.
//!
//! Pure functions shared by item construction, the field setters, and the
//! persistence layer when records are read back from disk.

use chrono::{Datelike, Local};
use thiserror::Error;

/// Earliest publication year accepted by the catalog
pub const MIN_PUBLICATION_YEAR: i32 = 1000;

/// Item field that a validation rule applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Title,
    Publisher,
    PublicationYear,
    Author,
    IssueNumber,
    Editor,
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Field::Title => write!(f, "title"),
            Field::Publisher => write!(f, "publisher"),
            Field::PublicationYear => write!(f, "publication year"),
            Field::Author => write!(f, "author"),
            Field::IssueNumber => write!(f, "issue number"),
            Field::Editor => write!(f, "editor"),
        }
    }
}

/// A field value that violates one of the item rules
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("title cannot be empty")]
    EmptyTitle,

    #[error("publisher cannot be empty")]
    EmptyPublisher,

    #[error("year out of range: {year} (must be between 1000 and {max})")]
    YearOutOfRange { year: i32, max: i32 },

    #[error("issue number must be positive")]
    NonPositiveIssue(i32),

    #[error("author cannot be empty")]
    EmptyAuthor,

    #[error("editor cannot be empty")]
    EmptyEditor,
}

impl ValidationError {
    /// The field that failed validation
    pub fn field(&self) -> Field {
        match self {
            ValidationError::EmptyTitle => Field::Title,
            ValidationError::EmptyPublisher => Field::Publisher,
            ValidationError::YearOutOfRange { .. } => Field::PublicationYear,
            ValidationError::NonPositiveIssue(_) => Field::IssueNumber,
            ValidationError::EmptyAuthor => Field::Author,
            ValidationError::EmptyEditor => Field::Editor,
        }
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

pub fn validate_title(title: &str) -> Result<(), ValidationError> {
    if is_blank(title) {
        return Err(ValidationError::EmptyTitle);
    }
    Ok(())
}

pub fn validate_publisher(publisher: &str) -> Result<(), ValidationError> {
    if is_blank(publisher) {
        return Err(ValidationError::EmptyPublisher);
    }
    Ok(())
}

pub fn validate_author(author: &str) -> Result<(), ValidationError> {
    if is_blank(author) {
        return Err(ValidationError::EmptyAuthor);
    }
    Ok(())
}

pub fn validate_editor(editor: &str) -> Result<(), ValidationError> {
    if is_blank(editor) {
        return Err(ValidationError::EmptyEditor);
    }
    Ok(())
}

pub fn validate_issue_number(issue_number: i32) -> Result<(), ValidationError> {
    if issue_number <= 0 {
        return Err(ValidationError::NonPositiveIssue(issue_number));
    }
    Ok(())
}

/// The current calendar year, read from the local clock on every call
pub fn current_year() -> i32 {
    Local::now().year()
}

/// Check a publication year against the current calendar year
pub fn validate_publication_year(year: i32) -> Result<(), ValidationError> {
    validate_publication_year_at(year, current_year())
}

/// Check a publication year against an explicit upper bound
pub fn validate_publication_year_at(year: i32, current_year: i32) -> Result<(), ValidationError> {
    if year < MIN_PUBLICATION_YEAR || year > current_year {
        return Err(ValidationError::YearOutOfRange {
            year,
            max: current_year,
        });
    }
    Ok(())
}
