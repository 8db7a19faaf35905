//! Error types for Shelf Core

use std::fmt;
use thiserror::Error;

/// Result type alias using ShelfError
pub type Result<T> = std::result::Result<T, ShelfError>;

/// Top-level error type for all Shelf operations
#[derive(Debug, Error)]
pub enum ShelfError {
    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Errors reported by the catalog backend.
///
/// The `Display` output is what the store and coordinator surface as their
/// error message, so it carries the backend's own wording where there is one.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BackendError {
    #[error("{0}")]
    Network(String),

    #[error("{message}")]
    Status { status: u16, message: String },

    #[error("Book not found: {0}")]
    NotFound(String),

    #[error("Malformed response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for BackendError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            Self::Decode(error.to_string())
        } else {
            Self::Network(error.to_string())
        }
    }
}

/// Errors from the tag editor
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TagError {
    #[error("Tags must be between 1 and {max} characters and cannot contain ','", max = crate::validation::MAX_TAG_LENGTH)]
    InvalidTag,

    #[error("Tag already added: {0}")]
    DuplicateTag(String),
}

/// A draft field that can fail validation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Title,
    Author,
    Tags,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Title => "title",
            Field::Author => "author",
            Field::Tags => "tags",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single field-level validation failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: Field,
    pub problem: String,
}

impl FieldError {
    pub fn required(field: Field) -> Self {
        Self {
            field,
            problem: "is required".to_string(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.field, self.problem)
    }
}

/// Every field-level error found in one validation pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, error: FieldError) {
        self.errors.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// Fields that failed, in the order they were checked
    pub fn fields(&self) -> Vec<Field> {
        self.errors.iter().map(|e| e.field).collect()
    }

    pub fn contains(&self, field: Field) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }

    /// Convert into a `Result`, failing if any error was collected
    pub fn into_result(self) -> std::result::Result<(), Self> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<String> = self.errors.iter().map(|e| e.to_string()).collect();
        f.write_str(&messages.join(", "))
    }
}

impl std::error::Error for ValidationErrors {}

/// Errors from the save transaction
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SaveError {
    #[error("{0}")]
    Validation(ValidationErrors),

    #[error("Save failed: {0}")]
    SaveFailed(String),
}

/// Errors while building client configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid URL in {var}: {message}")]
    InvalidUrl { var: String, message: String },

    #[error("Invalid value in {var}: {value}")]
    InvalidValue { var: String, value: String },

    #[error("Failed to build HTTP client: {0}")]
    Client(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_errors_display() {
        let mut errors = ValidationErrors::new();
        errors.push(FieldError::required(Field::Title));
        errors.push(FieldError::required(Field::Author));

        assert_eq!(errors.to_string(), "title is required, author is required");
        assert_eq!(errors.fields(), vec![Field::Title, Field::Author]);
        assert!(errors.into_result().is_err());
    }

    #[test]
    fn test_backend_status_displays_message_verbatim() {
        let error = BackendError::Status {
            status: 500,
            message: "disk full".to_string(),
        };
        assert_eq!(error.to_string(), "disk full");
    }
}
