//! Error types for rollcall.
//!
//! Validation errors abort the triggering operation with no partial effect.
//! I/O errors on the write side carry the path and the underlying cause.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for rollcall operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Validation Errors ===
    /// A student with this id is already on the roster.
    #[error("student id '{id}' already exists")]
    DuplicateStudent {
        /// The conflicting id.
        id: String,
    },

    /// No student with this id is on the roster.
    #[error("no student with id '{id}'")]
    StudentNotFound {
        /// The id that was looked up.
        id: String,
    },

    /// A required field was empty after trimming.
    #[error("{field} must not be empty")]
    EmptyField {
        /// Name of the empty field.
        field: &'static str,
    },

    /// A field contains a character the line format cannot represent.
    #[error("invalid {field}: {message}")]
    InvalidField {
        /// Name of the offending field.
        field: &'static str,
        /// Description of the problem.
        message: String,
    },

    /// A date string is not a valid `YYYY-MM-DD` calendar date.
    #[error("invalid date '{input}': expected YYYY-MM-DD")]
    InvalidDate {
        /// The rejected input.
        input: String,
    },

    /// An action that needs at least one selected student got none.
    #[error("no students selected for {action}")]
    NoSelection {
        /// The action that required a selection.
        action: &'static str,
    },

    /// Username or password did not match.
    #[error("invalid credentials")]
    AuthenticationFailed,

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
    /// Writing a data or export file failed. The previous file is intact.
    #[error("failed to write {path}: {source}")]
    FileWrite {
        /// Target file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to create a required directory.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreate {
        /// Path that couldn't be created.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === Generic Errors ===
    /// An internal error occurred (bug).
    #[error("internal error: {0}")]
    Internal(String),
}

/// A specialized Result type for rollcall operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a new internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Create an invalid field error.
    #[must_use]
    pub fn invalid_field(field: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidField {
            field,
            message: message.into(),
        }
    }

    /// Create a file write error for `path`.
    #[must_use]
    pub fn file_write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileWrite {
            path: path.into(),
            source,
        }
    }

    /// Check if this error is a user input problem rather than a system failure.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::DuplicateStudent { .. }
                | Self::StudentNotFound { .. }
                | Self::EmptyField { .. }
                | Self::InvalidField { .. }
                | Self::InvalidDate { .. }
                | Self::NoSelection { .. }
                | Self::AuthenticationFailed
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_student_display() {
        let err = Error::DuplicateStudent {
            id: "S001".to_string(),
        };
        assert_eq!(err.to_string(), "student id 'S001' already exists");
    }

    #[test]
    fn test_invalid_date_display() {
        let err = Error::InvalidDate {
            input: "2025-13-01".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("2025-13-01"));
        assert!(msg.contains("YYYY-MM-DD"));
    }

    #[test]
    fn test_empty_field_display() {
        let err = Error::EmptyField { field: "name" };
        assert_eq!(err.to_string(), "name must not be empty");
    }

    #[test]
    fn test_no_selection_display() {
        let err = Error::NoSelection { action: "marking" };
        assert_eq!(err.to_string(), "no students selected for marking");
    }

    #[test]
    fn test_is_validation() {
        assert!(Error::AuthenticationFailed.is_validation());
        assert!(Error::EmptyField { field: "id" }.is_validation());
        assert!(Error::invalid_field("name", "contains a comma").is_validation());
        assert!(!Error::internal("bug").is_validation());

        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        assert!(!Error::file_write("/tmp/x.csv", io_err).is_validation());
    }

    #[test]
    fn test_file_write_display() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err = Error::file_write("/data/students.csv", io_err);
        let msg = err.to_string();
        assert!(msg.contains("/data/students.csv"));
        assert!(msg.contains("access denied"));
    }

    #[test]
    fn test_config_validation_error_display() {
        let err = Error::ConfigValidation {
            message: "storage.roster must not be empty".to_string(),
        };
        assert!(err.to_string().contains("storage.roster"));
    }

    #[test]
    fn test_directory_create_error_display() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err = Error::DirectoryCreate {
            path: PathBuf::from("/root/forbidden"),
            source: io_err,
        };
        assert!(err.to_string().contains("/root/forbidden"));
    }
}
