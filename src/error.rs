//! Custom error types for carehome-advisor
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions. Field-level questionnaire failures are not
//! errors; they are reported as data (see `questionnaire::validation`).

use thiserror::Error;

/// The main error type for carehome-advisor operations
#[derive(Error, Debug)]
pub enum AdvisorError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// YAML serialization/deserialization errors
    #[error("YAML error: {0}")]
    Yaml(String),

    /// Validation errors for inputs and reference data
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Questionnaire definition errors
    #[error("Questionnaire definition error: {0}")]
    Definition(String),

    /// Submission endpoint errors
    #[error("Submission failed: {0}")]
    Submission(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),
}

impl AdvisorError {
    /// Create a "not found" error for care homes
    pub fn home_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Care home",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for questionnaire definitions
    pub fn questionnaire_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Questionnaire",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<std::io::Error> for AdvisorError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for AdvisorError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<serde_yaml::Error> for AdvisorError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Yaml(err.to_string())
    }
}

/// Result type alias for carehome-advisor operations
pub type AdvisorResult<T> = Result<T, AdvisorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AdvisorError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_not_found_error() {
        let err = AdvisorError::home_not_found("manor_hall");
        assert_eq!(err.to_string(), "Care home not found: manor_hall");
        assert!(err.is_not_found());
        assert!(!err.is_validation());
    }

    #[test]
    fn test_submission_error() {
        let err = AdvisorError::Submission("endpoint unavailable".into());
        assert_eq!(err.to_string(), "Submission failed: endpoint unavailable");
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: AdvisorError = io_err.into();
        assert!(matches!(err, AdvisorError::Io(_)));
    }

    #[test]
    fn test_from_yaml_error() {
        let yaml_err = serde_yaml::from_str::<Vec<u32>>("not: [a list").unwrap_err();
        let err: AdvisorError = yaml_err.into();
        assert!(matches!(err, AdvisorError::Yaml(_)));
    }
}
