use thiserror::Error;

use crate::storage::RepositoryError;

/// Errors raised while validating request payloads.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Title cannot be empty")]
    EmptyTitle,
    #[error("Title too long (max {max} characters)")]
    TitleTooLong { max: usize },
    #[error("Event must end after it starts")]
    InvalidSchedule,
    #[error("Display name cannot be empty")]
    EmptyDisplayName,
    #[error("Invalid email address: {0}")]
    InvalidEmail(String),
}

impl From<ValidationError> for RepositoryError {
    fn from(err: ValidationError) -> Self {
        RepositoryError::InvalidData(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_display() {
        assert_eq!(
            ValidationError::TitleTooLong { max: 200 }.to_string(),
            "Title too long (max 200 characters)"
        );
        assert_eq!(
            ValidationError::InvalidEmail("nope".to_string()).to_string(),
            "Invalid email address: nope"
        );
    }

    #[test]
    fn test_validation_error_becomes_invalid_data() {
        let err: RepositoryError = ValidationError::EmptyTitle.into();
        assert_eq!(err, RepositoryError::InvalidData("Title cannot be empty".to_string()));
    }
}
