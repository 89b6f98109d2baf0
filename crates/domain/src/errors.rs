//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Error)]
pub enum DomainError {
    /// Date parsing or formatting error
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// Entity not found
    #[error("{entity_type} not found: {id}")]
    NotFound { entity_type: String, id: String },

    /// Validation failed
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

impl DomainError {
    /// Create a not found error
    pub fn not_found(entity_type: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: entity_type.into(),
            id: id.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_creates_correct_error() {
        let err = DomainError::not_found("DiaryEntry", "2024-09-25");
        match err {
            DomainError::NotFound { entity_type, id } => {
                assert_eq!(entity_type, "DiaryEntry");
                assert_eq!(id, "2024-09-25");
            },
            _ => unreachable!("Expected NotFound error"),
        }
    }

    #[test]
    fn not_found_error_message_is_correct() {
        let err = DomainError::not_found("DiaryEntry", "2024-09-25");
        assert_eq!(err.to_string(), "DiaryEntry not found: 2024-09-25");
    }

    #[test]
    fn invalid_date_error_message() {
        let err = DomainError::InvalidDate("not-a-date".to_string());
        assert_eq!(err.to_string(), "Invalid date: not-a-date");
    }

    #[test]
    fn validation_error_message() {
        let err = DomainError::ValidationError("text is required".to_string());
        assert_eq!(err.to_string(), "Validation failed: text is required");
    }
}
