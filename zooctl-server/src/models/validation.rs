//! Validation error types

use std::fmt;

/// Validation error for request input and domain models
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Field is empty when it shouldn't be
    Empty { field: &'static str },

    /// Required field was not supplied
    Missing { field: &'static str },

    /// Value could not be coerced to the expected type
    InvalidFormat { field: &'static str, reason: &'static str },

    /// Request body could not be decoded
    InvalidBody(String),

    /// Query string could not be decoded
    InvalidQuery(String),

    /// Update request carried no fields
    NothingToUpdate,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{} cannot be empty", field),
            Self::Missing { field } => write!(f, "{} is required", field),
            Self::InvalidFormat { field, reason } => write!(f, "{}: {}", field, reason),
            Self::InvalidBody(message) => write!(f, "invalid request body: {}", message),
            Self::InvalidQuery(message) => write!(f, "invalid query string: {}", message),
            Self::NothingToUpdate => write!(f, "no fields to update"),
        }
    }
}

impl std::error::Error for ValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ValidationError::InvalidFormat {
            field: "animalId",
            reason: "must be an integer",
        };
        assert_eq!(err.to_string(), "animalId: must be an integer");
        assert_eq!(
            ValidationError::Missing { field: "habitatId" }.to_string(),
            "habitatId is required"
        );
    }
}
