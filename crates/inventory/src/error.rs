//! Error types for the inventory crate.

use pantry_core::ErrorCode;
use thiserror::Error;
use uuid::Uuid;

/// Result type alias for inventory operations.
pub type Result<T> = std::result::Result<T, InventoryError>;

/// Errors that can occur while reading or changing an inventory.
#[derive(Debug, Error)]
pub enum InventoryError {
    /// No user with this id
    #[error("User not found: {0}")]
    UserNotFound(Uuid),

    /// No ingredient with this id belonging to the user
    #[error("Ingredient not found: {0}")]
    IngredientNotFound(Uuid),

    /// Username already registered
    #[error("Username already exists: {0}")]
    UsernameTaken(String),

    /// Payload failed validation
    #[error("{0}")]
    Validation(String),
}

impl InventoryError {
    /// Shared error code for API mapping
    #[must_use]
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::UserNotFound(_) | Self::IngredientNotFound(_) => ErrorCode::NotFound,
            Self::UsernameTaken(_) => ErrorCode::Conflict,
            Self::Validation(_) => ErrorCode::ValidationError,
        }
    }

    /// Recovery hint shown to API clients
    #[must_use]
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::UserNotFound(_) => Some("Create the user with POST /api/users first"),
            Self::IngredientNotFound(_) => {
                Some("List ingredients with GET /api/users/{user_id}/ingredients")
            }
            Self::UsernameTaken(_) => Some("Choose a different username"),
            Self::Validation(_) => None,
        }
    }
}

impl From<pantry_core::Error> for InventoryError {
    fn from(err: pantry_core::Error) -> Self {
        Self::Validation(err.message)
    }
}

impl From<InventoryError> for pantry_core::Error {
    fn from(err: InventoryError) -> Self {
        let mut converted = pantry_core::Error::new(err.code(), err.to_string());
        if let Some(suggestion) = err.suggestion() {
            converted = converted.with_suggestion(suggestion);
        }
        converted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes() {
        assert_eq!(InventoryError::UserNotFound(Uuid::nil()).code(), ErrorCode::NotFound);
        assert_eq!(InventoryError::UsernameTaken("mum".into()).code(), ErrorCode::Conflict);
        assert_eq!(InventoryError::Validation("x".into()).code().http_status(), 400);
    }

    #[test]
    fn test_into_core_error_keeps_suggestion() {
        let err: pantry_core::Error = InventoryError::UsernameTaken("mum".into()).into();
        assert_eq!(err.code, ErrorCode::Conflict);
        assert!(err.suggestion.is_some());
    }
}
