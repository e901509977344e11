//! Error types for the nutrition crate.

use std::time::Duration;
use thiserror::Error;

/// Result type alias for nutrition operations.
pub type Result<T> = std::result::Result<T, NutritionError>;

/// Errors that can occur while building tables or querying remote sources.
///
/// Resolution itself never fails; remote errors are logged and the next
/// stage is tried.
#[derive(Debug, Error)]
pub enum NutritionError {
    /// A table entry is malformed
    #[error("Invalid table entry '{name}': {reason}")]
    InvalidEntry {
        /// Entry name
        name: String,
        /// What is wrong with it
        reason: String,
    },

    /// Two entries share a canonical name
    #[error("Duplicate table entry: {0}")]
    DuplicateName(String),

    /// The remote source failed
    #[error("Remote lookup via {source_name} failed: {message}")]
    Remote {
        /// Remote source name
        source_name: String,
        /// Failure description
        message: String,
    },

    /// The remote source did not answer in time
    #[error("Remote lookup timed out after {0:?}")]
    Timeout(Duration),
}

impl NutritionError {
    /// Build a remote failure
    pub fn remote(source_name: impl Into<String>, message: impl std::fmt::Display) -> Self {
        Self::Remote {
            source_name: source_name.into(),
            message: message.to_string(),
        }
    }
}
