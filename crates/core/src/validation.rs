//! Input validation
//!
//! Fluent validation for request payloads (user profiles, ingredient
//! records). All failures are collected so a client gets every problem in one
//! response instead of fixing them one at a time.
//!
//! # Example
//!
//! ```rust
//! use pantry_core::validation::Validator;
//!
//! let result = Validator::new()
//!     .required("name", "牛奶")
//!     .max_chars("name", "牛奶", 64)
//!     .non_negative("quantity", 2.0)
//!     .validate();
//!
//! assert!(result.is_valid());
//! ```

use crate::error::{Error, ErrorCode, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Validation error
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationError {
    /// Field that failed validation
    pub field: String,
    /// Error message
    pub message: String,
    /// Machine-readable rule name
    pub code: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validation result
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationResult {
    errors: Vec<ValidationError>,
}

impl ValidationResult {
    /// Create a new empty result
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if validation passed
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Get all errors
    #[must_use]
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    /// Add an error
    pub fn add_error(&mut self, field: &str, code: &str, message: impl Into<String>) {
        self.errors.push(ValidationError {
            field: field.to_string(),
            message: message.into(),
            code: code.to_string(),
        });
    }

    /// Convert to Result type
    pub fn into_result(self) -> Result<()> {
        if self.is_valid() {
            Ok(())
        } else {
            let messages: Vec<String> = self.errors.iter().map(ToString::to_string).collect();
            Err(Error::new(
                ErrorCode::ValidationError,
                format!("Validation failed: {}", messages.join("; ")),
            ))
        }
    }
}

/// Fluent validator builder
#[derive(Default)]
pub struct Validator {
    result: ValidationResult,
}

impl Validator {
    /// Create a new validator
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate that a field is not blank
    #[must_use]
    pub fn required(mut self, field: &str, value: &str) -> Self {
        if value.trim().is_empty() {
            self.result.add_error(field, "REQUIRED", "Field is required");
        }
        self
    }

    /// Validate that an optional field is present and not blank
    #[must_use]
    pub fn present<T>(mut self, field: &str, value: Option<&T>) -> Self {
        if value.is_none() {
            self.result.add_error(field, "REQUIRED", "Field is required");
        }
        self
    }

    /// Validate maximum length in characters
    #[must_use]
    pub fn max_chars(mut self, field: &str, value: &str, max: usize) -> Self {
        let count = value.chars().count();
        if count > max {
            self.result.add_error(
                field,
                "MAX_LENGTH",
                format!("Must be at most {max} characters (got {count})"),
            );
        }
        self
    }

    /// Validate against a regex pattern
    #[must_use]
    pub fn pattern(mut self, field: &str, value: &str, pattern: &Regex, description: &str) -> Self {
        if !pattern.is_match(value) {
            self.result
                .add_error(field, "PATTERN", format!("Must match {description}"));
        }
        self
    }

    /// Validate a numeric range (inclusive)
    #[must_use]
    pub fn range<T: PartialOrd + std::fmt::Display>(
        mut self,
        field: &str,
        value: T,
        min: T,
        max: T,
    ) -> Self {
        if value < min || value > max {
            self.result
                .add_error(field, "RANGE", format!("Must be between {min} and {max}"));
        }
        self
    }

    /// Validate that a number is finite and not negative
    #[must_use]
    pub fn non_negative(mut self, field: &str, value: f64) -> Self {
        if !value.is_finite() || value < 0.0 {
            self.result
                .add_error(field, "NON_NEGATIVE", "Must be a non-negative number");
        }
        self
    }

    /// Complete validation and return result
    #[must_use]
    pub fn validate(self) -> ValidationResult {
        self.result
    }
}
