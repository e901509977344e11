//! Error types for the API client

use pantry_nutrition::NutritionError;
use thiserror::Error;

/// Result type alias for API operations
pub type ApiResult<T> = Result<T, ApiError>;

/// API client errors
#[derive(Error, Debug)]
pub enum ApiError {
    /// HTTP request failed, with the request URL stripped
    #[error("HTTP request failed: {0}")]
    Request(reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// No API key configured
    #[error("No API key configured (set {0})")]
    MissingApiKey(&'static str),

    /// API returned an error response
    #[error("API error ({status}): {message}")]
    ApiResponse {
        /// HTTP status code
        status: u16,
        /// Error message from API
        message: String,
    },

    /// Circuit breaker is open
    #[error("Circuit breaker is open - service temporarily unavailable")]
    CircuitOpen,

    /// Rate limited
    #[error("Rate limited - too many requests")]
    RateLimited,

    /// All retry attempts exhausted
    #[error("All {attempts} retry attempts failed: {last_error}")]
    RetriesExhausted {
        /// Number of attempts made
        attempts: u32,
        /// Last error message
        last_error: String,
    },
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        Self::Request(err.without_url())
    }
}

impl ApiError {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an API response error
    pub fn api_response(status: u16, message: impl Into<String>) -> Self {
        Self::ApiResponse {
            status,
            message: message.into(),
        }
    }

    /// Check if this error is retryable
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            // Retry on connection errors, timeouts
            Self::Request(e) => e.is_connect() || e.is_timeout(),
            // Retry on 5xx errors and 429 (rate limited)
            Self::ApiResponse { status, .. } => *status >= 500 || *status == 429,
            Self::CircuitOpen
            | Self::RateLimited
            | Self::Config(_)
            | Self::MissingApiKey(_)
            | Self::Json(_)
            | Self::RetriesExhausted { .. } => false,
        }
    }

    /// Check if this is a client error (4xx)
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::ApiResponse { status, .. } if (400..500).contains(status))
    }

    /// Check if this is a server error (5xx)
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        matches!(self, Self::ApiResponse { status, .. } if *status >= 500)
    }
}

impl From<ApiError> for NutritionError {
    fn from(err: ApiError) -> Self {
        NutritionError::remote("usda", err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable() {
        assert!(ApiError::api_response(503, "unavailable").is_retryable());
        assert!(ApiError::api_response(429, "slow down").is_retryable());
        assert!(!ApiError::api_response(403, "bad key").is_retryable());
        assert!(!ApiError::CircuitOpen.is_retryable());
        assert!(!ApiError::MissingApiKey("USDA_API_KEY").is_retryable());
    }

    #[test]
    fn test_status_classes() {
        assert!(ApiError::api_response(404, "").is_client_error());
        assert!(ApiError::api_response(500, "").is_server_error());
        assert!(!ApiError::RateLimited.is_client_error());
    }

    #[test]
    fn test_into_nutrition_error() {
        let err: NutritionError = ApiError::RateLimited.into();
        assert!(err.to_string().contains("usda"));
        assert!(err.to_string().contains("Rate limited"));
    }
}
