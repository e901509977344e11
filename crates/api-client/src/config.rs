//! Configuration for the USDA FoodData Central client
//!
//! Supports environment-based configuration with sensible defaults.

use crate::error::{ApiError, ApiResult};
use pantry_core::rate_limit::RateLimitConfig;
use pantry_core::retry::RetryConfig;
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

/// Public FoodData Central endpoint
pub const DEFAULT_USDA_URL: &str = "https://api.nal.usda.gov/fdc/v1";

/// Data types searched by default
pub const DEFAULT_DATA_TYPES: &str = "Foundation,SR Legacy";

/// Environment variable holding the API key
pub const API_KEY_VAR: &str = "USDA_API_KEY";

/// Environment types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development
    Development,
    /// Staging environment
    Staging,
    /// Production environment
    #[default]
    Production,
}

impl Environment {
    /// Parse from a `PANTRY_ENV` value
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "development" | "dev" | "local" => Self::Development,
            "staging" | "stage" => Self::Staging,
            _ => Self::Production,
        }
    }
}

/// Client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the FoodData Central API
    pub base_url: String,
    /// API key; the remote stage stays off without one
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    /// Per-request timeout
    #[serde(with = "duration_secs")]
    pub timeout: Duration,
    /// Results requested per search
    pub page_size: u32,
    /// Comma-separated FoodData Central data types
    pub data_types: String,
    /// Retry configuration
    pub retry: RetryConfig,
    /// Rate limit configuration
    pub rate_limit: RateLimitConfig,
    /// Current environment
    pub environment: Environment,
}

mod duration_secs {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        duration.as_secs().serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_USDA_URL.to_string(),
            api_key: None,
            timeout: Duration::from_secs(5),
            page_size: 3,
            data_types: DEFAULT_DATA_TYPES.to_string(),
            retry: RetryConfig::quick(),
            rate_limit: RateLimitConfig::per_minute(30),
            environment: Environment::default(),
        }
    }
}

impl ClientConfig {
    /// Create configuration from environment variables
    ///
    /// Reads the following environment variables:
    /// - `USDA_API_KEY`: API key (optional; no key means no remote lookups)
    /// - `USDA_BASE_URL`: Base URL override
    /// - `USDA_TIMEOUT_SECS`: Request timeout in seconds
    /// - `PANTRY_ENV`: Environment (development/staging/production)
    pub fn from_env() -> ApiResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Create configuration from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> ApiResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = lookup("PANTRY_ENV")
            .map(|v| Environment::parse(&v))
            .unwrap_or_default();

        let base_url = lookup("USDA_BASE_URL").unwrap_or_else(|| DEFAULT_USDA_URL.to_string());
        let api_key = lookup(API_KEY_VAR).filter(|key| !key.trim().is_empty());

        let timeout = match lookup("USDA_TIMEOUT_SECS") {
            Some(secs) => secs
                .parse()
                .map(Duration::from_secs)
                .map_err(|_| ApiError::config(format!("USDA_TIMEOUT_SECS is not a number: {secs}")))?,
            None => Duration::from_secs(5),
        };

        // Fail fast locally, retry a little elsewhere
        let retry = match environment {
            Environment::Development => RetryConfig::no_retry(),
            Environment::Staging | Environment::Production => RetryConfig::quick(),
        };

        let config = Self {
            base_url,
            api_key,
            timeout,
            environment,
            retry,
            ..Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Builder-style method to set base URL
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Builder-style method to set the API key
    #[must_use]
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Builder-style method to set timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Builder-style method to set page size
    #[must_use]
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    /// Builder-style method to set retry config
    #[must_use]
    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// Builder-style method to set rate limit config
    #[must_use]
    pub fn with_rate_limit(mut self, rate_limit: RateLimitConfig) -> Self {
        self.rate_limit = rate_limit;
        self
    }

    /// Whether an API key is present
    #[must_use]
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Validate the configuration
    pub fn validate(&self) -> ApiResult<()> {
        if self.base_url.is_empty() {
            return Err(ApiError::config("base_url cannot be empty"));
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ApiError::config("base_url must start with http:// or https://"));
        }

        if self.timeout.is_zero() {
            return Err(ApiError::config("timeout cannot be zero"));
        }

        if !(1..=200).contains(&self.page_size) {
            return Err(ApiError::config("page_size must be between 1 and 200"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, DEFAULT_USDA_URL);
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.page_size, 3);
        assert!(!config.has_api_key());
    }

    #[test]
    fn test_from_lookup() {
        let config = ClientConfig::from_lookup(lookup(&[
            ("USDA_API_KEY", "abc123"),
            ("USDA_TIMEOUT_SECS", "2"),
            ("PANTRY_ENV", "dev"),
        ]))
        .unwrap();

        assert_eq!(config.api_key.as_deref(), Some("abc123"));
        assert_eq!(config.timeout, Duration::from_secs(2));
        assert_eq!(config.environment, Environment::Development);
        assert_eq!(config.retry.max_attempts, 1);
    }

    #[test]
    fn test_blank_key_is_no_key() {
        let config = ClientConfig::from_lookup(lookup(&[("USDA_API_KEY", "  ")])).unwrap();
        assert!(!config.has_api_key());
    }

    #[test]
    fn test_bad_timeout_rejected() {
        let err = ClientConfig::from_lookup(lookup(&[("USDA_TIMEOUT_SECS", "soon")])).unwrap_err();
        assert!(matches!(err, ApiError::Config(_)));

        assert!(ClientConfig::from_lookup(lookup(&[("USDA_TIMEOUT_SECS", "0")])).is_err());
    }

    #[test]
    fn test_validation() {
        assert!(ClientConfig::default().validate().is_ok());
        assert!(ClientConfig::default().with_base_url("").validate().is_err());
        assert!(ClientConfig::default().with_base_url("ftp://x").validate().is_err());
        assert!(ClientConfig::default().with_page_size(0).validate().is_err());
    }

    #[test]
    fn test_api_key_not_serialized() {
        let json = serde_json::to_string(&ClientConfig::default().with_api_key("secret")).unwrap();
        assert!(!json.contains("secret"));
    }
}
