//! Core utilities for the Pantry services
//!
//! This crate provides functionality shared by every Pantry crate:
//!
//! - **Error handling**: errors with codes, context, and recovery suggestions
//! - **Configuration**: TOML-based configuration with environment overrides
//! - **Retry**: exponential backoff and a circuit breaker for upstream calls
//! - **Rate limiting**: token buckets keyed by endpoint
//! - **Validation**: fluent validation of user input
//! - **Health checks**: aggregate component checks into a report
//!
//! # Example
//!
//! ```rust,no_run
//! use pantry_core::config::Config;
//!
//! let config = Config::load(None).expect("invalid configuration");
//! println!("listening on {}", config.schema.server.bind_address());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod health;
pub mod rate_limit;
pub mod retry;
pub mod validation;

pub use error::{Error, ErrorCode, Result, ResultExt};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::{Config, ConfigSchema};
    pub use crate::error::{Error, ErrorCode, Result, ResultExt};
    pub use crate::health::{CheckResult, HealthReport, HealthStatus};
    pub use crate::rate_limit::{RateLimitConfig, RateLimiter};
    pub use crate::retry::{CircuitBreaker, CircuitBreakerConfig, CircuitState, RetryConfig};
    pub use crate::validation::{ValidationResult, Validator};
}
