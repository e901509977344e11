//! USDA FoodData Central client for Pantry
//!
//! This crate provides the remote stage of the nutrition resolver: a resilient
//! HTTP client for the FoodData Central food search API.
//!
//! # Features
//!
//! - **Environment-based configuration**: API key, base URL and timeout from environment variables
//! - **Retry with exponential backoff**: Automatic retry for transient failures
//! - **Circuit breaker**: Stop calling the API during outages
//! - **Rate limiting**: Stay inside the API quota
//! - **Request correlation**: Track requests with unique IDs for debugging
//!
//! # Example
//!
//! ```rust,no_run
//! use pantry_api_client::UsdaClient;
//! use pantry_nutrition::Resolver;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = UsdaClient::new()?;
//!     let resolver = Resolver::default().with_remote(Arc::new(client));
//!
//!     for result in resolver.resolve("dragon fruit").await {
//!         println!("{} ({})", result.matched_name, result.source());
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod config;
pub mod endpoints;
pub mod error;
mod lookup;

pub use client::UsdaClient;
pub use config::{ClientConfig, Environment};
pub use error::{ApiError, ApiResult};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::client::UsdaClient;
    pub use crate::config::{ClientConfig, Environment};
    pub use crate::endpoints::FoodsApi;
    pub use crate::error::{ApiError, ApiResult};
}
