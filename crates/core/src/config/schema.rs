//! Configuration schema definitions

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Root configuration schema
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ConfigSchema {
    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Nutrition lookup settings
    #[serde(default)]
    pub nutrition: NutritionConfig,

    /// Inventory settings
    #[serde(default)]
    pub inventory: InventoryConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,

    /// How long browsers may cache CORS preflight responses
    #[serde(default = "default_cors_max_age_secs")]
    pub cors_max_age_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_max_age_secs: default_cors_max_age_secs(),
        }
    }
}

impl ServerConfig {
    /// `host:port` string suitable for binding a listener
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_cors_max_age_secs() -> u64 {
    3600
}

/// Nutrition lookup configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NutritionConfig {
    /// Consult the remote nutrition API when local stages miss.
    /// Only takes effect when an API key is also configured.
    #[serde(default)]
    pub remote_lookup: bool,

    /// Upper bound on a single remote lookup
    #[serde(default = "default_remote_timeout_secs")]
    pub remote_timeout_secs: u64,
}

impl Default for NutritionConfig {
    fn default() -> Self {
        Self {
            remote_lookup: false,
            remote_timeout_secs: default_remote_timeout_secs(),
        }
    }
}

impl NutritionConfig {
    /// Remote lookup timeout as a [`Duration`]
    #[must_use]
    pub fn remote_timeout(&self) -> Duration {
        Duration::from_secs(self.remote_timeout_secs)
    }
}

fn default_remote_timeout_secs() -> u64 {
    5
}

/// Inventory configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryConfig {
    /// Default look-ahead window for the expiring-ingredients query
    #[serde(default = "default_expiring_window_days")]
    pub expiring_window_days: i64,
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            expiring_window_days: default_expiring_window_days(),
        }
    }
}

fn default_expiring_window_days() -> i64 {
    7
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter when `RUST_LOG` is not set
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of the compact format
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
