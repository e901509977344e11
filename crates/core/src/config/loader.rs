//! Configuration file loading

use super::schema::ConfigSchema;
use crate::error::{Error, ErrorCode, Result, ResultExt};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Configuration wrapper
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Parsed configuration
    pub schema: ConfigSchema,
    /// File the configuration was read from, if any
    pub path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from a file path (or the standard locations) and
    /// apply `PANTRY_*` environment overrides.
    ///
    /// An explicit path that does not exist is an error; when no path is
    /// given and no file is found, defaults are used.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(p) if !p.exists() => return Err(Error::config_not_found(p)),
            Some(p) => Some(p.to_path_buf()),
            None => find_config_file(),
        };

        let mut schema = if let Some(ref p) = config_path {
            debug!(path = %p.display(), "Loading configuration file");
            load_config_file(p)?
        } else {
            ConfigSchema::default()
        };

        apply_env_overrides(&mut schema, |key| std::env::var(key).ok())?;

        Ok(Self {
            schema,
            path: config_path,
        })
    }
}

/// Find configuration file in standard locations
fn find_config_file() -> Option<PathBuf> {
    let mut candidates = vec![
        PathBuf::from("pantry.toml"),
        PathBuf::from(".pantry.toml"),
        PathBuf::from(".config/pantry.toml"),
    ];
    if let Some(dir) = dirs::config_dir() {
        candidates.push(dir.join("pantry").join("pantry.toml"));
    }

    candidates.into_iter().find(|candidate| candidate.exists())
}

/// Load and parse a TOML configuration file
fn load_config_file(path: &Path) -> Result<ConfigSchema> {
    let content = std::fs::read_to_string(path)
        .map_err(Error::from)
        .context(format!("Failed to read config file {}", path.display()))?;

    parse_config(&content).context(format!("Failed to parse config file {}", path.display()))
}

/// Parse configuration from TOML text
pub(crate) fn parse_config(content: &str) -> Result<ConfigSchema> {
    let schema: ConfigSchema = toml::from_str(content)?;
    validate(&schema)?;
    Ok(schema)
}

fn validate(schema: &ConfigSchema) -> Result<()> {
    if schema.server.port == 0 {
        return Err(Error::new(
            ErrorCode::ConfigValidationError,
            "server.port must be greater than zero",
        ));
    }
    if schema.nutrition.remote_timeout_secs == 0 {
        return Err(Error::new(
            ErrorCode::ConfigValidationError,
            "nutrition.remote_timeout_secs must be greater than zero",
        ));
    }
    if schema.inventory.expiring_window_days < 0 {
        return Err(Error::new(
            ErrorCode::ConfigValidationError,
            "inventory.expiring_window_days cannot be negative",
        ));
    }
    Ok(())
}

/// Apply environment overrides on top of file values
///
/// Recognised keys: `PANTRY_HOST`, `PANTRY_PORT`, `PANTRY_LOG_LEVEL`,
/// `PANTRY_LOG_JSON`, `PANTRY_REMOTE_LOOKUP`, `PANTRY_REMOTE_TIMEOUT_SECS`.
pub(crate) fn apply_env_overrides<F>(schema: &mut ConfigSchema, lookup: F) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(host) = lookup("PANTRY_HOST") {
        schema.server.host = host;
    }
    if let Some(port) = lookup("PANTRY_PORT") {
        schema.server.port = port
            .parse()
            .map_err(|_| Error::invalid_config_value("PANTRY_PORT", &port))?;
    }
    if let Some(level) = lookup("PANTRY_LOG_LEVEL") {
        schema.logging.level = level;
    }
    if let Some(json) = lookup("PANTRY_LOG_JSON") {
        schema.logging.json = parse_flag("PANTRY_LOG_JSON", &json)?;
    }
    if let Some(remote) = lookup("PANTRY_REMOTE_LOOKUP") {
        schema.nutrition.remote_lookup = parse_flag("PANTRY_REMOTE_LOOKUP", &remote)?;
    }
    if let Some(secs) = lookup("PANTRY_REMOTE_TIMEOUT_SECS") {
        schema.nutrition.remote_timeout_secs = secs
            .parse()
            .map_err(|_| Error::invalid_config_value("PANTRY_REMOTE_TIMEOUT_SECS", &secs))?;
    }
    validate(schema)
}

fn parse_flag(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(Error::invalid_config_value(key, value)),
    }
}
