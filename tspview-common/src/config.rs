//! Configuration loading and config file resolution
//!
//! Config file resolution priority:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable (`TSPVIEW_CONFIG`)
//! 3. User config file (`<config dir>/tspview/config.toml`)
//! 4. Compiled defaults (fallback)
//!
//! A missing file at the user location is not an error: defaults are used
//! and a warning is logged. A file named explicitly (CLI or environment)
//! must exist and parse.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Environment variable naming an explicit config file
pub const CONFIG_ENV_VAR: &str = "TSPVIEW_CONFIG";

/// Default port of the trace server
pub const TRACE_SERVER_DEFAULT_PORT: u16 = 8080;

/// Sample count used when no view window is supplied
pub const DEFAULT_RESOLUTION: usize = 1120;

/// Configuration loaded from TOML
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub query: QueryConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Trace server connection settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Base URL of the protocol API, e.g. `http://localhost:8080/tsp/api`
    #[serde(default = "default_server_url")]
    pub url: String,

    /// Per-request timeout
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            url: default_server_url(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl ServerConfig {
    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.timeout_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryConfig {
    /// Samples over the whole trace when the caller gives no view window
    #[serde(default = "default_resolution")]
    pub default_resolution: usize,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            default_resolution: default_resolution(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_server_url() -> String {
    format!("http://localhost:{}/tsp/api", TRACE_SERVER_DEFAULT_PORT)
}

fn default_timeout_ms() -> u64 {
    30_000
}

fn default_resolution() -> usize {
    DEFAULT_RESOLUTION
}

fn default_log_level() -> String {
    "info".to_string()
}

impl TomlConfig {
    /// Reject values the provider cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.server.url.trim().is_empty() {
            return Err(Error::Config("server.url must not be empty".to_string()));
        }
        if self.server.timeout_ms == 0 {
            return Err(Error::Config("server.timeout_ms must be positive".to_string()));
        }
        if self.query.default_resolution == 0 {
            return Err(Error::Config(
                "query.default_resolution must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Default user config file location for the platform
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("tspview").join("config.toml"))
}

/// Pick the config file to read, if any
pub fn resolve_config_path(cli_arg: Option<&Path>) -> Option<PathBuf> {
    // Priority 1: Command-line argument
    if let Some(path) = cli_arg {
        return Some(path.to_path_buf());
    }

    // Priority 2: Environment variable
    if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
        if !path.is_empty() {
            return Some(PathBuf::from(path));
        }
    }

    // Priority 3: User config file, only if present
    default_config_path().filter(|path| path.exists())
}

/// Read and parse one TOML config file
pub fn load_toml_config(path: &Path) -> Result<TomlConfig> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("Failed to read config file {:?}: {}", path, e)))?;

    let config: TomlConfig = toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Failed to parse TOML {:?}: {}", path, e)))?;

    config.validate()?;
    Ok(config)
}

/// Resolve and load configuration, falling back to compiled defaults
pub fn load_config(cli_arg: Option<&Path>) -> Result<TomlConfig> {
    match resolve_config_path(cli_arg) {
        Some(path) => {
            let config = load_toml_config(&path)?;
            info!("Loaded configuration from {:?}", path);
            Ok(config)
        }
        None => {
            warn!("No config file found, using built-in defaults");
            Ok(TomlConfig::default())
        }
    }
}

/// Write configuration as TOML, creating parent directories
pub fn write_toml_config(config: &TomlConfig, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)
        .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
    std::fs::write(path, content)?;
    Ok(())
}
