//! Configuration loading and config file resolution
//!
//! Binky is configured from a single TOML file. Every field has a built-in
//! default so a missing file (or a missing section) still yields a usable
//! configuration:
//!
//! ```toml
//! [general.http]
//! address = "0.0.0.0"
//! port = 8000
//!
//! [lms]
//! address = "127.0.0.1"
//! port = 9000
//! timeout_ms = 5000
//!
//! [db]
//! sqlite = "binky.db"
//!
//! [logging]
//! level = "info"
//! ```
//!
//! Config file resolution order:
//! 1. Command-line argument (highest priority)
//! 2. `BINKY_CONFIG` environment variable
//! 3. `binky.toml` in the working directory
//! 4. `binky/binky.toml` in the platform config directory
//! 5. Built-in defaults (fallback)

use crate::{Error, Result};
use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default config file name, looked up in the working directory
pub const CONFIG_FILENAME: &str = "binky.toml";

/// Environment variable naming an explicit config file
pub const CONFIG_ENV_VAR: &str = "BINKY_CONFIG";

/// Complete application configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct BinkyConfig {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub lms: LmsConfig,

    #[serde(default)]
    pub db: DbConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct GeneralConfig {
    #[serde(default)]
    pub http: HttpConfig,
}

/// Listener for the WebSocket event endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    #[serde(default = "default_http_address")]
    pub address: String,

    #[serde(default = "default_http_port")]
    pub port: u16,
}

/// Logitech Media Server JSON-RPC endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct LmsConfig {
    #[serde(default = "default_lms_address")]
    pub address: String,

    #[serde(default = "default_lms_port")]
    pub port: u16,

    /// Upper bound for a single JSON-RPC round trip
    #[serde(default = "default_lms_timeout_ms")]
    pub timeout_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DbConfig {
    /// Path to the SQLite database file (relative or absolute)
    #[serde(default = "default_sqlite_path")]
    pub sqlite: PathBuf,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    ///
    /// `RUST_LOG` takes precedence when set.
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_http_address() -> String {
    "0.0.0.0".to_string()
}

fn default_http_port() -> u16 {
    8000
}

fn default_lms_address() -> String {
    "127.0.0.1".to_string()
}

fn default_lms_port() -> u16 {
    9000
}

fn default_lms_timeout_ms() -> u64 {
    5000
}

fn default_sqlite_path() -> PathBuf {
    PathBuf::from("binky.db")
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            address: default_http_address(),
            port: default_http_port(),
        }
    }
}

impl Default for LmsConfig {
    fn default() -> Self {
        Self {
            address: default_lms_address(),
            port: default_lms_port(),
            timeout_ms: default_lms_timeout_ms(),
        }
    }
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            sqlite: default_sqlite_path(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl HttpConfig {
    /// `address:port` string suitable for binding a listener
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.address, self.port)
    }
}

impl LmsConfig {
    /// JSON-RPC endpoint of the media server
    pub fn jsonrpc_url(&self) -> String {
        format!("http://{}:{}/jsonrpc.js", self.address, self.port)
    }

    /// Request timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl BinkyConfig {
    /// Parse configuration from TOML text
    pub fn from_toml_str(toml_str: &str) -> Result<Self> {
        toml::from_str(toml_str).map_err(|e| Error::Config(format!("Failed to parse TOML: {}", e)))
    }

    /// Read and parse a TOML configuration file
    pub fn from_file(path: &Path) -> Result<Self> {
        let toml_str = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read config file {}: {}", path.display(), e))
        })?;

        Self::from_toml_str(&toml_str)
    }
}

/// Where the loaded configuration came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    CommandLine(PathBuf),
    Environment(PathBuf),
    WorkingDirectory(PathBuf),
    UserConfigDir(PathBuf),
    Defaults,
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigSource::CommandLine(p) => write!(f, "{} (from command line)", p.display()),
            ConfigSource::Environment(p) => write!(f, "{} (from {})", p.display(), CONFIG_ENV_VAR),
            ConfigSource::WorkingDirectory(p) => write!(f, "{} (working directory)", p.display()),
            ConfigSource::UserConfigDir(p) => write!(f, "{} (user config directory)", p.display()),
            ConfigSource::Defaults => write!(f, "built-in defaults"),
        }
    }
}

/// Resolve which config file to use, without reading it
///
/// Explicit locations (command line, environment) are returned even when the
/// file does not exist so that loading reports the error. Implicit locations
/// are only returned if the file exists.
pub fn resolve_config_source(cli_arg: Option<&Path>) -> ConfigSource {
    // Priority 1: Command-line argument
    if let Some(path) = cli_arg {
        return ConfigSource::CommandLine(path.to_path_buf());
    }

    // Priority 2: Environment variable
    if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
        if !path.is_empty() {
            return ConfigSource::Environment(PathBuf::from(path));
        }
    }

    // Priority 3: Working directory
    let local = PathBuf::from(CONFIG_FILENAME);
    if local.exists() {
        return ConfigSource::WorkingDirectory(local);
    }

    // Priority 4: Platform config directory (~/.config/binky/binky.toml on Linux)
    if let Some(user_config) = dirs::config_dir().map(|d| d.join("binky").join(CONFIG_FILENAME)) {
        if user_config.exists() {
            return ConfigSource::UserConfigDir(user_config);
        }
    }

    ConfigSource::Defaults
}

/// Load configuration following the resolution order above
///
/// Returns the configuration together with its source so the caller can log
/// it once logging is initialized.
pub fn load_config(cli_arg: Option<&Path>) -> Result<(BinkyConfig, ConfigSource)> {
    let source = resolve_config_source(cli_arg);

    let config = match &source {
        ConfigSource::CommandLine(p)
        | ConfigSource::Environment(p)
        | ConfigSource::WorkingDirectory(p)
        | ConfigSource::UserConfigDir(p) => BinkyConfig::from_file(p)?,
        ConfigSource::Defaults => BinkyConfig::default(),
    };

    Ok((config, source))
}
