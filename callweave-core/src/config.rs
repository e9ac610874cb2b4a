//! Configuration loading and management
//!
//! Configuration is loaded from `~/.config/callweave/config.toml`
//!
//! This module follows the XDG Base Directory Specification:
//! - Config: `$XDG_CONFIG_HOME/callweave/` (~/.config/callweave/)
//! - State/Logs: `$XDG_STATE_HOME/callweave/` (~/.local/state/callweave/)

use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::PathBuf;

/// Returns a best-effort home directory path.
fn home_dir() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Returns XDG_CONFIG_HOME or ~/.config
fn xdg_config_home() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".config"))
}

/// Returns XDG_STATE_HOME or ~/.local/state
fn xdg_state_home() -> PathBuf {
    std::env::var("XDG_STATE_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".local/state"))
}

/// Main configuration struct
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    /// Zoom server-to-server OAuth app credentials
    #[serde(default)]
    pub zoom: ZoomConfig,

    /// Call path resolver tuning
    #[serde(default)]
    pub resolver: ResolverConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Zoom server-to-server OAuth app configuration.
///
/// All three credential fields come from the app's page in the Zoom
/// marketplace. The URL overrides exist for testing against a stand-in
/// server and are rarely set.
#[derive(Debug, Deserialize, Clone)]
pub struct ZoomConfig {
    /// Zoom account ID
    pub account_id: Option<String>,

    /// OAuth client ID
    pub client_id: Option<String>,

    /// OAuth client secret
    pub client_secret: Option<String>,

    /// Override for the OAuth base URL (default `https://zoom.us/oauth`)
    pub oauth_url: Option<String>,

    /// Override for the API base URL (default `https://api.zoom.us/v2`)
    pub api_url: Option<String>,

    /// HTTP request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            account_id: None,
            client_id: None,
            client_secret: None,
            oauth_url: None,
            api_url: None,
            timeout_secs: default_timeout(),
        }
    }
}

impl ZoomConfig {
    /// Check whether all required credentials are present
    pub fn is_ready(&self) -> bool {
        self.account_id.is_some() && self.client_id.is_some() && self.client_secret.is_some()
    }

    /// Validate configuration, returning error message if invalid
    pub fn validate(&self) -> Result<()> {
        if self.account_id.as_deref().unwrap_or("").is_empty() {
            return Err(Error::Config("zoom.account_id is required".to_string()));
        }
        if self.client_id.as_deref().unwrap_or("").is_empty() {
            return Err(Error::Config("zoom.client_id is required".to_string()));
        }
        if self.client_secret.as_deref().unwrap_or("").is_empty() {
            return Err(Error::Config("zoom.client_secret is required".to_string()));
        }
        if self.timeout_secs == 0 {
            return Err(Error::Config(
                "zoom.timeout_secs must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

fn default_timeout() -> u64 {
    30
}

/// Call path resolver configuration.
///
/// The call-history detail endpoint is rate limited, so the number of
/// in-flight lookups is bounded.
#[derive(Debug, Deserialize, Clone)]
pub struct ResolverConfig {
    /// Max concurrent call path lookups
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            concurrency: default_concurrency(),
        }
    }
}

impl ResolverConfig {
    /// Validate configuration, returning error message if invalid
    pub fn validate(&self) -> Result<()> {
        if self.concurrency == 0 || self.concurrency > 16 {
            return Err(Error::Config(
                "resolver.concurrency must be between 1 and 16".to_string(),
            ));
        }
        Ok(())
    }
}

fn default_concurrency() -> usize {
    4
}

/// Logging configuration
#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Maximum number of log files to keep
    #[serde(default = "default_max_log_files")]
    pub max_files: usize,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            max_files: default_max_log_files(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_max_log_files() -> usize {
    5
}

impl Config {
    /// Load configuration from the default path
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if !config_path.exists() {
            tracing::info!("No config file found at {:?}, using defaults", config_path);
            return Ok(Config::default());
        }

        Self::load_from(&config_path)
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("failed to read config file {:?}: {}", path, e)))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("failed to parse config: {}", e)))?;

        Ok(config)
    }

    /// Returns the default config file path
    ///
    /// `$XDG_CONFIG_HOME/callweave/config.toml` (~/.config/callweave/config.toml)
    pub fn config_path() -> PathBuf {
        xdg_config_home().join("callweave").join("config.toml")
    }

    /// Returns the state directory path (for logs)
    ///
    /// `$XDG_STATE_HOME/callweave/` (~/.local/state/callweave/)
    pub fn state_dir() -> PathBuf {
        xdg_state_home().join("callweave")
    }

    /// Returns the log file path
    ///
    /// `$XDG_STATE_HOME/callweave/callweave.log` (~/.local/state/callweave/callweave.log)
    pub fn log_path() -> PathBuf {
        Self::state_dir().join("callweave.log")
    }

    /// Ensure XDG base directory environment variables are set.
    ///
    /// This is mainly for CLI binaries that want explicit, stable path
    /// behavior before invoking other components that read these env vars.
    pub fn ensure_xdg_env() {
        let home = home_dir();

        if std::env::var("XDG_STATE_HOME").is_err() {
            std::env::set_var("XDG_STATE_HOME", home.join(".local/state"));
        }

        if std::env::var("XDG_CONFIG_HOME").is_err() {
            std::env::set_var("XDG_CONFIG_HOME", home.join(".config"));
        }
    }
}
