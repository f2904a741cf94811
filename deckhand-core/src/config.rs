//! Configuration loading and management
//!
//! Configuration is loaded from `~/.config/deckhand/config.toml`
//!
//! This module follows the XDG Base Directory Specification:
//! - Config: `$XDG_CONFIG_HOME/deckhand/` (~/.config/deckhand/)
//! - Data: `$XDG_DATA_HOME/deckhand/` (~/.local/share/deckhand/)
//! - State/Logs: `$XDG_STATE_HOME/deckhand/` (~/.local/state/deckhand/)

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

/// Returns XDG_DATA_HOME or ~/.local/share
fn xdg_data_home() -> PathBuf {
    std::env::var("XDG_DATA_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".local/share"))
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
    /// Studio service connection
    #[serde(default)]
    pub server: ServerConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Studio service connection configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Base URL of the studio service
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// API key sent as a bearer token (optional for local servers)
    pub api_key: Option<String>,

    /// HTTP request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Max retry attempts for transient failures
    #[serde(default = "default_max_retries")]
    pub max_retries: usize,

    /// Seconds between background refreshes of workflow and history
    #[serde(default = "default_refresh_secs")]
    pub refresh_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            timeout_secs: default_timeout(),
            max_retries: default_max_retries(),
            refresh_secs: default_refresh_secs(),
        }
    }
}

impl ServerConfig {
    /// Validate configuration, returning error message if invalid
    pub fn validate(&self) -> Result<()> {
        if self.base_url.trim().is_empty() {
            return Err(Error::Config("server.base_url must not be empty".to_string()));
        }
        if self.refresh_secs == 0 {
            return Err(Error::Config(
                "server.refresh_secs must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_max_retries() -> usize {
    3
}

fn default_refresh_secs() -> u64 {
    2
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

        config.server.validate()?;

        Ok(config)
    }

    /// Returns the default config file path
    ///
    /// `$XDG_CONFIG_HOME/deckhand/config.toml` (~/.config/deckhand/config.toml)
    pub fn config_path() -> PathBuf {
        xdg_config_home().join("deckhand").join("config.toml")
    }

    /// Returns the data directory path
    ///
    /// `$XDG_DATA_HOME/deckhand/` (~/.local/share/deckhand/)
    pub fn data_dir() -> PathBuf {
        xdg_data_home().join("deckhand")
    }

    /// Returns the state directory path (for logs)
    ///
    /// `$XDG_STATE_HOME/deckhand/` (~/.local/state/deckhand/)
    pub fn state_dir() -> PathBuf {
        xdg_state_home().join("deckhand")
    }

    /// Returns the log file path
    ///
    /// `$XDG_STATE_HOME/deckhand/deckhand.log` (~/.local/state/deckhand/deckhand.log)
    pub fn log_path() -> PathBuf {
        Self::state_dir().join("deckhand.log")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server.base_url, "http://localhost:8000");
        assert_eq!(config.server.timeout_secs, 30);
        assert_eq!(config.server.max_retries, 3);
        assert_eq!(config.server.refresh_secs, 2);
        assert!(config.server.api_key.is_none());
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_parse_config() {
        let toml = r#"
[server]
base_url = "https://studio.example.com"
api_key = "dk_live_xxxx"
timeout_secs = 10
refresh_secs = 5

[logging]
level = "debug"
"#;
        let config: Config = toml::from_str(toml).unwrap();

        assert_eq!(config.server.base_url, "https://studio.example.com");
        assert_eq!(config.server.api_key.as_deref(), Some("dk_live_xxxx"));
        assert_eq!(config.server.timeout_secs, 10);
        assert_eq!(config.server.refresh_secs, 5);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_server_config_validation() {
        let config = ServerConfig::default();
        assert!(config.validate().is_ok());

        let config = ServerConfig {
            base_url: "   ".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = ServerConfig {
            refresh_secs: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_from_missing_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.toml");
        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn test_load_from_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[server]\nbase_url = \"http://127.0.0.1:9000\"\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.server.base_url, "http://127.0.0.1:9000");
        // Unspecified fields keep their defaults.
        assert_eq!(config.server.max_retries, 3);
    }
}
