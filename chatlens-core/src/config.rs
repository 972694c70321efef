//! Configuration loading and management
//!
//! Configuration is loaded from `~/.config/chatlens/config.toml`
//!
//! This module follows the XDG Base Directory Specification:
//! - Config: `$XDG_CONFIG_HOME/chatlens/` (~/.config/chatlens/)
//! - State/Logs: `$XDG_STATE_HOME/chatlens/` (~/.local/state/chatlens/)

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
    /// Analysis service configuration
    #[serde(default)]
    pub service: ServiceConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Analysis service configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServiceConfig {
    /// Analysis service URL (e.g., `http://localhost:5000`)
    #[serde(default = "default_server_url")]
    pub server_url: String,

    /// HTTP request timeout in seconds
    ///
    /// On timeout, the service call fails like any other failure; timeout
    /// semantics beyond that are the service's concern.
    #[serde(default = "default_service_timeout")]
    pub timeout_secs: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            server_url: default_server_url(),
            timeout_secs: default_service_timeout(),
        }
    }
}

impl ServiceConfig {
    /// Validate configuration, returning error message if invalid
    pub fn validate(&self) -> Result<()> {
        if self.server_url.is_empty() {
            return Err(Error::Config("service.server_url is required".to_string()));
        }
        if !self.server_url.starts_with("http://") && !self.server_url.starts_with("https://") {
            return Err(Error::Config(format!(
                "service.server_url must start with http:// or https://, got {:?}",
                self.server_url
            )));
        }
        if self.timeout_secs == 0 {
            return Err(Error::Config(
                "service.timeout_secs must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

fn default_server_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_service_timeout() -> u64 {
    120
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
    /// `$XDG_CONFIG_HOME/chatlens/config.toml` (~/.config/chatlens/config.toml)
    pub fn config_path() -> PathBuf {
        xdg_config_home().join("chatlens").join("config.toml")
    }

    /// Returns the state directory path (for logs)
    ///
    /// `$XDG_STATE_HOME/chatlens/` (~/.local/state/chatlens/)
    pub fn state_dir() -> PathBuf {
        xdg_state_home().join("chatlens")
    }

    /// Returns the log file path
    ///
    /// `$XDG_STATE_HOME/chatlens/chatlens.log` (~/.local/state/chatlens/chatlens.log)
    pub fn log_path() -> PathBuf {
        Self::state_dir().join("chatlens.log")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.service.server_url, "http://localhost:5000");
        assert_eq!(config.service.timeout_secs, 120);
        assert_eq!(config.logging.level, "info");
        assert!(config.service.validate().is_ok());
    }

    #[test]
    fn test_parse_config() {
        let toml = r#"
[service]
server_url = "https://analysis.example.com"
timeout_secs = 30

[logging]
level = "debug"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.service.server_url, "https://analysis.example.com");
        assert_eq!(config.service.timeout_secs, 30);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_service_config_validation() {
        let config = ServiceConfig {
            server_url: String::new(),
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = ServiceConfig {
            server_url: "ftp://example.com".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = ServiceConfig {
            timeout_secs: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[service]\nserver_url = \"http://10.0.0.1:5000\"\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.service.server_url, "http://10.0.0.1:5000");
        // Unspecified sections fall back to defaults.
        assert_eq!(config.logging.level, "info");
    }
}
