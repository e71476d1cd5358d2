//! Configuration loading and root folder resolution
//!
//! Bootstrap settings come from an optional TOML file. The binary layers
//! command-line flags and environment variables on top, giving the priority:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled default (fallback)
//!
//! A missing default config file is not an error: startup continues with
//! built-in defaults and a warning.

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Environment variable overriding the root folder
pub const ROOT_FOLDER_ENV: &str = "PODLOG_ROOT_FOLDER";

/// Database file name inside the root folder
pub const DATABASE_FILE_NAME: &str = "podlog.db";

/// Longest accepted bearer token lifetime (one year)
pub const MAX_TOKEN_TTL_SECS: i64 = 365 * 24 * 60 * 60;

/// Bootstrap configuration loaded from TOML
///
/// These settings cannot change while the server runs.
#[derive(Debug, Clone, Deserialize)]
pub struct TomlConfig {
    /// Folder holding the database when `database_path` is not given
    #[serde(default)]
    pub root_folder: Option<PathBuf>,

    /// Explicit SQLite database file
    #[serde(default)]
    pub database_path: Option<PathBuf>,

    /// Address to bind the HTTP server to
    #[serde(default = "default_host")]
    pub host: String,

    /// HTTP server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Lifetime of issued bearer tokens, in seconds
    #[serde(default = "default_token_ttl_secs")]
    pub token_ttl_secs: i64,

    /// Token signing secret; generated and stored in the database when absent
    #[serde(default)]
    pub jwt_secret: Option<String>,

    /// Logging configuration (optional)
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
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

impl Default for TomlConfig {
    fn default() -> Self {
        Self {
            root_folder: None,
            database_path: None,
            host: default_host(),
            port: default_port(),
            token_ttl_secs: default_token_ttl_secs(),
            jwt_secret: None,
            logging: LoggingConfig::default(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5760
}

fn default_token_ttl_secs() -> i64 {
    900
}

fn default_log_level() -> String {
    "info".to_string()
}

impl TomlConfig {
    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: TomlConfig = toml::from_str(content)?;
        if !(1..=MAX_TOKEN_TTL_SECS).contains(&config.token_ttl_secs) {
            return Err(Error::Config(format!(
                "token_ttl_secs must be between 1 and {}, got {}",
                MAX_TOKEN_TTL_SECS, config.token_ttl_secs
            )));
        }
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Load an explicitly named file, or fall back to the default location
    ///
    /// An explicit path that does not exist is an error. When no path is
    /// given and no file exists at the default location, built-in defaults
    /// are returned.
    pub fn load_or_default(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            if !path.exists() {
                return Err(Error::Config(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            info!("Loading configuration from {}", path.display());
            return Self::load(path);
        }

        match default_config_path() {
            Some(path) if path.exists() => {
                info!("Loading configuration from {}", path.display());
                Self::load(&path)
            }
            _ => {
                warn!("No config file found, using built-in defaults");
                Ok(Self::default())
            }
        }
    }

    /// Resolve the root folder: environment variable, then TOML, then default
    pub fn resolve_root_folder(&self) -> PathBuf {
        if let Ok(path) = std::env::var(ROOT_FOLDER_ENV) {
            if !path.is_empty() {
                return PathBuf::from(path);
            }
        }

        if let Some(path) = &self.root_folder {
            return path.clone();
        }

        default_root_folder()
    }

    /// Resolve the database file path
    pub fn resolve_database_path(&self) -> PathBuf {
        self.database_path
            .clone()
            .unwrap_or_else(|| self.resolve_root_folder().join(DATABASE_FILE_NAME))
    }
}

/// Default config file location for the platform
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("podlog").join("config.toml"))
}

/// OS-dependent default root folder
pub fn default_root_folder() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("podlog"))
        .unwrap_or_else(|| PathBuf::from("./podlog_data"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config = TomlConfig::from_toml_str("").unwrap();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 5760);
        assert_eq!(config.token_ttl_secs, 900);
        assert_eq!(config.logging.level, "info");
        assert!(config.jwt_secret.is_none());
        assert!(config.database_path.is_none());
    }

    #[test]
    fn test_full_toml_parsed() {
        let content = r#"
            root_folder = "/srv/podlog"
            database_path = "/srv/podlog/custom.db"
            host = "0.0.0.0"
            port = 8080
            token_ttl_secs = 60
            jwt_secret = "s3cret"

            [logging]
            level = "debug"
        "#;

        let config = TomlConfig::from_toml_str(content).unwrap();
        assert_eq!(config.root_folder, Some(PathBuf::from("/srv/podlog")));
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8080);
        assert_eq!(config.token_ttl_secs, 60);
        assert_eq!(config.jwt_secret.as_deref(), Some("s3cret"));
        assert_eq!(config.logging.level, "debug");
        assert_eq!(
            config.resolve_database_path(),
            PathBuf::from("/srv/podlog/custom.db")
        );
    }

    #[test]
    fn test_invalid_toml_rejected() {
        let result = TomlConfig::from_toml_str("port = \"not a number\"");
        assert!(matches!(result, Err(Error::Toml(_))));
    }

    #[test]
    fn test_non_positive_ttl_rejected() {
        let result = TomlConfig::from_toml_str("token_ttl_secs = 0");
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_oversized_ttl_rejected() {
        let result = TomlConfig::from_toml_str("token_ttl_secs = 9223372036854775807");
        assert!(matches!(result, Err(Error::Config(_))));

        let too_long = format!("token_ttl_secs = {}", MAX_TOKEN_TTL_SECS + 1);
        assert!(matches!(
            TomlConfig::from_toml_str(&too_long),
            Err(Error::Config(_))
        ));

        let one_year = format!("token_ttl_secs = {}", MAX_TOKEN_TTL_SECS);
        let config = TomlConfig::from_toml_str(&one_year).unwrap();
        assert_eq!(config.token_ttl_secs, MAX_TOKEN_TTL_SECS);
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let result = TomlConfig::load_or_default(Some(Path::new(
            "/nonexistent/podlog/config.toml",
        )));
        assert!(matches!(result, Err(Error::Config(_))));
    }
}
