//! Configuration loading traits and types shared across the workspace.
//!
//! Provides a standardized way to load TOML configuration files, following
//! the reference workspace's `ConfigLoader` convention so the planner's own
//! config (see `lateral_planner::config`) composes with a common
//! `SharedConfig` block.
//!
//! # Usage
//!
//! ```rust,no_run
//! use planner_common::config::{ConfigLoader, SharedConfig};
//! use serde::Deserialize;
//! use std::path::Path;
//!
//! #[derive(Debug, Deserialize)]
//! struct AppConfig {
//!     shared: SharedConfig,
//! }
//!
//! fn main() -> Result<(), planner_common::config::ConfigError> {
//!     let config = AppConfig::load(Path::new("config.toml"))?;
//!     Ok(())
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Log level for configuration (replaces `log::Level`).
///
/// Serializes to lowercase strings: "trace", "debug", "info", "warn", "error".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace-level verbosity.
    Trace,
    /// Debug-level verbosity.
    Debug,
    /// Info-level verbosity (default).
    Info,
    /// Warning-level verbosity.
    Warn,
    /// Error-level verbosity.
    Error,
}

impl Default for LogLevel {
    fn default() -> Self {
        Self::Info
    }
}

impl LogLevel {
    /// The `tracing_subscriber::EnvFilter` directive for this level.
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

/// Error type for configuration loading operations.
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    /// Configuration file not found at specified path.
    #[error("configuration file not found")]
    FileNotFound,

    /// TOML parsing failed.
    #[error("failed to parse configuration: {0}")]
    ParseError(String),

    /// Semantic validation failed.
    #[error("configuration validation failed: {0}")]
    ValidationError(String),
}

/// Common configuration fields shared across all workspace binaries.
///
/// Embedded in application-specific configuration structs to provide
/// consistent logging/service identification.
///
/// # TOML Example
///
/// ```toml
/// [shared]
/// log_level = "debug"
/// service_name = "lateral_planner"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SharedConfig {
    /// Log verbosity.
    #[serde(default)]
    pub log_level: LogLevel,
    /// Human-readable service name, used in log spans.
    pub service_name: String,
}

impl SharedConfig {
    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ValidationError` if `service_name` is empty.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.service_name.is_empty() {
            return Err(ConfigError::ValidationError(
                "service_name cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Trait for loading configuration from TOML files.
///
/// Provides a default implementation that works with any type implementing
/// `serde::de::DeserializeOwned`.
///
/// # Contract
///
/// - Returns `ConfigError::FileNotFound` if the file does not exist
/// - Returns `ConfigError::ParseError` if TOML syntax is invalid
pub trait ConfigLoader: Sized + serde::de::DeserializeOwned {
    /// Load configuration from a TOML file.
    fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::FileNotFound
            } else {
                ConfigError::ParseError(e.to_string())
            }
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }
}

// Blanket implementation for all types that implement DeserializeOwned.
impl<T: serde::de::DeserializeOwned> ConfigLoader for T {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shared_config_rejects_empty_service_name() {
        let cfg = SharedConfig {
            log_level: LogLevel::Info,
            service_name: String::new(),
        };
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn shared_config_accepts_named_service() {
        let cfg = SharedConfig {
            log_level: LogLevel::Debug,
            service_name: "lateral_planner".to_string(),
        };
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn load_missing_file_is_file_not_found() {
        #[derive(Debug, Deserialize)]
        struct Dummy {
            #[allow(dead_code)]
            shared: SharedConfig,
        }
        let err = Dummy::load(Path::new("/nonexistent/path/does/not/exist.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound));
    }

    #[test]
    fn load_parses_valid_toml() {
        #[derive(Debug, Deserialize)]
        struct Dummy {
            shared: SharedConfig,
        }
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cfg.toml");
        std::fs::write(&path, "[shared]\nservice_name = \"lateral_planner\"\n").unwrap();
        let dummy = Dummy::load(&path).unwrap();
        assert_eq!(dummy.shared.service_name, "lateral_planner");
        assert_eq!(dummy.shared.log_level, LogLevel::Info);
    }
}
