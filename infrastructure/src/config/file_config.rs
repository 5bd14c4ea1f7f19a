//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and validated before use.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Error)]
pub enum ConfigValidationError {
    #[error("server.host cannot be empty")]
    EmptyHost,

    #[error("server.port cannot be 0")]
    InvalidPort,

    #[error("database.path cannot be empty")]
    EmptyDatabasePath,
}

/// Raw server configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileServerConfig {
    /// Bind address
    pub host: String,
    /// Bind port
    pub port: u16,
}

impl Default for FileServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

/// Raw database configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileDatabaseConfig {
    /// Path to the SQLite database file
    pub path: String,
}

impl Default for FileDatabaseConfig {
    fn default() -> Self {
        Self {
            path: "uniapp.db".to_string(),
        }
    }
}

/// Raw logging configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// Default tracing filter when RUST_LOG is unset
    pub level: String,
    /// Path to the JSONL audit log; unset disables auditing
    pub audit_log: Option<String>,
}

impl Default for FileLoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            audit_log: None,
        }
    }
}

/// Complete raw configuration from TOML
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub server: FileServerConfig,
    pub database: FileDatabaseConfig,
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Check the loaded configuration for values that cannot work.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.server.host.trim().is_empty() {
            return Err(ConfigValidationError::EmptyHost);
        }
        if self.server.port == 0 {
            return Err(ConfigValidationError::InvalidPort);
        }
        if self.database.path.trim().is_empty() {
            return Err(ConfigValidationError::EmptyDatabasePath);
        }
        Ok(())
    }
}
