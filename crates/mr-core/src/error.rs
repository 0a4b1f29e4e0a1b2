//! Error types for mr-core

use thiserror::Error;

/// Core error type for Migrun
#[derive(Error, Debug)]
pub enum CoreError {
    /// M001: Configuration file not found
    #[error("[M001] Config file not found: {path}")]
    ConfigNotFound { path: String },

    /// M002: Failed to parse configuration file
    #[error("[M002] Failed to parse config: {message}")]
    ConfigParseError { message: String },

    /// M003: Invalid configuration value
    #[error("[M003] Invalid config: {message}")]
    ConfigInvalid { message: String },

    /// M004: Migrations directory not found
    #[error("[M004] Migrations directory not found: {path}")]
    MigrationsDirNotFound { path: String },

    /// M005: IO error with file path context
    #[error("[M005] IO error on {path}: {source}")]
    IoWithPath {
        path: String,
        source: std::io::Error,
    },

    /// M006: Invalid glob pattern for migration discovery
    #[error("[M006] Invalid migration pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },
}

/// Result type alias for CoreError
pub type CoreResult<T> = Result<T, CoreError>;

impl From<serde_yaml::Error> for CoreError {
    fn from(err: serde_yaml::Error) -> Self {
        CoreError::ConfigParseError {
            message: err.to_string(),
        }
    }
}
