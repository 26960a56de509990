//! Error types for salesboard-core
//!
//! The engine itself degrades to zero/null instead of failing; errors only
//! come from the edges (config files, snapshot files, period keys).

use std::path::PathBuf;
use thiserror::Error;

/// Path reported by parse errors of in-memory text (no file involved)
pub const INLINE_SOURCE: &str = "<string>";

/// Core error type for salesboard operations
#[derive(Error, Debug)]
pub enum CoreError {
    // ===================
    // IO Errors
    // ===================
    #[error("Failed to read file: {path}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    // ===================
    // Parse Errors
    // ===================
    #[error("Failed to parse JSON in {path}: {message}")]
    JsonParse {
        path: PathBuf,
        message: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to parse TOML in {path}: {message}")]
    TomlParse {
        path: PathBuf,
        message: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid period key '{key}' (expected YYYY-MM-DD or YYYY-MM)")]
    InvalidPeriodKey { key: String },

    // ===================
    // Config Errors
    // ===================
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },
}

impl CoreError {
    /// Map an I/O failure on `path` to the matching variant
    pub fn from_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            CoreError::FileNotFound { path }
        } else {
            CoreError::FileRead { path, source }
        }
    }

    /// Actionable hint for the user, when one exists
    pub fn suggestion(&self) -> Option<String> {
        match self {
            CoreError::FileNotFound { path } => {
                Some(format!("Check if file exists: ls {}", path.display()))
            }
            CoreError::FileRead { path, .. } => {
                Some(format!("Check permissions: chmod +r {}", path.display()))
            }
            CoreError::JsonParse { .. } => {
                Some("Validate JSON syntax with: jq . <file>".to_string())
            }
            CoreError::InvalidPeriodKey { .. } => {
                Some("Use a day key like 2026-10-18 or a month key like 2026-10".to_string())
            }
            _ => None,
        }
    }
}
