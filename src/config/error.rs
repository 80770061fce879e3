use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading input configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration file does not exist.
    #[error("Config file not found: {0}")]
    NotFound(PathBuf),
    /// Path cannot be expanded (not valid UTF-8).
    #[error("Invalid path encoding: {0}")]
    InvalidPath(PathBuf),
    /// Configuration is not valid JSON or has the wrong shape.
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    /// Precision is a negative or non-finite number.
    #[error("Invalid precision {0}: expected a non-negative number of digits")]
    InvalidPrecision(f64),
    /// Grouping and decimal marks clash or are digits/signs.
    #[error("Invalid separators: group '{group}', decimal '{decimal}'")]
    InvalidSeparators { group: char, decimal: char },
    /// Generic I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
