//! Error types for packaging operations.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using `DistzipError`.
pub type Result<T> = std::result::Result<T, DistzipError>;

/// Errors that can occur while loading patterns or building an archive.
#[derive(Error, Debug)]
pub enum DistzipError {
    /// The pattern-list file does not exist.
    #[error("configuration file not found: {path}")]
    ConfigNotFound {
        /// Resolved path of the missing file.
        path: PathBuf,
    },

    /// The pattern-list file contains no usable patterns.
    #[error("no patterns found in configuration file")]
    EmptyConfig,

    /// A pattern could not be compiled.
    #[error("invalid pattern \"{pattern}\": {reason}")]
    InvalidPattern {
        /// The raw pattern text.
        pattern: String,
        /// Why it was rejected.
        reason: String,
    },

    /// The working directory used as the glob root does not exist.
    #[error("working directory not found: {path}")]
    RootNotFound {
        /// The missing directory.
        path: PathBuf,
    },

    /// Build options are out of range.
    #[error("invalid options: {0}")]
    InvalidOptions(String),

    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The zip writer rejected an operation.
    #[error("archive error: {0}")]
    Archive(#[from] zip::result::ZipError),
}

impl DistzipError {
    pub(crate) fn invalid_pattern(pattern: &str, reason: impl Into<String>) -> Self {
        Self::InvalidPattern {
            pattern: pattern.to_string(),
            reason: reason.into(),
        }
    }
}
