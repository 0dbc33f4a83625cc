//! Error conversion utilities for CLI.
//!
//! Converts distzip-core's typed errors (thiserror) into user-facing
//! contextual errors (anyhow) with actionable guidance.

use distzip_core::DistzipError;

/// Converts `DistzipError` to a user-friendly anyhow error.
pub fn convert_error(err: DistzipError) -> anyhow::Error {
    match err {
        DistzipError::ConfigNotFound { path } => {
            anyhow::anyhow!("Configuration file not found: {}", path.display())
        }
        DistzipError::EmptyConfig => anyhow::anyhow!("No patterns found in configuration file."),
        DistzipError::InvalidPattern { pattern, reason } => {
            anyhow::anyhow!(
                "Error creating zip: invalid pattern \"{pattern}\": {reason}\n\
                 HINT: Patterns are globs relative to the working directory, \
                 optionally followed by :!<exclude>."
            )
        }
        DistzipError::RootNotFound { path } => {
            anyhow::anyhow!(
                "Error creating zip: working directory not found: {}\n\
                 HINT: Check the --cwd option.",
                path.display()
            )
        }
        other => anyhow::Error::from(other).context("Error creating zip"),
    }
}
