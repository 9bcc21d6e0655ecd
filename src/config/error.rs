//! Error types for settings parsing and validation.

use std::path::PathBuf;

use thiserror::Error;

/// Error type for settings operations.
///
/// Covers errors from parsing, validation, and file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the settings file.
    #[error("Failed to read config file '{}': {source}", path.display())]
    FileRead {
        /// Path to the settings file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse the TOML settings.
    #[error("Failed to parse TOML config: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Failed to write the settings file (for init command).
    #[error("Failed to write config file '{}': {source}", path.display())]
    FileWrite {
        /// Path to the settings file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Invalid duration value (zero or too large).
    #[error("Invalid duration for {field}: {reason}")]
    InvalidDuration {
        /// Name of the field
        field: &'static str,
        /// Reason for invalidity
        reason: String,
    },

    /// A list that must have entries was given empty.
    #[error("{field} must not be empty")]
    EmptyList {
        /// Name of the field
        field: &'static str,
    },

    /// A name that is not upper-case words joined by underscores.
    #[error("Invalid parameter name '{name}' in {field}")]
    InvalidParamName {
        /// Name of the field
        field: &'static str,
        /// The rejected name
        name: String,
    },
}
