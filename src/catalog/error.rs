//! Error types for catalogue loading.

use std::path::PathBuf;

use thiserror::Error;

/// Error type for catalogue operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Failed to read a catalogue file.
    #[error("Failed to read catalogue '{}': {source}", path.display())]
    FileRead {
        /// Path to the catalogue file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse catalogue TOML.
    #[error("Failed to parse catalogue: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// The same parameter name appears twice.
    #[error("Duplicate parameter '{name}' in catalogue")]
    Duplicate {
        /// The repeated name
        name: String,
    },

    /// An edit pattern is not a valid regex.
    #[error("Invalid edit pattern for {name} '{pattern}': {source}")]
    InvalidEditPattern {
        /// Parameter name
        name: String,
        /// The invalid pattern
        pattern: String,
        /// Underlying regex error
        #[source]
        source: regex::Error,
    },
}
