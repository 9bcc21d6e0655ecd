//! Error types for the line model.

use std::path::PathBuf;

use thiserror::Error;

/// Error type for loading, editing and writing a grub defaults file.
#[derive(Debug, Error)]
pub enum GrubFileError {
    /// The file exists but could not be read.
    #[error("Failed to read '{}': {source}", path.display())]
    Read {
        /// Path to the file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The output could not be written.
    #[error("Failed to write '{}': {source}", path.display())]
    Write {
        /// Destination path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The existing file could not be copied aside before a write.
    #[error("Failed to back up '{}': {source}", path.display())]
    Backup {
        /// File being backed up
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// An edit named a parameter that is neither catalogued nor discovered.
    #[error("Unknown parameter '{name}'")]
    UnknownParam {
        /// The unknown name
        name: String,
    },
}
