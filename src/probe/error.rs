//! Failures of the disk enumeration.
//!
//! These never leave the module: the prober logs them and degrades to an
//! all-false [`DiskLayout`](super::DiskLayout).

use std::process::ExitStatus;
use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub(super) enum ProbeError {
    #[error("Failed to start async runtime: {0}")]
    Runtime(#[source] std::io::Error),

    #[error("Failed to run '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to collect output: {0}")]
    Io(#[source] std::io::Error),

    #[error("No response within {0:?}")]
    Timeout(Duration),

    #[error("Exited with {status}: {stderr}")]
    Status { status: ExitStatus, stderr: String },

    #[error("Malformed output: {0}")]
    Json(#[from] serde_json::Error),
}
