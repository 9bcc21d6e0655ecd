//! Regenerating `grub.cfg` after the defaults file changes.
//!
//! Edits to `/etc/default/grub` have no effect until the distribution's
//! update command rebuilds `grub.cfg`. The command is either configured
//! explicitly or detected on `PATH`.

use std::fmt;
use std::path::Path;
use std::process::{ExitStatus, Stdio};

use thiserror::Error;
use tokio::process::Command;

#[cfg(test)]
#[path = "update_tests.rs"]
mod tests;

/// Known update commands, in order of preference.
///
/// The `mkconfig` variants are only picked when the directory of their
/// output file exists.
pub const CANDIDATES: &[(&str, &[&str])] = &[
    ("update-grub", &[]),
    ("grub2-mkconfig", &["-o", "/boot/grub2/grub.cfg"]),
    ("grub-mkconfig", &["-o", "/boot/grub/grub.cfg"]),
];

/// Error type for running the update command.
#[derive(Debug, Error)]
pub enum UpdateError {
    /// No command was configured and none was found on `PATH`.
    #[error("No GRUB update command found; set [grub] update_command in the settings file")]
    NotFound,

    /// The runtime driving the child process could not be built.
    #[error("Failed to start async runtime: {0}")]
    Runtime(#[source] std::io::Error),

    /// The command could not be started.
    #[error("Failed to run '{program}': {source}")]
    Spawn {
        /// Program name or path
        program: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The command ran and failed.
    #[error("'{program}' exited with {status}: {stderr}")]
    Status {
        /// Program name or path
        program: String,
        /// Exit status
        status: ExitStatus,
        /// Captured standard error
        stderr: String,
    },
}

/// A program and its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateCommand {
    program: String,
    args: Vec<String>,
}

impl UpdateCommand {
    /// Builds a command from an argument vector; `None` if it is empty.
    #[must_use]
    pub fn from_argv(argv: &[String]) -> Option<Self> {
        let (program, args) = argv.split_first()?;
        Some(Self {
            program: program.clone(),
            args: args.to_vec(),
        })
    }

    /// Finds the first usable entry of [`CANDIDATES`] on this system.
    #[must_use]
    pub fn detect() -> Option<Self> {
        Self::detect_with(|program| which::which(program).is_ok(), Path::is_dir)
    }

    fn detect_with(
        on_path: impl Fn(&str) -> bool,
        is_dir: impl Fn(&Path) -> bool,
    ) -> Option<Self> {
        CANDIDATES
            .iter()
            .find(|(program, args)| {
                let output_dir_ok = match args {
                    [.., "-o", output] => Path::new(*output).parent().is_some_and(&is_dir),
                    _ => true,
                };
                output_dir_ok && on_path(*program)
            })
            .map(|(program, args)| Self {
                program: (*program).to_string(),
                args: args.iter().map(|arg| (*arg).to_string()).collect(),
            })
    }

    /// Program name or path.
    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Runs the command to completion.
    ///
    /// Output is captured and logged at debug level; `grub-mkconfig`
    /// reports its progress on standard error.
    ///
    /// # Errors
    ///
    /// Returns an error if the command cannot be started or exits
    /// unsuccessfully.
    pub fn run(&self) -> Result<(), UpdateError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(UpdateError::Runtime)?;

        let output = runtime.block_on(async {
            Command::new(&self.program)
                .args(&self.args)
                .stdin(Stdio::null())
                .stdout(Stdio::piped())
                .stderr(Stdio::piped())
                .kill_on_drop(true)
                .output()
                .await
        });
        let output = output.map_err(|source| UpdateError::Spawn {
            program: self.program.clone(),
            source,
        })?;

        let stderr = String::from_utf8_lossy(&output.stderr);
        for line in String::from_utf8_lossy(&output.stdout).lines().chain(stderr.lines()) {
            tracing::debug!("{}: {line}", self.program);
        }

        if !output.status.success() {
            return Err(UpdateError::Status {
                program: self.program.clone(),
                status: output.status,
                stderr: stderr.trim().to_string(),
            });
        }

        tracing::info!("Regenerated GRUB configuration with {self}");
        Ok(())
    }
}

impl fmt::Display for UpdateCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}
