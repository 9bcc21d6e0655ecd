//! CLI argument parsing using clap.
//!
//! Defines the command-line interface with global options and subcommands.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// grub-wiz: inspect, check and edit /etc/default/grub
///
/// Edits keep every comment and unrelated line intact, and risky
/// combinations of boot parameters are flagged before anything is written.
#[derive(Debug, Parser)]
#[command(name = "grub-wiz")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,

    /// Path to settings file
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,

    /// Path to the grub defaults file
    #[arg(long, short, global = true)]
    pub file: Option<PathBuf>,

    /// Path to a parameter catalogue replacing the built-in one
    #[arg(long, global = true)]
    pub catalog: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

/// Subcommands for grub-wiz
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate a default settings file
    Init {
        /// Output path for the settings file (default: user config directory)
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// List parameters and their values, grouped by section
    Show {
        /// Include parameters that are commented out or absent
        #[arg(long)]
        all: bool,
    },

    /// Run the consistency checks against the current file
    Check {
        /// Only report warnings of at least this severity (1-4)
        #[arg(long = "min-severity", value_parser = clap::value_parser!(u8).range(1..=4))]
        min_severity: Option<u8>,

        /// Also list warnings silenced in the settings file
        #[arg(long = "show-suppressed")]
        show_suppressed: bool,
    },

    /// Change parameters and write the file back
    Edit {
        /// Set a parameter (can be specified multiple times)
        #[arg(long = "set", value_name = "NAME=VALUE", value_parser = parse_assignment)]
        set: Vec<(String, String)>,

        /// Comment a parameter out (can be specified multiple times)
        #[arg(long = "clear", value_name = "NAME")]
        clear: Vec<String>,

        /// Write to this path instead of the grub file
        #[arg(long, short)]
        output: Option<PathBuf>,

        /// Show the resulting file without writing it
        #[arg(long)]
        dry_run: bool,

        /// Write even when critical warnings remain
        #[arg(long)]
        force: bool,

        /// Regenerate grub.cfg after writing
        #[arg(long)]
        update: bool,
    },
}

/// Splits `NAME=VALUE` at the first `=`; the value may be empty or quoted.
fn parse_assignment(s: &str) -> Result<(String, String), String> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got '{s}'"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing parameter name in '{s}'"));
    }
    Ok((name.to_string(), value.to_string()))
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parses CLI arguments from an iterator (useful for testing).
    pub fn parse_from_iter<I, T>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::parse_from(iter)
    }

    /// Like [`Cli::parse_from_iter`], but returns the clap error instead of exiting.
    ///
    /// # Errors
    ///
    /// Returns an error for unknown options, missing subcommands or bad values.
    pub fn try_parse_from_iter<I, T>(iter: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::try_parse_from(iter)
    }

    /// Returns true if this is the init command.
    #[must_use]
    pub const fn is_init(&self) -> bool {
        matches!(self.command, Command::Init { .. })
    }
}
