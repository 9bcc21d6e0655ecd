//! Settings layer for grub-wiz.
//!
//! This module provides:
//! - CLI argument parsing ([`Cli`], [`Command`])
//! - TOML settings file parsing ([`SettingsFile`])
//! - Validated settings ([`Settings`])
//! - Settings file generation ([`write_default_config`])
//! - Default values ([`defaults`])
//!
//! # Priority
//!
//! Settings are resolved with the following priority (highest to lowest):
//!
//! 1. **Explicit CLI arguments** - `--file`, `--catalog`
//! 2. **TOML settings file** - `--config`, or the default file under the
//!    user config directory when it exists
//! 3. **Built-in defaults** - Hardcoded default values
//!
//! Lists (`discovery.absent`, `paths.base_dirs`, `warnings.suppress`) are
//! TOML-only. A `base_dirs` list replaces the defaults entirely.
//!
//! Paths in the settings file may start with `~/`.

mod cli;
pub mod defaults;
mod error;
mod toml;
mod validated;

#[cfg(test)]
mod cli_tests;
#[cfg(test)]
mod toml_tests;
#[cfg(test)]
mod validated_tests;

pub use cli::{Cli, Command};
pub use error::ConfigError;
pub use toml::{SettingsFile, default_config_template};
pub use validated::{Settings, write_default_config};
