//! Default values for settings.
//!
//! Centralized constants to avoid magic numbers scattered across the codebase.

use std::path::PathBuf;

/// Default grub defaults file.
pub const GRUB_FILE: &str = crate::grubfile::DEFAULT_PATH;

/// Default upper bound on the disk probe, in seconds.
pub const PROBE_TIMEOUT_SECS: u64 = 5;

/// Default directories searched for relative theme and background paths.
pub const BASE_DIRS: &[&str] = crate::validate::DEFAULT_BASE_DIRS;

/// Directory under the user config directory holding the settings file.
pub const APP_DIR: &str = "grub-wiz";

/// Settings file name.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Default settings file location, if the platform has a config directory.
#[must_use]
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE_NAME))
}
