//! Validated settings after merging CLI and TOML sources.
//!
//! This module contains the final, validated settings that are used
//! by the application. All validation is performed during construction.

use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::cli::Cli;
use super::defaults;
use super::error::ConfigError;
use super::toml::SettingsFile;
use crate::grubfile::is_param_name;

/// Fully validated settings ready for use by the application.
///
/// # Construction
///
/// Use [`Settings::from_raw`] to create from CLI args and optional TOML settings.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Grub defaults file to read
    pub grub_file: PathBuf,

    /// Where edits are written; `None` means back to `grub_file`
    pub output: Option<PathBuf>,

    /// Configured grub.cfg update command; `None` means detect one
    pub update_command: Option<Vec<String>>,

    /// Catalogue file replacing the built-in one
    pub catalog: Option<PathBuf>,

    /// Parameters unsupported on this system
    pub absent: Vec<String>,

    /// Upper bound on the disk probe
    pub probe_timeout: Duration,

    /// Directories for relative path lookups, primary first
    pub base_dirs: Vec<PathBuf>,

    /// Suppressed warning keys
    pub suppress: HashSet<String>,

    /// Verbose logging enabled
    pub verbose: bool,
}

impl fmt::Display for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let catalog = self
            .catalog
            .as_ref()
            .map_or_else(|| "built-in".to_string(), |p| p.display().to_string());

        write!(
            f,
            "Settings {{ file: {}, catalog: {}, absent: {}, probe_timeout: {}s, base_dirs: {}, suppressed: {} }}",
            self.grub_file.display(),
            catalog,
            self.absent.len(),
            self.probe_timeout.as_secs(),
            self.base_dirs.len(),
            self.suppress.len(),
        )
    }
}

impl Settings {
    /// Creates validated settings from CLI arguments and optional TOML settings.
    ///
    /// CLI arguments take precedence over TOML values, which take precedence
    /// over built-in defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The probe timeout is zero
    /// - The base directory list or the update command is empty
    /// - An absent parameter name is not spelled like a parameter name
    ///   (upper-case words joined by underscores)
    pub fn from_raw(cli: &Cli, toml: Option<&SettingsFile>) -> Result<Self, ConfigError> {
        let grub_file = cli.file.clone().unwrap_or_else(|| {
            toml.and_then(|t| t.grub.file.as_deref())
                .map_or_else(|| PathBuf::from(defaults::GRUB_FILE), expand_tilde)
        });

        let output = toml.and_then(|t| t.grub.output.as_deref()).map(expand_tilde);
        let update_command = Self::resolve_update_command(toml)?;

        let catalog = cli
            .catalog
            .clone()
            .or_else(|| toml.and_then(|t| t.catalog.path.as_deref()).map(expand_tilde));

        let absent = Self::resolve_absent(toml)?;
        let probe_timeout = Self::resolve_probe_timeout(toml)?;
        let base_dirs = Self::resolve_base_dirs(toml)?;

        let suppress = toml
            .map(|t| t.warnings.suppress.iter().cloned().collect())
            .unwrap_or_default();

        Ok(Self {
            grub_file,
            output,
            update_command,
            catalog,
            absent,
            probe_timeout,
            base_dirs,
            suppress,
            verbose: cli.verbose,
        })
    }

    /// Loads and merges settings from CLI and the settings file.
    ///
    /// Uses `cli.config` if set; otherwise the default settings file is
    /// read when it exists.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The settings file cannot be read or parsed
    /// - The merged settings are invalid
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let path = cli
            .config
            .clone()
            .or_else(|| defaults::config_path().filter(|p| p.exists()));

        let toml = match path {
            Some(ref path) => {
                tracing::debug!("Loading settings from {}", path.display());
                Some(SettingsFile::load(path)?)
            }
            None => None,
        };

        Self::from_raw(cli, toml.as_ref())
    }

    /// Destination for edits: the configured output, else the grub file.
    #[must_use]
    pub fn write_target(&self) -> &Path {
        self.output.as_deref().unwrap_or(&self.grub_file)
    }

    fn resolve_update_command(
        toml: Option<&SettingsFile>,
    ) -> Result<Option<Vec<String>>, ConfigError> {
        match toml.and_then(|t| t.grub.update_command.as_ref()) {
            Some(argv) if argv.is_empty() => Err(ConfigError::EmptyList {
                field: "grub.update_command",
            }),
            other => Ok(other.cloned()),
        }
    }

    fn resolve_absent(toml: Option<&SettingsFile>) -> Result<Vec<String>, ConfigError> {
        let names = toml.map(|t| t.discovery.absent.clone()).unwrap_or_default();

        if let Some(bad) = names.iter().find(|name| !is_param_name(name)) {
            return Err(ConfigError::InvalidParamName {
                field: "discovery.absent",
                name: bad.clone(),
            });
        }

        Ok(names)
    }

    fn resolve_probe_timeout(toml: Option<&SettingsFile>) -> Result<Duration, ConfigError> {
        let secs = toml
            .and_then(|t| t.probe.timeout)
            .unwrap_or(defaults::PROBE_TIMEOUT_SECS);

        if secs == 0 {
            return Err(ConfigError::InvalidDuration {
                field: "probe.timeout",
                reason: "must be greater than zero".to_string(),
            });
        }

        Ok(Duration::from_secs(secs))
    }

    fn resolve_base_dirs(toml: Option<&SettingsFile>) -> Result<Vec<PathBuf>, ConfigError> {
        match toml.and_then(|t| t.paths.base_dirs.as_ref()) {
            Some(base) if base.is_empty() => Err(ConfigError::EmptyList {
                field: "paths.base_dirs",
            }),
            Some(base) => Ok(base.iter().map(|d| expand_tilde(d)).collect()),
            None => Ok(defaults::BASE_DIRS.iter().map(PathBuf::from).collect()),
        }
    }
}

/// Writes the default settings template to a file, creating parent directories.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    let write_err = |e| ConfigError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(write_err)?;
    }

    let template = super::toml::default_config_template();
    std::fs::write(path, template).map_err(write_err)
}

// Helper functions

/// Expands a leading `~/` to the home directory.
fn expand_tilde(path: &str) -> PathBuf {
    match (path.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}
