//! TOML settings file parsing.
//!
//! Defines the structure of the settings file with serde.

use std::path::Path;

use serde::Deserialize;

use super::ConfigError;

/// Root structure of the settings file.
///
/// All fields are optional to allow partial configuration
/// that can be merged with CLI arguments.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SettingsFile {
    /// Grub defaults file locations
    #[serde(default)]
    pub grub: GrubSection,

    /// Parameter catalogue
    #[serde(default)]
    pub catalog: CatalogSection,

    /// Parameters unsupported on this system
    #[serde(default)]
    pub discovery: DiscoverySection,

    /// Disk probe tuning
    #[serde(default)]
    pub probe: ProbeSection,

    /// Directories for theme and background lookups
    #[serde(default)]
    pub paths: PathsSection,

    /// Warning suppression
    #[serde(default)]
    pub warnings: WarningsSection,
}

/// Grub defaults file section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GrubSection {
    /// File to read (default: /etc/default/grub)
    pub file: Option<String>,

    /// File to write (default: same as `file`)
    pub output: Option<String>,

    /// Command regenerating grub.cfg, as program and arguments
    pub update_command: Option<Vec<String>>,
}

/// Catalogue section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogSection {
    /// Catalogue TOML replacing the built-in one
    pub path: Option<String>,
}

/// Discovery section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DiscoverySection {
    /// Parameter names to ignore on this system
    #[serde(default)]
    pub absent: Vec<String>,
}

/// Disk probe section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProbeSection {
    /// Seconds to wait for `lsblk`
    pub timeout: Option<u64>,
}

/// Path lookup section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PathsSection {
    /// Base directories, primary first
    pub base_dirs: Option<Vec<String>>,
}

/// Warnings section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WarningsSection {
    /// Keys of the form `"<PARAM> <message>"` to hide
    #[serde(default)]
    pub suppress: Vec<String>,
}

impl SettingsFile {
    /// Loads settings from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(&content)
    }

    /// Parses settings from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::from)
    }
}

/// Generates a default settings file with comments.
#[must_use]
pub fn default_config_template() -> String {
    r#"# grub-wiz settings file
# Every setting is optional; command-line options take precedence.

[grub]
# File to read (default: /etc/default/grub)
# file = "/etc/default/grub"

# File to write (default: same as file)
# output = "~/grub.edited"

# Command run by `edit --update` after a successful write
# (default: update-grub, grub2-mkconfig or grub-mkconfig, whichever is installed)
# update_command = ["grub-mkconfig", "-o", "/boot/grub/grub.cfg"]

[catalog]
# Parameter catalogue replacing the built-in one
# path = "~/.config/grub-wiz/catalog.toml"

[discovery]
# Parameters this system does not support; they are neither listed nor checked
# absent = ["GRUB_HIDDEN_TIMEOUT"]

[probe]
# Seconds to wait for lsblk before assuming a plain disk layout (default: 5)
timeout = 5

[paths]
# Where relative GRUB_THEME and GRUB_BACKGROUND paths are looked up, primary first
# base_dirs = ["/boot/grub", "/boot/grub2", "/usr/share/grub", "/"]

[warnings]
# Warnings to hide from `check`, as "<PARAM> <message>"
# suppress = ['GRUB_GFXMODE perhaps unsupported; stick to common values']
"#
    .to_string()
}
