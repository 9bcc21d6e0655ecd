//! TOML catalogue files.
//!
//! A catalogue is an array of `[[param]]` tables so that parameter order and
//! enum order survive deserialization.

use std::path::Path;

use serde::Deserialize;

use super::{Catalog, CatalogError, EditPattern, EnumChoice, ParamMeta};

/// Catalogue shipped with the tool.
const BUILTIN_CATALOG: &str = include_str!("builtin.toml");

/// Root structure of a catalogue file.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogFile {
    /// Parameters in display order
    #[serde(default, rename = "param")]
    pub params: Vec<ParamEntry>,
}

/// One `[[param]]` table.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ParamEntry {
    /// Parameter name
    pub name: String,

    /// Display grouping
    #[serde(default)]
    pub section: String,

    /// Value GRUB uses when unset
    #[serde(default)]
    pub default: String,

    /// Edit regex, the expert marker, or absent for read-only
    pub edit: Option<String>,

    /// Free-text guidance
    #[serde(default)]
    pub guidance: String,

    /// Allowed values
    #[serde(default)]
    pub enums: Vec<EnumEntry>,

    /// Custom check descriptors
    #[serde(default)]
    pub checks: Vec<String>,
}

/// One allowed value in a `[[param]]` table.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EnumEntry {
    /// Value as written to the file
    pub value: String,

    /// Description
    #[serde(default)]
    pub meaning: String,
}

impl CatalogFile {
    /// Loads a catalogue from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path).map_err(|e| CatalogError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(&content)
    }

    /// Parses a catalogue from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, CatalogError> {
        toml::from_str(content).map_err(CatalogError::from)
    }

    /// Parses the built-in catalogue.
    ///
    /// # Errors
    ///
    /// Returns an error only if the embedded catalogue is malformed.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::parse(BUILTIN_CATALOG)
    }

    /// Converts the file into a [`Catalog`], compiling edit patterns.
    ///
    /// # Errors
    ///
    /// Returns an error for duplicate names or invalid edit patterns.
    pub fn into_catalog(self) -> Result<Catalog, CatalogError> {
        let mut catalog = Catalog::new();
        for entry in self.params {
            let edit = EditPattern::parse(&entry.name, entry.edit.as_deref())?;
            catalog.insert(ParamMeta {
                name: entry.name,
                section: entry.section,
                default: entry.default,
                enums: entry
                    .enums
                    .into_iter()
                    .map(|e| EnumChoice {
                        value: e.value,
                        meaning: e.meaning,
                    })
                    .collect(),
                edit,
                guidance: entry.guidance,
                checks: entry.checks,
            })?;
        }
        Ok(catalog)
    }
}
