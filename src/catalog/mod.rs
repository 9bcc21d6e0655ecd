//! Parameter catalogue: what the tool knows about each GRUB parameter.
//!
//! This module provides:
//! - Per-parameter metadata ([`ParamMeta`], [`EnumChoice`], [`EditPattern`])
//! - The ordered, name-indexed table of metadata ([`Catalog`])
//! - Edit validation for user-supplied values ([`EditError`])
//! - TOML catalogue files and the built-in catalogue ([`CatalogFile`])
//!
//! # Ordering
//!
//! A [`Catalog`] iterates in insertion order (the order of the catalogue
//! file, followed by any parameters discovered while parsing the grub
//! file). Appended assignments are written in this order.

mod edit;
mod error;
mod file;

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
#[cfg(test)]
#[path = "file_tests.rs"]
mod file_tests;

pub use edit::EditError;
pub use error::CatalogError;
pub use file::{CatalogFile, EnumEntry, ParamEntry};

use std::collections::HashMap;

use regex::Regex;

use crate::discovery::KnownAbsent;

/// Marker used in catalogue files for parameters edited in expert mode.
pub const EXPERT_EDIT_MARKER: &str = ">>EXPERT_EDIT<<";

/// Section label given to parameters found in the file but not in the catalogue.
pub const DISCOVERED_SECTION: &str = "Unvalidated Params";

/// How a parameter's value may be edited.
#[derive(Debug, Clone)]
pub enum EditPattern {
    /// No edit pattern: the value can only be chosen from the enumerations.
    ReadOnly,
    /// Free-form edit with only a shell-token sanity check.
    Expert,
    /// Values must match this pattern (anchored at the start).
    Pattern {
        /// Pattern as written in the catalogue.
        source: String,
        /// Compiled, start-anchored form of `source`.
        regex: Regex,
    },
}

impl EditPattern {
    /// Builds an edit pattern from the catalogue's textual form.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::InvalidEditPattern`] if the pattern is not a valid regex.
    pub fn parse(name: &str, raw: Option<&str>) -> Result<Self, CatalogError> {
        match raw {
            None => Ok(Self::ReadOnly),
            Some(EXPERT_EDIT_MARKER) => Ok(Self::Expert),
            Some(pattern) => {
                let regex = Regex::new(&format!("^(?:{pattern})")).map_err(|source| {
                    CatalogError::InvalidEditPattern {
                        name: name.to_string(),
                        pattern: pattern.to_string(),
                        source,
                    }
                })?;
                Ok(Self::Pattern {
                    source: pattern.to_string(),
                    regex,
                })
            }
        }
    }
}

/// One allowed value of an enumerated parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumChoice {
    /// The value as it would be written to the file.
    pub value: String,
    /// Human-readable description.
    pub meaning: String,
}

/// Metadata for one parameter.
#[derive(Debug, Clone)]
pub struct ParamMeta {
    /// Parameter name, e.g. `GRUB_TIMEOUT`.
    pub name: String,
    /// Display grouping.
    pub section: String,
    /// Value GRUB uses when the parameter is not set.
    pub default: String,
    /// Allowed values, in display order. Empty means free-form.
    pub enums: Vec<EnumChoice>,
    /// Edit policy.
    pub edit: EditPattern,
    /// Free-text guidance; written above newly appended assignments.
    pub guidance: String,
    /// Custom check descriptors. A non-empty list disables the generic
    /// enum-membership rule for this parameter.
    pub checks: Vec<String>,
}

impl ParamMeta {
    /// Creates minimal metadata for a parameter found only in the grub file.
    #[must_use]
    pub fn discovered(name: &str, value: &str, guidance: String) -> Self {
        Self {
            name: name.to_string(),
            section: DISCOVERED_SECTION.to_string(),
            default: value.to_string(),
            enums: Vec::new(),
            edit: EditPattern::Expert,
            guidance,
            checks: Vec::new(),
        }
    }

    /// Returns `true` if the generic enum-membership rule applies.
    #[must_use]
    pub fn is_plain_enum(&self) -> bool {
        !self.enums.is_empty() && self.checks.is_empty()
    }

    /// Returns `true` if `value` is one of the declared enum values.
    #[must_use]
    pub fn has_choice(&self, value: &str) -> bool {
        self.enums.iter().any(|choice| choice.value == value)
    }
}

/// Ordered table of parameter metadata with constant-time lookup by name.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    params: Vec<ParamMeta>,
    index: HashMap<String, usize>,
}

impl Catalog {
    /// Creates an empty catalogue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads the catalogue shipped with the tool.
    ///
    /// # Errors
    ///
    /// Returns an error only if the embedded catalogue is malformed.
    pub fn builtin() -> Result<Self, CatalogError> {
        CatalogFile::builtin()?.into_catalog()
    }

    /// Appends a parameter.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Duplicate`] if the name is already present.
    pub fn insert(&mut self, meta: ParamMeta) -> Result<(), CatalogError> {
        if self.index.contains_key(&meta.name) {
            return Err(CatalogError::Duplicate { name: meta.name });
        }
        self.index.insert(meta.name.clone(), self.params.len());
        self.params.push(meta);
        Ok(())
    }

    /// Looks up a parameter by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ParamMeta> {
        self.index.get(name).map(|&idx| &self.params[idx])
    }

    /// Returns `true` if the parameter is known.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Iterates over all parameters in catalogue order.
    pub fn iter(&self) -> impl Iterator<Item = &ParamMeta> {
        self.params.iter()
    }

    /// Iterates over parameter names in catalogue order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.params.iter().map(|meta| meta.name.as_str())
    }

    /// Number of parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Returns `true` if the catalogue has no parameters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Drops every parameter the predicate reports as absent on this system.
    ///
    /// Returns the names that were removed, in catalogue order.
    pub fn remove_absent(&mut self, absent: &dyn KnownAbsent) -> Vec<String> {
        let (kept, removed): (Vec<_>, Vec<_>) = std::mem::take(&mut self.params)
            .into_iter()
            .partition(|meta| !absent.is_absent(&meta.name));

        self.index = kept
            .iter()
            .enumerate()
            .map(|(idx, meta)| (meta.name.clone(), idx))
            .collect();
        self.params = kept;

        removed.into_iter().map(|meta| meta.name).collect()
    }

    /// Groups parameter names by section, sections in first-appearance order.
    #[must_use]
    pub fn sections(&self) -> Vec<(&str, Vec<&str>)> {
        let mut sections: Vec<(&str, Vec<&str>)> = Vec::new();
        for meta in &self.params {
            match sections.iter_mut().find(|(label, _)| *label == meta.section) {
                Some((_, names)) => names.push(meta.name.as_str()),
                None => sections.push((meta.section.as_str(), vec![meta.name.as_str()])),
            }
        }
        sections
    }
}
