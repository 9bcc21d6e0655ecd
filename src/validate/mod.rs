//! Rule Validation Engine.
//!
//! This module provides:
//! - Severity-tagged messages per parameter ([`Warning`], [`Warnings`])
//! - The engine itself ([`Validator::make_warns`])
//! - Path resolution for path-valued parameters ([`PathResolver`])
//! - Suppression and severity filtering ([`WarningFilter`])
//!
//! The engine never fails: unset parameters read as `""` and every rule
//! tolerates any value shape.

mod paths;
mod rules;

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;

pub use paths::{DEFAULT_BASE_DIRS, PathResolver, ResolvedPath};

use std::collections::{BTreeMap, HashSet};

use crate::catalog::Catalog;
use crate::probe::DiskLayoutSource;
use crate::value::{ParamValues, Severity};

/// One message about one parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warning {
    /// How serious the problem is.
    pub severity: Severity,
    /// Human-readable explanation.
    pub message: String,
}

impl Warning {
    /// Stable key used to suppress this warning for `param`.
    #[must_use]
    pub fn key(&self, param: &str) -> String {
        format!("{param} {}", self.message)
    }
}

/// Warnings grouped by parameter name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Warnings {
    by_param: BTreeMap<String, Vec<Warning>>,
}

impl Warnings {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a message for `param`.
    pub fn push(&mut self, param: &str, severity: Severity, message: impl Into<String>) {
        self.by_param
            .entry(param.to_string())
            .or_default()
            .push(Warning {
                severity,
                message: message.into(),
            });
    }

    /// Messages for `param`, in the order they were produced.
    #[must_use]
    pub fn get(&self, param: &str) -> &[Warning] {
        self.by_param.get(param).map(Vec::as_slice).unwrap_or_default()
    }

    /// Iterates `(param, messages)` sorted by parameter name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Warning])> {
        self.by_param
            .iter()
            .map(|(param, warns)| (param.as_str(), warns.as_slice()))
    }

    /// Total number of messages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_param.values().map(Vec::len).sum()
    }

    /// Returns `true` if there are no messages.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_param.is_empty()
    }

    /// Highest severity present.
    #[must_use]
    pub fn max_severity(&self) -> Option<Severity> {
        self.by_param
            .values()
            .flatten()
            .map(|warning| warning.severity)
            .max()
    }

    /// Applies `filter`, reporting how many messages it suppressed.
    #[must_use]
    pub fn filtered(&self, filter: &WarningFilter) -> Filtered {
        let mut kept = Self::new();
        let mut suppressed = 0;

        for (param, warns) in self.iter() {
            for warning in warns {
                if warning.severity < filter.min_severity {
                    continue;
                }
                if filter.is_suppressed(param, warning) {
                    suppressed += 1;
                    if !filter.show_suppressed {
                        continue;
                    }
                }
                kept.push(param, warning.severity, warning.message.clone());
            }
        }

        Filtered {
            warnings: kept,
            suppressed,
        }
    }
}

/// Which warnings a report should show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WarningFilter {
    /// Keys (see [`Warning::key`]) the user has chosen to hide.
    pub suppress: HashSet<String>,
    /// Messages below this severity are dropped.
    pub min_severity: Severity,
    /// Keep suppressed messages in the output (they are still counted).
    pub show_suppressed: bool,
}

impl Default for WarningFilter {
    fn default() -> Self {
        Self {
            suppress: HashSet::new(),
            min_severity: Severity::Suggestion,
            show_suppressed: false,
        }
    }
}

impl WarningFilter {
    fn is_suppressed(&self, param: &str, warning: &Warning) -> bool {
        self.suppress.contains(&warning.key(param))
    }
}

/// Result of [`Warnings::filtered`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filtered {
    /// Messages that passed the filter.
    pub warnings: Warnings,
    /// Messages matching a suppression key at or above the minimum severity.
    pub suppressed: usize,
}

/// Evaluates the rule battery against a set of values.
pub struct Validator<'a> {
    layout: &'a dyn DiskLayoutSource,
    paths: PathResolver,
}

impl std::fmt::Debug for Validator<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Validator")
            .field("paths", &self.paths)
            .finish_non_exhaustive()
    }
}

impl<'a> Validator<'a> {
    /// Creates a validator reading disk facts from `layout`.
    #[must_use]
    pub fn new(layout: &'a dyn DiskLayoutSource, paths: PathResolver) -> Self {
        Self { layout, paths }
    }

    /// Runs every rule and collects their messages.
    ///
    /// `values` holds the current value of each parameter, with commented
    /// and absent parameters reading as `""`. The catalogue supplies the
    /// enumerations for the generic membership check.
    #[must_use]
    pub fn make_warns(&self, values: &ParamValues, catalog: &Catalog) -> Warnings {
        let inputs = rules::Inputs {
            values,
            catalog,
            layout: self.layout.layout(),
            paths: &self.paths,
        };

        let mut warns = Warnings::new();
        for rule in rules::RULES {
            rule(&inputs, &mut warns);
        }

        tracing::debug!("Rule battery produced {} warnings", warns.len());
        warns
    }
}
