//! Per-parameter state derived from the file and staged edits.

use std::collections::HashMap;
use std::fmt;

/// What a parameter currently contributes to the file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effective {
    /// An active assignment with this (cleansed) value.
    Literal(String),
    /// The assignment exists but is commented out.
    Commented,
    /// No line mentions the parameter.
    Absent,
}

impl Effective {
    /// Returns the literal value, if the parameter is active.
    #[must_use]
    pub fn literal(&self) -> Option<&str> {
        match self {
            Self::Literal(value) => Some(value),
            Self::Commented | Self::Absent => None,
        }
    }
}

impl fmt::Display for Effective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(value) => f.write_str(value),
            Self::Commented => f.write_str("(commented)"),
            Self::Absent => f.write_str("(absent)"),
        }
    }
}

/// An edit staged in memory; there is deliberately no "absent" edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pending {
    /// Write an active assignment with this value.
    Literal(String),
    /// Comment the assignment out.
    Commented,
}

impl fmt::Display for Pending {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(value) => f.write_str(value),
            Self::Commented => f.write_str("(commented)"),
        }
    }
}

/// Value Store entry for one parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamRecord {
    pub(super) line: Option<usize>,
    pub(super) value: Effective,
    pub(super) pending: Option<Pending>,
    pub(super) out_value: Option<String>,
}

impl ParamRecord {
    pub(super) const fn absent() -> Self {
        Self {
            line: None,
            value: Effective::Absent,
            pending: None,
            out_value: None,
        }
    }

    /// Index of the line that owns this parameter.
    #[must_use]
    pub const fn line(&self) -> Option<usize> {
        self.line
    }

    /// Value as parsed from the file.
    #[must_use]
    pub const fn value(&self) -> &Effective {
        &self.value
    }

    /// Staged edit, if any.
    #[must_use]
    pub const fn pending(&self) -> Option<&Pending> {
        self.pending.as_ref()
    }

    /// Value the owning line would have if uncommented.
    #[must_use]
    pub fn out_value(&self) -> Option<&str> {
        self.out_value.as_deref()
    }

    /// The value in force once staged edits apply; `None` when unset.
    #[must_use]
    pub fn current(&self) -> Option<&str> {
        match &self.pending {
            Some(Pending::Literal(value)) => Some(value),
            Some(Pending::Commented) => None,
            None => self.value.literal(),
        }
    }
}

/// Ordered, name-keyed table of [`ParamRecord`]s.
#[derive(Debug, Clone, Default)]
pub struct ValueStore {
    order: Vec<String>,
    records: HashMap<String, ParamRecord>,
}

impl ValueStore {
    /// Seeds an absent record for every name, in order.
    pub(super) fn seeded<'a>(names: impl IntoIterator<Item = &'a str>) -> Self {
        let mut store = Self::default();
        for name in names {
            if !store.records.contains_key(name) {
                store.order.push(name.to_string());
                store.records.insert(name.to_string(), ParamRecord::absent());
            }
        }
        store
    }

    /// Looks up a record by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ParamRecord> {
        self.records.get(name)
    }

    pub(super) fn get_mut(&mut self, name: &str) -> Option<&mut ParamRecord> {
        self.records.get_mut(name)
    }

    /// Iterates `(name, record)` pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamRecord)> {
        self.order
            .iter()
            .filter_map(|name| self.records.get(name).map(|r| (name.as_str(), r)))
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns `true` if the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
