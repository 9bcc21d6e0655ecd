//! Knowledge of which parameters do not apply to this system.
//!
//! The line model consults a [`KnownAbsent`] predicate before adopting an
//! unknown `GRUB_*` assignment: a name the system is known not to support
//! is skipped instead of being registered as a discovered parameter.

use std::collections::HashSet;

/// Predicate answering "is this parameter known to be unsupported here?".
///
/// # Example
///
/// ```
/// use grub_wiz::discovery::{AbsentSet, KnownAbsent};
///
/// let absent = AbsentSet::new(["GRUB_HIDDEN_TIMEOUT"]);
/// assert!(absent.is_absent("GRUB_HIDDEN_TIMEOUT"));
/// assert!(!absent.is_absent("GRUB_TIMEOUT"));
/// ```
pub trait KnownAbsent {
    /// Returns `true` if `name` is plausible but irrelevant on this system.
    fn is_absent(&self, name: &str) -> bool;
}

/// Predicate that treats every parameter as present.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoneAbsent;

impl KnownAbsent for NoneAbsent {
    fn is_absent(&self, _name: &str) -> bool {
        false
    }
}

/// Predicate backed by an explicit set of unsupported names.
#[derive(Debug, Clone, Default)]
pub struct AbsentSet {
    names: HashSet<String>,
}

impl AbsentSet {
    /// Creates a predicate from the given names.
    #[must_use]
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Number of names in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns `true` if no names are marked absent.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl KnownAbsent for AbsentSet {
    fn is_absent(&self, name: &str) -> bool {
        self.names.contains(name)
    }
}
