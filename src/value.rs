//! Value-shape helpers shared by the line model and the rule engine.
//!
//! GRUB defaults are shell assignments, so a simple value such as `saved`
//! may legitimately appear bare, single-quoted, or double-quoted. [`Quote`]
//! makes those three spellings enumerable, and [`Severity`] ranks the
//! messages produced by the rule engine.

use std::collections::HashMap;
use std::fmt;

/// The three ways a simple value can be spelled in the defaults file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quote {
    /// `value`
    Bare,
    /// `'value'`
    Single,
    /// `"value"`
    Double,
}

impl Quote {
    /// All quoting kinds, in the order their forms are generated.
    pub const ALL: [Self; 3] = [Self::Bare, Self::Single, Self::Double];

    /// Spells `value` with this kind of quoting.
    #[must_use]
    pub fn wrap(self, value: &str) -> String {
        match self {
            Self::Bare => value.to_string(),
            Self::Single => format!("'{value}'"),
            Self::Double => format!("\"{value}\""),
        }
    }

    /// Detects the quoting kind from the leading character.
    #[must_use]
    pub fn of(value: &str) -> Self {
        if value.starts_with('\'') {
            Self::Single
        } else if value.starts_with('"') {
            Self::Double
        } else {
            Self::Bare
        }
    }

    const fn mark(self) -> Option<char> {
        match self {
            Self::Bare => None,
            Self::Single => Some('\''),
            Self::Double => Some('"'),
        }
    }
}

/// Returns the bare, single-quoted and double-quoted spellings of `value`.
#[must_use]
pub fn quoted_forms(value: &str) -> [String; 3] {
    Quote::ALL.map(|quote| quote.wrap(value))
}

/// Returns `true` if `candidate` is any quoted spelling of `value`.
///
/// ```
/// use grub_wiz::value::is_form_of;
///
/// assert!(is_form_of("'saved'", "saved"));
/// assert!(is_form_of("\"saved\"", "saved"));
/// assert!(!is_form_of("\"saved'", "saved"));
/// ```
#[must_use]
pub fn is_form_of(candidate: &str, value: &str) -> bool {
    Quote::ALL.iter().any(|quote| match quote.mark() {
        None => candidate == value,
        Some(mark) => candidate
            .strip_prefix(mark)
            .and_then(|rest| rest.strip_suffix(mark))
            .is_some_and(|inner| inner == value),
    })
}

/// Strips a leading quote and every trailing copy of the same quote.
///
/// Only the leading character decides the quoting kind; an unbalanced
/// value such as `"abc` still loses its opening quote.
#[must_use]
pub fn unquote(value: &str) -> &str {
    match Quote::of(value).mark() {
        None => value,
        Some(mark) => value[mark.len_utf8()..].trim_end_matches(mark),
    }
}

/// Characters that are never allowed in an unquoted shell word.
///
/// Quote marks are included: a stray one would open a string that runs
/// into the following lines when the file is sourced.
const SHELL_SPECIALS: &[char] = &[
    ';', '&', '|', '<', '>', '(', ')', '{', '}', '[', ']', '$', '`', '\\', '!', '\'', '"',
];

/// Minimal safety check that a value is a single shell token.
///
/// Accepts the empty string, a single-quoted string, a double-quoted
/// string without unescaped inner double quotes, or an unquoted word free
/// of whitespace, quote marks and shell metacharacters.
#[must_use]
pub fn is_valid_shell_token(value: &str) -> bool {
    if value.is_empty() {
        return true;
    }

    if value.len() >= 2 && value.starts_with('\'') && value.ends_with('\'') {
        return true;
    }

    if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
        let inner = &value[1..value.len() - 1];
        return !inner.replace("\\\"", "").contains('"');
    }

    !value.chars().any(char::is_whitespace) && !value.contains(SHELL_SPECIALS)
}

/// Importance of a validation message; `Critical` can leave a system unbootable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    /// Discouraged but not wrong.
    Suggestion = 1,
    /// Likely a mistake.
    Caution = 2,
    /// Probably wrong for this system.
    Warning = 3,
    /// Must be fixed.
    Critical = 4,
}

impl Severity {
    /// Returns the numeric rank (1-4).
    #[must_use]
    pub const fn rank(self) -> u8 {
        self as u8
    }

    /// Converts a numeric rank back into a severity.
    #[must_use]
    pub const fn from_rank(rank: u8) -> Option<Self> {
        match rank {
            1 => Some(Self::Suggestion),
            2 => Some(Self::Caution),
            3 => Some(Self::Warning),
            4 => Some(Self::Critical),
            _ => None,
        }
    }

    /// Renders the severity as one star per rank.
    #[must_use]
    pub const fn stars(self) -> &'static str {
        match self {
            Self::Suggestion => "*",
            Self::Caution => "**",
            Self::Warning => "***",
            Self::Critical => "****",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.stars())
    }
}

/// Current parameter values as plain strings.
///
/// Unset parameters (commented out, absent, or never recorded) read as the
/// empty string, so checks can compare and search without special cases.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParamValues {
    values: HashMap<String, String>,
}

impl ParamValues {
    /// Creates an empty value map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a value, replacing any previous one.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    /// Returns the value of `name`, or `""` if it has none.
    #[must_use]
    pub fn get(&self, name: &str) -> &str {
        self.values.get(name).map_or("", String::as_str)
    }

    /// Returns `true` if `name` has a non-empty value.
    #[must_use]
    pub fn is_set(&self, name: &str) -> bool {
        !self.get(name).is_empty()
    }

    /// Number of recorded names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if nothing is recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for ParamValues
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
#[path = "value_tests.rs"]
mod tests;
