//! Recognition of assignment lines.

use std::sync::LazyLock;

use regex::Regex;

/// Parameter name grammar: upper-case words joined by underscores.
const NAME: &str = r"[A-Z]+(?:_[A-Z]+)+";

/// Matches `NAME=value`, optionally commented out, on a trimmed line.
static ASSIGNMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"^\s*(#)?\s*({NAME})\s*=(.*)$")).expect("assignment pattern is valid")
});

static PARAM_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!("^{NAME}$")).expect("name pattern is valid"));

/// Returns `true` if `name` is spelled like a parameter name (`GRUB_TIMEOUT`).
///
/// ```
/// use grub_wiz::grubfile::is_param_name;
///
/// assert!(is_param_name("GRUB_TIMEOUT"));
/// assert!(!is_param_name("TIMEOUT"));
/// assert!(!is_param_name("grub_timeout"));
/// ```
#[must_use]
pub fn is_param_name(name: &str) -> bool {
    PARAM_NAME.is_match(name)
}

/// A recognized assignment line, commented or not.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Assignment<'a> {
    /// Parameter name.
    pub name: &'a str,
    /// Whether the assignment is disabled with a leading `#`.
    pub commented: bool,
    /// The value with any trailing comment removed.
    pub value: &'a str,
}

impl<'a> Assignment<'a> {
    /// Parses a raw line; returns `None` for anything that is not an assignment.
    ///
    /// ```
    /// use grub_wiz::grubfile::Assignment;
    ///
    /// let a = Assignment::parse("#GRUB_TIMEOUT=5 # seconds\n").unwrap();
    /// assert_eq!(a.name, "GRUB_TIMEOUT");
    /// assert!(a.commented);
    /// assert_eq!(a.value, "5");
    /// ```
    #[must_use]
    pub fn parse(line: &'a str) -> Option<Self> {
        let caps = ASSIGNMENT.captures(line.trim())?;
        let name = caps.get(2)?.as_str();
        let value = caps.get(3).map_or("", |m| m.as_str());

        Some(Self {
            name,
            commented: caps.get(1).is_some(),
            value: cleanse(value),
        })
    }
}

/// Removes an unquoted trailing comment from the value part of an assignment.
///
/// Quote state is tracked left to right, so a `#` inside single or double
/// quotes is kept. With unbalanced quotes the scan runs to the end and the
/// whole (trimmed) value is returned.
#[must_use]
pub fn cleanse(value_part: &str) -> &str {
    let value = value_part.trim();
    let mut in_single = false;
    let mut in_double = false;

    for (idx, ch) in value.char_indices() {
        match ch {
            '\'' if !in_double => in_single = !in_single,
            '"' if !in_single => in_double = !in_double,
            '#' if !in_single && !in_double => return value[..idx].trim_end(),
            _ => {}
        }
    }

    value
}

/// Collects the block of comment lines directly above `line_idx`.
///
/// Stops at the first blank or non-comment line. Each line loses its `#`
/// and the whitespace after it; lines are joined with `\n` in file order.
#[must_use]
pub fn collect_guidance<S: AsRef<str>>(lines: &[S], line_idx: usize) -> String {
    let block: Vec<&str> = lines[..line_idx.min(lines.len())]
        .iter()
        .rev()
        .map(|line| line.as_ref().trim())
        .take_while(|line| line.starts_with('#'))
        .map(|line| line[1..].trim_start())
        .collect();

    block.into_iter().rev().collect::<Vec<_>>().join("\n")
}

#[cfg(test)]
#[path = "line_tests.rs"]
mod tests;
