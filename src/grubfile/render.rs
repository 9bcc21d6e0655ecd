//! Output lines and guidance wrapping.

use std::fmt;

/// Width guidance text is wrapped to before the `# ` prefix is added.
pub const GUIDANCE_WIDTH: usize = 68;

/// Where an output line came from. Informational only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// A line the model does not manage.
    PassThrough,
    /// A managed line with no staged edit.
    Unchanged,
    /// A managed line rewritten by an edit.
    Modified,
    /// A line appended for a previously absent parameter.
    Appended,
}

impl Origin {
    /// One-character tag used in previews.
    #[must_use]
    pub const fn tag(self) -> char {
        match self {
            Self::PassThrough => ' ',
            Self::Unchanged => '=',
            Self::Modified => '~',
            Self::Appended => '+',
        }
    }
}

/// One line of output, including its terminator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLine {
    /// Where the line came from.
    pub origin: Origin,
    /// Line text.
    pub text: String,
}

impl OutputLine {
    pub(super) fn new(origin: Origin, text: impl Into<String>) -> Self {
        Self {
            origin,
            text: text.into(),
        }
    }
}

impl fmt::Display for OutputLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}  {}", self.origin.tag(), self.text)
    }
}

/// Greedily wraps `text` into lines of at most `width` characters.
///
/// All whitespace, including newlines, separates words. Words longer than
/// `width` are placed on a line of their own rather than broken.
///
/// ```
/// use grub_wiz::grubfile::wrap;
///
/// assert_eq!(wrap("one two three", 7), ["one two", "three"]);
/// ```
#[must_use]
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();
        if current.is_empty() {
            current.push_str(word);
            current_len = word_len;
        } else if current_len + 1 + word_len <= width {
            current.push(' ');
            current.push_str(word);
            current_len += 1 + word_len;
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
            current_len = word_len;
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Lines appended for a newly set parameter: separator, guidance, assignment.
pub(super) fn appended_block(name: &str, value: &str, guidance: &str) -> Vec<OutputLine> {
    let mut block = vec![OutputLine::new(Origin::Appended, "\n")];
    block.extend(
        wrap(guidance, GUIDANCE_WIDTH)
            .into_iter()
            .map(|line| OutputLine::new(Origin::Appended, format!("# {line}\n"))),
    );
    block.push(OutputLine::new(Origin::Appended, assignment(name, value)));
    block
}

/// Formats an active assignment line.
pub(super) fn assignment(name: &str, value: &str) -> String {
    format!("{name}={value}\n")
}
