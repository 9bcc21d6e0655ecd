//! Validation of values typed in by the user.

use thiserror::Error;

use super::{EditPattern, ParamMeta};
use crate::value::is_valid_shell_token;

/// Reasons a value is rejected for a parameter.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EditError {
    /// The parameter has no edit pattern and the value is not one of its enums.
    #[error("{name} is read-only; choose one of: {choices}")]
    ReadOnly {
        /// Parameter name
        name: String,
        /// Comma-separated allowed values
        choices: String,
    },

    /// The value does not match the parameter's edit pattern.
    #[error("{name}: '{value}' must match: {pattern}")]
    PatternMismatch {
        /// Parameter name
        name: String,
        /// Rejected value
        value: String,
        /// Pattern the value must match
        pattern: String,
    },

    /// The value would not survive as a single shell token.
    #[error("{name}: '{value}' must be empty, a word, or a quoted string")]
    NotShellToken {
        /// Parameter name
        name: String,
        /// Rejected value
        value: String,
    },
}

impl ParamMeta {
    /// Checks a user-supplied value against this parameter's edit policy.
    ///
    /// Enum values are always accepted. Otherwise the edit pattern decides,
    /// and any non-empty value must also be a valid shell token.
    ///
    /// # Errors
    ///
    /// Returns an [`EditError`] describing why the value was rejected.
    pub fn validate_edit(&self, value: &str) -> Result<(), EditError> {
        if self.has_choice(value) {
            return Ok(());
        }

        match &self.edit {
            EditPattern::ReadOnly => {
                return Err(EditError::ReadOnly {
                    name: self.name.clone(),
                    choices: self
                        .enums
                        .iter()
                        .map(|choice| choice.value.as_str())
                        .collect::<Vec<_>>()
                        .join(", "),
                });
            }
            EditPattern::Pattern { source, regex } if !regex.is_match(value) => {
                return Err(EditError::PatternMismatch {
                    name: self.name.clone(),
                    value: value.to_string(),
                    pattern: source.clone(),
                });
            }
            EditPattern::Pattern { .. } | EditPattern::Expert => {}
        }

        if is_valid_shell_token(value) {
            Ok(())
        } else {
            Err(EditError::NotShellToken {
                name: self.name.clone(),
                value: value.to_string(),
            })
        }
    }
}
