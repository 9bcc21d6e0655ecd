//! Duplicate resolution over the assignment lines of a file.
//!
//! Parsing happens in two passes. The first records one immutable
//! [`Observation`] per assignment line. The second folds those observations
//! per parameter to decide which single line owns the parameter and which
//! earlier active lines must be demoted to comments.
//!
//! The folding rule, applied in file order:
//! - a commented line never displaces an earlier active line;
//! - any other line takes ownership, and if the previous owner was active
//!   it is demoted.
//!
//! So the last active line wins, and a file that mentions a parameter only
//! in comments is owned by its last commented line.

use std::collections::HashMap;

/// One assignment line as seen during the first pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Observation {
    /// Line index in the file.
    pub line: usize,
    /// Parameter name.
    pub name: String,
    /// Whether the line is commented out.
    pub commented: bool,
    /// Cleansed value.
    pub value: String,
}

/// Outcome of the second pass.
#[derive(Debug, Default)]
pub struct Resolution<'a> {
    /// The owning observation for each parameter.
    pub owners: HashMap<&'a str, &'a Observation>,
    /// Lines that were active but lost ownership, in file order.
    pub demoted: Vec<usize>,
}

/// Folds observations (in file order) into owners and demotions.
#[must_use]
pub fn resolve(observations: &[Observation]) -> Resolution<'_> {
    let mut resolution = Resolution::default();

    for obs in observations {
        if let Some(prev) = resolution.owners.get(obs.name.as_str()) {
            if obs.commented && !prev.commented {
                continue;
            }
            if !prev.commented {
                resolution.demoted.push(prev.line);
            }
        }
        resolution.owners.insert(obs.name.as_str(), obs);
    }

    resolution.demoted.sort_unstable();
    resolution
}
