//! Resolution of the file paths GRUB parameters refer to.

use std::path::{Path, PathBuf};

use crate::value::unquote;

/// Placeholder GRUB expands to its own directory.
const PREFIX_PLACEHOLDER: &str = "$prefix";

/// Directories searched for relative paths, most common layout first.
pub const DEFAULT_BASE_DIRS: &[&str] = &["/boot/grub", "/boot/grub2", "/usr/share/grub", "/"];

/// Outcome of [`PathResolver::resolve`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPath {
    /// Whether anything exists at `path`.
    pub exists: bool,
    /// The existing path, or the most likely location when nothing exists.
    pub path: PathBuf,
}

/// Resolves parameter values to filesystem paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathResolver {
    base_dirs: Vec<PathBuf>,
}

impl Default for PathResolver {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_DIRS.iter().map(PathBuf::from).collect())
    }
}

impl PathResolver {
    /// Creates a resolver over `base_dirs`; the first is the primary one.
    ///
    /// An empty list falls back to [`DEFAULT_BASE_DIRS`].
    #[must_use]
    pub fn new(base_dirs: Vec<PathBuf>) -> Self {
        if base_dirs.is_empty() {
            return Self::default();
        }
        Self { base_dirs }
    }

    /// Directories searched, in order.
    #[must_use]
    pub fn base_dirs(&self) -> &[PathBuf] {
        &self.base_dirs
    }

    fn primary(&self) -> &Path {
        self.base_dirs.first().map_or(Path::new("/"), PathBuf::as_path)
    }

    /// Resolves a (possibly quoted) parameter value.
    ///
    /// Absolute paths are checked as given. Relative paths are tried under
    /// each base directory in turn; when none exists the result points
    /// under the primary directory.
    #[must_use]
    pub fn resolve(&self, value: &str) -> ResolvedPath {
        let stripped = unquote(value.trim());

        let expanded = match stripped.strip_prefix(PREFIX_PLACEHOLDER) {
            Some(rest) => {
                let rest = rest.trim_start_matches('/');
                self.primary().join(rest)
            }
            None => PathBuf::from(stripped),
        };

        if expanded.is_absolute() {
            return ResolvedPath {
                exists: expanded.exists(),
                path: expanded,
            };
        }

        self.base_dirs
            .iter()
            .map(|dir| dir.join(&expanded))
            .find(|candidate| candidate.exists())
            .map_or_else(
                || ResolvedPath {
                    exists: false,
                    path: self.primary().join(&expanded),
                },
                |path| ResolvedPath { exists: true, path },
            )
    }
}
