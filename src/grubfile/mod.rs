//! Lossless model of a grub defaults file.
//!
//! This module provides:
//! - Assignment recognition and value cleansing ([`Assignment`], [`cleanse`])
//! - The per-parameter Value Store ([`ValueStore`], [`ParamRecord`])
//! - Staged edits ([`GrubFile::set_value`], [`GrubFile::clear`])
//! - Re-serialization that preserves every unmanaged byte ([`GrubFile::render`])
//!
//! # Round trip
//!
//! Lines the model does not manage are emitted verbatim, terminators
//! included. A file whose parameters are each assigned at most once
//! renders byte-identical when nothing was edited.
//!
//! # Duplicates
//!
//! When a parameter is assigned more than once, the last active assignment
//! wins and earlier active ones are rendered commented out (see
//! [`resolve`](self::resolve)).
//!
//! # Appending
//!
//! A parameter that was absent from the file and is given a value is
//! appended after the existing content: a blank line, its guidance wrapped
//! to [`GUIDANCE_WIDTH`] columns as `# ` comments, then the assignment.
//! Appended parameters follow catalogue order.

mod error;
mod line;
mod render;
mod resolve;
mod store;

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;

pub use error::GrubFileError;
pub use line::{Assignment, cleanse, collect_guidance, is_param_name};
pub use render::{GUIDANCE_WIDTH, Origin, OutputLine, wrap};
pub use resolve::{Observation, Resolution, resolve};
pub use store::{Effective, ParamRecord, Pending, ValueStore};

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::catalog::{Catalog, ParamMeta};
use crate::discovery::KnownAbsent;
use crate::value::ParamValues;

/// Conventional location of the grub defaults file.
pub const DEFAULT_PATH: &str = "/etc/default/grub";

/// One physical line and the parameter it currently owns, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
struct LineRecord {
    text: String,
    owner: Option<String>,
}

/// A staged change, as reported by [`GrubFile::diffs`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Diff<'a> {
    /// Parameter name.
    pub name: &'a str,
    /// Value parsed from the file.
    pub before: &'a Effective,
    /// Staged edit.
    pub after: &'a Pending,
}

/// The parsed file together with the catalogue it was parsed against.
///
/// Parameters found in the file but missing from the catalogue are added
/// to the owned catalogue (see [`GrubFile::discovered`]).
#[derive(Debug, Clone)]
pub struct GrubFile {
    path: PathBuf,
    catalog: Catalog,
    lines: Vec<LineRecord>,
    store: ValueStore,
    discovered: Vec<String>,
}

impl GrubFile {
    /// Reads and parses the file at `path`.
    ///
    /// A missing file is treated as empty: every parameter starts absent.
    ///
    /// # Errors
    ///
    /// Returns [`GrubFileError::Read`] if the file exists but cannot be read.
    pub fn load(
        path: impl Into<PathBuf>,
        catalog: Catalog,
        absent: &dyn KnownAbsent,
    ) -> Result<Self, GrubFileError> {
        let path = path.into();
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::warn!(
                    "{} not found; starting with an empty configuration",
                    path.display()
                );
                String::new()
            }
            Err(e) => return Err(GrubFileError::Read { path, source: e }),
        };

        Ok(Self::parse(path, &content, catalog, absent))
    }

    /// Parses `content` as if read from `path`.
    #[must_use]
    pub fn parse(
        path: impl Into<PathBuf>,
        content: &str,
        mut catalog: Catalog,
        absent: &dyn KnownAbsent,
    ) -> Self {
        let raw: Vec<&str> = content.split_inclusive('\n').collect();
        let mut discovered = Vec::new();
        let mut observations = Vec::new();

        for (idx, text) in raw.iter().enumerate() {
            let Some(assignment) = Assignment::parse(text) else {
                continue;
            };

            if !catalog.contains(assignment.name) {
                if absent.is_absent(assignment.name) {
                    tracing::debug!("Skipping {}: not supported here", assignment.name);
                    continue;
                }
                let guidance = collect_guidance(&raw, idx);
                let meta = ParamMeta::discovered(assignment.name, assignment.value, guidance);
                if catalog.insert(meta).is_ok() {
                    tracing::debug!("Discovered {} on line {}", assignment.name, idx + 1);
                    discovered.push(assignment.name.to_string());
                }
            }

            observations.push(Observation {
                line: idx,
                name: assignment.name.to_string(),
                commented: assignment.commented,
                value: assignment.value.to_string(),
            });
        }

        let resolution = resolve(&observations);

        let mut lines: Vec<LineRecord> = raw
            .iter()
            .map(|text| LineRecord {
                text: (*text).to_string(),
                owner: None,
            })
            .collect();
        for &idx in &resolution.demoted {
            lines[idx].text.insert(0, '#');
        }

        let mut store = ValueStore::seeded(catalog.names());
        for (name, obs) in &resolution.owners {
            lines[obs.line].owner = Some((*name).to_string());
            if let Some(record) = store.get_mut(name) {
                record.line = Some(obs.line);
                if obs.commented {
                    record.value = Effective::Commented;
                    record.out_value = Some(obs.value.clone());
                } else {
                    record.value = Effective::Literal(obs.value.clone());
                }
            }
        }

        tracing::debug!(
            "Parsed {} lines: {} assignments, {} duplicates demoted, {} discovered",
            lines.len(),
            resolution.owners.len(),
            resolution.demoted.len(),
            discovered.len()
        );

        Self {
            path: path.into(),
            catalog,
            lines,
            store,
            discovered,
        }
    }

    /// Path the file was loaded from (and is written back to by default).
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Catalogue, including discovered parameters.
    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The Value Store.
    #[must_use]
    pub const fn store(&self) -> &ValueStore {
        &self.store
    }

    /// Names found in the file but not in the catalogue, in file order.
    #[must_use]
    pub fn discovered(&self) -> &[String] {
        &self.discovered
    }

    /// Looks up a parameter's record.
    #[must_use]
    pub fn record(&self, name: &str) -> Option<&ParamRecord> {
        self.store.get(name)
    }

    /// Returns the effective value parsed from the file.
    #[must_use]
    pub fn effective(&self, name: &str) -> Option<&Effective> {
        self.store.get(name).map(ParamRecord::value)
    }

    /// Stages a new value. The caller is expected to have validated it.
    ///
    /// # Errors
    ///
    /// Returns [`GrubFileError::UnknownParam`] for names not in the store.
    pub fn set_value(&mut self, name: &str, value: impl Into<String>) -> Result<(), GrubFileError> {
        self.stage(name, Some(Pending::Literal(value.into())))
    }

    /// Stages commenting the parameter out.
    ///
    /// # Errors
    ///
    /// Returns [`GrubFileError::UnknownParam`] for names not in the store.
    pub fn clear(&mut self, name: &str) -> Result<(), GrubFileError> {
        self.stage(name, Some(Pending::Commented))
    }

    /// Drops any staged edit.
    ///
    /// # Errors
    ///
    /// Returns [`GrubFileError::UnknownParam`] for names not in the store.
    pub fn revert(&mut self, name: &str) -> Result<(), GrubFileError> {
        self.stage(name, None)
    }

    fn stage(&mut self, name: &str, pending: Option<Pending>) -> Result<(), GrubFileError> {
        let record = self
            .store
            .get_mut(name)
            .ok_or_else(|| GrubFileError::UnknownParam {
                name: name.to_string(),
            })?;
        record.pending = pending;
        Ok(())
    }

    /// Returns `true` if any edit is staged.
    #[must_use]
    pub fn has_changes(&self) -> bool {
        self.store.iter().any(|(_, record)| record.pending.is_some())
    }

    /// Lists staged edits in catalogue order.
    #[must_use]
    pub fn diffs(&self) -> Vec<Diff<'_>> {
        self.store
            .iter()
            .filter_map(|(name, record)| {
                record.pending.as_ref().map(|after| Diff {
                    name,
                    before: &record.value,
                    after,
                })
            })
            .collect()
    }

    /// Current values with staged edits applied; unset parameters read as `""`.
    #[must_use]
    pub fn current_values(&self) -> ParamValues {
        self.store
            .iter()
            .map(|(name, record)| (name, record.current().unwrap_or_default()))
            .collect()
    }

    /// Renders the full output, line by line.
    #[must_use]
    pub fn render(&self) -> Vec<OutputLine> {
        let mut out = Vec::with_capacity(self.lines.len());

        for line in &self.lines {
            let Some(record) = line.owner.as_deref().and_then(|name| {
                self.store.get(name).map(|record| (name, record))
            }) else {
                out.push(OutputLine::new(Origin::PassThrough, line.text.clone()));
                continue;
            };
            let (name, record) = record;

            match (&record.pending, &record.value) {
                (None, _) => out.push(OutputLine::new(Origin::Unchanged, line.text.clone())),
                (Some(Pending::Commented), Effective::Absent) => {}
                (Some(Pending::Commented), Effective::Commented) => {
                    out.push(OutputLine::new(Origin::Modified, line.text.clone()));
                }
                (Some(Pending::Commented), Effective::Literal(_)) => {
                    out.push(OutputLine::new(Origin::Modified, format!("#{}", line.text)));
                }
                (Some(Pending::Literal(value)), _) => {
                    out.push(OutputLine::new(Origin::Modified, render::assignment(name, value)));
                }
            }
        }

        let mut appended = Vec::new();
        for meta in self.catalog.iter() {
            let Some(record) = self.store.get(&meta.name) else {
                continue;
            };
            if let (Effective::Absent, Some(Pending::Literal(value))) =
                (&record.value, &record.pending)
            {
                appended.extend(render::appended_block(&meta.name, value, &meta.guidance));
            }
        }

        if !appended.is_empty() {
            if let Some(last) = out.last_mut() {
                if !last.text.ends_with('\n') {
                    last.text.push('\n');
                }
            }
            out.extend(appended);
        }

        out
    }

    /// Renders the full output as a single string.
    #[must_use]
    pub fn contents(&self) -> String {
        self.render().into_iter().map(|line| line.text).collect()
    }

    /// Renders the output with each line prefixed by its origin tag.
    #[must_use]
    pub fn preview(&self) -> String {
        self.render().iter().map(ToString::to_string).collect()
    }

    /// Writes the rendered output back to [`GrubFile::path`].
    ///
    /// # Errors
    ///
    /// See [`GrubFile::write_to`].
    pub fn write(&self) -> Result<(), GrubFileError> {
        self.write_to(&self.path)
    }

    /// Writes the rendered output to `path`.
    ///
    /// Writes to `{path}.tmp` and renames it over `path`, so the
    /// destination is either fully replaced or left as it was. The
    /// in-memory state is untouched either way, so a failed write can be
    /// retried.
    ///
    /// # Errors
    ///
    /// Returns [`GrubFileError::Write`] if the temp file cannot be written
    /// or renamed.
    pub fn write_to(&self, path: &Path) -> Result<(), GrubFileError> {
        let write_err = |source| GrubFileError::Write {
            path: path.to_path_buf(),
            source,
        };

        let temp_path = PathBuf::from(format!("{}.tmp", path.display()));
        std::fs::write(&temp_path, self.contents()).map_err(write_err)?;

        // Keep the destination's mode (typically 0644 for /etc/default/grub).
        if let Ok(metadata) = std::fs::metadata(path) {
            if let Err(e) = std::fs::set_permissions(&temp_path, metadata.permissions()) {
                tracing::debug!("Could not copy permissions to {}: {e}", temp_path.display());
            }
        }

        if let Err(e) = std::fs::rename(&temp_path, path) {
            let _ = std::fs::remove_file(&temp_path);
            return Err(write_err(e));
        }

        tracing::info!("Wrote {}", path.display());
        Ok(())
    }
}

/// Where [`backup`] copies `path`: the same name with `.bak` appended.
#[must_use]
pub fn backup_path(path: &Path) -> PathBuf {
    PathBuf::from(format!("{}.bak", path.display()))
}

/// Copies an existing file to [`backup_path`] before it is overwritten.
///
/// Returns `None` when there is nothing to back up. An earlier backup is
/// replaced, so the copy always holds the content from just before the
/// latest write.
///
/// # Errors
///
/// Returns [`GrubFileError::Backup`] if the copy fails.
pub fn backup(path: &Path) -> Result<Option<PathBuf>, GrubFileError> {
    if !path.is_file() {
        return Ok(None);
    }

    let target = backup_path(path);
    std::fs::copy(path, &target).map_err(|source| GrubFileError::Backup {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::info!("Backed up {} to {}", path.display(), target.display());
    Ok(Some(target))
}
