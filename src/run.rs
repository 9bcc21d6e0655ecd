//! Command execution.
//!
//! This module loads the catalogue and the grub file, runs the rule
//! engine, and carries out the `show`, `check` and `edit` commands.
//! `edit` backs the target up before overwriting it and can regenerate
//! grub.cfg afterwards.
//! Reports go to the supplied writer; logging goes through tracing.

use std::io::Write;
use std::path::Path;

use thiserror::Error;

use grub_wiz::catalog::{Catalog, CatalogError, CatalogFile, EditError};
use grub_wiz::config::{Command, Settings};
use grub_wiz::discovery::AbsentSet;
use grub_wiz::grubfile::{self, Effective, GrubFile, GrubFileError};
use grub_wiz::probe::DiskLayoutSource;
use grub_wiz::update::{UpdateCommand, UpdateError};
use grub_wiz::validate::{Filtered, PathResolver, Validator, WarningFilter};
use grub_wiz::value::Severity;

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;

/// Error type for command failures.
#[derive(Debug, Error)]
pub enum RunError {
    /// The catalogue could not be loaded.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// The grub file could not be read or written, or a name was unknown.
    #[error(transparent)]
    GrubFile(#[from] GrubFileError),

    /// A value was rejected by its parameter's edit policy.
    #[error("Rejected edit: {0}")]
    Edit(#[from] EditError),

    /// grub.cfg could not be regenerated; the defaults file was already written.
    #[error("GRUB update failed: {0}")]
    Update(#[from] UpdateError),

    /// Failed to print the report.
    #[error("Failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

/// How a command finished, when it did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Nothing critical to report.
    Clean,
    /// Critical warnings remain; for `edit`, nothing was written.
    CriticalWarnings,
}

/// Executes `command` with the given settings.
///
/// # Errors
///
/// Returns an error if the catalogue or grub file cannot be loaded, an
/// edit is rejected, or the result cannot be written.
pub fn execute(
    command: &Command,
    settings: &Settings,
    layout: &dyn DiskLayoutSource,
    out: &mut dyn Write,
) -> Result<Outcome, RunError> {
    if matches!(command, Command::Init { .. }) {
        return Ok(Outcome::Clean);
    }

    let grub = load_grub_file(settings)?;
    let validator = Validator::new(layout, PathResolver::new(settings.base_dirs.clone()));

    match command {
        Command::Init { .. } => Ok(Outcome::Clean),
        Command::Show { all } => {
            show(&grub, *all, out)?;
            Ok(Outcome::Clean)
        }
        Command::Check {
            min_severity,
            show_suppressed,
        } => {
            let filter = WarningFilter {
                suppress: settings.suppress.clone(),
                min_severity: min_severity
                    .and_then(Severity::from_rank)
                    .unwrap_or(Severity::Suggestion),
                show_suppressed: *show_suppressed,
            };
            check(&grub, &validator, &filter, out)
        }
        Command::Edit {
            set,
            clear,
            output,
            dry_run,
            force,
            update,
        } => {
            let update = if *update && !*dry_run {
                Some(update_command(settings)?)
            } else {
                None
            };
            let request = EditRequest {
                set,
                clear,
                target: output.as_deref().unwrap_or_else(|| settings.write_target()),
                dry_run: *dry_run,
                force: *force,
                update,
            };
            let filter = WarningFilter {
                suppress: settings.suppress.clone(),
                ..WarningFilter::default()
            };
            edit(grub, &validator, &filter, &request, out)
        }
    }
}

/// The configured update command, else one found on this system.
fn update_command(settings: &Settings) -> Result<UpdateCommand, UpdateError> {
    settings
        .update_command
        .as_deref()
        .and_then(UpdateCommand::from_argv)
        .or_else(UpdateCommand::detect)
        .ok_or(UpdateError::NotFound)
}

/// Loads the catalogue, drops known-absent names, and parses the grub file.
fn load_grub_file(settings: &Settings) -> Result<GrubFile, RunError> {
    let mut catalog = match &settings.catalog {
        Some(path) => {
            tracing::debug!("Using catalogue {}", path.display());
            CatalogFile::load(path)?.into_catalog()?
        }
        None => Catalog::builtin()?,
    };

    let absent = AbsentSet::new(settings.absent.iter().map(String::as_str));
    let removed = catalog.remove_absent(&absent);
    if !removed.is_empty() {
        tracing::debug!("Not applicable here: {}", removed.join(", "));
    }

    Ok(GrubFile::load(&settings.grub_file, catalog, &absent)?)
}

fn show(grub: &GrubFile, all: bool, out: &mut dyn Write) -> std::io::Result<()> {
    for (section, names) in grub.catalog().sections() {
        let rows: Vec<(&str, &Effective)> = names
            .into_iter()
            .filter_map(|name| grub.effective(name).map(|value| (name, value)))
            .filter(|(_, value)| all || !matches!(value, Effective::Absent))
            .collect();
        if rows.is_empty() {
            continue;
        }

        writeln!(out, "[{section}]")?;
        let width = rows.iter().map(|(name, _)| name.len()).max().unwrap_or(0);
        for (name, value) in rows {
            writeln!(out, "  {name:<width$} = {value}")?;
        }
    }
    Ok(())
}

fn check(
    grub: &GrubFile,
    validator: &Validator<'_>,
    filter: &WarningFilter,
    out: &mut dyn Write,
) -> Result<Outcome, RunError> {
    let warns = validator.make_warns(&grub.current_values(), grub.catalog());
    let report = warns.filtered(filter);
    print_report(&report, out)?;
    Ok(outcome(&report))
}

struct EditRequest<'a> {
    set: &'a [(String, String)],
    clear: &'a [String],
    target: &'a Path,
    dry_run: bool,
    force: bool,
    update: Option<UpdateCommand>,
}

fn edit(
    mut grub: GrubFile,
    validator: &Validator<'_>,
    filter: &WarningFilter,
    request: &EditRequest<'_>,
    out: &mut dyn Write,
) -> Result<Outcome, RunError> {
    for (name, value) in request.set {
        let meta = grub
            .catalog()
            .get(name)
            .ok_or_else(|| GrubFileError::UnknownParam { name: name.clone() })?;
        meta.validate_edit(value)?;
        grub.set_value(name, value.as_str())?;
    }
    for name in request.clear {
        grub.clear(name)?;
    }

    if !grub.has_changes() {
        writeln!(out, "No changes requested.")?;
        return Ok(Outcome::Clean);
    }

    for diff in grub.diffs() {
        writeln!(out, "{}: {} -> {}", diff.name, diff.before, diff.after)?;
    }

    let report = validator
        .make_warns(&grub.current_values(), grub.catalog())
        .filtered(filter);
    print_report(&report, out)?;

    if request.dry_run {
        write!(out, "{}", grub.preview())?;
        return Ok(outcome(&report));
    }

    if outcome(&report) == Outcome::CriticalWarnings && !request.force {
        writeln!(
            out,
            "Not writing: critical warnings remain (use --force to write anyway)."
        )?;
        return Ok(Outcome::CriticalWarnings);
    }

    if let Some(copy) = grubfile::backup(request.target)? {
        writeln!(out, "Saved previous version as {}", copy.display())?;
    }
    grub.write_to(request.target)?;
    writeln!(out, "Wrote {}", request.target.display())?;

    if let Some(command) = &request.update {
        writeln!(out, "Running {command}")?;
        command.run()?;
        writeln!(out, "GRUB configuration regenerated.")?;
    }
    Ok(Outcome::Clean)
}

fn print_report(report: &Filtered, out: &mut dyn Write) -> std::io::Result<()> {
    if report.warnings.is_empty() {
        writeln!(out, "No warnings.")?;
    }
    for (param, warns) in report.warnings.iter() {
        for warning in warns {
            writeln!(out, "{:>4} {param}: {}", warning.severity, warning.message)?;
        }
    }
    if report.suppressed > 0 {
        writeln!(out, "({} suppressed)", report.suppressed)?;
    }
    Ok(())
}

fn outcome(report: &Filtered) -> Outcome {
    if report.warnings.max_severity() == Some(Severity::Critical) {
        Outcome::CriticalWarnings
    } else {
        Outcome::Clean
    }
}
