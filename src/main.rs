//! grub-wiz: inspect, check and edit the GRUB defaults file
//!
//! Entry point for the grub-wiz application.

use grub_wiz::config::{Cli, Command, Settings, defaults, write_default_config};
use grub_wiz::probe::LsblkProbe;
use std::path::PathBuf;
use std::process::ExitCode;

mod app;
mod run;

use app::{exit_code, print_config_hint, setup_tracing};

/// Main entry point.
///
/// Excluded from coverage as it's the thin wrapper around testable components.
#[cfg(not(tarpaulin_include))]
fn main() -> ExitCode {
    let cli = Cli::parse_args();

    // Handle init subcommand
    if let Command::Init { output } = &cli.command {
        let output = output
            .clone()
            .or_else(defaults::config_path)
            .unwrap_or_else(|| PathBuf::from(defaults::CONFIG_FILE_NAME));
        return handle_init(&output);
    }

    // Load and validate settings
    let settings = match Settings::load(&cli) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            print_config_hint(&e);
            return exit_code::CONFIG_ERROR;
        }
    };

    // Setup logging and run
    setup_tracing(settings.verbose);
    tracing::debug!("{settings}");

    run_command(&cli.command, &settings)
}

/// Handles the `init` subcommand.
fn handle_init(output: &std::path::Path) -> ExitCode {
    match write_default_config(output) {
        Ok(()) => {
            println!("Settings template written to: {}", output.display());
            exit_code::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            exit_code::CONFIG_ERROR
        }
    }
}

/// Runs a command against the real disk layout and stdout.
#[cfg(not(tarpaulin_include))]
fn run_command(command: &Command, settings: &Settings) -> ExitCode {
    let probe = LsblkProbe::new(settings.probe_timeout);
    let mut stdout = std::io::stdout().lock();

    match run::execute(command, settings, &probe, &mut stdout) {
        Ok(run::Outcome::Clean) => exit_code::SUCCESS,
        Ok(run::Outcome::CriticalWarnings) => exit_code::warnings_found(),
        Err(e) => {
            tracing::error!("{e}");
            exit_code::runtime_error()
        }
    }
}
