//! Tests for validated settings.

use std::path::{Path, PathBuf};
use std::time::Duration;

use tempfile::TempDir;

use super::ConfigError;
use super::cli::Cli;
use super::defaults;
use super::toml::SettingsFile;
use super::validated::{Settings, write_default_config};

/// Helper to create CLI args from a slice
fn cli(args: &[&str]) -> Cli {
    let mut full_args = vec!["grub-wiz"];
    full_args.extend(args);
    full_args.push("show");
    Cli::parse_from_iter(full_args)
}

/// Helper to parse TOML settings
fn toml(content: &str) -> SettingsFile {
    SettingsFile::parse(content).unwrap()
}

mod defaults_only {
    use super::*;

    #[test]
    fn no_sources_uses_defaults() {
        let settings = Settings::from_raw(&cli(&[]), None).unwrap();

        assert_eq!(settings.grub_file, PathBuf::from(defaults::GRUB_FILE));
        assert_eq!(settings.output, None);
        assert_eq!(settings.update_command, None);
        assert_eq!(settings.catalog, None);
        assert!(settings.absent.is_empty());
        assert_eq!(settings.probe_timeout, Duration::from_secs(defaults::PROBE_TIMEOUT_SECS));
        assert_eq!(settings.base_dirs.len(), defaults::BASE_DIRS.len());
        assert!(settings.suppress.is_empty());
        assert!(!settings.verbose);
    }

    #[test]
    fn write_target_defaults_to_grub_file() {
        let settings = Settings::from_raw(&cli(&["--file", "/tmp/g"]), None).unwrap();
        assert_eq!(settings.write_target(), Path::new("/tmp/g"));
    }
}

mod precedence {
    use super::*;

    #[test]
    fn cli_file_overrides_toml() {
        let toml = toml("[grub]\nfile = \"/from/toml\"");
        let settings = Settings::from_raw(&cli(&["--file", "/from/cli"]), Some(&toml)).unwrap();

        assert_eq!(settings.grub_file, PathBuf::from("/from/cli"));
    }

    #[test]
    fn toml_file_overrides_default() {
        let toml = toml("[grub]\nfile = \"/from/toml\"");
        let settings = Settings::from_raw(&cli(&[]), Some(&toml)).unwrap();

        assert_eq!(settings.grub_file, PathBuf::from("/from/toml"));
    }

    #[test]
    fn cli_catalog_overrides_toml() {
        let toml = toml("[catalog]\npath = \"/a.toml\"");
        let settings = Settings::from_raw(&cli(&["--catalog", "/b.toml"]), Some(&toml)).unwrap();

        assert_eq!(settings.catalog, Some(PathBuf::from("/b.toml")));
    }

    #[test]
    fn toml_output_becomes_write_target() {
        let toml = toml("[grub]\noutput = \"/tmp/out\"");
        let settings = Settings::from_raw(&cli(&[]), Some(&toml)).unwrap();

        assert_eq!(settings.write_target(), Path::new("/tmp/out"));
    }

    #[test]
    fn toml_lists_are_taken_verbatim() {
        let toml = toml(
            r#"
            [discovery]
            absent = ["GRUB_HIDDEN_TIMEOUT"]
            [paths]
            base_dirs = ["/boot/grub2", "/"]
            [warnings]
            suppress = ["GRUB_THEME path does not seem to exist"]
            "#,
        );
        let settings = Settings::from_raw(&cli(&[]), Some(&toml)).unwrap();

        assert_eq!(settings.absent, ["GRUB_HIDDEN_TIMEOUT"]);
        assert_eq!(
            settings.base_dirs,
            [PathBuf::from("/boot/grub2"), PathBuf::from("/")]
        );
        assert!(
            settings
                .suppress
                .contains("GRUB_THEME path does not seem to exist")
        );
    }

    #[test]
    fn tilde_is_expanded() {
        let Some(home) = dirs::home_dir() else {
            return;
        };
        let toml = toml("[catalog]\npath = \"~/cat.toml\"");
        let settings = Settings::from_raw(&cli(&[]), Some(&toml)).unwrap();

        assert_eq!(settings.catalog, Some(home.join("cat.toml")));
    }
}

mod validation {
    use super::*;

    #[test]
    fn zero_probe_timeout_rejected() {
        let toml = toml("[probe]\ntimeout = 0");
        let result = Settings::from_raw(&cli(&[]), Some(&toml));

        assert!(matches!(
            result,
            Err(ConfigError::InvalidDuration {
                field: "probe.timeout",
                ..
            })
        ));
    }

    #[test]
    fn probe_timeout_from_toml() {
        let toml = toml("[probe]\ntimeout = 2");
        let settings = Settings::from_raw(&cli(&[]), Some(&toml)).unwrap();

        assert_eq!(settings.probe_timeout, Duration::from_secs(2));
    }

    #[test]
    fn empty_update_command_rejected() {
        let toml = toml("[grub]\nupdate_command = []");

        let result = Settings::from_raw(&cli(&[]), Some(&toml));

        assert!(matches!(
            result,
            Err(ConfigError::EmptyList {
                field: "grub.update_command"
            })
        ));
    }

    #[test]
    fn empty_base_dirs_rejected() {
        let toml = toml("[paths]\nbase_dirs = []");
        let result = Settings::from_raw(&cli(&[]), Some(&toml));

        assert!(matches!(
            result,
            Err(ConfigError::EmptyList {
                field: "paths.base_dirs"
            })
        ));
    }

    #[test]
    fn malformed_absent_name_rejected() {
        for name in ["grub_timeout", "GRUB", "GRUB__X", "GRUB_X1"] {
            let toml = toml(&format!("[discovery]\nabsent = [\"{name}\"]"));
            let result = Settings::from_raw(&cli(&[]), Some(&toml));

            assert!(
                matches!(result, Err(ConfigError::InvalidParamName { .. })),
                "{name} should be rejected"
            );
        }
    }
}

mod loading {
    use super::*;

    #[test]
    fn explicit_config_is_loaded() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.toml");
        std::fs::write(&path, "[grub]\nfile = \"/from/file\"").unwrap();

        let settings =
            Settings::load(&cli(&["--config", path.to_str().unwrap()])).unwrap();

        assert_eq!(settings.grub_file, PathBuf::from("/from/file"));
    }

    #[test]
    fn missing_explicit_config_is_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nope.toml");

        let result = Settings::load(&cli(&["--config", path.to_str().unwrap()]));

        assert!(matches!(result, Err(ConfigError::FileRead { .. })));
    }

    #[test]
    fn write_default_config_creates_parents() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("grub-wiz").join("config.toml");

        write_default_config(&path).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(SettingsFile::parse(&written).is_ok());
    }
}
