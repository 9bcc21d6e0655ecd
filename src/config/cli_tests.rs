//! Tests for CLI argument parsing.

use std::path::PathBuf;

use super::cli::{Cli, Command};

mod parsing {
    use super::*;

    #[test]
    fn parse_global_options_before_subcommand() {
        let cli = Cli::parse_from_iter([
            "grub-wiz",
            "--file",
            "/tmp/grub",
            "--catalog",
            "cat.toml",
            "-v",
            "show",
        ]);

        assert_eq!(cli.file, Some(PathBuf::from("/tmp/grub")));
        assert_eq!(cli.catalog, Some(PathBuf::from("cat.toml")));
        assert!(cli.verbose);
        assert!(matches!(cli.command, Command::Show { all: false }));
    }

    #[test]
    fn parse_global_options_after_subcommand() {
        let cli = Cli::parse_from_iter(["grub-wiz", "check", "-c", "settings.toml"]);

        assert_eq!(cli.config, Some(PathBuf::from("settings.toml")));
    }

    #[test]
    fn subcommand_is_required() {
        assert!(Cli::try_parse_from_iter(["grub-wiz"]).is_err());
    }

    #[test]
    fn show_all() {
        let cli = Cli::parse_from_iter(["grub-wiz", "show", "--all"]);
        assert!(matches!(cli.command, Command::Show { all: true }));
    }
}

mod check {
    use super::*;

    #[test]
    fn min_severity_in_range() {
        let cli = Cli::parse_from_iter(["grub-wiz", "check", "--min-severity", "3"]);

        match cli.command {
            Command::Check {
                min_severity,
                show_suppressed,
            } => {
                assert_eq!(min_severity, Some(3));
                assert!(!show_suppressed);
            }
            other => panic!("Expected Check, got {other:?}"),
        }
    }

    #[test]
    fn min_severity_out_of_range_rejected() {
        assert!(Cli::try_parse_from_iter(["grub-wiz", "check", "--min-severity", "5"]).is_err());
        assert!(Cli::try_parse_from_iter(["grub-wiz", "check", "--min-severity", "0"]).is_err());
    }
}

mod edit {
    use super::*;

    #[test]
    fn set_and_clear_accumulate() {
        let cli = Cli::parse_from_iter([
            "grub-wiz",
            "edit",
            "--set",
            "GRUB_TIMEOUT=3",
            "--set",
            "GRUB_CMDLINE_LINUX_DEFAULT=\"quiet splash\"",
            "--clear",
            "GRUB_THEME",
            "--dry-run",
        ]);

        match cli.command {
            Command::Edit {
                set,
                clear,
                output,
                dry_run,
                force,
                update,
            } => {
                assert_eq!(
                    set,
                    [
                        ("GRUB_TIMEOUT".to_string(), "3".to_string()),
                        (
                            "GRUB_CMDLINE_LINUX_DEFAULT".to_string(),
                            "\"quiet splash\"".to_string()
                        ),
                    ]
                );
                assert_eq!(clear, ["GRUB_THEME"]);
                assert_eq!(output, None);
                assert!(dry_run);
                assert!(!force);
                assert!(!update);
            }
            other => panic!("Expected Edit, got {other:?}"),
        }
    }

    #[test]
    fn update_flag_parses() {
        let cli = Cli::parse_from_iter(["grub-wiz", "edit", "--set", "GRUB_TIMEOUT=1", "--update"]);

        let Command::Edit { update, .. } = cli.command else {
            panic!("Expected Edit");
        };
        assert!(update);
    }

    #[test]
    fn value_may_contain_equals_and_be_empty() {
        let cli = Cli::parse_from_iter([
            "grub-wiz",
            "edit",
            "--set",
            "GRUB_CMDLINE_LINUX=rd.lvm.vg=vg0",
            "--set",
            "GRUB_THEME=",
        ]);

        let Command::Edit { set, .. } = cli.command else {
            panic!("Expected Edit");
        };
        assert_eq!(set[0].1, "rd.lvm.vg=vg0");
        assert_eq!(set[1].1, "");
    }

    #[test]
    fn set_without_equals_rejected() {
        let result = Cli::try_parse_from_iter(["grub-wiz", "edit", "--set", "GRUB_TIMEOUT"]);
        assert!(result.is_err());
    }

    #[test]
    fn set_without_name_rejected() {
        let result = Cli::try_parse_from_iter(["grub-wiz", "edit", "--set", "=3"]);
        assert!(result.is_err());
    }
}

mod init {
    use super::*;

    #[test]
    fn init_default_output_is_unset() {
        let cli = Cli::parse_from_iter(["grub-wiz", "init"]);

        assert!(cli.is_init());
        assert!(matches!(cli.command, Command::Init { output: None }));
    }

    #[test]
    fn init_custom_output() {
        let cli = Cli::parse_from_iter(["grub-wiz", "init", "-o", "my.toml"]);

        match cli.command {
            Command::Init { output } => assert_eq!(output, Some(PathBuf::from("my.toml"))),
            other => panic!("Expected Init, got {other:?}"),
        }
    }

    #[test]
    fn other_commands_are_not_init() {
        assert!(!Cli::parse_from_iter(["grub-wiz", "check"]).is_init());
    }
}
