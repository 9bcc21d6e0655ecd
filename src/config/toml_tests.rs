//! Tests for TOML settings parsing.

use super::toml::{SettingsFile, default_config_template};

mod parsing {
    use super::*;

    #[test]
    fn parse_empty_settings() {
        let settings = SettingsFile::parse("").unwrap();

        assert!(settings.grub.file.is_none());
        assert!(settings.catalog.path.is_none());
        assert!(settings.discovery.absent.is_empty());
        assert!(settings.probe.timeout.is_none());
        assert!(settings.paths.base_dirs.is_none());
        assert!(settings.warnings.suppress.is_empty());
    }

    #[test]
    fn parse_full_settings() {
        let toml = r#"
            [grub]
            file = "/etc/default/grub"
            output = "~/grub.new"
            update_command = ["grub2-mkconfig", "-o", "/boot/grub2/grub.cfg"]

            [catalog]
            path = "/etc/grub-wiz/catalog.toml"

            [discovery]
            absent = ["GRUB_HIDDEN_TIMEOUT"]

            [probe]
            timeout = 2

            [paths]
            base_dirs = ["/boot/grub2"]

            [warnings]
            suppress = ["GRUB_GFXMODE perhaps unsupported; stick to common values"]
        "#;

        let settings = SettingsFile::parse(toml).unwrap();

        assert_eq!(settings.grub.file.as_deref(), Some("/etc/default/grub"));
        assert_eq!(settings.grub.output.as_deref(), Some("~/grub.new"));
        assert_eq!(
            settings.grub.update_command.as_deref().map(<[String]>::len),
            Some(3)
        );
        assert_eq!(
            settings.catalog.path.as_deref(),
            Some("/etc/grub-wiz/catalog.toml")
        );
        assert_eq!(settings.discovery.absent, ["GRUB_HIDDEN_TIMEOUT"]);
        assert_eq!(settings.probe.timeout, Some(2));
        assert_eq!(
            settings.paths.base_dirs.as_deref(),
            Some(&["/boot/grub2".to_string()][..])
        );
        assert_eq!(settings.warnings.suppress.len(), 1);
    }
}

mod errors {
    use super::*;

    #[test]
    fn unknown_section_rejected() {
        assert!(SettingsFile::parse("[server]\nport = 8080").is_err());
    }

    #[test]
    fn unknown_key_rejected() {
        assert!(SettingsFile::parse("[probe]\ninterval = 3").is_err());
    }

    #[test]
    fn wrong_type_rejected() {
        assert!(SettingsFile::parse("[probe]\ntimeout = \"soon\"").is_err());
    }

    #[test]
    fn load_missing_file_is_read_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let result = SettingsFile::load(&dir.path().join("none.toml"));

        assert!(matches!(
            result,
            Err(super::super::ConfigError::FileRead { .. })
        ));
    }
}

mod template {
    use super::*;

    #[test]
    fn template_parses() {
        let settings = SettingsFile::parse(&default_config_template()).unwrap();

        assert_eq!(settings.probe.timeout, Some(5));
        assert!(settings.grub.file.is_none());
    }

    #[test]
    fn template_documents_every_section() {
        let template = default_config_template();

        for section in [
            "[grub]",
            "[catalog]",
            "[discovery]",
            "[probe]",
            "[paths]",
            "[warnings]",
        ] {
            assert!(template.contains(section), "missing {section}");
        }
    }
}
