//! Tests for TOML catalogue parsing.

use super::file::CatalogFile;
use super::{CatalogError, EditPattern};

mod parsing {
    use super::*;

    #[test]
    fn parse_minimal_param() {
        let toml = r#"
            [[param]]
            name = "GRUB_TIMEOUT"
        "#;

        let file = CatalogFile::parse(toml).unwrap();
        assert_eq!(file.params.len(), 1);
        assert_eq!(file.params[0].name, "GRUB_TIMEOUT");
        assert!(file.params[0].edit.is_none());
        assert!(file.params[0].enums.is_empty());
    }

    #[test]
    fn parse_full_param() {
        let toml = r#"
            [[param]]
            name = "GRUB_TIMEOUT_STYLE"
            section = "Timeout & Menu"
            default = "menu"
            edit = '^(menu|countdown|hidden)$'
            guidance = "How the timeout is displayed."
            enums = [
                { value = "menu", meaning = "Show the menu." },
                { value = "countdown" },
                { value = "hidden", meaning = "Hide it." },
            ]
        "#;

        let file = CatalogFile::parse(toml).unwrap();
        let entry = &file.params[0];
        assert_eq!(entry.section, "Timeout & Menu");
        assert_eq!(entry.default, "menu");
        assert_eq!(entry.edit.as_deref(), Some("^(menu|countdown|hidden)$"));
        let values: Vec<_> = entry.enums.iter().map(|e| e.value.as_str()).collect();
        assert_eq!(values, ["menu", "countdown", "hidden"]);
        assert_eq!(entry.enums[1].meaning, "");
    }

    #[test]
    fn empty_file_has_no_params() {
        let file = CatalogFile::parse("").unwrap();
        assert!(file.params.is_empty());
    }

    #[test]
    fn unknown_field_is_rejected() {
        let toml = r#"
            [[param]]
            name = "GRUB_TIMEOUT"
            colour = "blue"
        "#;

        let err = CatalogFile::parse(toml).unwrap_err();
        assert!(matches!(err, CatalogError::TomlParse(_)));
    }

    #[test]
    fn missing_name_is_rejected() {
        let toml = r#"
            [[param]]
            section = "Nowhere"
        "#;

        assert!(CatalogFile::parse(toml).is_err());
    }
}

mod conversion {
    use super::*;

    #[test]
    fn into_catalog_keeps_file_order() {
        let toml = r#"
            [[param]]
            name = "GRUB_TIMEOUT"
            edit = '^-?\d+$'

            [[param]]
            name = "GRUB_CMDLINE_LINUX"
            edit = ">>EXPERT_EDIT<<"

            [[param]]
            name = "GRUB_TERMINAL_INPUT"
            enums = [{ value = "console" }]
        "#;

        let catalog = CatalogFile::parse(toml).unwrap().into_catalog().unwrap();

        let names: Vec<_> = catalog.names().collect();
        assert_eq!(
            names,
            ["GRUB_TIMEOUT", "GRUB_CMDLINE_LINUX", "GRUB_TERMINAL_INPUT"]
        );
        assert!(matches!(
            catalog.get("GRUB_TIMEOUT").unwrap().edit,
            EditPattern::Pattern { .. }
        ));
        assert!(matches!(
            catalog.get("GRUB_CMDLINE_LINUX").unwrap().edit,
            EditPattern::Expert
        ));
        assert!(matches!(
            catalog.get("GRUB_TERMINAL_INPUT").unwrap().edit,
            EditPattern::ReadOnly
        ));
    }

    #[test]
    fn duplicate_names_fail_conversion() {
        let toml = r#"
            [[param]]
            name = "GRUB_TIMEOUT"

            [[param]]
            name = "GRUB_TIMEOUT"
        "#;

        let err = CatalogFile::parse(toml)
            .unwrap()
            .into_catalog()
            .unwrap_err();
        assert!(matches!(err, CatalogError::Duplicate { .. }));
    }

    #[test]
    fn load_reports_missing_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("missing.toml");

        let err = CatalogFile::load(&path).unwrap_err();
        assert!(matches!(err, CatalogError::FileRead { .. }));
    }

    #[test]
    fn builtin_has_unique_valid_entries() {
        let catalog = CatalogFile::builtin().unwrap().into_catalog().unwrap();
        assert!(catalog.len() >= 15);
        assert!(catalog.iter().all(|meta| !meta.guidance.is_empty()));
    }
}
