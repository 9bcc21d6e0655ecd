//! Tests for the catalogue table and edit validation.

use super::*;
use crate::discovery::AbsentSet;

fn meta(name: &str, section: &str) -> ParamMeta {
    ParamMeta {
        name: name.to_string(),
        section: section.to_string(),
        default: String::new(),
        enums: Vec::new(),
        edit: EditPattern::Expert,
        guidance: String::new(),
        checks: Vec::new(),
    }
}

fn with_enums(mut meta: ParamMeta, values: &[&str]) -> ParamMeta {
    meta.enums = values
        .iter()
        .map(|v| EnumChoice {
            value: (*v).to_string(),
            meaning: String::new(),
        })
        .collect();
    meta
}

mod table {
    use super::*;

    #[test]
    fn preserves_insertion_order() {
        let mut catalog = Catalog::new();
        catalog.insert(meta("GRUB_TIMEOUT", "A")).unwrap();
        catalog.insert(meta("GRUB_DEFAULT", "A")).unwrap();
        catalog.insert(meta("GRUB_THEME", "B")).unwrap();

        let names: Vec<_> = catalog.names().collect();
        assert_eq!(names, ["GRUB_TIMEOUT", "GRUB_DEFAULT", "GRUB_THEME"]);
        assert_eq!(catalog.len(), 3);
    }

    #[test]
    fn rejects_duplicate_names() {
        let mut catalog = Catalog::new();
        catalog.insert(meta("GRUB_TIMEOUT", "A")).unwrap();

        let err = catalog.insert(meta("GRUB_TIMEOUT", "B")).unwrap_err();
        assert!(matches!(err, CatalogError::Duplicate { ref name } if name == "GRUB_TIMEOUT"));
        assert_eq!(catalog.get("GRUB_TIMEOUT").unwrap().section, "A");
    }

    #[test]
    fn remove_absent_reindexes_remaining_entries() {
        let mut catalog = Catalog::new();
        catalog.insert(meta("GRUB_A_X", "A")).unwrap();
        catalog.insert(meta("GRUB_B_X", "A")).unwrap();
        catalog.insert(meta("GRUB_C_X", "A")).unwrap();

        let removed = catalog.remove_absent(&AbsentSet::new(["GRUB_A_X"]));

        assert_eq!(removed, ["GRUB_A_X"]);
        assert!(!catalog.contains("GRUB_A_X"));
        assert_eq!(catalog.get("GRUB_C_X").unwrap().name, "GRUB_C_X");
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn sections_group_in_first_appearance_order() {
        let mut catalog = Catalog::new();
        catalog.insert(meta("GRUB_A_X", "Timeout")).unwrap();
        catalog.insert(meta("GRUB_B_X", "Kernel")).unwrap();
        catalog.insert(meta("GRUB_C_X", "Timeout")).unwrap();

        let sections = catalog.sections();
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0], ("Timeout", vec!["GRUB_A_X", "GRUB_C_X"]));
        assert_eq!(sections[1], ("Kernel", vec!["GRUB_B_X"]));
    }

    #[test]
    fn builtin_catalog_loads() {
        let catalog = Catalog::builtin().unwrap();

        assert!(catalog.contains("GRUB_DEFAULT"));
        assert!(catalog.contains("GRUB_TIMEOUT_STYLE"));
        assert!(catalog.get("GRUB_TIMEOUT_STYLE").unwrap().is_plain_enum());
        assert!(!catalog.get("GRUB_DEFAULT").unwrap().is_plain_enum());
    }

    #[test]
    fn discovered_meta_uses_found_value_as_default() {
        let meta = ParamMeta::discovered("GRUB_FOO_BAR", "\"x\"", "about foo".to_string());

        assert_eq!(meta.default, "\"x\"");
        assert_eq!(meta.section, DISCOVERED_SECTION);
        assert!(matches!(meta.edit, EditPattern::Expert));
        assert!(meta.enums.is_empty());
    }
}

mod edit_pattern {
    use super::*;

    #[test]
    fn parse_recognizes_marker_and_absence() {
        assert!(matches!(
            EditPattern::parse("P", None).unwrap(),
            EditPattern::ReadOnly
        ));
        assert!(matches!(
            EditPattern::parse("P", Some(EXPERT_EDIT_MARKER)).unwrap(),
            EditPattern::Expert
        ));
    }

    #[test]
    fn parse_rejects_invalid_regex() {
        let err = EditPattern::parse("GRUB_X_Y", Some("(unclosed")).unwrap_err();
        assert!(err.to_string().contains("GRUB_X_Y"));
    }

    #[test]
    fn pattern_is_anchored_at_start_only() {
        let mut m = meta("GRUB_TIMEOUT", "A");
        m.edit = EditPattern::parse("GRUB_TIMEOUT", Some(r"\d+")).unwrap();

        assert!(m.validate_edit("10").is_ok());
        assert!(m.validate_edit("10s").is_ok());
        assert!(matches!(
            m.validate_edit("x10"),
            Err(EditError::PatternMismatch { .. })
        ));
    }
}

mod validate_edit {
    use super::*;

    #[test]
    fn enum_values_always_accepted() {
        let mut m = with_enums(meta("GRUB_TIMEOUT_STYLE", "A"), &["menu", "hidden"]);
        m.edit = EditPattern::ReadOnly;

        assert!(m.validate_edit("hidden").is_ok());
    }

    #[test]
    fn read_only_rejects_other_values_and_lists_choices() {
        let mut m = with_enums(meta("GRUB_TIMEOUT_STYLE", "A"), &["menu", "hidden"]);
        m.edit = EditPattern::ReadOnly;

        let err = m.validate_edit("weird").unwrap_err();
        assert_eq!(
            err,
            EditError::ReadOnly {
                name: "GRUB_TIMEOUT_STYLE".to_string(),
                choices: "menu, hidden".to_string(),
            }
        );
    }

    #[test]
    fn expert_mode_still_requires_shell_token() {
        let m = meta("GRUB_CMDLINE_LINUX", "A");

        assert!(m.validate_edit("\"quiet splash\"").is_ok());
        assert!(matches!(
            m.validate_edit("quiet splash"),
            Err(EditError::NotShellToken { .. })
        ));
    }

    #[test]
    fn pattern_match_then_shell_token() {
        let mut m = meta("GRUB_THEME", "A");
        m.edit = EditPattern::parse("GRUB_THEME", Some(r"^(/|\w).*$")).unwrap();

        assert!(m.validate_edit("/boot/grub/themes/x").is_ok());
        assert!(matches!(
            m.validate_edit("/boot/my theme"),
            Err(EditError::NotShellToken { .. })
        ));
    }
}
