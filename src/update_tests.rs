//! Tests for the GRUB update command.

use super::*;

fn argv(words: &[&str]) -> Vec<String> {
    words.iter().map(|word| (*word).to_string()).collect()
}

mod command {
    use super::*;

    #[test]
    fn from_argv_splits_program_and_args() {
        let command = UpdateCommand::from_argv(&argv(&["grub-mkconfig", "-o", "/boot/grub/grub.cfg"]))
            .unwrap();

        assert_eq!(command.program(), "grub-mkconfig");
        assert_eq!(command.to_string(), "grub-mkconfig -o /boot/grub/grub.cfg");
    }

    #[test]
    fn empty_argv_is_no_command() {
        assert_eq!(UpdateCommand::from_argv(&[]), None);
    }
}

mod detection {
    use super::*;

    #[test]
    fn prefers_update_grub() {
        let command = UpdateCommand::detect_with(|_| true, |_| true).unwrap();

        assert_eq!(command.to_string(), "update-grub");
    }

    #[test]
    fn mkconfig_needs_its_output_directory() {
        let command = UpdateCommand::detect_with(
            |program| program != "update-grub",
            |dir| dir == Path::new("/boot/grub"),
        )
        .unwrap();

        assert_eq!(command.to_string(), "grub-mkconfig -o /boot/grub/grub.cfg");
    }

    #[test]
    fn grub2_layout_picks_grub2_mkconfig() {
        let command = UpdateCommand::detect_with(
            |program| program == "grub2-mkconfig",
            |dir| dir == Path::new("/boot/grub2"),
        )
        .unwrap();

        assert_eq!(command.program(), "grub2-mkconfig");
    }

    #[test]
    fn nothing_installed_is_none() {
        assert_eq!(UpdateCommand::detect_with(|_| false, |_| true), None);
    }
}

#[cfg(unix)]
mod running {
    use super::*;

    #[test]
    fn successful_command_is_ok() {
        let command = UpdateCommand::from_argv(&argv(&["true"])).unwrap();

        assert!(command.run().is_ok());
    }

    #[test]
    fn failing_command_reports_status_and_stderr() {
        let command = UpdateCommand::from_argv(&argv(&["sh", "-c", "echo broken >&2; exit 3"])).unwrap();

        match command.run() {
            Err(UpdateError::Status {
                program,
                status,
                stderr,
            }) => {
                assert_eq!(program, "sh");
                assert_eq!(status.code(), Some(3));
                assert_eq!(stderr, "broken");
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[test]
    fn missing_program_is_spawn_error() {
        let command = UpdateCommand::from_argv(&argv(&["/nonexistent/grub-wiz-update"])).unwrap();

        assert!(matches!(command.run(), Err(UpdateError::Spawn { .. })));
    }
}
