//! The fixed battery of cross-parameter checks.
//!
//! Each rule reads the current values (and possibly the disk layout) and
//! appends at most one message per target parameter. Rules never look at
//! each other's output, so their order only affects message order.

use crate::catalog::Catalog;
use crate::probe::DiskLayout;
use crate::value::{ParamValues, Severity, is_form_of, unquote};

use super::Warnings;
use super::paths::PathResolver;

const DEFAULT: &str = "GRUB_DEFAULT";
const SAVEDEFAULT: &str = "GRUB_SAVEDEFAULT";
const HIDDEN_TIMEOUT: &str = "GRUB_HIDDEN_TIMEOUT";
const TIMEOUT: &str = "GRUB_TIMEOUT";
const TIMEOUT_STYLE: &str = "GRUB_TIMEOUT_STYLE";
const CMDLINE_LINUX: &str = "GRUB_CMDLINE_LINUX";
const CMDLINE_LINUX_DEFAULT: &str = "GRUB_CMDLINE_LINUX_DEFAULT";
const BACKGROUND: &str = "GRUB_BACKGROUND";
const THEME: &str = "GRUB_THEME";
const GFXMODE: &str = "GRUB_GFXMODE";
const DISTRIBUTOR: &str = "GRUB_DISTRIBUTOR";
const DISABLE_OS_PROBER: &str = "GRUB_DISABLE_OS_PROBER";

/// Graphics modes every firmware is expected to handle.
const SAFE_GFXMODES: &[&str] = &["640x480", "800x600", "1024x768", "auto", "keep"];

/// Everything a rule may read.
pub(super) struct Inputs<'a> {
    pub values: &'a ParamValues,
    pub catalog: &'a Catalog,
    pub layout: DiskLayout,
    pub paths: &'a PathResolver,
}

pub(super) type Rule = fn(&Inputs<'_>, &mut Warnings);

/// All rules, in evaluation order.
pub(super) const RULES: &[Rule] = &[
    saved_default_needs_savedefault,
    hidden_default_needs_hidden_timeout,
    zero_timeout_with_hidden_style,
    positive_timeout_needs_menu_style,
    cmdline_linux_is_not_for_cosmetics,
    cmdline_linux_matches_disk_layout,
    savedefault_with_numeric_default,
    cmdline_with_spaces_is_quoted,
    paths_exist,
    gfxmode_is_common,
    distributor_is_set,
    os_prober_matches_disk_layout,
    value_is_in_enum,
];

/// `GRUB_TIMEOUT` -> `TIMEOUT`, for messages.
fn short(name: &str) -> &str {
    name.strip_prefix("GRUB_").unwrap_or(name)
}

fn is_zero(value: &str) -> bool {
    is_form_of(value, "0") || is_form_of(value, "0.0")
}

fn saved_default_needs_savedefault(input: &Inputs<'_>, warns: &mut Warnings) {
    let values = input.values;
    if is_form_of(values.get(DEFAULT), "saved") && !is_form_of(values.get(SAVEDEFAULT), "true") {
        warns.push(
            SAVEDEFAULT,
            Severity::Critical,
            format!("must be \"true\" since {} is \"saved\"", short(DEFAULT)),
        );
    }
}

fn hidden_default_needs_hidden_timeout(input: &Inputs<'_>, warns: &mut Warnings) {
    let values = input.values;
    if !is_form_of(values.get(DEFAULT), "hidden") {
        return;
    }
    let timeout = values.get(HIDDEN_TIMEOUT);
    if timeout.is_empty() || is_zero(timeout) {
        warns.push(
            HIDDEN_TIMEOUT,
            Severity::Critical,
            format!("should be positive int when {} is \"hidden\"", short(DEFAULT)),
        );
    }
}

fn zero_timeout_with_hidden_style(input: &Inputs<'_>, warns: &mut Warnings) {
    let values = input.values;
    if is_zero(values.get(TIMEOUT)) && is_form_of(values.get(TIMEOUT_STYLE), "hidden") {
        warns.push(
            TIMEOUT,
            Severity::Critical,
            format!("should be positive int when {}=\"hidden\"", short(TIMEOUT_STYLE)),
        );
    }
}

fn positive_timeout_needs_menu_style(input: &Inputs<'_>, warns: &mut Warnings) {
    let values = input.values;
    if is_form_of(values.get(TIMEOUT_STYLE), "menu") {
        return;
    }
    let positive = unquote(values.get(TIMEOUT))
        .trim()
        .parse::<f64>()
        .is_ok_and(|secs| secs > 0.0);
    if positive {
        warns.push(
            TIMEOUT_STYLE,
            Severity::Critical,
            format!("should be \"menu\" when {} > 0", short(TIMEOUT)),
        );
    }
}

fn cmdline_linux_is_not_for_cosmetics(input: &Inputs<'_>, warns: &mut Warnings) {
    let cmdline = input.values.get(CMDLINE_LINUX);
    for word in ["quiet", "splash"] {
        if cmdline.contains(word) {
            warns.push(
                CMDLINE_LINUX,
                Severity::Warning,
                format!("\"{word}\" belongs only in {}", short(CMDLINE_LINUX_DEFAULT)),
            );
        }
    }
}

fn cmdline_linux_matches_disk_layout(input: &Inputs<'_>, warns: &mut Warnings) {
    let cmdline = input.values.get(CMDLINE_LINUX);
    if input.layout.is_luks_active && !cmdline.contains("rd.luks.uuid=") {
        warns.push(
            CMDLINE_LINUX,
            Severity::Warning,
            "no \"rd.luks.uuid=\" but LUKS seems active",
        );
    }
    if input.layout.is_lvm_active && !cmdline.contains("rd.lvm.vg=") {
        warns.push(
            CMDLINE_LINUX,
            Severity::Warning,
            "no \"rd.lvm.vg=\" but LVM seems active",
        );
    }
}

fn savedefault_with_numeric_default(input: &Inputs<'_>, warns: &mut Warnings) {
    let values = input.values;
    if !is_form_of(values.get(SAVEDEFAULT), "true") {
        return;
    }
    let default = unquote(values.get(DEFAULT));
    if !default.is_empty() && default.chars().all(|c| c.is_ascii_digit()) {
        warns.push(
            DEFAULT,
            Severity::Suggestion,
            format!("avoid numeric when {}=\"true\"", short(SAVEDEFAULT)),
        );
    }
}

fn cmdline_with_spaces_is_quoted(input: &Inputs<'_>, warns: &mut Warnings) {
    for name in [CMDLINE_LINUX, CMDLINE_LINUX_DEFAULT] {
        let value = input.values.get(name);
        if !value.contains(' ') {
            continue;
        }
        let inner = unquote(value);
        if value != inner && is_form_of(value, inner) {
            continue;
        }
        warns.push(name, Severity::Caution, "has spaces and thus must be quoted");
    }
}

fn paths_exist(input: &Inputs<'_>, warns: &mut Warnings) {
    for name in [BACKGROUND, THEME] {
        let value = input.values.get(name);
        if unquote(value.trim()).is_empty() {
            continue;
        }
        let resolved = input.paths.resolve(value);
        if !resolved.exists {
            tracing::debug!("{name}: nothing at {}", resolved.path.display());
            warns.push(name, Severity::Caution, "path does not seem to exist");
        }
    }
}

fn gfxmode_is_common(input: &Inputs<'_>, warns: &mut Warnings) {
    let value = input.values.get(GFXMODE);
    if value.is_empty() {
        return;
    }
    let unusual = unquote(value)
        .split(',')
        .map(|mode| mode.trim().to_lowercase())
        .any(|mode| !SAFE_GFXMODES.contains(&mode.as_str()));
    if unusual {
        warns.push(
            GFXMODE,
            Severity::Suggestion,
            "perhaps unsupported; stick to common values",
        );
    }
}

fn distributor_is_set(input: &Inputs<'_>, warns: &mut Warnings) {
    if unquote(input.values.get(DISTRIBUTOR)).trim().is_empty() {
        warns.push(
            DISTRIBUTOR,
            Severity::Caution,
            "should be distro name (it is missing/empty)",
        );
    }
}

fn os_prober_matches_disk_layout(input: &Inputs<'_>, warns: &mut Warnings) {
    let disabled = is_form_of(input.values.get(DISABLE_OS_PROBER), "true");
    match (disabled, input.layout.has_another_os) {
        (true, true) => warns.push(
            DISABLE_OS_PROBER,
            Severity::Caution,
            "suggest setting \"false\" since multi-boot detected",
        ),
        (false, false) => warns.push(
            DISABLE_OS_PROBER,
            Severity::Suggestion,
            "perhaps set \"true\" since no multi-boot detected?",
        ),
        _ => {}
    }
}

fn value_is_in_enum(input: &Inputs<'_>, warns: &mut Warnings) {
    for meta in input.catalog.iter().filter(|meta| meta.is_plain_enum()) {
        let value = unquote(input.values.get(&meta.name));
        if value.is_empty() {
            continue;
        }
        if !meta.enums.iter().any(|choice| unquote(&choice.value) == value) {
            warns.push(
                &meta.name,
                Severity::Warning,
                "value not in list of allowed values",
            );
        }
    }
}
