//! Disk-layout facts that inform the boot-parameter checks.
//!
//! This module provides:
//! - The three layout facts ([`DiskLayout`])
//! - A source abstraction so checks can run without real hardware ([`DiskLayoutSource`])
//! - The `lsblk`-backed, memoized implementation ([`LsblkProbe`])
//!
//! Enumeration failures (missing tool, non-zero exit, bad JSON, timeout)
//! are logged and degrade to "nothing detected".

mod error;
mod lsblk;

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;

pub use lsblk::{BlockDevice, DEFAULT_TIMEOUT, LsblkProbe, LsblkReport};

/// Filesystem signatures that suggest another operating system.
const FOREIGN_FSTYPES: &[&str] = &["ntfs", "vfat", "fat32", "exfat"];

/// Windows recovery partition type GUID.
const WINDOWS_RECOVERY_GUID: &str = "de94bba4-06d9-4d40-a16a-bfd50179d6ac";

/// Encrypted-volume signatures.
const LUKS_FSTYPES: &[&str] = &["crypto_luks", "crypto_luks2"];

const LVM_FSTYPE: &str = "lvm2_member";

/// Linux LVM partition type GUID.
const LVM_PARTTYPE_GUID: &str = "e6d6d379-f507-44c2-a23c-238f2a3df928";

/// What the block-device scan found.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct DiskLayout {
    /// A filesystem or partition that belongs to another OS.
    pub has_another_os: bool,
    /// A LUKS container.
    pub is_luks_active: bool,
    /// An LVM physical volume.
    pub is_lvm_active: bool,
}

impl DiskLayout {
    /// Folds one device's signatures into the facts.
    pub fn absorb(&mut self, device: &BlockDevice) {
        let fstype = device.fstype.as_deref().unwrap_or_default().to_lowercase();
        let parttype = device
            .parttype
            .as_deref()
            .unwrap_or_default()
            .to_lowercase();

        if FOREIGN_FSTYPES.contains(&fstype.as_str()) || parttype.contains(WINDOWS_RECOVERY_GUID) {
            self.has_another_os = true;
        }
        if LUKS_FSTYPES.contains(&fstype.as_str()) {
            self.is_luks_active = true;
        }
        if fstype == LVM_FSTYPE || parttype.contains(LVM_PARTTYPE_GUID) {
            self.is_lvm_active = true;
        }
    }

    /// Returns `true` once every fact is set and scanning can stop.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.has_another_os && self.is_luks_active && self.is_lvm_active
    }
}

/// Anything that can answer the three layout questions.
///
/// Implementations are expected to be cheap after the first call.
pub trait DiskLayoutSource {
    /// Returns the layout facts.
    fn layout(&self) -> DiskLayout;
}

/// Fixed facts, for tests and for callers that already know the answer.
impl DiskLayoutSource for DiskLayout {
    fn layout(&self) -> DiskLayout {
        *self
    }
}
