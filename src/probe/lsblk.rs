//! `lsblk` invocation and output model.

use std::process::Stdio;
use std::sync::OnceLock;
use std::time::Duration;

use serde::Deserialize;
use tokio::process::Command;

use super::error::ProbeError;
use super::{DiskLayout, DiskLayoutSource};

/// Default upper bound on how long `lsblk` may take.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Top level of `lsblk -J` output.
#[derive(Debug, Default, Deserialize)]
pub struct LsblkReport {
    /// Top-level devices (disks, loop devices, ...)
    #[serde(default)]
    pub blockdevices: Vec<BlockDevice>,
}

/// One node of the device tree.
///
/// Recent `lsblk` versions print lower-case keys and `null` for missing
/// values; the upper-case aliases accept older output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct BlockDevice {
    /// Filesystem signature, e.g. `ext4` or `crypto_LUKS`
    #[serde(default, alias = "FSTYPE")]
    pub fstype: Option<String>,

    /// Partition type GUID
    #[serde(default, alias = "PARTTYPE")]
    pub parttype: Option<String>,

    /// Partitions, mapped volumes and other dependents
    #[serde(default)]
    pub children: Vec<Self>,
}

impl LsblkReport {
    /// Parses the JSON printed by `lsblk -J`.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a valid `lsblk` report.
    pub fn parse(json: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(json)
    }

    /// Reduces the whole device tree to the three layout facts.
    #[must_use]
    pub fn layout(&self) -> DiskLayout {
        let mut layout = DiskLayout::default();
        let mut pending: Vec<&BlockDevice> = self.blockdevices.iter().collect();

        while let Some(device) = pending.pop() {
            layout.absorb(device);
            if layout.is_complete() {
                break;
            }
            pending.extend(&device.children);
        }

        layout
    }
}

/// Probes the disk layout by running `lsblk` once.
///
/// The first call to [`DiskLayoutSource::layout`] runs the command; the
/// outcome, including failure, is cached for the lifetime of the value.
#[derive(Debug)]
pub struct LsblkProbe {
    program: String,
    timeout: Duration,
    cache: OnceLock<DiskLayout>,
}

impl Default for LsblkProbe {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEOUT)
    }
}

impl LsblkProbe {
    /// Creates a probe running `lsblk` from `PATH`.
    #[must_use]
    pub fn new(timeout: Duration) -> Self {
        Self::with_program("lsblk", timeout)
    }

    /// Creates a probe running a specific executable.
    #[must_use]
    pub fn with_program(program: impl Into<String>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            timeout,
            cache: OnceLock::new(),
        }
    }

    /// Returns the configured bound on the command's run time.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    fn probe(&self) -> DiskLayout {
        match self.enumerate() {
            Ok(report) => {
                let layout = report.layout();
                tracing::debug!("Disk layout: {layout:?}");
                layout
            }
            Err(e) => {
                tracing::warn!("Disk probe failed, assuming a plain layout: {e}");
                DiskLayout::default()
            }
        }
    }

    fn enumerate(&self) -> Result<LsblkReport, ProbeError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(ProbeError::Runtime)?;

        let output = runtime.block_on(async {
            let child = Command::new(&self.program)
                .args(["-J", "-o", "FSTYPE,PARTTYPE"])
                .stdin(Stdio::null())
                .stdout(Stdio::piped())
                .stderr(Stdio::piped())
                .kill_on_drop(true)
                .spawn()
                .map_err(|source| ProbeError::Spawn {
                    program: self.program.clone(),
                    source,
                })?;

            tokio::time::timeout(self.timeout, child.wait_with_output())
                .await
                .map_err(|_| ProbeError::Timeout(self.timeout))?
                .map_err(ProbeError::Io)
        })?;

        if !output.status.success() {
            return Err(ProbeError::Status {
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(LsblkReport::parse(&output.stdout)?)
    }
}

impl DiskLayoutSource for LsblkProbe {
    fn layout(&self) -> DiskLayout {
        *self.cache.get_or_init(|| self.probe())
    }
}
