//! Root-volume capacity parsing and the free-space rule.
//!
//! This module is intentionally free of I/O, async, and external layer imports.

use crate::domain::error::HostError;
use crate::domain::probe::ProbeVerdict;

const KIB_PER_GIB: u64 = 1024 * 1024;

/// Utilization above which a passing check still carries a warning.
pub const HIGH_UTILIZATION: f64 = 0.85;

/// Capacity of one mounted filesystem, in KiB.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiskUsage {
    pub total_kib: u64,
    pub used_kib: u64,
    pub available_kib: u64,
}

impl DiskUsage {
    /// Whole GiB available to unprivileged users.
    #[must_use]
    pub fn free_gib(&self) -> u64 {
        self.available_kib / KIB_PER_GIB
    }

    /// Fraction of the volume in use, `0.0..=1.0`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)] // ratio only, exactness not needed
    pub fn utilization(&self) -> f64 {
        if self.total_kib == 0 {
            return 0.0;
        }
        self.used_kib as f64 / self.total_kib as f64
    }
}

/// Parse the output of `df -P -k <path>`.
///
/// ```text
/// Filesystem     1024-blocks    Used Available Capacity Mounted on
/// /dev/nvme0n1p1    8376300  3084900   5291400      37% /
/// ```
///
/// # Errors
///
/// Returns an error if the data line is missing or a column is not a number,
/// or if the filesystem reports zero size.
pub fn parse_df_output(text: &str) -> Result<DiskUsage, HostError> {
    let columns: Vec<&str> = text
        .lines()
        .nth(1)
        .ok_or(HostError::UnparsableDiskUsage)?
        .split_whitespace()
        .collect();
    let column = |idx: usize| -> Result<u64, HostError> {
        columns
            .get(idx)
            .and_then(|s| s.parse::<u64>().ok())
            .ok_or(HostError::UnparsableDiskUsage)
    };
    let usage = DiskUsage {
        total_kib: column(1)?,
        used_kib: column(2)?,
        available_kib: column(3)?,
    };
    if usage.total_kib == 0 {
        return Err(HostError::EmptyVolume);
    }
    Ok(usage)
}

/// Decide the free-space check for a measured volume.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)] // percent of 0..=1
pub fn evaluate_free_space(usage: &DiskUsage, min_gb: u64) -> ProbeVerdict {
    let free = usage.free_gib();
    if free >= min_gb {
        let verdict = ProbeVerdict::pass_with(format!(
            "There are {free}gb free, {min_gb}gb are required"
        ));
        let utilization = usage.utilization();
        if utilization >= HIGH_UTILIZATION {
            let percent = (utilization * 100.0).round() as u64;
            return verdict.verbose(format!(
                "Warning, disk utilization seems to be {percent}%, we recommend less than 85%"
            ));
        }
        return verdict;
    }
    let diff = min_gb - free;
    ProbeVerdict::fail(format!(
        "Please free up about {diff}gb on the root volume, at least {min_gb}gb are required"
    ))
}

// ── Unit tests ────────────────────────────────────────────────────────────────
