//! Shared test helpers: exit statuses, output constructors and host fixtures.

#![allow(dead_code)]

use std::process::{ExitStatus, Output};

use preingest_cli::domain::HostSnapshot;
use preingest_cli::domain::host::OsRelease;

// ── Cross-platform ExitStatus construction ───────────────────────────────────

/// Build an `ExitStatus` from a logical exit code (0 = success, non-zero = failure).
///
/// On Unix the raw wait-status encodes the exit code in bits 8–15, so we shift.
#[cfg(unix)]
pub fn exit_status(code: i32) -> ExitStatus {
    use std::os::unix::process::ExitStatusExt;
    ExitStatus::from_raw(code << 8)
}

// ── Output constructors ──────────────────────────────────────────────────────

pub fn ok_output(stdout: &[u8]) -> Output {
    Output {
        status: exit_status(0),
        stdout: stdout.to_vec(),
        stderr: Vec::new(),
    }
}

pub fn err_output(code: i32, stderr: &[u8]) -> Output {
    Output {
        status: exit_status(code),
        stdout: Vec::new(),
        stderr: stderr.to_vec(),
    }
}

/// `df -P -k /` output for a volume with the given sizes in GiB.
pub fn df_output(total_gib: u64, used_gib: u64, available_gib: u64) -> Output {
    let kib = 1024 * 1024;
    let text = format!(
        "Filesystem     1024-blocks      Used Available Capacity Mounted on\n\
         /dev/xvda1     {} {} {} 40% /\n",
        total_gib * kib,
        used_gib * kib,
        available_gib * kib
    );
    ok_output(text.as_bytes())
}

// ── Snapshots ────────────────────────────────────────────────────────────────

pub const RHEL_KERNEL: &str = "3.10.0-1160.el7.x86_64";

pub fn snapshot(distribution: &str, version_id: &str, is_ec2: bool) -> HostSnapshot {
    let release = OsRelease {
        id: distribution.to_string(),
        version_id: version_id.to_string(),
        pretty_name: format!("{distribution} {version_id}"),
    };
    HostSnapshot::from_os_release(&release, RHEL_KERNEL, is_ec2)
}

pub fn rhel7_on_ec2() -> HostSnapshot {
    snapshot("rhel", "7.9", true)
}
