//! Package repository reachability.

use std::time::Duration;

use anyhow::{Context, Result};

use crate::application::ports::{CommandRunner, ExecutableLookup};
use crate::domain::host::repo_refresh_command;
use crate::domain::{HostSnapshot, ProbeVerdict};

/// Metadata refresh can be slow on cold mirrors.
pub const REPO_REFRESH_TIMEOUT: Duration = Duration::from_secs(300);

/// Refresh repository metadata with the distribution's package manager.
///
/// Exit status 1 means the repositories could not be reached. `yum
/// check-update` exits 100 when updates are pending, which still passes.
///
/// # Errors
///
/// Returns an error if the package manager cannot be spawned or times out.
pub async fn check(
    host: &(impl CommandRunner + ExecutableLookup),
    snapshot: &HostSnapshot,
) -> Result<ProbeVerdict> {
    let (program, args) = repo_refresh_command(&snapshot.distribution);
    if host.locate(program).is_none() {
        return Ok(ProbeVerdict::unsupported(format!(
            "Command '{program}' not in $PATH"
        )));
    }

    let output = host
        .run_with_timeout(program, args, REPO_REFRESH_TIMEOUT)
        .await
        .with_context(|| format!("cannot run {program}"))?;
    tracing::debug!(program, status = ?output.status.code(), "repository refresh");

    if output.status.code() == Some(1) {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        return Ok(ProbeVerdict::fail("Unable to access repositories").verbose(stderr));
    }
    Ok(ProbeVerdict::pass())
}
