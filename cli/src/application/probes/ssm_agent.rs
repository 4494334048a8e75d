//! Systems Manager agent installation and state.

use anyhow::{Context, Result};

use crate::application::ports::{CommandRunner, ExecutableLookup};
use crate::domain::host::{ServiceManager, service_manager_for};
use crate::domain::{HostSnapshot, ProbeVerdict};

use super::missing_command;

pub const AGENT_SERVICE: &str = "amazon-ssm-agent";

/// `systemctl status` exit code for a unit that does not exist.
const SYSTEMCTL_UNIT_UNKNOWN: i32 = 4;

const NOT_INSTALLED: &str = "SSM Agent not installed";
const NOT_RUNNING: &str = "SSM Agent installed, but not running";

/// # Errors
///
/// Returns an error if the service manager cannot be spawned or times out.
pub async fn check(
    host: &(impl CommandRunner + ExecutableLookup),
    snapshot: &HostSnapshot,
) -> Result<ProbeVerdict> {
    let key = snapshot.distribution_key();
    let Some(manager) = service_manager_for(&key) else {
        return Ok(ProbeVerdict::unsupported(format!(
            "No known service manager for {key}"
        )));
    };
    if host.locate(manager.command()).is_none() {
        return Ok(ProbeVerdict::unsupported(missing_command(manager.command())));
    }
    tracing::debug!(?manager, "querying agent");

    match manager {
        ServiceManager::Systemctl => with_systemctl(host).await,
        ServiceManager::Upstart => with_upstart(host).await,
    }
}

async fn with_systemctl(runner: &impl CommandRunner) -> Result<ProbeVerdict> {
    let status = runner
        .run("systemctl", &["status", AGENT_SERVICE])
        .await
        .context("cannot run systemctl status")?;
    if status.status.code() == Some(SYSTEMCTL_UNIT_UNKNOWN) {
        return Ok(ProbeVerdict::fail(NOT_INSTALLED));
    }
    let active = runner
        .run("systemctl", &["is-active", AGENT_SERVICE])
        .await
        .context("cannot run systemctl is-active")?;
    if active.status.success() {
        Ok(ProbeVerdict::pass())
    } else {
        Ok(ProbeVerdict::fail(NOT_RUNNING))
    }
}

async fn with_upstart(runner: &impl CommandRunner) -> Result<ProbeVerdict> {
    let output = runner
        .run("status", &[AGENT_SERVICE])
        .await
        .context("cannot run status")?;
    if !output.status.success() {
        return Ok(ProbeVerdict::fail(NOT_INSTALLED));
    }
    if String::from_utf8_lossy(&output.stdout).contains("running") {
        Ok(ProbeVerdict::pass())
    } else {
        Ok(ProbeVerdict::fail(NOT_RUNNING))
    }
}
