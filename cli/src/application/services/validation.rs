//! Application service: host validation use-case.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.
//! All I/O is routed through injected port traits.

use std::future::{Future, ready};
use std::path::Path;

use anyhow::{Context, Result};
use preingest_common::{ConfigMode, Outcome, ValidationReport, ValidationResult};
use serde_json::Value;

use crate::application::ports::{HostFilesystem, HostSystem, MetadataClient, ProgressReporter};
use crate::application::probes::{
    enhanced_networking, free_disk_space, instance_profile, operating_system, repo_access,
    ssh_configuration, ssm_agent, third_party_software,
};
use crate::domain::error::ConfigError;
use crate::domain::host::{OsRelease, parse_os_release};
use crate::domain::probe::{
    BasicParams, FreeDiskSpaceParams, InstanceProfileParams, ProbeParams,
    ThirdPartySoftwareParams,
};
use crate::domain::{
    HostSnapshot, ProbeDescriptor, ProbeKind, ProbeOverrides, ProbeVerdict, summarize,
};

const OS_RELEASE_PATHS: &[&str] = &["/etc/os-release", "/usr/lib/os-release"];
const KERNEL_RELEASE_PATH: &str = "/proc/sys/kernel/osrelease";

/// Result of a validation run.
#[derive(Debug)]
pub enum ValidationRun {
    /// The operating system gate did not pass; no other probe ran.
    Gated(ValidationReport),
    /// Every registered probe ran.
    Completed(ValidationReport),
}

impl ValidationRun {
    #[must_use]
    pub fn report(&self) -> &ValidationReport {
        match self {
            Self::Gated(report) | Self::Completed(report) => report,
        }
    }

    /// Process exit status for this run, taken from the final result.
    ///
    /// A gate that failed its check exits 2; a gate that could not decide
    /// exits 1 like any other error.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        self.report().summary.final_result.exit_code()
    }
}

/// Gather the host facts every probe reads.
///
/// # Errors
///
/// Returns an error if neither os-release file nor the kernel release can be
/// read.
pub async fn collect_snapshot(
    host: &(impl HostFilesystem + MetadataClient),
) -> Result<HostSnapshot> {
    let release = read_os_release(host)?;
    let kernel_release = host
        .read_to_string(Path::new(KERNEL_RELEASE_PATH))
        .context("cannot determine kernel release")?;
    let is_ec2 = match host.get("").await {
        Ok(ok) => ok,
        Err(e) => {
            tracing::debug!(error = %e, "metadata endpoint unreachable");
            false
        }
    };
    let snapshot = HostSnapshot::from_os_release(&release, &kernel_release, is_ec2);
    tracing::info!(
        distribution = %snapshot.distribution,
        major = %snapshot.major_version,
        minor = %snapshot.minor_version,
        kernel = %snapshot.kernel_release,
        is_ec2,
        "host snapshot collected"
    );
    Ok(snapshot)
}

fn read_os_release(fs: &impl HostFilesystem) -> Result<OsRelease> {
    let mut last_error = None;
    for path in OS_RELEASE_PATHS {
        match fs.read_to_string(Path::new(path)) {
            Ok(contents) => return Ok(parse_os_release(&contents)),
            Err(e) => last_error = Some(e),
        }
    }
    Err(last_error
        .unwrap_or_else(|| anyhow::anyhow!("no os-release path configured"))
        .context("cannot determine operating system"))
}

/// Run the operating system probe with its defaults.
///
/// Returns the outcome when it did not pass.
#[must_use]
pub fn run_os_gate(snapshot: &HostSnapshot) -> Option<Outcome> {
    let descriptor = ProbeDescriptor::new(ProbeKind::OperatingSystem);
    let verdict = operating_system::check(snapshot).unwrap_or_else(verdict_from_error);
    let outcome = descriptor.outcome(verdict, ConfigMode::Default);
    if outcome.result == ValidationResult::Pass {
        None
    } else {
        tracing::warn!(result = %outcome.result, "operating system gate not passed");
        Some(outcome)
    }
}

/// Run every probe of `registry` in order.
///
/// `overrides` is `None` when no config file was found; every probe then runs
/// with its defaults. Probe failures never abort the run; they become
/// outcomes.
pub async fn run_validation(
    registry: &[ProbeDescriptor],
    overrides: Option<&ProbeOverrides>,
    snapshot: &HostSnapshot,
    host: &impl HostSystem,
    reporter: &impl ProgressReporter,
) -> Vec<Outcome> {
    let mut outcomes = Vec::with_capacity(registry.len());
    for descriptor in registry {
        reporter.step(&format!("validating {}...", descriptor.name.to_lowercase()));
        let outcome = run_probe(descriptor, overrides, snapshot, host).await;
        tracing::info!(probe = descriptor.id, result = %outcome.result, "probe finished");
        if outcome.result == ValidationResult::Error {
            reporter.warn(&format!("{} could not be validated", descriptor.name));
        }
        outcomes.push(outcome);
    }
    reporter.success(&format!("{} validations run", outcomes.len()));
    outcomes
}

/// Gate, then run the registry and summarize.
///
/// # Errors
///
/// Returns an error if the host snapshot cannot be collected.
pub async fn validate_host(
    registry: &[ProbeDescriptor],
    overrides: Option<&ProbeOverrides>,
    host: &impl HostSystem,
    reporter: &impl ProgressReporter,
) -> Result<ValidationRun> {
    reporter.step("collecting host facts...");
    let snapshot = collect_snapshot(host).await?;

    if let Some(gate) = run_os_gate(&snapshot) {
        return Ok(ValidationRun::Gated(build_report(vec![gate])));
    }

    let outcomes = run_validation(registry, overrides, &snapshot, host, reporter).await;
    Ok(ValidationRun::Completed(build_report(outcomes)))
}

/// Summarize outcomes into a report, ordered for display.
///
/// Outcomes are stably sorted by result (Error, Fail, Not Run, Pass), so
/// probes with the same result keep their run order.
#[must_use]
pub fn build_report(mut outcomes: Vec<Outcome>) -> ValidationReport {
    outcomes.sort_by_key(|o| o.result);
    ValidationReport {
        summary: summarize(&outcomes),
        outcomes,
    }
}

async fn run_probe(
    descriptor: &ProbeDescriptor,
    overrides: Option<&ProbeOverrides>,
    snapshot: &HostSnapshot,
    host: &impl HostSystem,
) -> Outcome {
    let section = match overrides {
        None => None,
        Some(overrides) => match overrides.section(descriptor.id) {
            Some(section) => Some(section),
            None => {
                let err = ConfigError::MissingSection {
                    probe: descriptor.id.to_string(),
                    defaults: descriptor.defaults_json(),
                };
                return config_error_outcome(descriptor, &err);
            }
        },
    };

    match descriptor.kind {
        ProbeKind::EnhancedNetworking => {
            execute(descriptor, section, |_: BasicParams| {
                ready(enhanced_networking::check(host, snapshot))
            })
            .await
        }
        ProbeKind::FreeDiskSpace => {
            execute(descriptor, section, |p: FreeDiskSpaceParams| {
                free_disk_space::check(host, p.min_gb)
            })
            .await
        }
        ProbeKind::ThirdPartySoftware => {
            execute(descriptor, section, |p: ThirdPartySoftwareParams| {
                ready(third_party_software::check(
                    host,
                    p.custom_software_list.as_deref(),
                ))
            })
            .await
        }
        ProbeKind::OperatingSystem => {
            execute(descriptor, section, |_: BasicParams| {
                ready(operating_system::check(snapshot))
            })
            .await
        }
        ProbeKind::SshConfiguration => {
            execute(descriptor, section, |_: BasicParams| {
                ready(ssh_configuration::check(host))
            })
            .await
        }
        ProbeKind::RepoAccess => {
            execute(descriptor, section, |_: BasicParams| {
                repo_access::check(host, snapshot)
            })
            .await
        }
        ProbeKind::InstanceProfile => {
            execute(descriptor, section, |p: InstanceProfileParams| async move {
                instance_profile::check(host, snapshot, &p.role_name).await
            })
            .await
        }
        ProbeKind::SsmAgent => {
            execute(descriptor, section, |_: BasicParams| {
                ssm_agent::check(host, snapshot)
            })
            .await
        }
    }
}

/// Decode parameters, honour `enabled`, run `body`, and build the outcome.
async fn execute<P, F, Fut>(
    descriptor: &ProbeDescriptor,
    section: Option<&Value>,
    body: F,
) -> Outcome
where
    P: ProbeParams,
    F: FnOnce(P) -> Fut,
    Fut: Future<Output = Result<ProbeVerdict>>,
{
    let (params, mode) = match descriptor.resolve_params::<P>(section) {
        Ok(resolved) => resolved,
        Err(e) => return config_error_outcome(descriptor, &e),
    };
    if !params.enabled() {
        return Outcome::not_run(descriptor.name, descriptor.enforcement);
    }
    let verdict = body(params).await.unwrap_or_else(verdict_from_error);
    descriptor.outcome(verdict, mode)
}

fn verdict_from_error(e: anyhow::Error) -> ProbeVerdict {
    tracing::debug!(error = %format!("{e:#}"), "probe error");
    ProbeVerdict::unsupported(format!("{e:#}"))
}

fn config_error_outcome(descriptor: &ProbeDescriptor, err: &ConfigError) -> Outcome {
    tracing::warn!(probe = descriptor.id, error = %err, "config section rejected");
    let mut outcome = Outcome::new(descriptor.name, descriptor.enforcement, ValidationResult::Error)
        .with_message(err.to_string());
    outcome.verbose_message = err.verbose_message();
    outcome
}
