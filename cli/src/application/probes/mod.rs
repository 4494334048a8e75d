//! Probe bodies: one module per host check.
//!
//! Each body reaches the host only through port traits and returns a
//! [`ProbeVerdict`](crate::domain::ProbeVerdict). An `Err` means the probe
//! could not reach a verdict; the validation service turns it into an
//! `Error` outcome.

pub mod enhanced_networking;
pub mod free_disk_space;
pub mod instance_profile;
pub mod operating_system;
pub mod repo_access;
pub mod ssh_configuration;
pub mod ssm_agent;
pub mod third_party_software;

/// Message for a program that the probe needs but `PATH` does not provide.
pub(crate) fn missing_command(program: &str) -> String {
    format!("Command '{program}' not in PATH")
}
