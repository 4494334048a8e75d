//! sshd key-based login settings.

use std::path::Path;

use anyhow::Result;

use crate::application::ports::HostFilesystem;
use crate::domain::ProbeVerdict;
use crate::domain::sshd::{SSHD_CONFIG_PATH, evaluate_sshd_config};

/// An unreadable config file is a failed check, not an error.
///
/// # Errors
///
/// Infallible today; the signature matches the other probe bodies.
pub fn check(fs: &impl HostFilesystem) -> Result<ProbeVerdict> {
    let verdict = match fs.read_to_string(Path::new(SSHD_CONFIG_PATH)) {
        Ok(contents) => evaluate_sshd_config(Ok(&contents)),
        Err(e) => evaluate_sshd_config(Err(format!("{e:#}"))),
    };
    Ok(verdict)
}
