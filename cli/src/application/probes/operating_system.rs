//! Distribution and version support matrix.

use anyhow::Result;

use crate::domain::host::is_supported_os;
use crate::domain::{HostSnapshot, ProbeVerdict};

/// # Errors
///
/// Returns an error if the version in the snapshot is not numeric.
pub fn check(host: &HostSnapshot) -> Result<ProbeVerdict> {
    if is_supported_os(host)? {
        Ok(ProbeVerdict::pass_with(format!(
            "Operating system supported: {}",
            host.pretty_name
        )))
    } else {
        Ok(ProbeVerdict::fail(format!(
            "Unsupported operating system: {}",
            host.pretty_name
        )))
    }
}
