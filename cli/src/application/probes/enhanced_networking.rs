//! Elastic Network Adapter driver presence and activation.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::application::ports::HostFilesystem;
use crate::domain::{HostSnapshot, ProbeVerdict};

pub const MODULES_ROOT: &str = "/lib/modules";
pub const NET_CLASS_DIR: &str = "/sys/class/net";
const MODULE_PREFIX: &str = "ena.ko";

/// `initstate` of the ena module as seen through one interface.
fn initstate_path(interface: &str) -> PathBuf {
    Path::new(NET_CLASS_DIR)
        .join(interface)
        .join("device/driver/module/drivers/pci:ena/module/initstate")
}

/// Check that the ena module ships with the running kernel and that a
/// non-loopback interface is bound to it.
///
/// # Errors
///
/// Returns an error if the module tree or the network class directory cannot
/// be read.
pub fn check(fs: &impl HostFilesystem, host: &HostSnapshot) -> Result<ProbeVerdict> {
    let modules = Path::new(MODULES_ROOT).join(&host.kernel_release);
    let installed = fs
        .contains_file_with_prefix(&modules, MODULE_PREFIX)
        .with_context(|| format!("cannot search {}", modules.display()))?;
    let interfaces = fs
        .list_dir(Path::new(NET_CLASS_DIR))
        .with_context(|| format!("cannot list {NET_CLASS_DIR}"))?;
    if !installed {
        return Ok(ProbeVerdict::fail(
            "Enhanced Networking drivers not found, must be installed and enabled",
        ));
    }

    let active = interfaces
        .iter()
        .filter(|name| !name.starts_with("lo"))
        .any(|name| {
            fs.read_to_string(&initstate_path(name))
                .is_ok_and(|state| state.contains("live"))
        });
    tracing::debug!(installed, active, "enhanced networking");

    if active {
        Ok(ProbeVerdict::pass_with("Enhanced Networking drivers enabled"))
    } else {
        Ok(ProbeVerdict::fail(
            "Enhanced Networking drivers installed, but not enabled",
        ))
    }
}
