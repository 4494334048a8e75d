//! Conflicting third-party software.
//!
//! This module is intentionally free of I/O, async, and external layer imports.

use crate::domain::probe::ProbeVerdict;

/// Executables of anti-virus, backup, virtualization and directory-join
/// tooling that conflict with the managed agents.
pub const CONFLICTING_SOFTWARE: &[&str] = &[
    "ma",
    "cma",
    "aex-bootstrap",
    "aex-configure",
    "aex-diagnostics",
    "aex-env",
    "aex-uninstall",
    "aex-helper",
    "aex-cta",
    "pbis",
    "domainjoin-cli",
    "adinfo",
    "adcheck",
    "adquery",
    "vmware-toolbox-cmd",
    "vmware-user",
    "realmd",
];

/// Built-in list followed by the caller's additions, built fresh per call.
#[must_use]
pub fn software_to_scan(custom: Option<&[String]>) -> Vec<String> {
    CONFLICTING_SOFTWARE
        .iter()
        .map(ToString::to_string)
        .chain(custom.unwrap_or_default().iter().cloned())
        .collect()
}

/// Decide the check from the executables that were found on `PATH`.
#[must_use]
pub fn evaluate_found_software(found: &[String]) -> ProbeVerdict {
    if found.is_empty() {
        return ProbeVerdict::pass_with("Unwanted software may exist, but nothing was found");
    }
    ProbeVerdict::fail(format!(
        "Please remove the following software: {}",
        found.join(", ")
    ))
}
