//! Conflicting software on `PATH`.

use anyhow::Result;

use crate::application::ports::ExecutableLookup;
use crate::domain::ProbeVerdict;
use crate::domain::software::{evaluate_found_software, software_to_scan};

/// Look up every conflicting executable, including `custom` additions.
///
/// # Errors
///
/// Infallible today; the signature matches the other probe bodies.
pub fn check(lookup: &impl ExecutableLookup, custom: Option<&[String]>) -> Result<ProbeVerdict> {
    let found: Vec<String> = software_to_scan(custom)
        .into_iter()
        .filter(|program| lookup.locate(program).is_some())
        .collect();
    if !found.is_empty() {
        tracing::info!(found = ?found, "conflicting software present");
    }
    Ok(evaluate_found_software(&found))
}
