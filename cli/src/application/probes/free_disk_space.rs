//! Free space on the root volume.

use anyhow::{Context, Result};

use crate::application::ports::CommandRunner;
use crate::domain::ProbeVerdict;
use crate::domain::disk::{evaluate_free_space, parse_df_output};

/// Measure `/` with POSIX `df` and compare against `min_gb`.
///
/// # Errors
///
/// Returns an error if `df` cannot run, exits non-zero, or prints output that
/// cannot be parsed.
pub async fn check(runner: &impl CommandRunner, min_gb: u64) -> Result<ProbeVerdict> {
    let output = runner
        .run("df", &["-P", "-k", "/"])
        .await
        .context("cannot run df")?;
    if !output.status.success() {
        anyhow::bail!(
            "df failed: {}",
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }
    let usage = parse_df_output(&String::from_utf8_lossy(&output.stdout))?;
    tracing::debug!(
        available_kib = usage.available_kib,
        total_kib = usage.total_kib,
        "root volume"
    );
    Ok(evaluate_free_space(&usage, min_gb))
}
