//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain` and the shared report types,
//! never from `crate::infra`, `crate::commands`, or `crate::output`.

use std::path::{Path, PathBuf};
use std::process::Output;
use std::time::Duration;

use anyhow::Result;
use preingest_common::ValidationReport;

use crate::domain::ProbeOverrides;

// ── Command Runner Port ───────────────────────────────────────────────────────

/// Abstracts process execution so infrastructure can be swapped or mocked.
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    /// Run a program and capture its output.
    ///
    /// Implementations should delegate to `run_with_timeout` using the
    /// instance's configured default timeout.
    async fn run(&self, program: &str, args: &[&str]) -> Result<Output>;
    /// Run a program with a custom timeout override.
    ///
    /// # Errors
    ///
    /// Returns an error if the process cannot be spawned or exceeds `timeout`.
    /// On timeout, the child process must be killed (not left orphaned).
    async fn run_with_timeout(
        &self,
        program: &str,
        args: &[&str],
        timeout: Duration,
    ) -> Result<Output>;
}

// ── Host Filesystem Port ──────────────────────────────────────────────────────

/// Read-only access to the host's files.
pub trait HostFilesystem {
    /// Read a whole file as UTF-8.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read.
    fn read_to_string(&self, path: &Path) -> Result<String>;
    /// Names of the entries directly inside `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be listed.
    fn list_dir(&self, path: &Path) -> Result<Vec<String>>;
    /// Whether a regular file exists anywhere under `root` whose name starts
    /// with `prefix`. A missing `root` yields `false`.
    ///
    /// # Errors
    ///
    /// Returns an error if a directory below `root` cannot be read.
    fn contains_file_with_prefix(&self, root: &Path, prefix: &str) -> Result<bool>;
}

// ── Executable Lookup Port ────────────────────────────────────────────────────

/// Resolves program names against `PATH`.
pub trait ExecutableLookup {
    /// Full path of `program`, or `None` if it is not on `PATH`.
    fn locate(&self, program: &str) -> Option<PathBuf>;
}

// ── Metadata Port ─────────────────────────────────────────────────────────────

/// Instance metadata endpoint.
#[allow(async_fn_in_trait)]
pub trait MetadataClient {
    /// GET `path` relative to the metadata root.
    ///
    /// Returns `Ok(true)` for a 2xx response and `Ok(false)` for any other
    /// status.
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint cannot be reached within the timeout.
    async fn get(&self, path: &str) -> Result<bool>;
}

/// Composite trait: everything a probe may touch on the host.
pub trait HostSystem: CommandRunner + HostFilesystem + ExecutableLookup + MetadataClient {}

/// Blanket implementation: any type implementing all four sub-traits is a `HostSystem`.
impl<T> HostSystem for T where T: CommandRunner + HostFilesystem + ExecutableLookup + MetadataClient {}

// ── Progress Reporting Port ───────────────────────────────────────────────────

/// Abstracts progress reporting so services can emit events without
/// depending on the Presentation layer. Sync trait: no async needed.
pub trait ProgressReporter {
    /// Emit an in-progress step message.
    fn step(&self, message: &str);
    /// Emit a success message.
    fn success(&self, message: &str);
    /// Emit a warning message.
    fn warn(&self, message: &str);
}

// ── Config and Log Ports ──────────────────────────────────────────────────────

/// Source of per-probe parameter overrides.
pub trait ConfigStore {
    /// Location the store reads from.
    fn path(&self) -> PathBuf;
    /// Load overrides, returning `None` if no config file exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    fn load(&self) -> Result<Option<ProbeOverrides>>;
}

/// Destination for the persisted validation log.
pub trait ReportWriter {
    /// Persist `report` and return where it was written.
    ///
    /// # Errors
    ///
    /// Returns an error if the report cannot be serialized or written.
    fn write_report(&self, report: &ValidationReport) -> Result<PathBuf>;
}
