//! Timestamped JSON validation log.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use preingest_common::ValidationReport;

use crate::application::ports::ReportWriter;

pub const LOG_DIR: &str = "logs";
const LOG_SUFFIX: &str = "Z_ValidationLog.json";

/// Writes one log file per run under `logs/`, or the current directory if
/// `logs/` cannot be created.
pub struct LogFileWriter {
    base: PathBuf,
}

impl LogFileWriter {
    #[must_use]
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    fn target_dir(&self) -> PathBuf {
        let dir = self.base.join(LOG_DIR);
        match std::fs::create_dir_all(&dir) {
            Ok(()) => dir,
            Err(e) => {
                tracing::warn!(dir = %dir.display(), error = %e, "falling back to working directory");
                self.base.clone()
            }
        }
    }
}

impl Default for LogFileWriter {
    fn default() -> Self {
        Self::new(".")
    }
}

impl ReportWriter for LogFileWriter {
    fn write_report(&self, report: &ValidationReport) -> Result<PathBuf> {
        let file_name = format!("{}{LOG_SUFFIX}", Utc::now().format("%Y-%m-%dT%H:%M:%S"));
        let path = self.target_dir().join(file_name);
        write_json(&path, &sanitize(report))?;
        tracing::info!(path = %path.display(), "validation log written");
        Ok(path)
    }
}

fn write_json(path: &Path, report: &ValidationReport) -> Result<()> {
    let content = serde_json::to_string_pretty(report).context("cannot serialize report")?;
    std::fs::write(path, content).with_context(|| format!("cannot write {}", path.display()))
}

/// Copy of `report` with newlines removed from every message.
fn sanitize(report: &ValidationReport) -> ValidationReport {
    let strip = |text: &Option<String>| text.as_ref().map(|t| t.replace('\n', ""));
    let mut clean = report.clone();
    for outcome in &mut clean.outcomes {
        outcome.message = strip(&outcome.message);
        outcome.verbose_message = strip(&outcome.verbose_message);
    }
    clean
}
