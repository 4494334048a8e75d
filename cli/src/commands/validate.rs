//! `preingest validate`: run every probe against this host.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::ports::{ConfigStore, ReportWriter};
use crate::application::services::validation::{ValidationRun, validate_host};
use crate::domain::registry;
use crate::infra::config::FileConfigStore;
use crate::infra::fs::is_root;
use crate::infra::report_log::LogFileWriter;
use crate::output::Renderer;

/// Arguments for the validate command.
#[derive(Args, Debug, Default)]
pub struct ValidateArgs {
    /// Write a JSON log of the results to logs/
    #[arg(short, long)]
    pub log: bool,

    /// Include in-depth messages in console output
    #[arg(short, long)]
    pub verbose: bool,

    /// Probe config file (JSON, or YAML by extension)
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

/// Run `preingest validate`.
///
/// Exit code follows the final result: 0 pass, 2 fail, 1 error. A failed
/// operating system gate stops the run and exits with the gate's result.
///
/// # Errors
///
/// Returns an error if the config file cannot be parsed, the host snapshot
/// cannot be collected, or the log file cannot be written.
pub async fn run(app: &AppContext, args: &ValidateArgs) -> Result<ExitCode> {
    let ctx = &app.output;
    if !is_root() && !app.is_json() {
        ctx.warn("Not running as root; some checks may report invalid results.");
    }

    let store = FileConfigStore::resolve(args.config.clone());
    let overrides = store.load()?;
    if overrides.is_some() && !app.is_json() {
        ctx.info(&format!("Using config file {}", store.path().display()));
    }

    let run = validate_host(&registry(), overrides.as_ref(), &app.host, &app.reporter()).await?;

    match (&run, app.renderer()) {
        (ValidationRun::Gated(report), Renderer::Human(human)) => {
            if let Some(gate) = report.outcomes.first() {
                human.render_gate(gate, args.verbose);
            }
        }
        (_, renderer) => renderer.render_report(run.report(), args.verbose)?,
    }

    if args.log && let ValidationRun::Completed(report) = &run {
        let path = LogFileWriter::default().write_report(report)?;
        if !app.is_json() {
            ctx.success(&format!("Log file produced: {}", path.display()));
        }
    }

    Ok(exit_code(run.exit_code()))
}

fn exit_code(code: i32) -> ExitCode {
    ExitCode::from(u8::try_from(code).unwrap_or(1))
}
