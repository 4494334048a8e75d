//! `preingest probes`: list the registered probes and their defaults.

use std::process::ExitCode;

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::services::catalogue::{default_config, list_probes};
use crate::domain::registry;
use crate::output::json::to_pretty;

/// Arguments for the probes command.
#[derive(Args, Debug, Default)]
pub struct ProbesArgs {
    /// Print a config file holding every probe's defaults
    #[arg(long)]
    pub defaults: bool,
}

/// Run `preingest probes`.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn run(app: &AppContext, args: &ProbesArgs) -> Result<ExitCode> {
    let registry = registry();
    if args.defaults {
        println!("{}", to_pretty(&default_config(&registry))?);
        return Ok(ExitCode::SUCCESS);
    }
    app.renderer().render_probes(&list_probes(&registry))?;
    Ok(ExitCode::SUCCESS)
}
