//! Human-readable terminal renderer.

use owo_colors::{OwoColorize as _, Style};
use preingest_common::{
    ConfigMode, Enforcement, FinalResult, Outcome, ValidationReport, ValidationResult,
};

use crate::application::services::catalogue::ProbeInfo;
use crate::output::{OutputContext, Styles};

/// Renders reports as human-readable terminal output using `OutputContext`.
pub struct HumanRenderer<'a> {
    ctx: &'a OutputContext,
}

impl<'a> HumanRenderer<'a> {
    #[must_use]
    pub fn new(ctx: &'a OutputContext) -> Self {
        Self { ctx }
    }

    /// Render the CLI version information.
    pub fn render_version(&self, version: &str) {
        if self.ctx.quiet {
            return;
        }
        println!("preingest {version}");
    }

    /// Render a full validation report. Outcomes are already in display order.
    pub fn render_report(&self, report: &ValidationReport, verbose: bool) {
        if self.ctx.quiet {
            return;
        }
        println!();
        self.ctx.header("Validation results");
        println!();
        for outcome in &report.outcomes {
            for line in outcome_lines(outcome, &self.ctx.styles, verbose) {
                println!("{line}");
            }
        }
        println!();
        let summary = &report.summary;
        println!(
            "  {}/{} Validations Passed",
            summary.pass_count, summary.total_count
        );
        let style = final_style(summary.final_result, &self.ctx.styles);
        println!(
            "  {} {}",
            format!("{}:", summary.final_result).style(style),
            summary.message
        );
        println!();
    }

    /// Render the single outcome of a failed operating system gate.
    pub fn render_gate(&self, outcome: &Outcome, verbose: bool) {
        let message = outcome
            .message
            .as_deref()
            .unwrap_or("Operating system check did not pass");
        self.ctx.error(message);
        if verbose && let Some(detail) = &outcome.verbose_message {
            self.ctx.kv("detail:", detail);
        }
    }

    /// Render the probe catalogue.
    pub fn render_probes(&self, probes: &[ProbeInfo]) {
        if self.ctx.quiet {
            return;
        }
        println!();
        self.ctx.header("Registered probes (run order)");
        println!();
        for probe in probes {
            let defaults = serde_json::Value::Object(probe.defaults.clone());
            println!(
                "  {:<20} {:<22} {:<12} {}",
                probe.id,
                probe.name,
                probe.enforcement.as_str(),
                defaults.to_string().style(self.ctx.styles.dim)
            );
        }
        println!();
        self.ctx
            .info("Write overrides to config.json, keyed by probe id.");
    }
}

/// Marker and style for one outcome.
fn marker(outcome: &Outcome, styles: &Styles) -> (&'static str, Style) {
    match (outcome.result, outcome.enforcement) {
        (ValidationResult::Pass, _) => ("✓", styles.success),
        (ValidationResult::Fail, Enforcement::Recommended) => ("!", styles.warning),
        (ValidationResult::Fail, Enforcement::Required) | (ValidationResult::Error, _) => {
            ("✗", styles.error)
        }
        (ValidationResult::NotRun, _) => ("-", styles.dim),
    }
}

fn final_style(result: FinalResult, styles: &Styles) -> Style {
    match result {
        FinalResult::Pass => styles.success,
        FinalResult::Fail | FinalResult::Error => styles.error,
    }
}

/// Lines printed for one outcome: a status line, then the message and, in
/// verbose mode, the detail.
pub(crate) fn outcome_lines(outcome: &Outcome, styles: &Styles, verbose: bool) -> Vec<String> {
    let (symbol, style) = marker(outcome, styles);
    let config = outcome
        .config_mode
        .map_or(String::new(), |mode| match mode {
            ConfigMode::Custom => format!("  {}", mode.style(styles.warning)),
            ConfigMode::Default => format!("  {}", mode.style(styles.dim)),
        });
    let result = format!("{:<8}", outcome.result.as_str());
    let enforcement = format!("{:<12}", outcome.enforcement.as_str());
    let mut lines = vec![format!(
        "  {} {:<22} {} {}{config}",
        symbol.style(style),
        outcome.name,
        result.style(style),
        enforcement.style(styles.dim),
    )];
    if let Some(message) = &outcome.message {
        lines.extend(message.lines().map(|l| format!("      {l}")));
    }
    if verbose && let Some(detail) = &outcome.verbose_message {
        lines.extend(
            detail
                .lines()
                .map(|l| format!("      {}", l.style(styles.dim))),
        );
    }
    lines
}
