//! Aggregation of probe outcomes into a single run summary.
//!
//! This module is intentionally free of I/O, async, and external layer imports.

use preingest_common::{ConfigMode, Enforcement, FinalResult, Outcome, Summary, ValidationResult};

pub const MSG_ERROR: &str = "Unexpected error during validation";
pub const MSG_FAIL: &str = "Not ready for ingestion";
pub const MSG_PARTIAL: &str =
    "Passed base requirements for ingestion, but may not be fully optimized";
pub const MSG_READY: &str = "Ready for ingestion";
pub const MSG_CUSTOM_SUFFIX: &str = ". Warning, custom config may affect final result";

/// Reduce a run's outcomes to one summary.
///
/// Priority is `Error > Required fail > Recommended fail > Pass`. `NotRun`
/// outcomes count toward `total_count` but never toward `pass_count` and
/// never change the verdict.
#[must_use]
pub fn summarize(outcomes: &[Outcome]) -> Summary {
    let mut pass_count = 0;
    let mut any_error = false;
    let mut any_required_fail = false;
    let mut any_recommended_fail = false;
    let mut any_custom = false;

    for outcome in outcomes {
        if outcome.is_custom() {
            any_custom = true;
        }
        match outcome.result {
            ValidationResult::Pass => pass_count += 1,
            ValidationResult::Error => any_error = true,
            ValidationResult::NotRun => {}
            ValidationResult::Fail => match outcome.enforcement {
                Enforcement::Required => any_required_fail = true,
                Enforcement::Recommended => any_recommended_fail = true,
            },
        }
    }

    let (final_result, message) = if any_error {
        (FinalResult::Error, MSG_ERROR)
    } else if any_required_fail {
        (FinalResult::Fail, MSG_FAIL)
    } else if any_recommended_fail {
        (FinalResult::Pass, MSG_PARTIAL)
    } else {
        (FinalResult::Pass, MSG_READY)
    };

    let (config_mode, message) = if any_custom {
        (ConfigMode::Custom, format!("{message}{MSG_CUSTOM_SUFFIX}"))
    } else {
        (ConfigMode::Default, message.to_string())
    };

    Summary {
        final_result,
        config_mode,
        pass_count,
        total_count: outcomes.len(),
        message,
    }
}

// ── Unit tests ────────────────────────────────────────────────────────────────
