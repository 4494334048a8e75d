use std::fmt;

use serde::{Deserialize, Serialize};

/// Result of a single probe run.
///
/// Variant order is the display order of a report: errors first, passes last.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ValidationResult {
    Error,
    Fail,
    #[serde(rename = "Not Run")]
    NotRun,
    Pass,
}

impl ValidationResult {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Error => "Error",
            Self::Fail => "Fail",
            Self::NotRun => "Not Run",
            Self::Pass => "Pass",
        }
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Overall verdict of a validation run.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum FinalResult {
    Pass,
    Fail,
    Error,
}

impl FinalResult {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pass => "Pass",
            Self::Fail => "Fail",
            Self::Error => "Error",
        }
    }

    /// Process exit status for this verdict.
    #[must_use]
    pub fn exit_code(self) -> i32 {
        match self {
            Self::Pass => 0,
            Self::Error => 1,
            Self::Fail => 2,
        }
    }
}

impl fmt::Display for FinalResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Policy severity of a probe, fixed per probe.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Enforcement {
    Required,
    Recommended,
}

impl Enforcement {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Required => "Required",
            Self::Recommended => "Recommended",
        }
    }
}

impl fmt::Display for Enforcement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a probe ran with its declared defaults.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum ConfigMode {
    #[default]
    Default,
    Custom,
}

impl ConfigMode {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Default => "Default",
            Self::Custom => "Custom",
        }
    }
}

impl fmt::Display for ConfigMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Record produced by one probe invocation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Outcome {
    /// Display name of the probe.
    pub name: String,
    pub result: ValidationResult,
    pub enforcement: Enforcement,
    /// Only set when the probe actually ran.
    #[serde(default)]
    pub config_mode: Option<ConfigMode>,
    #[serde(default)]
    pub message: Option<String>,
    /// Extra detail shown in verbose mode.
    #[serde(default)]
    pub verbose_message: Option<String>,
}

impl Outcome {
    #[must_use]
    pub fn new(name: impl Into<String>, enforcement: Enforcement, result: ValidationResult) -> Self {
        Self {
            name: name.into(),
            result,
            enforcement,
            config_mode: None,
            message: None,
            verbose_message: None,
        }
    }

    /// Outcome of a probe disabled by configuration.
    #[must_use]
    pub fn not_run(name: impl Into<String>, enforcement: Enforcement) -> Self {
        Self::new(name, enforcement, ValidationResult::NotRun)
    }

    #[must_use]
    pub fn with_config_mode(mut self, mode: ConfigMode) -> Self {
        self.config_mode = Some(mode);
        self
    }

    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    #[must_use]
    pub fn with_verbose_message(mut self, verbose: impl Into<String>) -> Self {
        self.verbose_message = Some(verbose.into());
        self
    }

    #[must_use]
    pub fn is_custom(&self) -> bool {
        self.config_mode == Some(ConfigMode::Custom)
    }
}

/// Aggregate of a full validation run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Summary {
    pub final_result: FinalResult,
    pub config_mode: ConfigMode,
    pub pass_count: usize,
    pub total_count: usize,
    pub message: String,
}

/// Summary plus the outcomes it was computed from, as written to JSON.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ValidationReport {
    #[serde(flatten)]
    pub summary: Summary,
    pub outcomes: Vec<Outcome>,
}
