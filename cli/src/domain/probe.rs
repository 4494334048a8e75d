//! Probe registry, typed probe parameters and probe verdicts.
//!
//! This module is intentionally free of I/O, async, and external layer imports.
//! The registry is an explicit ordered list; adding a probe means adding a
//! `ProbeKind` variant and a line in [`registry`].

use preingest_common::{ConfigMode, Enforcement, Outcome, ValidationResult};
use serde::de::{self, DeserializeOwned};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::domain::drift::detect_custom;
use crate::domain::error::ConfigError;

/// Message attached to outcomes whose probe could not determine a result.
pub const UNSUPPORTED_ENVIRONMENT: &str = "Unable to validate due to unsupported environment";

/// Default instance profile looked up on the metadata endpoint.
pub const DEFAULT_ROLE_NAME: &str = "customer-mc-ec2-instance-profile";

/// Default minimum free space on the root volume, in GiB.
pub const DEFAULT_MIN_GB: u64 = 5;

// ── Probe kinds ───────────────────────────────────────────────────────────────

/// Every check the validator knows how to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProbeKind {
    EnhancedNetworking,
    FreeDiskSpace,
    ThirdPartySoftware,
    OperatingSystem,
    SshConfiguration,
    RepoAccess,
    InstanceProfile,
    SsmAgent,
}

impl ProbeKind {
    /// Key of this probe's section in the config file.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::EnhancedNetworking => "EnhancedNetworking",
            Self::FreeDiskSpace => "FreeDiskSpace",
            Self::ThirdPartySoftware => "ThirdPartySoftware",
            Self::OperatingSystem => "OperatingSystem",
            Self::SshConfiguration => "SSHConfiguration",
            Self::RepoAccess => "RepoAccess",
            Self::InstanceProfile => "InstanceProfile",
            Self::SsmAgent => "SSMAgent",
        }
    }

    /// Human-readable name shown in reports.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::EnhancedNetworking => "Enhanced Networking",
            Self::FreeDiskSpace => "Free Disk Space",
            Self::ThirdPartySoftware => "Third Party Software",
            Self::OperatingSystem => "Operating System",
            Self::SshConfiguration => "SSH Configuration",
            Self::RepoAccess => "Repo Access",
            Self::InstanceProfile => "Instance Profile",
            Self::SsmAgent => "SSM Agent",
        }
    }

    #[must_use]
    pub const fn enforcement(self) -> Enforcement {
        match self {
            Self::EnhancedNetworking | Self::SshConfiguration | Self::InstanceProfile => {
                Enforcement::Recommended
            }
            Self::FreeDiskSpace
            | Self::ThirdPartySoftware
            | Self::OperatingSystem
            | Self::RepoAccess
            | Self::SsmAgent => Enforcement::Required,
        }
    }

    /// Declared default parameters, as a JSON object.
    #[must_use]
    pub fn default_params(self) -> Map<String, Value> {
        match self {
            Self::FreeDiskSpace => defaults_of::<FreeDiskSpaceParams>(),
            Self::ThirdPartySoftware => defaults_of::<ThirdPartySoftwareParams>(),
            Self::InstanceProfile => defaults_of::<InstanceProfileParams>(),
            Self::EnhancedNetworking
            | Self::OperatingSystem
            | Self::SshConfiguration
            | Self::RepoAccess
            | Self::SsmAgent => defaults_of::<BasicParams>(),
        }
    }
}

// ── Registry ──────────────────────────────────────────────────────────────────

/// Static description of one registered probe.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeDescriptor {
    pub kind: ProbeKind,
    pub id: &'static str,
    pub name: &'static str,
    pub enforcement: Enforcement,
    pub defaults: Map<String, Value>,
}

impl ProbeDescriptor {
    #[must_use]
    pub fn new(kind: ProbeKind) -> Self {
        Self {
            kind,
            id: kind.id(),
            name: kind.name(),
            enforcement: kind.enforcement(),
            defaults: kind.default_params(),
        }
    }

    /// Defaults rendered as compact JSON, for config error messages.
    #[must_use]
    pub fn defaults_json(&self) -> String {
        Value::Object(self.defaults.clone()).to_string()
    }

    /// Decode this probe's config section into typed parameters.
    ///
    /// `None` means no section was supplied and the defaults apply. The
    /// returned mode reports whether any effective value differs from its
    /// default.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidParameters`] if the section is not an
    /// object, names an unknown parameter, or holds a value of the wrong type.
    pub fn resolve_params<P: ProbeParams>(
        &self,
        section: Option<&Value>,
    ) -> Result<(P, ConfigMode), ConfigError> {
        let Some(section) = section else {
            return Ok((P::default(), ConfigMode::Default));
        };
        let invalid = |reason: String| ConfigError::InvalidParameters {
            probe: self.id.to_string(),
            defaults: self.defaults_json(),
            reason,
        };
        let Value::Object(supplied) = section else {
            return Err(invalid("section is not an object".to_string()));
        };
        let params = serde_json::from_value::<P>(section.clone()).map_err(|e| invalid(e.to_string()))?;
        Ok((params, detect_custom(&self.defaults, supplied)))
    }

    /// Build the outcome for a probe that ran.
    #[must_use]
    pub fn outcome(&self, verdict: ProbeVerdict, mode: ConfigMode) -> Outcome {
        let mut outcome =
            Outcome::new(self.name, self.enforcement, verdict.result).with_config_mode(mode);
        outcome.message = verdict.message;
        outcome.verbose_message = verdict.verbose_message;
        outcome
    }
}

/// The probes in the order they run.
#[must_use]
pub fn registry() -> Vec<ProbeDescriptor> {
    [
        ProbeKind::EnhancedNetworking,
        ProbeKind::FreeDiskSpace,
        ProbeKind::ThirdPartySoftware,
        ProbeKind::OperatingSystem,
        ProbeKind::SshConfiguration,
        ProbeKind::RepoAccess,
        ProbeKind::InstanceProfile,
        ProbeKind::SsmAgent,
    ]
    .into_iter()
    .map(ProbeDescriptor::new)
    .collect()
}

// ── Parameters ────────────────────────────────────────────────────────────────

/// Typed parameters accepted by a probe.
pub trait ProbeParams: Serialize + DeserializeOwned + Default {
    /// Whether the probe should run at all.
    fn enabled(&self) -> bool;
}

fn default_enabled() -> bool {
    true
}

/// Parameters for probes whose only switch is `enabled`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct BasicParams {
    pub enabled: bool,
}

impl Default for BasicParams {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
        }
    }
}

impl ProbeParams for BasicParams {
    fn enabled(&self) -> bool {
        self.enabled
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct FreeDiskSpaceParams {
    /// Minimum free space on `/`, in GiB. Integral floats such as `5.0` are
    /// accepted.
    #[serde(deserialize_with = "whole_number")]
    pub min_gb: u64,
    pub enabled: bool,
}

impl Default for FreeDiskSpaceParams {
    fn default() -> Self {
        Self {
            min_gb: DEFAULT_MIN_GB,
            enabled: default_enabled(),
        }
    }
}

impl ProbeParams for FreeDiskSpaceParams {
    fn enabled(&self) -> bool {
        self.enabled
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct ThirdPartySoftwareParams {
    /// Extra executables to treat as conflicting software.
    pub custom_software_list: Option<Vec<String>>,
    pub enabled: bool,
}

impl Default for ThirdPartySoftwareParams {
    fn default() -> Self {
        Self {
            custom_software_list: None,
            enabled: default_enabled(),
        }
    }
}

impl ProbeParams for ThirdPartySoftwareParams {
    fn enabled(&self) -> bool {
        self.enabled
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct InstanceProfileParams {
    /// IAM role expected to be attached to the instance.
    pub role_name: String,
    pub enabled: bool,
}

impl Default for InstanceProfileParams {
    fn default() -> Self {
        Self {
            role_name: DEFAULT_ROLE_NAME.to_string(),
            enabled: default_enabled(),
        }
    }
}

impl ProbeParams for InstanceProfileParams {
    fn enabled(&self) -> bool {
        self.enabled
    }
}

/// Decode a non-negative whole number written either as an integer or as a
/// float with no fractional part.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
fn whole_number<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = f64::deserialize(deserializer)?;
    if value.is_finite() && value >= 0.0 && value.fract() == 0.0 && value <= u64::MAX as f64 {
        Ok(value as u64)
    } else {
        Err(de::Error::custom(format!(
            "invalid value: {value}, expected a non-negative whole number"
        )))
    }
}

fn defaults_of<P: ProbeParams>() -> Map<String, Value> {
    match serde_json::to_value(P::default()) {
        Ok(Value::Object(map)) => map,
        _ => Map::new(),
    }
}

// ── Verdicts ──────────────────────────────────────────────────────────────────

/// What a probe body decided, before the driver attaches identity and config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeVerdict {
    pub result: ValidationResult,
    pub message: Option<String>,
    pub verbose_message: Option<String>,
}

impl ProbeVerdict {
    fn new(result: ValidationResult, message: Option<String>) -> Self {
        Self {
            result,
            message,
            verbose_message: None,
        }
    }

    /// Pass without a message.
    #[must_use]
    pub fn pass() -> Self {
        Self::new(ValidationResult::Pass, None)
    }

    #[must_use]
    pub fn pass_with(message: impl Into<String>) -> Self {
        Self::new(ValidationResult::Pass, Some(message.into()))
    }

    #[must_use]
    pub fn fail(message: impl Into<String>) -> Self {
        Self::new(ValidationResult::Fail, Some(message.into()))
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(ValidationResult::Error, Some(message.into()))
    }

    /// The standard error verdict for a broken environment assumption.
    #[must_use]
    pub fn unsupported(detail: impl Into<String>) -> Self {
        Self::error(UNSUPPORTED_ENVIRONMENT).verbose(detail)
    }

    #[must_use]
    pub fn verbose(mut self, detail: impl Into<String>) -> Self {
        self.verbose_message = Some(detail.into());
        self
    }
}

// ── Unit tests ────────────────────────────────────────────────────────────────
