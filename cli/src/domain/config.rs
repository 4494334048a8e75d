//! Probe override document.
//!
//! Pure functions only: no I/O, no async, no filesystem access.

use std::collections::BTreeMap;
use std::path::Path;

use serde_json::Value;

use crate::domain::error::ConfigError;

/// Path used when neither `--config` nor the environment names one.
pub const DEFAULT_CONFIG_FILE: &str = "config.json";

/// Environment variable that overrides the config file location.
pub const CONFIG_ENV_VAR: &str = "PREINGEST_CONFIG";

/// Syntax of a config file, chosen from its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Yaml,
}

impl ConfigFormat {
    /// `.yaml` and `.yml` are YAML; everything else is JSON.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("yaml" | "yml") => Self::Yaml,
            _ => Self::Json,
        }
    }
}

/// Per-probe parameter sections keyed by probe id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProbeOverrides {
    sections: BTreeMap<String, Value>,
}

impl ProbeOverrides {
    #[must_use]
    pub fn new(sections: BTreeMap<String, Value>) -> Self {
        Self { sections }
    }

    /// Section for a probe id, if the file has one.
    #[must_use]
    pub fn section(&self, probe_id: &str) -> Option<&Value> {
        self.sections.get(probe_id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

/// Parse a config document.
///
/// # Errors
///
/// Returns [`ConfigError::Parse`] on a syntax error and
/// [`ConfigError::NotAMapping`] if the top level is not an object.
pub fn parse_overrides(text: &str, format: ConfigFormat) -> Result<ProbeOverrides, ConfigError> {
    let document: Value = match format {
        ConfigFormat::Json => {
            serde_json::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))?
        }
        ConfigFormat::Yaml => {
            serde_yaml::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))?
        }
    };
    match document {
        Value::Object(map) => Ok(ProbeOverrides::new(map.into_iter().collect())),
        _ => Err(ConfigError::NotAMapping),
    }
}

// ── Unit tests ────────────────────────────────────────────────────────────────
