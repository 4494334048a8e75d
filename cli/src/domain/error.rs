//! Typed domain error enums.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All error types implement `thiserror::Error` and convert to `anyhow::Error`
//! via the `?` operator.

use thiserror::Error;

// ── Config errors ─────────────────────────────────────────────────────────────

/// Errors raised while reading probe overrides.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing section in config file, default values are \"{probe}\": {defaults}")]
    MissingSection { probe: String, defaults: String },

    #[error("Error loading parameters of {probe} from config file")]
    InvalidParameters {
        probe: String,
        defaults: String,
        reason: String,
    },

    #[error("Config file must map probe names to parameter objects")]
    NotAMapping,

    #[error("Cannot parse config file: {0}")]
    Parse(String),
}

impl ConfigError {
    /// Extra detail for verbose output.
    #[must_use]
    pub fn verbose_message(&self) -> Option<String> {
        match self {
            Self::InvalidParameters {
                defaults, reason, ..
            } => Some(format!("Default parameters are {defaults} ({reason})")),
            _ => None,
        }
    }
}

// ── Host errors ───────────────────────────────────────────────────────────────

/// Errors raised while interpreting data read from the host.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum HostError {
    #[error("Cannot parse version number '{0}'")]
    UnparsableVersion(String),

    #[error("Cannot parse df output")]
    UnparsableDiskUsage,

    #[error("Root volume reports zero capacity")]
    EmptyVolume,
}
