//! Infrastructure implementation of the `ConfigStore` port.

use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::application::ports::ConfigStore;
use crate::domain::config::{
    CONFIG_ENV_VAR, ConfigFormat, DEFAULT_CONFIG_FILE, ProbeOverrides, parse_overrides,
};

/// Reads probe overrides from a JSON or YAML file on disk.
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    /// `explicit` (from `--config`) wins, then `PREINGEST_CONFIG`, then
    /// `./config.json`.
    #[must_use]
    pub fn resolve(explicit: Option<PathBuf>) -> Self {
        let path = explicit
            .or_else(|| std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
        Self { path }
    }
}

impl ConfigStore for FileConfigStore {
    fn path(&self) -> PathBuf {
        self.path.clone()
    }

    fn load(&self) -> Result<Option<ProbeOverrides>> {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "no config file, using defaults");
            return Ok(None);
        }
        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("cannot read {}", self.path.display()))?;
        let overrides = parse_overrides(&content, ConfigFormat::from_path(&self.path))
            .with_context(|| format!("cannot parse {}", self.path.display()))?;
        tracing::info!(
            path = %self.path.display(),
            sections = overrides.len(),
            "loaded config file"
        );
        Ok(Some(overrides))
    }
}
