//! Instance metadata endpoint over HTTP.

use std::time::Duration;

use anyhow::{Context, Result};

use crate::application::ports::MetadataClient;

pub const METADATA_ROOT: &str = "http://169.254.169.254/latest/meta-data/";
pub const METADATA_TIMEOUT: Duration = Duration::from_secs(5);

/// Blocking `ureq` agent driven from `spawn_blocking`.
pub struct ImdsClient {
    agent: ureq::Agent,
    root: String,
}

impl ImdsClient {
    #[must_use]
    pub fn new(root: impl Into<String>, timeout: Duration) -> Self {
        Self {
            agent: ureq::AgentBuilder::new().timeout(timeout).build(),
            root: root.into(),
        }
    }
}

impl Default for ImdsClient {
    fn default() -> Self {
        Self::new(METADATA_ROOT, METADATA_TIMEOUT)
    }
}

impl MetadataClient for ImdsClient {
    async fn get(&self, path: &str) -> Result<bool> {
        let url = format!("{}{path}", self.root);
        let agent = self.agent.clone();
        let target = url.clone();
        let ok = tokio::task::spawn_blocking(move || match agent.get(&target).call() {
            Ok(_) => Ok(true),
            Err(ureq::Error::Status(code, _)) => {
                tracing::debug!(code, url = %target, "metadata request rejected");
                Ok(false)
            }
            Err(ureq::Error::Transport(t)) => Err(anyhow::anyhow!("{t}")),
        })
        .await
        .context("spawn_blocking for metadata request")?
        .with_context(|| format!("cannot reach {url}"))?;
        Ok(ok)
    }
}
