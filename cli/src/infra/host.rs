//! `LocalHost`: the production `HostSystem`.

use std::path::{Path, PathBuf};
use std::process::Output;
use std::time::Duration;

use anyhow::Result;

use crate::application::ports::{CommandRunner, ExecutableLookup, HostFilesystem, MetadataClient};
use crate::infra::command_runner::TokioCommandRunner;
use crate::infra::fs::LocalFs;
use crate::infra::metadata::ImdsClient;

/// Delegates each port to its concrete adapter.
#[derive(Default)]
pub struct LocalHost {
    runner: TokioCommandRunner,
    fs: LocalFs,
    metadata: ImdsClient,
}

impl CommandRunner for LocalHost {
    async fn run(&self, program: &str, args: &[&str]) -> Result<Output> {
        self.runner.run(program, args).await
    }

    async fn run_with_timeout(
        &self,
        program: &str,
        args: &[&str],
        timeout: Duration,
    ) -> Result<Output> {
        self.runner.run_with_timeout(program, args, timeout).await
    }
}

impl HostFilesystem for LocalHost {
    fn read_to_string(&self, path: &Path) -> Result<String> {
        self.fs.read_to_string(path)
    }

    fn list_dir(&self, path: &Path) -> Result<Vec<String>> {
        self.fs.list_dir(path)
    }

    fn contains_file_with_prefix(&self, root: &Path, prefix: &str) -> Result<bool> {
        self.fs.contains_file_with_prefix(root, prefix)
    }
}

impl ExecutableLookup for LocalHost {
    fn locate(&self, program: &str) -> Option<PathBuf> {
        self.fs.locate(program)
    }
}

impl MetadataClient for LocalHost {
    async fn get(&self, path: &str) -> Result<bool> {
        self.metadata.get(path).await
    }
}
