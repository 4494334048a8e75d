//! Filesystem infrastructure: implements `HostFilesystem` and `ExecutableLookup`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::application::ports::{ExecutableLookup, HostFilesystem};

/// Production filesystem access against the real root.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalFs;

impl HostFilesystem for LocalFs {
    fn read_to_string(&self, path: &Path) -> Result<String> {
        std::fs::read_to_string(path).with_context(|| format!("cannot read {}", path.display()))
    }

    fn list_dir(&self, path: &Path) -> Result<Vec<String>> {
        let entries =
            std::fs::read_dir(path).with_context(|| format!("cannot list {}", path.display()))?;
        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.with_context(|| format!("cannot list {}", path.display()))?;
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
        names.sort();
        Ok(names)
    }

    fn contains_file_with_prefix(&self, root: &Path, prefix: &str) -> Result<bool> {
        if !root.is_dir() {
            return Ok(false);
        }
        find_prefixed(root, prefix)
    }
}

/// Depth-first search; symlinked directories are not followed.
fn find_prefixed(dir: &Path, prefix: &str) -> Result<bool> {
    let entries =
        std::fs::read_dir(dir).with_context(|| format!("cannot list {}", dir.display()))?;
    let mut subdirs = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("cannot list {}", dir.display()))?;
        let file_type = entry
            .file_type()
            .with_context(|| format!("cannot stat {}", entry.path().display()))?;
        if file_type.is_dir() {
            subdirs.push(entry.path());
        } else if entry.file_name().to_string_lossy().starts_with(prefix) {
            return Ok(true);
        }
    }
    for sub in subdirs {
        if find_prefixed(&sub, prefix)? {
            return Ok(true);
        }
    }
    Ok(false)
}

impl ExecutableLookup for LocalFs {
    fn locate(&self, program: &str) -> Option<PathBuf> {
        which::which(program).ok()
    }
}

/// Whether the process runs with an effective uid of root.
#[must_use]
pub fn is_root() -> bool {
    #[cfg(unix)]
    {
        nix::unistd::geteuid().is_root()
    }
    #[cfg(not(unix))]
    {
        false
    }
}
