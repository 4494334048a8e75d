//! sshd configuration rule.
//!
//! This module is intentionally free of I/O, async, and external layer imports.

use crate::domain::probe::ProbeVerdict;

pub const SSHD_CONFIG_PATH: &str = "/etc/ssh/sshd_config";

/// Directives that must be present (uncommented) for key-based login.
pub const REQUIRED_DIRECTIVES: &[&str] = &["AuthorizedKeysFile", "PubkeyAuthentication"];

const FAIL_PREFIX: &str = "Improperly configured values in /etc/ssh/sshd_config: ";

const HINT: &str = "The lines \"PubkeyAuthentication yes\" and \
\"AuthorizedKeysFile .ssh/authorized_keys\" are needed.\n\
In most cases, an improperly configured value just means it is commented out.";

/// Required directives that do not start any line of `contents`.
#[must_use]
pub fn missing_directives(contents: &str) -> Vec<&'static str> {
    REQUIRED_DIRECTIVES
        .iter()
        .copied()
        .filter(|directive| !contents.lines().any(|line| line.starts_with(directive)))
        .collect()
}

/// Decide the SSH check from the config file contents, or the read error.
#[must_use]
pub fn evaluate_sshd_config(contents: Result<&str, String>) -> ProbeVerdict {
    let problem = match contents {
        Ok(text) => {
            let missing = missing_directives(text);
            if missing.is_empty() {
                return ProbeVerdict::pass();
            }
            missing.join(", ")
        }
        Err(read_error) => read_error,
    };
    ProbeVerdict::fail(format!("{FAIL_PREFIX}{problem}")).verbose(HINT)
}
