//! Host snapshot and the pure rules evaluated against it.
//!
//! This module is intentionally free of I/O, async, and external layer imports.
//! All functions take data in and return data out.

use crate::domain::error::HostError;

/// Read-only facts about the machine under validation, gathered once per run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostSnapshot {
    /// Normalized distribution id (`rhel`, `centos`, `amzn`, `sles`, `oracle`, ...).
    pub distribution: String,
    pub major_version: String,
    pub minor_version: String,
    /// `PRETTY_NAME` from os-release, falling back to the id.
    pub pretty_name: String,
    /// Running kernel release, e.g. `4.14.290-217.505.amzn2.x86_64`.
    pub kernel_release: String,
    /// Whether the instance metadata endpoint answered.
    pub is_ec2: bool,
}

/// Fields of interest from `/etc/os-release`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OsRelease {
    pub id: String,
    pub version_id: String,
    pub pretty_name: String,
}

/// Parse the `KEY=value` lines of an os-release file.
#[must_use]
pub fn parse_os_release(contents: &str) -> OsRelease {
    let mut release = OsRelease::default();
    for line in contents.lines() {
        let Some((key, value)) = line.trim().split_once('=') else {
            continue;
        };
        let value = value.trim().trim_matches('"').trim_matches('\'').to_string();
        match key {
            "ID" => release.id = normalize_distribution(&value),
            "VERSION_ID" => release.version_id = value,
            "PRETTY_NAME" => release.pretty_name = value,
            _ => {}
        }
    }
    if release.pretty_name.is_empty() {
        release.pretty_name.clone_from(&release.id);
    }
    release
}

/// Map os-release ids onto the names the support matrix uses.
#[must_use]
pub fn normalize_distribution(id: &str) -> String {
    match id.to_ascii_lowercase().as_str() {
        "ol" => "oracle".to_string(),
        "sles_sap" | "sled" => "sles".to_string(),
        other => other.to_string(),
    }
}

/// Split `VERSION_ID` into major and minor components (`"7.9"` → `("7", "9")`).
#[must_use]
pub fn split_version(version_id: &str) -> (String, String) {
    let mut parts = version_id.split('.');
    let major = parts.next().unwrap_or_default().to_string();
    let minor = parts.next().unwrap_or_default().to_string();
    (major, minor)
}

impl HostSnapshot {
    /// Build a snapshot from os-release contents and a kernel release string.
    #[must_use]
    pub fn from_os_release(release: &OsRelease, kernel_release: &str, is_ec2: bool) -> Self {
        let (major_version, minor_version) = split_version(&release.version_id);
        Self {
            distribution: release.id.clone(),
            major_version,
            minor_version,
            pretty_name: release.pretty_name.clone(),
            kernel_release: kernel_release.trim().to_string(),
            is_ec2,
        }
    }

    /// Key used to pick a service manager, e.g. `rhel7` or `amzn2018`.
    #[must_use]
    pub fn distribution_key(&self) -> String {
        format!("{}{}", self.distribution, self.major_version)
    }
}

fn version_number(raw: &str) -> Result<u32, HostError> {
    if raw.is_empty() {
        return Ok(0);
    }
    raw.parse::<u32>()
        .map_err(|_| HostError::UnparsableVersion(raw.to_string()))
}

/// Whether the distribution and version are in the supported matrix.
///
/// # Errors
///
/// Returns [`HostError::UnparsableVersion`] if a version component is not a
/// number.
pub fn is_supported_os(host: &HostSnapshot) -> Result<bool, HostError> {
    let major = version_number(&host.major_version)?;
    let minor = version_number(&host.minor_version)?;
    let supported = match host.distribution.as_str() {
        "centos" => matches!(major, 6 | 7),
        "rhel" => (major == 6 && minor >= 5) || matches!(major, 7 | 8),
        "amzn" => (major == 2018 && minor == 3) || major == 2,
        "sles" => matches!(major, 12 | 15),
        "oracle" => major == 7,
        _ => false,
    };
    Ok(supported)
}

/// Init system used to query the management agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceManager {
    Systemctl,
    /// Upstart's `status` command.
    Upstart,
}

impl ServiceManager {
    /// Executable that must be on `PATH`.
    #[must_use]
    pub const fn command(self) -> &'static str {
        match self {
            Self::Systemctl => "systemctl",
            Self::Upstart => "status",
        }
    }
}

/// Service manager for a distribution key, if the distribution is known.
#[must_use]
pub fn service_manager_for(distribution_key: &str) -> Option<ServiceManager> {
    match distribution_key {
        "rhel7" | "rhel8" | "centos7" | "amzn2" | "sles12" | "sles15" | "oracle7" => {
            Some(ServiceManager::Systemctl)
        }
        "rhel6" | "centos6" | "amzn2018" => Some(ServiceManager::Upstart),
        _ => None,
    }
}

const ZYPPER_REFRESH: &[&str] = &["refresh"];
const YUM_CHECK_UPDATE: &[&str] = &["check-update"];

/// Package manager command that refreshes repository metadata.
#[must_use]
pub fn repo_refresh_command(distribution: &str) -> (&'static str, &'static [&'static str]) {
    if distribution == "sles" {
        ("zypper", ZYPPER_REFRESH)
    } else {
        ("yum", YUM_CHECK_UPDATE)
    }
}

// ── Unit tests ────────────────────────────────────────────────────────────────
