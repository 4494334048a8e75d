//! Domain layer: pure business logic, types, and validation.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All functions are synchronous and take data in, returning data out.

pub mod config;
pub mod disk;
pub mod drift;
pub mod error;
pub mod host;
pub mod probe;
pub mod software;
pub mod sshd;
pub mod summary;

pub use config::{ConfigFormat, ProbeOverrides, parse_overrides};
pub use error::{ConfigError, HostError};
pub use host::HostSnapshot;
pub use probe::{ProbeDescriptor, ProbeKind, ProbeVerdict, registry};
pub use summary::summarize;
