//! Command implementations

pub mod probes;
pub mod validate;
pub mod version;
