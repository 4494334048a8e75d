//! Application service: probe catalogue listing.
//!
//! Pure projection of the registry; no ports needed.

use preingest_common::Enforcement;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::domain::ProbeDescriptor;

/// One registered probe as shown by `preingest probes`.
#[derive(Debug, Clone, Serialize)]
pub struct ProbeInfo {
    pub id: String,
    pub name: String,
    pub enforcement: Enforcement,
    pub defaults: Map<String, Value>,
}

impl From<&ProbeDescriptor> for ProbeInfo {
    fn from(descriptor: &ProbeDescriptor) -> Self {
        Self {
            id: descriptor.id.to_string(),
            name: descriptor.name.to_string(),
            enforcement: descriptor.enforcement,
            defaults: descriptor.defaults.clone(),
        }
    }
}

/// Registry entries in run order.
#[must_use]
pub fn list_probes(registry: &[ProbeDescriptor]) -> Vec<ProbeInfo> {
    registry.iter().map(ProbeInfo::from).collect()
}

/// A config document holding every probe's defaults.
///
/// Loading it back yields a run in which every probe reports `Default` mode.
#[must_use]
pub fn default_config(registry: &[ProbeDescriptor]) -> Value {
    let sections = registry
        .iter()
        .map(|d| (d.id.to_string(), Value::Object(d.defaults.clone())))
        .collect::<Map<_, _>>();
    Value::Object(sections)
}
