//! Configuration-drift detection for probe parameters.

use preingest_common::ConfigMode;
use serde_json::{Map, Value};

/// Compare the parameters a probe will run with against its declared defaults.
///
/// Only keys present in `defaults` are inspected; a key missing from
/// `supplied` falls back to its default and therefore never counts as drift.
#[must_use]
pub fn detect_custom(defaults: &Map<String, Value>, supplied: &Map<String, Value>) -> ConfigMode {
    let drifted = defaults
        .iter()
        .any(|(key, default)| supplied.get(key).is_some_and(|value| !same_value(value, default)));
    if drifted {
        ConfigMode::Custom
    } else {
        ConfigMode::Default
    }
}

/// Value equality, with `5` and `5.0` treated as the same number.
#[allow(clippy::float_cmp)] // exact comparison of config literals
fn same_value(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x.as_f64() == y.as_f64(),
        _ => a == b,
    }
}
