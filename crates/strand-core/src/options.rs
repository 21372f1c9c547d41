//! Option merging

use serde_json::{Map, Value};

/// Shallow-merge `options` over `defaults`.
///
/// Keys present in `options` win; keys only in `defaults` fill the gaps.
/// A non-object on either side contributes nothing.
pub fn extend_options(defaults: &Value, options: &Value) -> Value {
    let mut merged = Map::new();

    if let Value::Object(options) = options {
        merged.extend(options.clone());
    }

    if let Value::Object(defaults) = defaults {
        for (key, value) in defaults {
            merged.entry(key.clone()).or_insert_with(|| value.clone());
        }
    }

    Value::Object(merged)
}
