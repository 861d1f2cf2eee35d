//! Deep merge functionality for JSON configurations.
//!
//! Implements field-by-field merging where higher-layer values override
//! lower-layer values. Arrays are replaced entirely, not concatenated.

use serde_json::Value;

/// Deep merge two JSON values, with `overlay` taking precedence over `base`.
///
/// - Objects are merged recursively: keys in overlay override keys in base
/// - An explicit `null` in overlay **deletes** the key from the result,
///   distinguishing "unset this" from "not specified"
/// - Arrays, strings, numbers, booleans are replaced entirely
///
/// # Example
/// ```
/// use serde_json::json;
/// use dding_dong::config::deep_merge;
///
/// let base = json!({
///     "sound": { "volume": 0.7, "pack": "default" },
///     "enabled": true
/// });
/// let overlay = json!({
///     "sound": { "volume": 0.3 },
///     "enabled": null
/// });
/// let result = deep_merge(base, overlay);
/// // Result: { "sound": { "volume": 0.3, "pack": "default" } }
/// ```
pub fn deep_merge(base: Value, overlay: Value) -> Value {
    match (base, overlay) {
        // Both are objects: merge recursively, null deletes
        (Value::Object(mut base_map), Value::Object(overlay_map)) => {
            for (key, overlay_value) in overlay_map {
                if overlay_value.is_null() {
                    base_map.remove(&key);
                    continue;
                }
                let merged_value = if let Some(base_value) = base_map.remove(&key) {
                    deep_merge(base_value, overlay_value)
                } else {
                    overlay_value
                };
                base_map.insert(key, merged_value);
            }
            Value::Object(base_map)
        }
        // Any other case: overlay replaces base entirely
        (_, overlay) => overlay,
    }
}

/// Merge multiple values in order, with later values taking precedence.
///
/// Equivalent to folding `deep_merge` over the list. An empty iterator
/// yields the first value's replacement of `Null`, so callers always seed
/// with the default schema.
pub fn deep_merge_all(values: impl IntoIterator<Item = Value>) -> Value {
    values.into_iter().fold(Value::Null, deep_merge)
}
