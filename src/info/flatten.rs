//! Collapses Yahoo's `{raw, fmt}` value wrappers.

use serde_json::Value;

/// Recursively rewrite `value`, replacing any object that carries a `raw`
/// key with that raw value. Arrays and plain objects are rewritten in place.
pub(super) fn simplify(value: Value) -> Value {
    match value {
        Value::Object(mut map) => {
            if let Some(raw) = map.remove("raw") {
                return simplify(raw);
            }
            Value::Object(map.into_iter().map(|(k, v)| (k, simplify(v))).collect())
        }
        Value::Array(items) => Value::Array(items.into_iter().map(simplify).collect()),
        other => other,
    }
}
