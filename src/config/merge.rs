//! Deep merge over JSON trees.
//!
//! The rule is structural: when the value already in the target and the
//! incoming value are both objects, their keys merge recursively. In every
//! other case (arrays, scalars, null, or a type change) the incoming value
//! replaces the target value outright. Arrays are never concatenated.

use serde_json::Value;

/// Merge `source` into `target`; `source` wins field by field.
pub fn merge_deep(target: &mut Value, source: Value) {
    match (target, source) {
        (Value::Object(target), Value::Object(source)) => {
            for (key, value) in source {
                let recurse = value.is_object() && target.get(&key).is_some_and(Value::is_object);
                match target.get_mut(&key) {
                    Some(existing) if recurse => merge_deep(existing, value),
                    _ => {
                        target.insert(key, value);
                    }
                }
            }
        }
        (target, source) => *target = source,
    }
}

/// Merge every layer in order over `base`, lowest precedence first.
pub fn merge_layers(base: Value, layers: impl IntoIterator<Item = Value>) -> Value {
    layers.into_iter().fold(base, |mut acc, layer| {
        merge_deep(&mut acc, layer);
        acc
    })
}
