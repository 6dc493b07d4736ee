//! Document layering logic
//!
//! Implements the 3-layer merge used for every JSON target:
//! Template -> Generated -> Override
//!
//! Objects are merged recursively, scalars and lists are replaced, and a key
//! suffixed with [`APPEND_MARKER`] appends to the list under the bare key.

use serde_json::{Map, Value};

/// Suffix marking "append to the existing list" instead of "replace".
pub const APPEND_MARKER: char = '+';

/// Merge `overlay` on top of `base`, returning a new value.
///
/// Neither input is modified. When both sides are objects they are merged
/// key by key; otherwise `overlay` wins.
pub fn deep_merge(base: &Value, overlay: &Value) -> Value {
    match (base, overlay) {
        (Value::Object(base_map), Value::Object(overlay_map)) => {
            Value::Object(deep_merge_maps(base_map, overlay_map))
        }
        (_, overlay) => overlay.clone(),
    }
}

/// Map-level variant of [`deep_merge`].
pub fn deep_merge_maps(base: &Map<String, Value>, overlay: &Map<String, Value>) -> Map<String, Value> {
    let mut result = base.clone();

    for (key, overlay_value) in overlay {
        if let Some(target) = key.strip_suffix(APPEND_MARKER) {
            let appended = append_unique(result.get(target), overlay_value);
            result.insert(target.to_string(), appended);
            continue;
        }

        // Recursively merge nested objects
        if let Some(existing) = result.get(key.as_str())
            && existing.is_object()
            && overlay_value.is_object()
        {
            let merged = deep_merge(existing, overlay_value);
            result.insert(key.clone(), merged);
            continue;
        }

        result.insert(key.clone(), overlay_value.clone());
    }

    result
}

/// Merge a sequence of layers, later layers winning.
pub fn merge_layers<'a, I>(layers: I) -> Map<String, Value>
where
    I: IntoIterator<Item = &'a Map<String, Value>>,
{
    layers
        .into_iter()
        .fold(Map::new(), |acc, layer| deep_merge_maps(&acc, layer))
}

/// Base list items first, then overlay items not already present.
fn append_unique(existing: Option<&Value>, additions: &Value) -> Value {
    let mut items = match existing {
        Some(Value::Array(items)) => items.clone(),
        _ => Vec::new(),
    };

    let additions = match additions {
        Value::Array(values) => values.as_slice(),
        single => std::slice::from_ref(single),
    };

    for item in additions {
        if !items.contains(item) {
            items.push(item.clone());
        }
    }

    Value::Array(items)
}
