//! Path-addressed edits on an in-memory JSON document tree.
//!
//! Shared by the file and memory stores so that both behave like the remote
//! document database: reads of missing paths yield `null`, writes create
//! intermediate objects, writing `null` deletes, and deleting the last child
//! of an object removes the now-empty parent as well.

use serde_json::{Map, Value};

/// Split a store path into segments. Leading/trailing slashes and a `.json`
/// suffix are ignored, so `"/tasks/3.json"` and `"tasks/3"` are equivalent.
pub fn split_path(path: &str) -> Vec<&str> {
    let trimmed = path.trim_matches('/');
    let trimmed = trimmed.strip_suffix(".json").unwrap_or(trimmed);
    trimmed.split('/').filter(|s| !s.is_empty()).collect()
}

/// Read the value at `segments`, or `null` if any segment is missing
pub fn get_at(root: &Value, segments: &[&str]) -> Value {
    let mut current = root;
    for seg in segments {
        current = match current {
            Value::Object(map) => match map.get(*seg) {
                Some(v) => v,
                None => return Value::Null,
            },
            Value::Array(items) => match seg.parse::<usize>().ok().and_then(|i| items.get(i)) {
                Some(v) => v,
                None => return Value::Null,
            },
            _ => return Value::Null,
        };
    }
    current.clone()
}

/// Replace the value at `segments`. Writing `null` deletes the path.
pub fn put_at(root: &mut Value, segments: &[&str], value: Value) {
    if value.is_null() {
        delete_at(root, segments);
        return;
    }
    let Some((last, parents)) = segments.split_last() else {
        *root = value;
        return;
    };
    let mut current = root;
    for seg in parents {
        let map = ensure_object(current);
        current = map
            .entry((*seg).to_string())
            .or_insert_with(|| Value::Object(Map::new()));
    }
    ensure_object(current).insert((*last).to_string(), value);
}

/// Merge the top-level keys of `partial` into the object at `segments`
pub fn patch_at(root: &mut Value, segments: &[&str], partial: &Value) {
    match partial {
        Value::Object(fields) => {
            for (key, value) in fields {
                let mut path: Vec<&str> = segments.to_vec();
                path.push(key.as_str());
                put_at(root, &path, value.clone());
            }
        }
        other => put_at(root, segments, other.clone()),
    }
}

/// Remove the value at `segments`, pruning parents left empty
pub fn delete_at(root: &mut Value, segments: &[&str]) {
    if segments.is_empty() {
        *root = Value::Null;
        return;
    }
    if remove_recursive(root, segments) {
        *root = Value::Null;
    }
}

/// Returns true when `node` is left as an empty container
fn remove_recursive(node: &mut Value, segments: &[&str]) -> bool {
    let Some((first, rest)) = segments.split_first() else {
        return false;
    };
    if !matches!(node, Value::Object(_) | Value::Array(_)) {
        return false;
    }
    let map = ensure_object(node);
    if rest.is_empty() {
        map.remove(*first);
    } else if let Some(child) = map.get_mut(*first)
        && remove_recursive(child, rest)
    {
        map.remove(*first);
    }
    map.is_empty()
}

/// Coerce `value` into an object (arrays keep their items under index keys)
fn ensure_object(value: &mut Value) -> &mut Map<String, Value> {
    if !value.is_object() {
        let converted = match value.take() {
            Value::Array(items) => items
                .into_iter()
                .enumerate()
                .filter(|(_, v)| !v.is_null())
                .map(|(i, v)| (i.to_string(), v))
                .collect(),
            _ => Map::new(),
        };
        *value = Value::Object(converted);
    }
    match value {
        Value::Object(map) => map,
        _ => unreachable!("value was just replaced by an object"),
    }
}
