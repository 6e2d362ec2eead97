//! Locale tree model: flatten, unflatten, merge and diff nested catalogs.
//!
//! A tree is a `serde_json::Value`: objects are internal nodes, everything
//! else (strings, numbers, arrays, null) is a leaf. Arrays are never expanded.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;
use serde_json::{Map, Value};

/// Leaf value marking a key that exists but has not been translated yet.
pub const NOT_TRANSLATED_MARKER: &str = "__NOT_TRANSLATED__";

/// Dotted key path -> leaf value.
pub type FlatKeys = BTreeMap<String, Value>;

/// Key-level difference between a reference catalog and another one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct KeyDiff {
    /// Keys in the reference but absent from the other catalog.
    pub missing: BTreeSet<String>,
    /// Keys in the other catalog but absent from the reference.
    pub extra: BTreeSet<String>,
}

impl KeyDiff {
    pub fn is_empty(&self) -> bool {
        self.missing.is_empty() && self.extra.is_empty()
    }
}

/// Flatten `tree` into dotted paths, prefixing every key with `prefix`.
///
/// ```
/// use serde_json::json;
/// use glossa::core::locale::tree::flatten;
///
/// let flat = flatten(&json!({"menu": {"title": "Menu", "items": ["a", "b"]}}), "");
/// assert_eq!(flat["menu.title"], json!("Menu"));
/// assert_eq!(flat["menu.items"], json!(["a", "b"]));
/// ```
pub fn flatten(tree: &Value, prefix: &str) -> FlatKeys {
    let mut result = FlatKeys::new();
    flatten_into(tree, prefix.to_string(), &mut result);
    result
}

fn flatten_into(value: &Value, prefix: String, result: &mut FlatKeys) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                let path = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{}.{}", prefix, key)
                };
                flatten_into(child, path, result);
            }
        }
        leaf => {
            // A bare leaf at the root has no path to live under.
            if !prefix.is_empty() {
                result.insert(prefix, leaf.clone());
            }
        }
    }
}

/// Rebuild a nested tree from dotted paths.
///
/// Inverse of [`flatten`] for trees without empty objects and without keys
/// containing dots.
pub fn unflatten(flat: &FlatKeys) -> Value {
    let mut root = Map::new();
    for (path, value) in flat {
        insert_path(&mut root, path, value.clone());
    }
    Value::Object(root)
}

fn insert_path(node: &mut Map<String, Value>, path: &str, value: Value) {
    match path.split_once('.') {
        None => {
            node.insert(path.to_string(), value);
        }
        Some((head, rest)) => {
            let child = node
                .entry(head.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            if !child.is_object() {
                *child = Value::Object(Map::new());
            }
            if let Value::Object(child_map) = child {
                insert_path(child_map, rest, value);
            }
        }
    }
}

/// Merge `source` into `target`: objects merge recursively, anything else in
/// `source` overwrites what `target` has at that key.
pub fn deep_merge(target: Value, source: Value) -> Value {
    match (target, source) {
        (Value::Object(mut target_map), Value::Object(source_map)) => {
            for (key, source_value) in source_map {
                let both_objects =
                    source_value.is_object() && target_map.get(&key).is_some_and(Value::is_object);

                if both_objects {
                    if let Some(target_value) = target_map.get_mut(&key) {
                        let current = target_value.take();
                        *target_value = deep_merge(current, source_value);
                    }
                } else {
                    target_map.insert(key, source_value);
                }
            }
            Value::Object(target_map)
        }
        (_, source) => source,
    }
}

/// Set differences between two flattened key sets.
pub fn diff_keys(reference: &FlatKeys, other: &FlatKeys) -> KeyDiff {
    KeyDiff {
        missing: reference
            .keys()
            .filter(|key| !other.contains_key(*key))
            .cloned()
            .collect(),
        extra: other
            .keys()
            .filter(|key| !reference.contains_key(*key))
            .cloned()
            .collect(),
    }
}

/// Keys whose value is the not-translated marker or an empty string.
pub fn untranslated_keys(flat: &FlatKeys) -> BTreeSet<String> {
    flat.iter()
        .filter(|(_, value)| {
            value
                .as_str()
                .is_some_and(|s| s == NOT_TRANSLATED_MARKER || s.trim().is_empty())
        })
        .map(|(key, _)| key.clone())
        .collect()
}
