//! Dotted key-path resolution over JSON trees.
//!
//! Event names are themselves dotted strings (`task.complete`), so a naive
//! split on `.` would mis-address `sound.events.task.complete`. Resolution is
//! greedy-then-backtracking: the shortest key consumption is tried first, and
//! where that interpretation does not exist in the tree, progressively longer
//! literal segments are tried before giving up.

use super::schema::META_KEY;
use serde_json::{Map, Value};

/// A dotted path resolved against a concrete tree.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedPath<'a> {
    /// The literal key segments actually matched, in order. Segments may
    /// contain dots (`["sound", "events", "task.complete"]`).
    pub segments: Vec<String>,
    /// The value found at the end of the path.
    pub value: &'a Value,
}

/// Resolve `dotted` against `root`.
///
/// Returns `None` when no interpretation of the path exists in the tree.
pub fn resolve_path<'a>(root: &'a Value, dotted: &str) -> Option<ResolvedPath<'a>> {
    let parts: Vec<&str> = dotted.split('.').collect();
    let mut segments = Vec::new();
    let mut cur = root;
    let mut i = 0;

    while i < parts.len() {
        let map = cur.as_object()?;
        if let Some(next) = map.get(parts[i]) {
            segments.push(parts[i].to_string());
            cur = next;
            i += 1;
            continue;
        }

        // Backtrack: try longer literal segments ("task.complete" as one key).
        let mut matched = false;
        for j in (i + 2)..=parts.len() {
            let candidate = parts[i..j].join(".");
            if let Some(next) = map.get(&candidate) {
                segments.push(candidate);
                cur = next;
                i = j;
                matched = true;
                break;
            }
        }
        if !matched {
            return None;
        }
    }

    Some(ResolvedPath { segments, value: cur })
}

/// All dotted leaf paths of `root`, `_meta` excluded, sorted.
///
/// Used to report the full set of valid keys on an `invalid_key` error.
pub fn collect_leaf_keys(root: &Value) -> Vec<String> {
    let mut keys = Vec::new();
    collect_into(root, "", &mut keys);
    keys.sort();
    keys
}

fn collect_into(value: &Value, prefix: &str, out: &mut Vec<String>) {
    match value.as_object() {
        Some(map) => {
            for (key, child) in map {
                if prefix.is_empty() && key == META_KEY {
                    continue;
                }
                let full = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}.{key}")
                };
                if child.is_object() {
                    collect_into(child, &full, out);
                } else {
                    out.push(full);
                }
            }
        }
        None => {
            if !prefix.is_empty() {
                out.push(prefix.to_string());
            }
        }
    }
}

/// Coerce a raw CLI string into a typed JSON value.
///
/// `"true"`/`"false"` become booleans, numeric strings become numbers
/// (integers stay integral), everything else stays a string.
pub fn coerce_value(raw: &str) -> Value {
    match raw {
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        _ => {
            if let Ok(i) = raw.parse::<i64>() {
                return Value::from(i);
            }
            if let Ok(f) = raw.parse::<f64>() {
                if f.is_finite() {
                    return Value::from(f);
                }
            }
            Value::String(raw.to_string())
        }
    }
}

/// Set `value` at `segments` inside `doc`, creating intermediate objects as
/// needed. Segments are literal keys (dots inside a segment are not split).
pub fn set_at_path(doc: &mut Value, segments: &[String], value: Value) {
    let Some((last, parents)) = segments.split_last() else {
        return;
    };

    if !doc.is_object() {
        *doc = Value::Object(Map::new());
    }
    let mut cur = doc;
    for seg in parents {
        let Some(map) = cur.as_object_mut() else {
            return;
        };
        let entry = map
            .entry(seg.clone())
            .or_insert_with(|| Value::Object(Map::new()));
        if !entry.is_object() {
            *entry = Value::Object(Map::new());
        }
        cur = entry;
    }
    if let Some(map) = cur.as_object_mut() {
        map.insert(last.clone(), value);
    }
}
