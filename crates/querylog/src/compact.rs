//! Structural compaction of JSON values for log output.
//!
//! Large arrays keep their first `max_array_length` elements, large objects
//! their first `max_object_keys` properties, and long strings their first
//! `max_string_length` characters. Anything nested deeper than
//! [`MAX_DEPTH`] levels is replaced by a short summary.

use serde_json::{Map, Value};

/// Nesting depth below which values are summarised instead of rendered.
pub const MAX_DEPTH: usize = 3;

/// Bounds applied by [`compact_value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompactLimits {
    /// Strings longer than this (in chars) are cut and suffixed with `...`.
    pub max_string_length: usize,
    /// Arrays keep at most this many elements.
    pub max_array_length: usize,
    /// Objects keep at most this many properties.
    pub max_object_keys: usize,
}

/// Return a copy of `value` bounded by `limits`.
///
/// Dropped array elements are reported by a trailing
/// `"[...N more items...]"` element; dropped properties by a `"..."` key
/// holding `"[...N more properties...]"`.
pub fn compact_value(value: &Value, limits: &CompactLimits) -> Value {
    compact_at(value, limits, 0)
}

fn compact_at(value: &Value, limits: &CompactLimits, depth: usize) -> Value {
    match value {
        Value::String(s) => Value::String(truncate_chars(s, limits.max_string_length)),
        Value::Array(items) => {
            if depth >= MAX_DEPTH {
                return Value::String(format!("[Array({})]", items.len()));
            }
            let mut out: Vec<Value> = items
                .iter()
                .take(limits.max_array_length)
                .map(|item| compact_at(item, limits, depth + 1))
                .collect();
            if items.len() > limits.max_array_length {
                let hidden = items.len() - limits.max_array_length;
                out.push(Value::String(format!("[...{hidden} more items...]")));
            }
            Value::Array(out)
        }
        Value::Object(map) => {
            if depth >= MAX_DEPTH {
                return Value::String(format!("[Object({} keys)]", map.len()));
            }
            let mut out: Map<String, Value> = map
                .iter()
                .take(limits.max_object_keys)
                .map(|(key, item)| (key.clone(), compact_at(item, limits, depth + 1)))
                .collect();
            if map.len() > limits.max_object_keys {
                let hidden = map.len() - limits.max_object_keys;
                out.insert(
                    "...".to_string(),
                    Value::String(format!("[...{hidden} more properties...]")),
                );
            }
            Value::Object(out)
        }
        other => other.clone(),
    }
}

/// Cut `s` to `max_chars` characters, appending `...` when anything was dropped.
pub(crate) fn truncate_chars(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((end, _)) => format!("{}...", &s[..end]),
        None => s.to_string(),
    }
}
