//! Path resolver: canonical paths and nested data access
//!
//! A path addresses one field inside a nested form-data tree. The canonical
//! string form dot-joins object keys and brackets numeric indices and
//! unique-key tokens: `contacts[0].value`, `contacts[__k3f9x27ab01cd__].value`.
//!
//! All reads are non-panicking (`None` on any miss) and all writes are
//! copy-on-write: the input tree is never mutated.

pub mod unique_key;

use serde_json::Value;
use smallvec::SmallVec;

pub use unique_key::{KeySource, RandomKeySource, generate_unique_key, is_unique_key};

// ============================================================================
// SEGMENTS
// ============================================================================

/// One step of a field path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// Object key.
    Name(String),
    /// Array position.
    Index(usize),
    /// Opaque per-item token (`__[a-z0-9]{13}__`) addressing one item of a
    /// "multiple" group independent of its current position.
    Key(String),
}

impl PathSegment {
    /// Classifies a raw token: all-digits is an index, a unique-key token
    /// is a key, anything else an object name.
    #[must_use]
    pub fn classify(token: &str) -> Self {
        if !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(index) = token.parse::<usize>() {
                return PathSegment::Index(index);
            }
        }
        if is_unique_key(token) {
            return PathSegment::Key(token.to_string());
        }
        PathSegment::Name(token.to_string())
    }

    /// The raw token without any bracket decoration.
    #[must_use]
    pub fn as_token(&self) -> String {
        match self {
            PathSegment::Name(name) | PathSegment::Key(name) => name.clone(),
            PathSegment::Index(index) => index.to_string(),
        }
    }
}

/// A parsed path. Form paths are nearly always shallow, so segments live
/// inline up to depth 8.
pub type FieldPath = SmallVec<[PathSegment; 8]>;

// ============================================================================
// PARSE / PRINT
// ============================================================================

/// Parses a canonical path string into segments.
///
/// Splits on `.` outside brackets; the content of `[...]` is always a
/// single segment regardless of its lexical class. Total for any input:
/// an unterminated bracket consumes to the end of the string.
#[must_use]
pub fn parse_path(path: &str) -> FieldPath {
    let mut segments = FieldPath::new();
    let mut buf = String::new();
    let mut chars = path.chars();

    while let Some(ch) = chars.next() {
        match ch {
            '.' => {
                if !buf.is_empty() {
                    segments.push(PathSegment::classify(&buf));
                    buf.clear();
                }
            }
            '[' => {
                if !buf.is_empty() {
                    segments.push(PathSegment::classify(&buf));
                    buf.clear();
                }
                let mut inner = String::new();
                for ch in chars.by_ref() {
                    if ch == ']' {
                        break;
                    }
                    inner.push(ch);
                }
                segments.push(PathSegment::classify(&inner));
            }
            _ => buf.push(ch),
        }
    }
    if !buf.is_empty() {
        segments.push(PathSegment::classify(&buf));
    }
    segments
}

/// Serializes segments back to the canonical string form.
///
/// The first segment is printed bare; every later index or unique-key
/// segment is bracketed, every later name is dot-joined.
#[must_use]
pub fn path_to_string(segments: &[PathSegment]) -> String {
    let mut out = String::new();
    for (i, segment) in segments.iter().enumerate() {
        if i == 0 {
            out.push_str(&segment.as_token());
            continue;
        }
        match segment {
            PathSegment::Name(name) => {
                out.push('.');
                out.push_str(name);
            }
            PathSegment::Index(index) => {
                out.push('[');
                out.push_str(&index.to_string());
                out.push(']');
            }
            PathSegment::Key(key) => {
                out.push('[');
                out.push_str(key);
                out.push(']');
            }
        }
    }
    out
}

// ============================================================================
// READS
// ============================================================================

/// Looks up a value by segments. Returns `None` as soon as any segment is
/// missing or the current value is not traversable; never panics.
#[must_use]
pub fn get_value<'a>(root: &'a Value, segments: &[PathSegment]) -> Option<&'a Value> {
    let mut current = root;
    for segment in segments {
        current = match (segment, current) {
            (PathSegment::Name(name), Value::Object(map)) => map.get(name)?,
            (PathSegment::Key(key), Value::Object(map)) => map.get(key)?,
            (PathSegment::Index(index), Value::Array(items)) => items.get(*index)?,
            // An object may carry stringified indices (e.g. form data that
            // round-tripped through a map representation).
            (PathSegment::Index(index), Value::Object(map)) => map.get(&index.to_string())?,
            _ => return None,
        };
    }
    Some(current)
}

/// Convenience wrapper over [`get_value`] taking a path string.
#[must_use]
pub fn get_value_by_path<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    get_value(root, &parse_path(path))
}

// ============================================================================
// WRITES
// ============================================================================

/// Sets a value at a path, returning a new tree. The original is untouched.
///
/// Missing intermediate containers are created: an index segment creates an
/// array (padded with nulls up to the index), a name or key segment an
/// object.
#[must_use]
pub fn set_value(root: &Value, segments: &[PathSegment], new_value: Value) -> Value {
    let mut result = root.clone();
    set_in_place(&mut result, segments, new_value);
    result
}

fn set_in_place(slot: &mut Value, segments: &[PathSegment], new_value: Value) {
    let Some((segment, rest)) = segments.split_first() else {
        *slot = new_value;
        return;
    };
    match segment {
        PathSegment::Name(name) | PathSegment::Key(name) => {
            if !slot.is_object() {
                *slot = Value::Object(serde_json::Map::new());
            }
            if let Some(map) = slot.as_object_mut() {
                let entry = map.entry(name.clone()).or_insert(Value::Null);
                set_in_place(entry, rest, new_value);
            }
        }
        PathSegment::Index(index) => {
            // Writing an index into an existing object keeps the map shape
            // with a stringified key, mirroring the read fallback.
            if let Some(map) = slot.as_object_mut() {
                let entry = map.entry(index.to_string()).or_insert(Value::Null);
                set_in_place(entry, rest, new_value);
                return;
            }
            if !slot.is_array() {
                *slot = Value::Array(Vec::new());
            }
            if let Some(items) = slot.as_array_mut() {
                if items.len() <= *index {
                    items.resize(*index + 1, Value::Null);
                }
                set_in_place(&mut items[*index], rest, new_value);
            }
        }
    }
}

/// Removes the entry at a path, returning a new tree. A path that does not
/// resolve is a no-op (the clone of the original is returned unchanged).
/// Container types are preserved: array removal shifts later items down.
#[must_use]
pub fn delete_value(root: &Value, segments: &[PathSegment]) -> Value {
    let mut result = root.clone();
    if segments.is_empty() || get_value(root, segments).is_none() {
        return result;
    }
    delete_in_place(&mut result, segments);
    result
}

fn delete_in_place(slot: &mut Value, segments: &[PathSegment]) {
    let Some((segment, rest)) = segments.split_first() else {
        return;
    };
    if rest.is_empty() {
        match (segment, &mut *slot) {
            (PathSegment::Name(name) | PathSegment::Key(name), Value::Object(map)) => {
                map.shift_remove(name);
            }
            (PathSegment::Index(index), Value::Array(items)) => {
                if *index < items.len() {
                    items.remove(*index);
                }
            }
            (PathSegment::Index(index), Value::Object(map)) => {
                map.shift_remove(&index.to_string());
            }
            _ => {}
        }
        return;
    }
    let next = match (segment, slot) {
        (PathSegment::Name(name) | PathSegment::Key(name), Value::Object(map)) => {
            map.get_mut(name)
        }
        (PathSegment::Index(index), Value::Array(items)) => items.get_mut(*index),
        (PathSegment::Index(index), Value::Object(map)) => map.get_mut(&index.to_string()),
        _ => None,
    };
    if let Some(next) = next {
        delete_in_place(next, rest);
    }
}

// ============================================================================
// RELATIVE PATHS
// ============================================================================

/// Resolves a possibly-relative path parameter against the current field's
/// path.
///
/// A parameter without a leading dot is absolute. Otherwise each leading
/// dot pops one segment from the current field's path (the first dot pops
/// the field itself, landing in the sibling scope) and the remaining
/// non-empty parts are appended: for a field `group.b`, `.a` resolves to
/// `group.a` and `..c` to `c`.
#[must_use]
pub fn resolve_relative(current: &[PathSegment], param: &str) -> FieldPath {
    if !param.starts_with('.') {
        return parse_path(param);
    }
    let dots = param.chars().take_while(|&c| c == '.').count();
    let rest = &param[dots..];
    let keep = current.len().saturating_sub(dots);
    let mut resolved: FieldPath = current[..keep].iter().cloned().collect();
    resolved.extend(parse_path(rest));
    resolved
}

// ============================================================================
// NORMALIZATION
// ============================================================================

/// Recursively rewrites every mapping whose keys are all unique-key tokens
/// into a sequential array, preserving insertion order. Used at the data
/// egress boundary so both "multiple" representations serialize alike.
#[must_use]
pub fn keys_to_indices(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            if !map.is_empty() && map.keys().all(|key| is_unique_key(key)) {
                Value::Array(map.values().map(keys_to_indices).collect())
            } else {
                Value::Object(
                    map.iter()
                        .map(|(key, child)| (key.clone(), keys_to_indices(child)))
                        .collect(),
                )
            }
        }
        Value::Array(items) => Value::Array(items.iter().map(keys_to_indices).collect()),
        other => other.clone(),
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_parse_simple_path() {
        let segments = parse_path("a.b.c");
        assert_eq!(
            segments.as_slice(),
            &[
                PathSegment::Name("a".into()),
                PathSegment::Name("b".into()),
                PathSegment::Name("c".into()),
            ]
        );
    }

    #[test]
    fn test_parse_bracketed_segments() {
        let segments = parse_path("contacts[0].value");
        assert_eq!(
            segments.as_slice(),
            &[
                PathSegment::Name("contacts".into()),
                PathSegment::Index(0),
                PathSegment::Name("value".into()),
            ]
        );
    }

    #[test]
    fn test_parse_unique_key_segment() {
        let segments = parse_path("contacts[__k3f9x27ab01cd__].value");
        assert_eq!(segments[1], PathSegment::Key("__k3f9x27ab01cd__".into()));
    }

    #[test]
    fn test_bracket_content_is_one_segment() {
        // Even a dotted token inside brackets stays one segment.
        let segments = parse_path("a[b.c]");
        assert_eq!(
            segments.as_slice(),
            &[
                PathSegment::Name("a".into()),
                PathSegment::Name("b.c".into()),
            ]
        );
    }

    #[test]
    fn test_round_trip() {
        for path in [
            "a.b[0].c",
            "contacts[__k3f9x27ab01cd__].value",
            "single",
            "a[3][4].b",
        ] {
            assert_eq!(path_to_string(&parse_path(path)), path);
        }
    }

    #[test]
    fn test_dotted_numeric_canonicalizes_to_bracket() {
        assert_eq!(path_to_string(&parse_path("a.0.b")), "a[0].b");
    }

    #[test]
    fn test_get_value() {
        let data = json!({"a": {"b": [{"c": 42}]}});
        assert_eq!(get_value_by_path(&data, "a.b[0].c"), Some(&json!(42)));
        assert_eq!(get_value_by_path(&data, "a.b[1].c"), None);
        assert_eq!(get_value_by_path(&data, "a.x"), None);
        assert_eq!(get_value_by_path(&data, "a.b[0].c.d"), None);
    }

    #[test]
    fn test_get_index_into_object() {
        let data = json!({"items": {"0": "first"}});
        assert_eq!(get_value_by_path(&data, "items[0]"), Some(&json!("first")));
    }

    #[test]
    fn test_set_value_does_not_mutate_original() {
        let original = json!({"a": {"b": 1}});
        let updated = set_value(&original, &parse_path("a.b"), json!(2));
        assert_eq!(original, json!({"a": {"b": 1}}));
        assert_eq!(updated, json!({"a": {"b": 2}}));
    }

    #[test]
    fn test_set_creates_intermediate_containers() {
        let updated = set_value(&json!({}), &parse_path("a.b[1].c"), json!("x"));
        assert_eq!(updated, json!({"a": {"b": [null, {"c": "x"}]}}));
    }

    #[test]
    fn test_set_replaces_scalar_intermediate() {
        let updated = set_value(&json!({"a": 5}), &parse_path("a.b"), json!(1));
        assert_eq!(updated, json!({"a": {"b": 1}}));
    }

    #[test]
    fn test_delete_value() {
        let data = json!({"a": {"b": 1, "c": 2}});
        let updated = delete_value(&data, &parse_path("a.b"));
        assert_eq!(updated, json!({"a": {"c": 2}}));
        assert_eq!(data, json!({"a": {"b": 1, "c": 2}}));
    }

    #[test]
    fn test_delete_array_item_shifts() {
        let data = json!({"items": [1, 2, 3]});
        let updated = delete_value(&data, &parse_path("items[1]"));
        assert_eq!(updated, json!({"items": [1, 3]}));
    }

    #[test]
    fn test_delete_unresolved_is_noop() {
        let data = json!({"a": 1});
        assert_eq!(delete_value(&data, &parse_path("b.c")), data);
    }

    #[test]
    fn test_resolve_relative_sibling() {
        let current = parse_path("group.b");
        assert_eq!(
            path_to_string(&resolve_relative(&current, ".a")),
            "group.a"
        );
        assert_eq!(path_to_string(&resolve_relative(&current, "..c")), "c");
    }

    #[test]
    fn test_resolve_relative_top_level() {
        let current = parse_path("email");
        assert_eq!(
            path_to_string(&resolve_relative(&current, ".confirm")),
            "confirm"
        );
    }

    #[test]
    fn test_resolve_absolute() {
        let current = parse_path("group.b");
        assert_eq!(
            path_to_string(&resolve_relative(&current, "other.field")),
            "other.field"
        );
    }

    #[test]
    fn test_resolve_relative_inside_multiple_item() {
        let current = parse_path("contacts[0].value");
        assert_eq!(
            path_to_string(&resolve_relative(&current, ".kind")),
            "contacts[0].kind"
        );
    }

    #[test]
    fn test_keys_to_indices() {
        let data = json!({
            "contacts": {
                "__aaaaaaaaaaaaa__": {"value": "x"},
                "__bbbbbbbbbbbbb__": {"value": "y"}
            },
            "name": "z"
        });
        assert_eq!(
            keys_to_indices(&data),
            json!({
                "contacts": [{"value": "x"}, {"value": "y"}],
                "name": "z"
            })
        );
    }

    #[test]
    fn test_keys_to_indices_mixed_keys_untouched() {
        let data = json!({"m": {"__aaaaaaaaaaaaa__": 1, "plain": 2}});
        assert_eq!(keys_to_indices(&data), data);
    }
}
