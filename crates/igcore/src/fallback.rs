//! Ordered-fallback field access over untyped upstream JSON.
//!
//! Every projection in the normalizers is a list of JSON pointers tried in
//! order; the first path that resolves to a non-null value wins. Missing
//! parents, nulls and out-of-range indices all resolve to `None`.
//!
//! Type conversion happens after the winner is chosen: a present value of the
//! wrong type yields `None` rather than falling through to a later path.

use serde_json::Value;

/// First non-null value among `paths`.
pub fn first_present<'a>(node: &'a Value, paths: &[&str]) -> Option<&'a Value> {
    paths
        .iter()
        .filter_map(|path| node.pointer(path))
        .find(|value| !value.is_null())
}

/// Owned copy of the first present sub-tree.
pub fn first_value(node: &Value, paths: &[&str]) -> Option<Value> {
    first_present(node, paths).cloned()
}

pub fn first_str(node: &Value, paths: &[&str]) -> Option<String> {
    first_present(node, paths)
        .and_then(Value::as_str)
        .map(str::to_owned)
}

pub fn first_bool(node: &Value, paths: &[&str]) -> Option<bool> {
    first_present(node, paths).and_then(Value::as_bool)
}

pub fn first_u64(node: &Value, paths: &[&str]) -> Option<u64> {
    first_present(node, paths).and_then(Value::as_u64)
}

pub fn first_i64(node: &Value, paths: &[&str]) -> Option<i64> {
    first_present(node, paths).and_then(Value::as_i64)
}

pub fn first_f64(node: &Value, paths: &[&str]) -> Option<f64> {
    first_present(node, paths).and_then(Value::as_f64)
}
