use serde_json::{Map, Value as JsonValue};

use super::{diff_entry, DiffNode};

// Left keys in their own order, then keys only the right side has.
pub(super) fn diff_objects(
    lhs: &Map<String, JsonValue>,
    rhs: &Map<String, JsonValue>,
    path: &[String],
) -> Vec<DiffNode> {
    let mut nodes = Vec::with_capacity(lhs.len().max(rhs.len()));

    for (key, value) in lhs {
        nodes.push(diff_entry(key.clone(), Some(value), rhs.get(key), path));
    }

    for (key, value) in rhs {
        if lhs.contains_key(key) {
            continue;
        }
        nodes.push(diff_entry(key.clone(), None, Some(value), path));
    }

    nodes
}
