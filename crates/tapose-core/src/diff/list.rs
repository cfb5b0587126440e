use serde_json::Value as JsonValue;

use super::{diff_entry, DiffNode};

// Positional: element `i` is only ever compared with element `i`. An insert
// at the front shows up as every following index changing.
pub(super) fn diff_lists(lhs: &[JsonValue], rhs: &[JsonValue], path: &[String]) -> Vec<DiffNode> {
    let len = lhs.len().max(rhs.len());
    (0..len)
        .map(|index| diff_entry(index.to_string(), lhs.get(index), rhs.get(index), path))
        .collect()
}
