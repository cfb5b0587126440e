use serde_json::Value as JsonValue;

use crate::number::numbers_equal;

// Only reached when at least one side is not a container, or the container
// kinds differ. Mixed kinds are never equal.
pub(super) fn primitives_equal(lhs: &JsonValue, rhs: &JsonValue) -> bool {
    match (lhs, rhs) {
        (JsonValue::Null, JsonValue::Null) => true,
        (JsonValue::Bool(a), JsonValue::Bool(b)) => a == b,
        (JsonValue::Number(a), JsonValue::Number(b)) => numbers_equal(a, b),
        (JsonValue::String(a), JsonValue::String(b)) => a == b,
        _ => false,
    }
}
