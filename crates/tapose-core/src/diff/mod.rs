//! Structural comparison of two document trees.
//!
//! The engine walks the union of keys at every level and classifies each
//! one. Containers of matching kind are recursed into; arrays are compared
//! index by index with no attempt at element matching.

mod list;
mod object;
mod primitives;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

use crate::{document, CompareError, Format, Side};

/// Classification of a single key relative to both inputs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiffKind {
    /// Present on both sides with equal values.
    Unchanged,
    /// Present only on the right side.
    Added,
    /// Present only on the left side.
    Removed,
    /// Present on both sides with differing values, or a container with at
    /// least one differing descendant.
    Changed,
}

/// Comparison result for one key or array index.
///
/// ```
/// # use tapose_core::{diff::diff, DiffKind};
/// # use serde_json::json;
/// let left = json!({"a": 1});
/// let right = json!({"a": 2});
/// let nodes = diff(left.as_object(), right.as_object());
/// assert_eq!(nodes[0].kind, DiffKind::Changed);
/// assert_eq!(nodes[0].value_left, Some(json!(1)));
/// assert_eq!(nodes[0].value_right, Some(json!(2)));
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DiffNode {
    /// Property name, or the array index in decimal.
    pub key: String,
    /// How this key differs between the inputs.
    pub kind: DiffKind,
    /// The left value; absent for added keys.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_left: Option<JsonValue>,
    /// The right value; absent for removed keys.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_right: Option<JsonValue>,
    /// Per-key results when both values are containers of the same kind.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<DiffNode>>,
    /// Full key chain from the root.
    #[serde(default)]
    pub path: Vec<String>,
}

impl DiffNode {
    /// Returns `true` when the node has at least one child.
    ///
    /// Empty containers are recursed into as well but report `false`.
    #[must_use]
    pub fn has_children(&self) -> bool {
        self.children.as_ref().is_some_and(|children| !children.is_empty())
    }

    /// Returns `true` unless the node and every descendant are unchanged.
    #[must_use]
    pub fn is_different(&self) -> bool {
        self.kind != DiffKind::Unchanged
    }
}

/// Leaf-level tallies over a diff tree.
///
/// Containers that were recursed into are not counted themselves; their
/// descendants are.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffStats {
    /// Keys only present on the right.
    pub added: usize,
    /// Keys only present on the left.
    pub removed: usize,
    /// Leaves whose value changed, including type mismatches.
    pub changed: usize,
    /// Leaves that are identical on both sides.
    pub unchanged: usize,
}

impl DiffStats {
    /// Tallies every leaf in `nodes`.
    ///
    /// ```
    /// # use tapose_core::{compare, DiffStats, Format};
    /// let nodes = compare("{\"a\":1,\"b\":2}", "{\"a\":1,\"c\":3}", Format::Json)?;
    /// let stats = DiffStats::from_nodes(&nodes);
    /// assert_eq!((stats.added, stats.removed, stats.unchanged), (1, 1, 1));
    /// # Ok::<(), tapose_core::CompareError>(())
    /// ```
    #[must_use]
    pub fn from_nodes(nodes: &[DiffNode]) -> Self {
        let mut stats = Self::default();
        stats.tally(nodes);
        stats
    }

    fn tally(&mut self, nodes: &[DiffNode]) {
        for node in nodes {
            if let Some(children) = &node.children {
                if !children.is_empty() {
                    self.tally(children);
                    continue;
                }
            }
            match node.kind {
                DiffKind::Unchanged => self.unchanged += 1,
                DiffKind::Added => self.added += 1,
                DiffKind::Removed => self.removed += 1,
                DiffKind::Changed => self.changed += 1,
            }
        }
    }

    /// Number of differing leaves.
    #[must_use]
    pub fn total_changes(&self) -> usize {
        self.added + self.removed + self.changed
    }

    /// Returns `true` when nothing differs.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total_changes() == 0
    }
}

/// Compares two root objects. A missing root is treated as `{}`.
#[must_use]
pub fn diff(
    left: Option<&Map<String, JsonValue>>,
    right: Option<&Map<String, JsonValue>>,
) -> Vec<DiffNode> {
    let empty = Map::new();
    object::diff_objects(left.unwrap_or(&empty), right.unwrap_or(&empty), &[])
}

/// Parses both texts, checks they are objects at the root, and diffs them.
///
/// ```
/// # use tapose_core::{compare, DiffKind, Format};
/// let nodes = compare("{\"a\":1,\"b\":2}", "{\"b\":2}", Format::Json)?;
/// assert_eq!(nodes[0].kind, DiffKind::Removed);
/// assert_eq!(nodes[1].kind, DiffKind::Unchanged);
/// # Ok::<(), tapose_core::CompareError>(())
/// ```
pub fn compare(left: &str, right: &str, format: Format) -> Result<Vec<DiffNode>, CompareError> {
    if left.trim().is_empty() || right.trim().is_empty() {
        return Err(CompareError::BothRequired);
    }

    let left_value = document::parse(left, format)
        .map_err(|source| CompareError::Parse { side: Side::Left, format, source })?;
    let right_value = document::parse(right, format)
        .map_err(|source| CompareError::Parse { side: Side::Right, format, source })?;

    let (Some(left_root), Some(right_root)) =
        (document::as_root_object(&left_value), document::as_root_object(&right_value))
    else {
        return Err(CompareError::RootShape { format });
    };

    let nodes = diff(Some(left_root), Some(right_root));
    tracing::debug!(
        %format,
        top_level = nodes.len(),
        changed = nodes.iter().filter(|node| node.is_different()).count(),
        "compared documents"
    );
    Ok(nodes)
}

fn diff_entry(
    key: String,
    left: Option<&JsonValue>,
    right: Option<&JsonValue>,
    parent: &[String],
) -> DiffNode {
    let mut path = parent.to_vec();
    path.push(key.clone());

    let (lhs, rhs) = match (left, right) {
        (None, None) => {
            unreachable!("diff keys come from the union of both sides")
        }
        (None, Some(rhs)) => {
            return DiffNode {
                key,
                kind: DiffKind::Added,
                value_left: None,
                value_right: Some(rhs.clone()),
                children: None,
                path,
            };
        }
        (Some(lhs), None) => {
            return DiffNode {
                key,
                kind: DiffKind::Removed,
                value_left: Some(lhs.clone()),
                value_right: None,
                children: None,
                path,
            };
        }
        (Some(lhs), Some(rhs)) => (lhs, rhs),
    };

    let children = match (lhs, rhs) {
        (JsonValue::Object(a), JsonValue::Object(b)) => Some(object::diff_objects(a, b, &path)),
        (JsonValue::Array(a), JsonValue::Array(b)) => Some(list::diff_lists(a, b, &path)),
        // Object against array lands here too: reported as one changed leaf.
        _ => None,
    };

    let kind = match &children {
        Some(children) if children.iter().any(DiffNode::is_different) => DiffKind::Changed,
        Some(_) => DiffKind::Unchanged,
        None if primitives::primitives_equal(lhs, rhs) => DiffKind::Unchanged,
        None => DiffKind::Changed,
    };

    DiffNode {
        key,
        kind,
        value_left: Some(lhs.clone()),
        value_right: Some(rhs.clone()),
        children,
        path,
    }
}
