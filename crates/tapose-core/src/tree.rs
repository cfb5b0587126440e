//! Expand/collapse outline of a single document.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::number::render_number;
use crate::value::{indent, render_value};

/// Nesting depth below which nodes start out expanded.
pub const AUTO_EXPAND_DEPTH: usize = 2;

/// Type tag shown next to each node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    /// `null`.
    Null,
    /// `true` or `false`.
    Boolean,
    /// Any number.
    Number,
    /// Any string.
    String,
    /// An ordered list.
    Array,
    /// A keyed map.
    Object,
}

impl ValueType {
    /// Classifies a value.
    #[must_use]
    pub fn of(value: &JsonValue) -> Self {
        match value {
            JsonValue::Null => Self::Null,
            JsonValue::Bool(_) => Self::Boolean,
            JsonValue::Number(_) => Self::Number,
            JsonValue::String(_) => Self::String,
            JsonValue::Array(_) => Self::Array,
            JsonValue::Object(_) => Self::Object,
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueType::Null => "null",
            ValueType::Boolean => "boolean",
            ValueType::Number => "number",
            ValueType::String => "string",
            ValueType::Array => "array",
            ValueType::Object => "object",
        };
        f.write_str(name)
    }
}

/// One entry in the outline.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeNode {
    /// Property name or array index; `None` for the root.
    pub key: Option<String>,
    /// Type tag of the value.
    pub value_type: ValueType,
    /// Inline summary: the scalar itself, or `[n]` / `{n}` for containers.
    pub summary: String,
    /// `true` for containers with at least one entry.
    pub expandable: bool,
    /// Whether the children are shown.
    pub expanded: bool,
    /// Distance from the root.
    pub depth: usize,
    /// Entries of a container, built whether or not they are shown.
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    /// Flips the expanded state of an expandable node.
    pub fn toggle(&mut self) {
        if self.expandable {
            self.expanded = !self.expanded;
        }
    }

    /// Expands or collapses this node and every descendant.
    pub fn set_expanded_all(&mut self, expanded: bool) {
        self.expanded = expanded;
        for child in &mut self.children {
            child.set_expanded_all(expanded);
        }
    }

    /// Follows a chain of keys from this node.
    #[must_use]
    pub fn find_mut(&mut self, path: &[&str]) -> Option<&mut TreeNode> {
        let Some((first, rest)) = path.split_first() else {
            return Some(self);
        };
        self.children
            .iter_mut()
            .find(|child| child.key.as_deref() == Some(*first))
            .and_then(|child| child.find_mut(rest))
    }
}

/// Builds the outline for `value`.
///
/// With `expand_all` unset, the first two levels start expanded.
///
/// ```
/// # use tapose_core::{build_tree, ValueType};
/// # use serde_json::json;
/// let tree = build_tree(&json!({"tags": ["a", "b", "c"], "ok": true}), None);
/// assert_eq!(tree.summary, "{2}");
/// assert_eq!(tree.children[0].summary, "[3]");
/// assert_eq!(tree.children[1].value_type, ValueType::Boolean);
/// assert!(tree.children[0].expanded);
/// ```
#[must_use]
pub fn build_tree(value: &JsonValue, expand_all: Option<bool>) -> TreeNode {
    build_node(None, value, 0, expand_all)
}

fn build_node(key: Option<String>, value: &JsonValue, depth: usize, expand_all: Option<bool>) -> TreeNode {
    let children: Vec<TreeNode> = match value {
        JsonValue::Array(items) => items
            .iter()
            .enumerate()
            .map(|(idx, item)| build_node(Some(idx.to_string()), item, depth + 1, expand_all))
            .collect(),
        JsonValue::Object(map) => map
            .iter()
            .map(|(name, item)| build_node(Some(name.clone()), item, depth + 1, expand_all))
            .collect(),
        _ => Vec::new(),
    };

    TreeNode {
        key,
        value_type: ValueType::of(value),
        summary: summarize(value),
        expandable: !children.is_empty(),
        expanded: expand_all.unwrap_or(depth < AUTO_EXPAND_DEPTH),
        depth,
        children,
    }
}

fn summarize(value: &JsonValue) -> String {
    match value {
        JsonValue::Null => "null".to_string(),
        JsonValue::Bool(b) => b.to_string(),
        JsonValue::Number(n) => render_number(n),
        JsonValue::String(s) => format!("\"{s}\""),
        JsonValue::Array(items) => format!("[{}]", items.len()),
        JsonValue::Object(map) => format!("{{{}}}", map.len()),
    }
}

/// Draws the outline as indented text, descending only into expanded nodes.
///
/// ```
/// # use tapose_core::{build_tree, render_tree};
/// # use serde_json::json;
/// let tree = build_tree(&json!({"user": {"name": "kim"}, "n": 1}), None);
/// assert_eq!(render_tree(&tree), "▼ {2}\n  ▼ user: {1}\n      name: \"kim\"\n    n: 1\n");
/// ```
#[must_use]
pub fn render_tree(root: &TreeNode) -> String {
    let mut out = String::new();
    write_node(&mut out, root);
    out
}

fn write_node(out: &mut String, node: &TreeNode) {
    out.push_str(&indent(node.depth));
    out.push_str(match (node.expandable, node.expanded) {
        (true, true) => "▼ ",
        (true, false) => "▶ ",
        (false, _) => "  ",
    });
    if let Some(key) = &node.key {
        out.push_str(key);
        out.push_str(": ");
    }
    match node.value_type {
        ValueType::String => out.push_str(&escaped_summary(&node.summary)),
        _ => out.push_str(&node.summary),
    }
    out.push('\n');

    if node.expandable && node.expanded {
        for child in &node.children {
            write_node(out, child);
        }
    }
}

// String summaries stay raw on the node; the text outline escapes them so
// one node is one line.
fn escaped_summary(summary: &str) -> String {
    summary
        .strip_prefix('"')
        .and_then(|inner| inner.strip_suffix('"'))
        .map_or_else(
            || summary.to_string(),
            |inner| render_value(&JsonValue::String(inner.to_string())),
        )
}
