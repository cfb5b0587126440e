use serde_json::Value as JsonValue;

use super::{BracketRole, DisplayLine, LineKind, SideBySide};
use crate::value::{render_key, render_value};
use crate::{DiffKind, DiffNode};

static NULL: JsonValue = JsonValue::Null;

/// Expands a diff tree into two aligned line sequences wrapped in root
/// braces.
///
/// Containers that were recursed into keep unchanged brackets; only the
/// differing leaves below them are marked. Added and removed values are
/// spelled out line by line, with placeholders on the opposite side so both
/// sequences stay the same length. A changed leaf takes exactly one row, with
/// containers in their compact single-line form.
///
/// ```
/// # use tapose_core::{compare, project, Format, LineKind};
/// let nodes = compare("{\"a\":1,\"b\":2}", "{\"b\":2}", Format::Json)?;
/// let lines = project(&nodes);
/// assert_eq!(lines.left[1].text, "\"a\": 1,");
/// assert_eq!(lines.right[1].kind, LineKind::Placeholder);
/// assert_eq!(lines.right[2].text, "\"b\": 2");
/// # Ok::<(), tapose_core::CompareError>(())
/// ```
#[must_use]
pub fn project(nodes: &[DiffNode]) -> SideBySide {
    let mut out = SideBySide::default();
    out.push_both(DisplayLine::new("{", LineKind::Header, 0).with_bracket(BracketRole::Opening));
    project_nodes(nodes, 1, &mut out);
    out.push_both(DisplayLine::new("}", LineKind::Header, 0).with_bracket(BracketRole::Closing));
    out
}

fn project_nodes(nodes: &[DiffNode], indent: usize, out: &mut SideBySide) {
    let last = nodes.len().saturating_sub(1);
    for (idx, node) in nodes.iter().enumerate() {
        project_node(node, indent, trailing_comma(idx == last), out);
    }
}

fn project_node(node: &DiffNode, indent: usize, comma: &str, out: &mut SideBySide) {
    match node.kind {
        DiffKind::Unchanged | DiffKind::Changed if node.has_children() => {
            project_container(node, indent, comma, out);
        }
        DiffKind::Unchanged => {
            let value = node.value_left.as_ref().or(node.value_right.as_ref());
            let text = format!(
                "{}: {}{comma}",
                render_key(&node.key),
                value.map(render_value).unwrap_or_default()
            );
            out.push_both(DisplayLine::new(text, LineKind::Unchanged, indent));
        }
        DiffKind::Added => {
            let added = expand(node, node.value_right.as_ref(), indent, comma, LineKind::Added);
            out.left.extend(placeholders_for(&added));
            out.right.extend(added);
        }
        DiffKind::Removed => {
            let removed = expand(node, node.value_left.as_ref(), indent, comma, LineKind::Removed);
            out.right.extend(placeholders_for(&removed));
            out.left.extend(removed);
        }
        DiffKind::Changed => {
            let key = render_key(&node.key);
            let side = |value: Option<&JsonValue>, kind| {
                let text = format!("{key}: {}{comma}", render_value(value.unwrap_or(&NULL)));
                DisplayLine::new(text, kind, indent)
            };
            out.left.push(side(node.value_left.as_ref(), LineKind::Removed));
            out.right.push(side(node.value_right.as_ref(), LineKind::Added));
        }
    }
}

fn project_container(node: &DiffNode, indent: usize, comma: &str, out: &mut SideBySide) {
    let key = render_key(&node.key);
    let left = node.value_left.as_ref().or(node.value_right.as_ref());
    let right = node.value_right.as_ref().or(node.value_left.as_ref());

    out.left.push(opening_line(&key, left, indent));
    out.right.push(opening_line(&key, right, indent));

    if let Some(children) = &node.children {
        project_nodes(children, indent + 1, out);
    }

    out.left.push(closing_line(left, indent, comma));
    out.right.push(closing_line(right, indent, comma));
}

fn opening_line(key: &str, value: Option<&JsonValue>, indent: usize) -> DisplayLine {
    let bracket = if matches!(value, Some(JsonValue::Array(_))) { "[" } else { "{" };
    DisplayLine::new(format!("{key}: {bracket}"), LineKind::Unchanged, indent)
        .with_bracket(BracketRole::Opening)
}

fn closing_line(value: Option<&JsonValue>, indent: usize, comma: &str) -> DisplayLine {
    let bracket = if matches!(value, Some(JsonValue::Array(_))) { "]" } else { "}" };
    DisplayLine::new(format!("{bracket}{comma}"), LineKind::Unchanged, indent)
        .with_bracket(BracketRole::Closing)
}

fn expand(
    node: &DiffNode,
    value: Option<&JsonValue>,
    indent: usize,
    comma: &str,
    kind: LineKind,
) -> Vec<DisplayLine> {
    let mut lines = Vec::new();
    expand_entry(&node.key, value.unwrap_or(&NULL), indent, comma, kind, &mut lines);
    lines
}

// Writes `"key": value` for one side, spreading non-empty containers over
// one line per entry. Every emitted line carries `kind`.
fn expand_entry(
    key: &str,
    value: &JsonValue,
    indent: usize,
    comma: &str,
    kind: LineKind,
    lines: &mut Vec<DisplayLine>,
) {
    let key = render_key(key);
    match value {
        JsonValue::Object(map) if !map.is_empty() => {
            lines.push(
                DisplayLine::new(format!("{key}: {{"), kind, indent)
                    .with_bracket(BracketRole::Opening),
            );
            let last = map.len() - 1;
            for (idx, (child_key, child)) in map.iter().enumerate() {
                let comma = trailing_comma(idx == last);
                expand_entry(child_key, child, indent + 1, comma, kind, lines);
            }
            lines.push(
                DisplayLine::new(format!("}}{comma}"), kind, indent)
                    .with_bracket(BracketRole::Closing),
            );
        }
        JsonValue::Array(items) if !items.is_empty() => {
            lines.push(
                DisplayLine::new(format!("{key}: ["), kind, indent)
                    .with_bracket(BracketRole::Opening),
            );
            let last = items.len() - 1;
            for (idx, child) in items.iter().enumerate() {
                let comma = trailing_comma(idx == last);
                expand_entry(&idx.to_string(), child, indent + 1, comma, kind, lines);
            }
            lines.push(
                DisplayLine::new(format!("]{comma}"), kind, indent)
                    .with_bracket(BracketRole::Closing),
            );
        }
        _ => {
            let text = format!("{key}: {}{comma}", render_value(value));
            lines.push(DisplayLine::new(text, kind, indent));
        }
    }
}

fn placeholders_for(lines: &[DisplayLine]) -> impl Iterator<Item = DisplayLine> + '_ {
    lines.iter().map(|line| DisplayLine::placeholder(line.indent))
}

fn trailing_comma(is_last: bool) -> &'static str {
    if is_last {
        ""
    } else {
        ","
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::diff;
    use proptest::prelude::*;
    use serde_json::json;

    fn project_values(left: JsonValue, right: JsonValue) -> SideBySide {
        project(&diff(left.as_object(), right.as_object()))
    }

    fn texts(lines: &[DisplayLine]) -> Vec<&str> {
        lines.iter().map(|line| line.text.as_str()).collect()
    }

    fn kinds(lines: &[DisplayLine]) -> Vec<LineKind> {
        lines.iter().map(|line| line.kind).collect()
    }

    #[test]
    fn empty_documents_project_to_root_braces() {
        let lines = project(&[]);
        assert_eq!(texts(&lines.left), ["{", "}"]);
        assert_eq!(lines.left, lines.right);
        assert_eq!(lines.left[0].bracket, Some(BracketRole::Opening));
        assert_eq!(lines.left[1].bracket, Some(BracketRole::Closing));
    }

    #[test]
    fn changed_leaf_is_removed_left_and_added_right() {
        let lines = project_values(json!({"a": 1}), json!({"a": 2}));
        assert_eq!(texts(&lines.left), ["{", "\"a\": 1", "}"]);
        assert_eq!(texts(&lines.right), ["{", "\"a\": 2", "}"]);
        assert_eq!(lines.left[1].kind, LineKind::Removed);
        assert_eq!(lines.right[1].kind, LineKind::Added);
        assert_eq!(lines.left[1].indent, 1);
    }

    #[test]
    fn nested_change_keeps_container_brackets_unchanged() {
        let lines = project_values(
            json!({"nested": {"x": 1, "y": 2}}),
            json!({"nested": {"x": 1, "y": 3}}),
        );
        assert_eq!(texts(&lines.left), ["{", "\"nested\": {", "\"x\": 1,", "\"y\": 2", "}", "}"]);
        assert_eq!(
            kinds(&lines.left),
            [
                LineKind::Header,
                LineKind::Unchanged,
                LineKind::Unchanged,
                LineKind::Removed,
                LineKind::Unchanged,
                LineKind::Header
            ]
        );
        assert_eq!(lines.right[3].kind, LineKind::Added);
        assert_eq!(lines.right[3].text, "\"y\": 3");
        assert_eq!(lines.left[2].indent, 2);
    }

    #[test]
    fn appended_array_element_gets_a_placeholder() {
        let lines = project_values(json!({"arr": [1, 2]}), json!({"arr": [1, 2, 3]}));
        assert_eq!(
            texts(&lines.right),
            ["{", "\"arr\": [", "\"0\": 1,", "\"1\": 2,", "\"2\": 3", "]", "}"]
        );
        assert_eq!(lines.left[4].kind, LineKind::Placeholder);
        assert_eq!(lines.right[4].kind, LineKind::Added);
        // Commas follow sibling position, not visibility.
        assert_eq!(lines.left[3].text, "\"1\": 2,");
    }

    #[test]
    fn added_container_expands_every_nested_line() {
        let lines = project_values(json!({}), json!({"cfg": {"a": [true], "b": {}}}));
        assert_eq!(
            texts(&lines.right),
            ["{", "\"cfg\": {", "\"a\": [", "\"0\": true", "],", "\"b\": {}", "}", "}"]
        );
        assert!(lines.right[1..7].iter().all(|line| line.kind == LineKind::Added));
        assert!(lines.left[1..7].iter().all(|line| line.kind == LineKind::Placeholder));
        let indents: Vec<_> = lines.left.iter().map(|line| line.indent).collect();
        assert_eq!(indents, [0, 1, 2, 3, 2, 2, 1, 0]);
    }

    #[test]
    fn removed_entries_mirror_added_ones() {
        let lines = project_values(json!({"gone": [1, 2]}), json!({}));
        assert_eq!(texts(&lines.left), ["{", "\"gone\": [", "\"0\": 1,", "\"1\": 2", "]", "}"]);
        assert!(lines.right[1..5].iter().all(|line| line.kind == LineKind::Placeholder));
    }

    #[test]
    fn type_mismatch_stays_on_one_row() {
        let lines = project_values(json!({"v": [1, 2], "w": 0}), json!({"v": {"a": 1}, "w": 0}));
        assert_eq!(texts(&lines.left), ["{", "\"v\": [ 1, 2 ],", "\"w\": 0", "}"]);
        assert_eq!(texts(&lines.right), ["{", "\"v\": { \"a\": 1 },", "\"w\": 0", "}"]);
        assert_eq!(lines.left[1].kind, LineKind::Removed);
        assert_eq!(lines.right[1].kind, LineKind::Added);
        assert_eq!(lines.left[1].bracket, None);
    }

    #[test]
    fn null_replaced_by_object_is_a_single_row() {
        let lines = project_values(json!({"v": null}), json!({"v": {"a": [true]}}));
        assert_eq!(texts(&lines.left), ["{", "\"v\": null", "}"]);
        assert_eq!(texts(&lines.right), ["{", "\"v\": { \"a\": [ true ] }", "}"]);
    }

    #[test]
    fn empty_containers_render_inline() {
        let lines = project_values(json!({"o": {}, "a": []}), json!({"o": {}, "a": []}));
        assert_eq!(texts(&lines.left), ["{", "\"o\": {},", "\"a\": []", "}"]);
    }

    #[test]
    fn keys_are_escaped() {
        let lines = project_values(json!({"line\nbreak": 1}), json!({"line\nbreak": 1}));
        assert_eq!(lines.left[1].text, "\"line\\nbreak\": 1");
    }

    fn arb_object() -> impl Strategy<Value = JsonValue> {
        use proptest::{collection::vec, string::string_regex};

        let leaf = prop_oneof![
            Just(JsonValue::Null),
            any::<bool>().prop_map(JsonValue::Bool),
            (0i64..4).prop_map(JsonValue::from),
            string_regex("[ab]{0,2}").unwrap().prop_map(JsonValue::String),
        ];
        let value = leaf.prop_recursive(3, 24, 3, move |inner| {
            prop_oneof![
                vec(inner.clone(), 0..3).prop_map(JsonValue::Array),
                vec((string_regex("[a-c]").unwrap(), inner), 0..3)
                    .prop_map(|entries| JsonValue::Object(entries.into_iter().collect())),
            ]
        });
        vec((string_regex("[a-d]").unwrap(), value), 0..5)
            .prop_map(|entries| JsonValue::Object(entries.into_iter().collect()))
    }

    proptest! {
        #[test]
        fn both_sides_have_the_same_number_of_rows(left in arb_object(), right in arb_object()) {
            let lines = project_values(left, right);
            prop_assert_eq!(lines.left.len(), lines.right.len());
        }

        #[test]
        fn identical_documents_project_identically(doc in arb_object()) {
            let lines = project_values(doc.clone(), doc);
            prop_assert_eq!(&lines.left, &lines.right);
            prop_assert!(lines.left.iter().all(|line| !line.is_change()));
        }
    }
}
