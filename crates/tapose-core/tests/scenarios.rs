use serde_json::json;
use tapose_core::{
    compare, filter, number, process, project, DiffKind, DisplayLine, Format, LineKind,
    ViewOptions,
};

fn texts(lines: &[DisplayLine]) -> Vec<&str> {
    lines.iter().map(|line| line.text.as_str()).collect()
}

#[test]
fn identical_primitive_is_unchanged() {
    let nodes = compare(r#"{"a":1}"#, r#"{"a":1}"#, Format::Json).unwrap();
    assert_eq!(nodes.len(), 1);
    assert_eq!(nodes[0].key, "a");
    assert_eq!(nodes[0].kind, DiffKind::Unchanged);
    assert_eq!(nodes[0].value_left, Some(json!(1)));
}

#[test]
fn changed_primitive_colors_both_sides() {
    let nodes = compare(r#"{"a":1}"#, r#"{"a":2}"#, Format::Json).unwrap();
    assert_eq!(nodes[0].kind, DiffKind::Changed);
    assert_eq!(nodes[0].value_left, Some(json!(1)));
    assert_eq!(nodes[0].value_right, Some(json!(2)));

    let lines = project(&nodes);
    assert_eq!(lines.left[1].text, "\"a\": 1");
    assert_eq!(lines.left[1].kind, LineKind::Removed);
    assert_eq!(lines.right[1].text, "\"a\": 2");
    assert_eq!(lines.right[1].kind, LineKind::Added);
}

#[test]
fn removed_key_leaves_a_placeholder_on_the_right() {
    let nodes = compare(r#"{"a":1,"b":2}"#, r#"{"b":2}"#, Format::Json).unwrap();
    let kinds: Vec<_> = nodes.iter().map(|node| (node.key.as_str(), node.kind)).collect();
    assert_eq!(kinds, [("a", DiffKind::Removed), ("b", DiffKind::Unchanged)]);

    let lines = project(&nodes);
    assert_eq!(texts(&lines.left), ["{", "\"a\": 1,", "\"b\": 2", "}"]);
    assert_eq!(lines.right[1].kind, LineKind::Placeholder);
    assert_eq!(lines.right[2].text, "\"b\": 2");
}

#[test]
fn nested_change_marks_only_the_differing_leaf() {
    let nodes = compare(
        r#"{"nested":{"x":1,"y":2}}"#,
        r#"{"nested":{"x":1,"y":3}}"#,
        Format::Json,
    )
    .unwrap();
    assert_eq!(nodes[0].kind, DiffKind::Changed);
    let children = nodes[0].children.as_ref().unwrap();
    assert_eq!(children[0].kind, DiffKind::Unchanged);
    assert_eq!(children[1].kind, DiffKind::Changed);

    let lines = project(&nodes);
    assert_eq!(lines.left[1].kind, LineKind::Unchanged);
    assert_eq!(lines.left[2].kind, LineKind::Unchanged);
    assert_eq!((lines.left[3].text.as_str(), lines.left[3].kind), ("\"y\": 2", LineKind::Removed));
    assert_eq!((lines.right[3].text.as_str(), lines.right[3].kind), ("\"y\": 3", LineKind::Added));
    assert_eq!(lines.right[4].kind, LineKind::Unchanged);
}

#[test]
fn longer_array_adds_trailing_indices() {
    let nodes = compare(r#"{"arr":[1,2]}"#, r#"{"arr":[1,2,3]}"#, Format::Json).unwrap();
    let children = nodes[0].children.as_ref().unwrap();
    let kinds: Vec<_> = children.iter().map(|node| node.kind).collect();
    assert_eq!(kinds, [DiffKind::Unchanged, DiffKind::Unchanged, DiffKind::Added]);

    let lines = project(&nodes);
    assert_eq!(lines.left[4].kind, LineKind::Placeholder);
    assert_eq!(lines.right[4].text, "\"2\": 3");
}

#[test]
fn context_filter_keeps_one_line_around_a_single_change() {
    // 18 keys project to 20 rows; key `k09` sits on row 10.
    let left: serde_json::Map<_, _> =
        (0..18).map(|idx| (format!("k{idx:02}"), json!(idx))).collect();
    let mut right = left.clone();
    right.insert("k09".to_string(), json!("changed"));
    let lines = project(&compare(
        &serde_json::to_string(&left).unwrap(),
        &serde_json::to_string(&right).unwrap(),
        Format::Json,
    )
    .unwrap());
    assert_eq!(lines.len(), 20);
    assert!(lines.left[10].is_change());

    let filtered = filter(&lines.left, &lines.right, 1);
    let kept: Vec<_> = filtered.left.iter().map(|line| line.original_index).collect();
    assert_eq!(kept, [Some(0), None, Some(9), Some(10), Some(11), None, Some(19)]);
    assert_eq!(filtered.left[1].collapsed.unwrap().count, 8);
    assert_eq!(filtered.left[5].collapsed.unwrap().count, 7);
    assert_eq!(number(&filtered.left), [1, 0, 10, 11, 12, 0, 20]);
}

#[test]
fn type_mismatch_is_a_single_changed_node() {
    let nodes = compare(r#"{"v":[1,2]}"#, r#"{"v":{"a":1}}"#, Format::Json).unwrap();
    assert_eq!(nodes[0].kind, DiffKind::Changed);
    assert!(nodes[0].children.is_none());

    let lines = process(&nodes, &ViewOptions::show_all());
    assert_eq!(lines.left.len(), 3);
    assert_eq!(lines.left[1].text, "\"v\": [ 1, 2 ]");
    assert_eq!(lines.left[1].kind, LineKind::Removed);
    assert_eq!(lines.right[1].text, "\"v\": { \"a\": 1 }");
    assert_eq!(lines.right[1].kind, LineKind::Added);
    assert_eq!(lines.left_numbers, [1, 2, 3]);
}

#[test]
fn added_and_removed_are_symmetric() {
    let a = r#"{"keep":true,"only":{"deep":[1,{"x":null}]}}"#;
    let b = r#"{"keep":true}"#;
    let forward = compare(a, b, Format::Json).unwrap();
    let backward = compare(b, a, Format::Json).unwrap();
    assert_eq!(forward[1].kind, DiffKind::Removed);
    assert_eq!(backward[1].kind, DiffKind::Added);

    let forward_lines = project(&forward);
    let backward_lines = project(&backward);
    assert_eq!(texts(&forward_lines.left), texts(&backward_lines.right));
    assert_eq!(texts(&forward_lines.right), texts(&backward_lines.left));
}

#[test]
fn yaml_and_json_inputs_diff_alike() {
    let json_nodes = compare(r#"{"a":1,"b":[true]}"#, r#"{"a":2,"b":[true]}"#, Format::Json).unwrap();
    let yaml_nodes = compare("a: 1\nb:\n  - true\n", "a: 2\nb: [true]\n", Format::Yaml).unwrap();
    assert_eq!(json_nodes, yaml_nodes);
}

#[test]
fn integer_and_float_forms_are_equal() {
    let nodes = compare(r#"{"n":1}"#, r#"{"n":1.0}"#, Format::Json).unwrap();
    assert_eq!(nodes[0].kind, DiffKind::Unchanged);
}
