//! Tests for the preorder tree flattener.
mod common;
use common::*;
use tasksheet::prelude::*;

#[test]
fn test_one_row_per_node_in_preorder() {
    let root = create_nested_tree();
    let flattened = flatten(&root);

    let (groups, steps) = count_nodes(&root);
    assert_eq!(flattened.len(), groups + steps);

    let names: Vec<_> = flattened.rows.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, ["A", "a1", "B", "b1", "C", "c1", "D", "e1"]);
}

#[test]
fn test_depth_increments_per_level() {
    let flattened = flatten(&create_nested_tree());
    let depths: Vec<_> = flattened.rows.iter().map(|r| r.depth).collect();
    assert_eq!(depths, [0, 1, 1, 2, 2, 3, 0, 0]);
}

#[test]
fn test_base_depth_shifts_every_row() {
    let root = create_nested_tree();
    let plain = flatten(&root);
    let shifted = flatten_with(&root, FlattenOptions { base_depth: 1 });
    for (a, b) in plain.rows.iter().zip(&shifted.rows) {
        assert_eq!(a.depth + 1, b.depth);
    }
}

#[test]
fn test_disabled_propagates_downward() {
    let flattened = flatten(&create_nested_tree());
    let disabled: Vec<_> = flattened
        .rows
        .iter()
        .map(|r| (r.name.as_str(), r.disabled))
        .collect();
    assert_eq!(
        disabled,
        [
            ("A", false),
            ("a1", false),
            ("B", true),
            ("b1", true),
            ("C", true),
            ("c1", true),
            ("D", false),
            ("e1", true),
        ]
    );
}

#[test]
fn test_group_spans_cover_descendants() {
    let flattened = flatten(&create_nested_tree());

    let a = flattened.group_spans[&0];
    assert_eq!((a.first_child_row, a.last_row), (1, 5));
    assert_eq!(a.row_span(), 6);

    let b = flattened.group_spans[&2];
    assert_eq!((b.first_child_row, b.last_row), (3, 5));

    let c = flattened.group_spans[&4];
    assert_eq!((c.first_child_row, c.last_row), (5, 5));

    let d = flattened.group_spans[&6];
    assert!(d.is_empty());
    assert_eq!(d.row_span(), 1);

    assert_eq!(flattened.group_spans.len(), 4);
    for span in flattened.spans() {
        assert!(flattened.rows[span.group_row].is_group());
        assert!(span.group_row < span.first_child_row);
    }
}

#[test]
fn test_group_span_matches_subtree_size() {
    let root = create_nested_tree();
    let flattened = flatten(&root);
    let Node::Group(a) = &root.children[0] else {
        panic!("expected group");
    };
    let span = flattened.group_spans[&0];
    assert_eq!(span.row_span(), 1 + a.descendant_count());
}

#[test]
fn test_row_fields_for_steps_and_groups() {
    let root = IntoSequence::into_sequence(SAMPLE_XML).expect("sample parses");
    let flattened = flatten(&root);

    let names: Vec<_> = flattened.rows.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, SAMPLE_ROW_NAMES);

    let capture = &flattened.rows[0];
    assert_eq!(capture.kind, RowKind::Group);
    assert_eq!(capture.type_label, "Group");
    assert_eq!(capture.description, "Collect state");

    let collect = &flattened.rows[1];
    assert_eq!(collect.type_label, "Run PowerShell Script");
    assert!(collect.continue_on_error);
    assert_eq!(
        collect.settings,
        "ScriptName = collect.ps1\nExecutionPolicy = Bypass"
    );
    assert_eq!(collect.condition_text, "Variable _SMSTSInWinPE != \"true\"");

    let something_new = &flattened.rows[7];
    assert_eq!(something_new.type_label, "Some New");
    assert_eq!(something_new.description, "Newer step");
    assert!(something_new.settings.is_empty());
}

#[test]
fn test_summary_counts() {
    let flattened = flatten(&create_nested_tree());
    let summary = flattened.summary();
    assert_eq!(summary.groups, 4);
    assert_eq!(summary.steps, 4);
    assert_eq!(summary.disabled, 5);
}

#[test]
fn test_empty_root_yields_no_rows() {
    let flattened = flatten(&Group::new("root"));
    assert!(flattened.is_empty());
    assert!(flattened.group_spans.is_empty());
}
