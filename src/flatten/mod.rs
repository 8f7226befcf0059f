//! Depth-first, preorder flattening of a task-sequence tree into rows.

use crate::format::{friendly_name, render_condition};
use crate::model::{Group, Node, Step};
use ahash::AHashMap;
use itertools::Itertools;

mod row;

pub use row::{GroupSpan, Row, RowKind};

/// Type label shown for group rows.
pub const GROUP_LABEL: &str = "Group";

/// Options controlling the flattening walk.
#[derive(Debug, Clone, Copy, Default)]
pub struct FlattenOptions {
    /// Depth assigned to top-level rows. Interactive layouts reserve one level.
    pub base_depth: usize,
}

/// The ordered rows of a sequence plus the row range of every group.
#[derive(Debug, Clone, Default)]
pub struct FlattenedSequence {
    pub rows: Vec<Row>,
    /// Keyed by the group's own row index.
    pub group_spans: AHashMap<usize, GroupSpan>,
}

/// Counts gathered from a flattened sequence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlattenSummary {
    pub groups: usize,
    pub steps: usize,
    pub disabled: usize,
}

impl FlattenedSequence {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Group spans ordered by row index.
    pub fn spans(&self) -> impl Iterator<Item = &GroupSpan> {
        self.group_spans
            .values()
            .sorted_by_key(|span| span.group_row)
    }

    pub fn summary(&self) -> FlattenSummary {
        self.rows
            .iter()
            .fold(FlattenSummary::default(), |mut acc, row| {
                match row.kind {
                    RowKind::Group => acc.groups += 1,
                    RowKind::Step => acc.steps += 1,
                }
                if row.disabled {
                    acc.disabled += 1;
                }
                acc
            })
    }
}

/// Flattens the children of `root` starting at depth 0.
pub fn flatten(root: &Group) -> FlattenedSequence {
    flatten_with(root, FlattenOptions::default())
}

/// Flattens the children of `root` in document order.
///
/// `root` itself produces no row; it only carries the top-level nodes.
pub fn flatten_with(root: &Group, options: FlattenOptions) -> FlattenedSequence {
    let mut flattener = Flattener {
        output: FlattenedSequence {
            rows: Vec::with_capacity(root.descendant_count()),
            group_spans: AHashMap::new(),
        },
    };
    for child in &root.children {
        flattener.visit(child, options.base_depth, root.disabled);
    }
    flattener.output
}

struct Flattener {
    output: FlattenedSequence,
}

impl Flattener {
    fn visit(&mut self, node: &Node, depth: usize, ancestor_disabled: bool) {
        let disabled = ancestor_disabled || node.is_disabled();
        match node {
            Node::Group(group) => {
                let index = self.output.rows.len();
                self.output.rows.push(Self::group_row(group, depth, disabled));
                for child in &group.children {
                    self.visit(child, depth + 1, disabled);
                }
                let span = GroupSpan {
                    group_row: index,
                    first_child_row: index + 1,
                    last_row: self.output.rows.len() - 1,
                };
                self.output.group_spans.insert(index, span);
            }
            Node::Step(step) => {
                self.output.rows.push(Self::step_row(step, depth, disabled));
            }
        }
    }

    fn group_row(group: &Group, depth: usize, disabled: bool) -> Row {
        Row {
            kind: RowKind::Group,
            depth,
            name: group.name.clone(),
            type_label: GROUP_LABEL.to_string(),
            description: group.description.clone().unwrap_or_default(),
            condition_text: render_condition(group.condition.as_ref(), 0),
            continue_on_error: false,
            settings: String::new(),
            disabled,
        }
    }

    fn step_row(step: &Step, depth: usize, disabled: bool) -> Row {
        Row {
            kind: RowKind::Step,
            depth,
            name: step.name.clone(),
            type_label: friendly_name(&step.action_type),
            description: step.description.clone().unwrap_or_default(),
            condition_text: render_condition(step.condition.as_ref(), 0),
            continue_on_error: step.continue_on_error,
            settings: step
                .variables
                .iter()
                .map(|var| format!("{} = {}", var.property, var.value))
                .join("\n"),
            disabled,
        }
    }
}
