/// Whether a row was produced from a group or a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RowKind {
    Group,
    Step,
}

/// The flattened, renderable projection of a single node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub kind: RowKind,
    pub depth: usize,
    pub name: String,
    /// `Group` for groups, the friendly action name for steps.
    pub type_label: String,
    pub description: String,
    pub condition_text: String,
    pub continue_on_error: bool,
    /// Newline-joined `property = value` lines.
    pub settings: String,
    /// Effective state: set when the node or any ancestor is disabled.
    pub disabled: bool,
}

impl Row {
    pub fn is_group(&self) -> bool {
        self.kind == RowKind::Group
    }
}

/// Row range covered by a group's descendants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupSpan {
    pub group_row: usize,
    pub first_child_row: usize,
    /// Index of the last descendant row; equals `group_row` for an empty group.
    pub last_row: usize,
}

impl GroupSpan {
    pub fn is_empty(&self) -> bool {
        self.last_row < self.first_child_row
    }

    /// Total rows owned by the group, its own row included.
    pub fn row_span(&self) -> usize {
        self.last_row - self.group_row + 1
    }
}
