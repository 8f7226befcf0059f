use super::Condition;

/// A single entry of a task sequence: either a container or an action.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Group(Group),
    Step(Step),
}

/// A labeled, collapsible section holding other nodes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Group {
    pub name: String,
    pub description: Option<String>,
    pub disabled: bool,
    pub condition: Option<Condition>,
    pub children: Vec<Node>,
}

/// A leaf action with a type, settings and an optional condition.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Step {
    pub name: String,
    pub description: Option<String>,
    pub disabled: bool,
    pub continue_on_error: bool,
    pub condition: Option<Condition>,
    /// Raw action-type identifier, e.g. `SMS_TaskSequence_RunCommandLineAction`.
    pub action_type: String,
    pub variables: Vec<Variable>,
}

/// A name/value setting attached to a step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variable {
    pub name: String,
    /// The display property; equal to `name` when the source omits it.
    pub property: String,
    pub value: String,
}

impl Node {
    pub fn name(&self) -> &str {
        match self {
            Node::Group(g) => &g.name,
            Node::Step(s) => &s.name,
        }
    }

    pub fn description(&self) -> Option<&str> {
        match self {
            Node::Group(g) => g.description.as_deref(),
            Node::Step(s) => s.description.as_deref(),
        }
    }

    pub fn is_disabled(&self) -> bool {
        match self {
            Node::Group(g) => g.disabled,
            Node::Step(s) => s.disabled,
        }
    }

    pub fn condition(&self) -> Option<&Condition> {
        match self {
            Node::Group(g) => g.condition.as_ref(),
            Node::Step(s) => s.condition.as_ref(),
        }
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn count(&self) -> usize {
        match self {
            Node::Group(g) => 1 + g.descendant_count(),
            Node::Step(_) => 1,
        }
    }
}

impl Group {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.condition = Some(condition);
        self
    }

    pub fn descendant_count(&self) -> usize {
        self.children.iter().map(Node::count).sum()
    }
}

impl Step {
    pub fn new(name: impl Into<String>, action_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            action_type: action_type.into(),
            ..Default::default()
        }
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn continue_on_error(mut self, continue_on_error: bool) -> Self {
        self.continue_on_error = continue_on_error;
        self
    }

    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.condition = Some(condition);
        self
    }

    pub fn with_variable(mut self, property: &str, value: &str) -> Self {
        self.variables.push(Variable {
            name: property.to_string(),
            property: property.to_string(),
            value: value.to_string(),
        });
        self
    }
}

impl From<Group> for Node {
    fn from(group: Group) -> Self {
        Node::Group(group)
    }
}

impl From<Step> for Node {
    fn from(step: Step) -> Self {
        Node::Step(step)
    }
}
