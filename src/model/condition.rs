use std::fmt;

/// A boolean expression tree gating whether a node executes.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    Operator {
        kind: OperatorKind,
        children: Vec<Condition>,
    },
    Expression(Expression),
}

/// Logical combinator of an operator node.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum OperatorKind {
    And,
    Or,
    Not,
    /// Any operator type the reader does not recognize, kept verbatim.
    Other(String),
}

impl OperatorKind {
    pub fn from_type_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "and" => OperatorKind::And,
            "or" => OperatorKind::Or,
            "not" => OperatorKind::Not,
            _ => OperatorKind::Other(name.to_string()),
        }
    }
}

impl fmt::Display for OperatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperatorKind::And => write!(f, "and"),
            OperatorKind::Or => write!(f, "or"),
            OperatorKind::Not => write!(f, "not"),
            OperatorKind::Other(raw) => write!(f, "{}", raw),
        }
    }
}

/// A leaf test. Empty strings stand for values the source left out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expression {
    Variable {
        name: String,
        operator: String,
        value: String,
    },
    Folder {
        path: String,
        timestamp: String,
        timestamp_operator: String,
    },
    File {
        path: String,
        timestamp: String,
        timestamp_operator: String,
        version: String,
        version_operator: String,
    },
    Wmi {
        namespace: String,
        query: String,
    },
    Registry {
        key_path: String,
        value: String,
        value_type: String,
        operator: String,
        data: String,
    },
    /// An expression type outside the known set; holds the raw type name.
    Unknown(String),
}

/// The closed set of expression types, as named by the source schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExpressionKind {
    Variable,
    Folder,
    File,
    Wmi,
    Registry,
    Unknown,
}

impl ExpressionKind {
    /// Maps a raw type such as `SMS_TaskSequence_FileConditionExpression`.
    pub fn from_type_name(name: &str) -> Self {
        let core = name
            .strip_prefix("SMS_TaskSequence_")
            .unwrap_or(name)
            .strip_suffix("ConditionExpression")
            .unwrap_or("");
        match core {
            "Variable" => ExpressionKind::Variable,
            "Folder" => ExpressionKind::Folder,
            "File" => ExpressionKind::File,
            "WMI" => ExpressionKind::Wmi,
            "Registry" => ExpressionKind::Registry,
            _ => ExpressionKind::Unknown,
        }
    }
}

impl Expression {
    pub fn kind(&self) -> ExpressionKind {
        match self {
            Expression::Variable { .. } => ExpressionKind::Variable,
            Expression::Folder { .. } => ExpressionKind::Folder,
            Expression::File { .. } => ExpressionKind::File,
            Expression::Wmi { .. } => ExpressionKind::Wmi,
            Expression::Registry { .. } => ExpressionKind::Registry,
            Expression::Unknown(_) => ExpressionKind::Unknown,
        }
    }
}

impl Condition {
    pub fn and(children: Vec<Condition>) -> Self {
        Condition::Operator {
            kind: OperatorKind::And,
            children,
        }
    }

    pub fn or(children: Vec<Condition>) -> Self {
        Condition::Operator {
            kind: OperatorKind::Or,
            children,
        }
    }

    pub fn not(children: Vec<Condition>) -> Self {
        Condition::Operator {
            kind: OperatorKind::Not,
            children,
        }
    }

    pub fn variable(name: &str, operator: &str, value: &str) -> Self {
        Condition::Expression(Expression::Variable {
            name: name.to_string(),
            operator: operator.to_string(),
            value: value.to_string(),
        })
    }

    /// Number of operator headers plus expression leaves in this tree.
    pub fn node_count(&self) -> usize {
        match self {
            Condition::Operator { children, .. } => {
                1 + children.iter().map(Condition::node_count).sum::<usize>()
            }
            Condition::Expression(_) => 1,
        }
    }
}
