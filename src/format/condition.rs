use super::timestamp::render_timestamp;
use crate::model::{Condition, Expression, OperatorKind};

/// Spaces added per nesting level of an operator.
const INDENT_WIDTH: usize = 4;

/// Formats condition trees into indented, human-readable text.
pub struct ConditionFormatter;

impl ConditionFormatter {
    /// Formats a condition tree, one line per operator header or expression.
    pub fn format(condition: &Condition, indent: usize) -> String {
        let mut lines = Vec::new();
        Self::format_recursive(condition, indent, &mut lines);
        lines.join("\n").trim_end().to_string()
    }

    fn format_recursive(condition: &Condition, indent: usize, lines: &mut Vec<String>) {
        let pad = " ".repeat(indent * INDENT_WIDTH);
        match condition {
            Condition::Operator { kind, children } => {
                lines.push(format!("{}{}", pad, Self::operator_header(kind)));
                for child in children {
                    Self::format_recursive(child, indent + 1, lines);
                }
            }
            Condition::Expression(expr) => {
                lines.push(format!("{}{}", pad, Self::format_expression(expr)));
            }
        }
    }

    fn operator_header(kind: &OperatorKind) -> String {
        match kind {
            OperatorKind::And => "All are true:".to_string(),
            OperatorKind::Or => "Any are true:".to_string(),
            OperatorKind::Not => "None are true:".to_string(),
            OperatorKind::Other(raw) => raw.clone(),
        }
    }

    /// Formats a single expression leaf. Empty fields drop their clause.
    pub fn format_expression(expr: &Expression) -> String {
        match expr {
            Expression::Variable {
                name,
                operator,
                value,
            } => {
                let mut line = format!("Variable {}", name);
                push_clause(&mut line, " ", &operator_symbol(operator));
                if !value.is_empty() {
                    line.push_str(&format!(" \"{}\"", value));
                }
                line
            }
            Expression::Folder {
                path,
                timestamp,
                timestamp_operator,
            } => {
                let mut line = format!("Folder \"{}\" exists", path);
                if !timestamp.is_empty() {
                    line.push_str(" and timestamp");
                    push_clause(&mut line, " ", &operator_symbol(timestamp_operator));
                    push_clause(&mut line, " ", &render_timestamp(timestamp));
                }
                line
            }
            Expression::File {
                path,
                timestamp,
                timestamp_operator,
                version,
                version_operator,
            } => {
                let mut line = format!("File \"{}\" exists", path);
                if !timestamp.is_empty() {
                    line.push_str(", timestamp");
                    push_clause(&mut line, " ", &operator_symbol(timestamp_operator));
                    push_clause(&mut line, " ", &render_timestamp(timestamp));
                }
                if !version.is_empty() {
                    line.push_str(", version");
                    push_clause(&mut line, " ", &operator_symbol(version_operator));
                    push_clause(&mut line, " ", version);
                }
                line
            }
            Expression::Wmi { namespace, query } => {
                let mut line = "WMI".to_string();
                if !namespace.is_empty() {
                    line.push_str(&format!(" Namespace: \"{}\"", namespace));
                }
                if !query.is_empty() {
                    line.push_str(&format!(" Query: \"{}\"", query));
                }
                line
            }
            Expression::Registry {
                key_path,
                value,
                value_type,
                operator,
                data,
            } => {
                let location = if value.is_empty() {
                    key_path.clone()
                } else {
                    format!("{}\\{}", key_path, value)
                };
                let mut line = format!("Registry \"{}\"", location);
                if !value_type.is_empty() {
                    line.push_str(&format!(" ({})", value_type));
                }
                push_clause(&mut line, " ", &operator_symbol(operator));
                if !data.is_empty() {
                    line.push_str(&format!(" \"{}\"", data));
                }
                line
            }
            Expression::Unknown(raw) => raw.clone(),
        }
    }
}

/// Renders an optional condition; `None` yields an empty string.
pub fn render_condition(condition: Option<&Condition>, indent: usize) -> String {
    condition
        .map(|c| ConditionFormatter::format(c, indent))
        .unwrap_or_default()
}

/// Maps a comparison operator name to its display symbol.
pub fn operator_symbol(operator: &str) -> String {
    match operator {
        "equals" => "=",
        "notEquals" => "!=",
        "notExists" => "does not exist",
        "greater" => ">",
        "greaterEqual" => ">=",
        "less" => "<",
        "lessEqual" => "<=",
        other => other,
    }
    .to_string()
}

fn push_clause(line: &mut String, separator: &str, clause: &str) {
    if !clause.is_empty() {
        line.push_str(separator);
        line.push_str(clause);
    }
}
