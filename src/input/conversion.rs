use super::xml::XmlElement;
use crate::error::InputError;
use crate::model::{Condition, Expression, ExpressionKind, Group, Node, OperatorKind, Step, Variable};

/// A trait for source documents that can be converted into a task-sequence tree.
///
/// The returned [`Group`] is the synthetic root: its children are the
/// top-level groups and steps of the sequence.
pub trait IntoSequence {
    fn into_sequence(self) -> Result<Group, InputError>;
}

impl IntoSequence for &XmlElement {
    fn into_sequence(self) -> Result<Group, InputError> {
        let sequence = self.find("sequence").unwrap_or(self);
        let children = convert_children(sequence);
        if children.is_empty() {
            return Err(InputError::Malformed(format!(
                "<{}> contains no group or step elements",
                sequence.name
            )));
        }
        Ok(Group {
            name: sequence.attr("name").unwrap_or_default().to_string(),
            children,
            ..Default::default()
        })
    }
}

impl IntoSequence for &str {
    fn into_sequence(self) -> Result<Group, InputError> {
        XmlElement::parse(self)?.into_sequence()
    }
}

impl IntoSequence for XmlElement {
    fn into_sequence(self) -> Result<Group, InputError> {
        (&self).into_sequence()
    }
}

fn convert_children(element: &XmlElement) -> Vec<Node> {
    element
        .children
        .iter()
        .filter_map(|child| match child.name.as_str() {
            "group" => Some(Node::Group(convert_group(child))),
            "step" => Some(Node::Step(convert_step(child))),
            _ => None,
        })
        .collect()
}

fn convert_group(element: &XmlElement) -> Group {
    Group {
        name: element.attr("name").unwrap_or_default().to_string(),
        description: non_empty(element.attr("description")),
        disabled: element.flag("disable"),
        condition: element.child("condition").and_then(convert_condition),
        children: convert_children(element),
    }
}

fn convert_step(element: &XmlElement) -> Step {
    let variables = element
        .child("defaultVarList")
        .map(|list| {
            list.children_named("variable")
                .map(|var| {
                    let name = var.attr("name").unwrap_or_default().to_string();
                    Variable {
                        property: var.attr("property").unwrap_or(&name).to_string(),
                        name,
                        value: var.text.clone(),
                    }
                })
                .collect()
        })
        .unwrap_or_default();

    Step {
        name: element.attr("name").unwrap_or_default().to_string(),
        description: non_empty(element.attr("description")),
        disabled: element.flag("disable"),
        continue_on_error: element.flag("continueOnError"),
        condition: element.child("condition").and_then(convert_condition),
        action_type: element.attr("type").unwrap_or_default().to_string(),
        variables,
    }
}

/// Converts a `<condition>` element; several top-level parts form an implicit AND.
fn convert_condition(element: &XmlElement) -> Option<Condition> {
    let mut parts: Vec<Condition> = element
        .children
        .iter()
        .filter_map(convert_condition_part)
        .collect();
    match parts.len() {
        0 => None,
        1 => parts.pop(),
        _ => Some(Condition::and(parts)),
    }
}

fn convert_condition_part(element: &XmlElement) -> Option<Condition> {
    match element.name.as_str() {
        "operator" => Some(Condition::Operator {
            kind: OperatorKind::from_type_name(element.attr("type").unwrap_or_default()),
            children: element
                .children
                .iter()
                .filter_map(convert_condition_part)
                .collect(),
        }),
        "expression" => Some(Condition::Expression(convert_expression(element))),
        _ => None,
    }
}

fn convert_expression(element: &XmlElement) -> Expression {
    let raw_type = element.attr("type").unwrap_or_default();
    let field = |name: &str| -> String {
        element
            .children_named("variable")
            .find(|var| var.attr("name") == Some(name))
            .map(|var| var.text.clone())
            .unwrap_or_default()
    };

    match ExpressionKind::from_type_name(raw_type) {
        ExpressionKind::Variable => Expression::Variable {
            name: field("Variable"),
            operator: field("Operator"),
            value: field("Value"),
        },
        ExpressionKind::Folder => Expression::Folder {
            path: field("Path"),
            timestamp: field("DateTime"),
            timestamp_operator: field("DateTimeOperator"),
        },
        ExpressionKind::File => Expression::File {
            path: field("Path"),
            timestamp: field("DateTime"),
            timestamp_operator: field("DateTimeOperator"),
            version: field("Version"),
            version_operator: field("VersionOperator"),
        },
        ExpressionKind::Wmi => Expression::Wmi {
            namespace: field("Namespace"),
            query: field("Query"),
        },
        ExpressionKind::Registry => Expression::Registry {
            key_path: field("KeyPath"),
            value: field("Value"),
            value_type: field("Type"),
            operator: field("Operator"),
            data: field("Data"),
        },
        ExpressionKind::Unknown => Expression::Unknown(raw_type.to_string()),
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
<sequence version="3.10">
  <group name="Setup" description="Prepare disk" disable="true">
    <condition>
      <operator type="or">
        <expression type="SMS_TaskSequence_VariableConditionExpression">
          <variable name="Operator">equals</variable>
          <variable name="Value">true</variable>
          <variable name="Variable">_SMSTSInWinPE</variable>
        </expression>
        <expression type="SMS_TaskSequence_WMIConditionExpression">
          <variable name="Namespace">root\cimv2</variable>
          <variable name="Query">SELECT * FROM Win32_BIOS</variable>
        </expression>
      </operator>
    </condition>
    <step type="SMS_TaskSequence_RunCommandLineAction" name="Run" continueOnError="true">
      <action>smsswd.exe /run: cmd.exe</action>
      <defaultVarList>
        <variable name="CommandLine" property="CommandLine">cmd.exe /c exit 0</variable>
        <variable name="SuccessCodes">0 3010</variable>
      </defaultVarList>
    </step>
  </group>
  <step type="SMS_TaskSequence_RebootAction" name="Restart" />
</sequence>"#;

    #[test]
    fn converts_groups_steps_and_settings() {
        let root = SAMPLE.into_sequence().unwrap();
        assert_eq!(root.children.len(), 2);

        let Node::Group(group) = &root.children[0] else {
            panic!("expected a group");
        };
        assert_eq!(group.name, "Setup");
        assert_eq!(group.description.as_deref(), Some("Prepare disk"));
        assert!(group.disabled);

        let Node::Step(step) = &group.children[0] else {
            panic!("expected a step");
        };
        assert!(step.continue_on_error);
        assert!(!step.disabled);
        assert_eq!(step.action_type, "SMS_TaskSequence_RunCommandLineAction");
        assert_eq!(step.variables.len(), 2);
        assert_eq!(step.variables[0].value, "cmd.exe /c exit 0");
        assert_eq!(step.variables[1].property, "SuccessCodes");
    }

    #[test]
    fn converts_condition_trees() {
        let root = SAMPLE.into_sequence().unwrap();
        let condition = root.children[0].condition().unwrap();
        let Condition::Operator { kind, children } = condition else {
            panic!("expected an operator");
        };
        assert_eq!(*kind, OperatorKind::Or);
        assert_eq!(
            children[0],
            Condition::variable("_SMSTSInWinPE", "equals", "true")
        );
        assert_eq!(
            children[1],
            Condition::Expression(Expression::Wmi {
                namespace: r"root\cimv2".to_string(),
                query: "SELECT * FROM Win32_BIOS".to_string(),
            })
        );
    }

    #[test]
    fn multiple_condition_parts_are_an_implicit_and() {
        let xml = r#"<sequence><step name="S"><condition>
            <expression type="SMS_TaskSequence_VariableConditionExpression"><variable name="Variable">A</variable></expression>
            <expression type="SMS_TaskSequence_CustomConditionExpression"/>
        </condition></step></sequence>"#;
        let root = xml.into_sequence().unwrap();
        let Some(Condition::Operator { kind, children }) = root.children[0].condition() else {
            panic!("expected an implicit operator");
        };
        assert_eq!(*kind, OperatorKind::And);
        assert_eq!(
            children[1],
            Condition::Expression(Expression::Unknown(
                "SMS_TaskSequence_CustomConditionExpression".to_string()
            ))
        );
    }

    #[test]
    fn expression_kind_follows_type_name() {
        let xml = r#"<sequence><step name="S"><condition>
            <expression type="SMS_TaskSequence_FolderConditionExpression"><variable name="Path">C:\Temp</variable></expression>
            <expression type="SMS_TaskSequence_RegistryConditionExpression"><variable name="KeyPath">HKLM\Software</variable></expression>
            <expression type="SMS_TaskSequence_FileConditionExpression"/>
            <expression type="SMS_TaskSequence_CustomConditionExpression"/>
        </condition></step></sequence>"#;
        let root = xml.into_sequence().unwrap();
        let Some(Condition::Operator { children, .. }) = root.children[0].condition() else {
            panic!("expected an implicit operator");
        };
        let kinds: Vec<ExpressionKind> = children
            .iter()
            .map(|child| match child {
                Condition::Expression(expr) => expr.kind(),
                Condition::Operator { .. } => panic!("expected an expression"),
            })
            .collect();
        assert_eq!(
            kinds,
            [
                ExpressionKind::Folder,
                ExpressionKind::Registry,
                ExpressionKind::File,
                ExpressionKind::Unknown,
            ]
        );
    }

    #[test]
    fn sequence_without_nodes_is_malformed() {
        let err = "<sequence><referenceList/></sequence>".into_sequence().unwrap_err();
        assert!(matches!(err, InputError::Malformed(_)));
    }
}
