//! Unit tests for condition rendering, type labels and input resolution.
mod common;
use common::*;
use std::fs;
use tasksheet::format::{ConditionFormatter, operator_symbol};
use tasksheet::input::DEFAULT_TITLE;
use tasksheet::prelude::*;

fn file_expression(timestamp: &str, version: &str) -> Condition {
    Condition::Expression(Expression::File {
        path: r"C:\Windows\setup.exe".to_string(),
        timestamp: timestamp.to_string(),
        timestamp_operator: "greater".to_string(),
        version: version.to_string(),
        version_operator: "greaterEqual".to_string(),
    })
}

#[test]
fn test_render_condition_none_is_empty() {
    assert_eq!(render_condition(None, 0), "");
    assert_eq!(render_condition(None, 3), "");
}

#[test]
fn test_operator_symbols() {
    assert_eq!(operator_symbol("equals"), "=");
    assert_eq!(operator_symbol("notEquals"), "!=");
    assert_eq!(operator_symbol("notExists"), "does not exist");
    assert_eq!(operator_symbol("greater"), ">");
    assert_eq!(operator_symbol("greaterEqual"), ">=");
    assert_eq!(operator_symbol("less"), "<");
    assert_eq!(operator_symbol("lessEqual"), "<=");
    assert_eq!(operator_symbol("exists"), "exists");
    assert_eq!(operator_symbol("like"), "like");
}

#[test]
fn test_variable_expression_omits_empty_value() {
    let with_value = Condition::variable("OSDComputerName", "equals", "PC01");
    assert_eq!(
        render_condition(Some(&with_value), 0),
        "Variable OSDComputerName = \"PC01\""
    );

    let without_value = Condition::variable("OSDComputerName", "notExists", "");
    assert_eq!(
        render_condition(Some(&without_value), 0),
        "Variable OSDComputerName does not exist"
    );
}

#[test]
fn test_folder_and_file_expressions() {
    let folder = Condition::Expression(Expression::Folder {
        path: r"C:\Temp".to_string(),
        timestamp: String::new(),
        timestamp_operator: String::new(),
    });
    assert_eq!(render_condition(Some(&folder), 0), r#"Folder "C:\Temp" exists"#);

    let dated_folder = Condition::Expression(Expression::Folder {
        path: r"C:\Temp".to_string(),
        timestamp: "20240307160509.000000+000".to_string(),
        timestamp_operator: "less".to_string(),
    });
    assert_eq!(
        render_condition(Some(&dated_folder), 0),
        r#"Folder "C:\Temp" exists and timestamp < 3/7/2024 4:05:09 PM"#
    );

    assert_eq!(
        render_condition(Some(&file_expression("", "")), 0),
        r#"File "C:\Windows\setup.exe" exists"#
    );
    assert_eq!(
        render_condition(
            Some(&file_expression("20240307160509.000000+000", "10.0.1")),
            0
        ),
        r#"File "C:\Windows\setup.exe" exists, timestamp > 3/7/2024 4:05:09 PM, version >= 10.0.1"#
    );
}

#[test]
fn test_wmi_registry_and_unknown_expressions() {
    let wmi = Expression::Wmi {
        namespace: r"root\cimv2".to_string(),
        query: "SELECT * FROM Win32_ComputerSystem".to_string(),
    };
    assert_eq!(
        ConditionFormatter::format_expression(&wmi),
        r#"WMI Namespace: "root\cimv2" Query: "SELECT * FROM Win32_ComputerSystem""#
    );

    let registry = Expression::Registry {
        key_path: r"HKEY_LOCAL_MACHINE\SOFTWARE\Contoso".to_string(),
        value: "Installed".to_string(),
        value_type: "REG_SZ".to_string(),
        operator: "equals".to_string(),
        data: "1".to_string(),
    };
    assert_eq!(
        ConditionFormatter::format_expression(&registry),
        r#"Registry "HKEY_LOCAL_MACHINE\SOFTWARE\Contoso\Installed" (REG_SZ) = "1""#
    );

    let unknown = Expression::Unknown("SMS_TaskSequence_CustomConditionExpression".to_string());
    assert_eq!(
        ConditionFormatter::format_expression(&unknown),
        "SMS_TaskSequence_CustomConditionExpression"
    );
}

#[test]
fn test_nested_operators_indent_by_four() {
    let condition = Condition::and(vec![
        Condition::variable("A", "equals", "1"),
        Condition::or(vec![
            Condition::variable("B", "equals", "2"),
            Condition::not(vec![Condition::variable("C", "exists", "")]),
        ]),
    ]);

    let rendered = render_condition(Some(&condition), 0);
    assert_eq!(
        rendered,
        [
            "All are true:",
            "    Variable A = \"1\"",
            "    Any are true:",
            "        Variable B = \"2\"",
            "        None are true:",
            "            Variable C exists",
        ]
        .join("\n")
    );
    assert_eq!(rendered.lines().count(), condition.node_count());
}

#[test]
fn test_start_indent_and_unknown_operator() {
    let condition = Condition::Operator {
        kind: OperatorKind::Other("xor".to_string()),
        children: vec![Condition::variable("A", "equals", "1")],
    };
    assert_eq!(
        render_condition(Some(&condition), 1),
        "    xor\n        Variable A = \"1\""
    );
}

#[test]
fn test_friendly_names() {
    assert_eq!(
        friendly_name("SMS_TaskSequence_RunPowerShellScriptAction"),
        "Run PowerShell Script"
    );
    assert_eq!(friendly_name("SMS_TaskSequence_SomeNewAction"), "Some New");
    assert_eq!(
        friendly_name("SMS_TaskSequence_RunCommandLineAction"),
        "Run Command Line"
    );
    assert_eq!(
        friendly_name("SMS_TaskSequence_EnableBitLockerAction"),
        "Enable BitLocker"
    );
    assert_eq!(
        friendly_name("SMS_TaskSequence_DisableBitLockerAction"),
        "Disable BitLocker"
    );
    assert_eq!(
        friendly_name("SMS_TaskSequence_OfflineEnableBitLockerAction"),
        "Pre-provision BitLocker"
    );
    assert_eq!(
        friendly_name("SMS_TaskSequence_AutoApplyAction"),
        "Auto Apply Drivers"
    );
    assert_eq!(
        friendly_name("SMS_TaskSequence_ApplyOperatingSystemAction"),
        "Apply Operating System"
    );
    assert_eq!(friendly_name("CustomWMIQuery"), "Custom WMI Query");
}

#[test]
fn test_resolve_raw_xml_uses_default_title() {
    let resolved = InputSource::Xml(MINIMAL_XML.to_string())
        .resolve(None)
        .expect("minimal xml resolves");
    assert_eq!(resolved.title, DEFAULT_TITLE);
    assert_eq!(resolved.root.children.len(), 1);

    let named = InputSource::Xml(MINIMAL_XML.to_string())
        .resolve(Some("Deploy"))
        .unwrap();
    assert_eq!(named.title, "Deploy");
}

#[test]
fn test_resolve_missing_file_is_not_found() {
    let err = InputSource::File("definitely/not/here.xml".into())
        .resolve(None)
        .unwrap_err();
    assert!(matches!(err, InputError::NotFound(_)));
}

#[test]
fn test_resolve_file_input() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sequence.xml");
    fs::write(&path, SAMPLE_XML).unwrap();

    let resolved = InputSource::File(path).resolve(Some("From File")).unwrap();
    assert_eq!(resolved.title, "From File");
    assert_eq!(resolved.root.children.len(), 2);
}

#[test]
fn test_resolve_malformed_input() {
    let unparsable = InputSource::Xml("<sequence><group>".to_string()).resolve(None);
    assert!(matches!(unparsable, Err(InputError::Malformed(_))));

    let empty = InputSource::Xml("<sequence/>".to_string()).resolve(None);
    assert!(matches!(empty, Err(InputError::Malformed(_))));
}

#[test]
fn test_resolve_package_ignores_display_name() {
    let json = serde_json::json!({
        "Name": "Windows 11 Upgrade",
        "LastRefreshTime": "2024-03-07T16:05:09+00:00",
        "Sequence": format!("<SmsTaskSequencePackage><SequenceData>{}</SequenceData></SmsTaskSequencePackage>", MINIMAL_XML),
    });
    let package = TaskSequencePackage::from_json(&json.to_string()).unwrap();
    let expected_refresh = package.last_refresh_time;

    let resolved = InputSource::Package(package)
        .resolve(Some("Ignored"))
        .unwrap();
    assert_eq!(resolved.title, "Windows 11 Upgrade");
    assert_eq!(resolved.last_updated, expected_refresh);
    assert_eq!(resolved.root.children[0].name(), "G1");
}

#[test]
fn test_error_display() {
    let err = InputError::NotFound("missing.xml".into());
    assert!(err.to_string().contains("missing.xml"));

    let export_err: ExportError = err.into();
    assert!(matches!(export_err, ExportError::NotFound(_)));

    let engine_err = EngineError::Rejected {
        operation: "save".to_string(),
        message: "disk full".to_string(),
    };
    let export_err: ExportError = engine_err.into();
    assert!(export_err.to_string().contains("disk full"));
}

#[test]
fn test_unreadable_input_keeps_read_cause() {
    let dir = tempfile::tempdir().unwrap();
    let err = InputSource::File(dir.path().to_path_buf())
        .resolve(None)
        .unwrap_err();
    assert!(matches!(err, InputError::Io(_)));

    let export_err: ExportError = err.into();
    assert!(matches!(export_err, ExportError::MalformedInput(_)));
    assert!(export_err.to_string().contains("could not read input"));
}
