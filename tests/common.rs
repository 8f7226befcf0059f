//! Common test utilities for building task sequences.
use tasksheet::prelude::*;

/// A small but representative sequence exercising every expression kind.
#[allow(dead_code)]
pub const SAMPLE_XML: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<sequence version="3.10">
  <referenceList>
    <reference package="ABC00001" />
  </referenceList>
  <group name="Capture Files" description="Collect state">
    <step type="SMS_TaskSequence_RunPowerShellScriptAction" name="Collect Logs" continueOnError="true">
      <condition>
        <expression type="SMS_TaskSequence_VariableConditionExpression">
          <variable name="Operator">notEquals</variable>
          <variable name="Value">true</variable>
          <variable name="Variable">_SMSTSInWinPE</variable>
        </expression>
      </condition>
      <defaultVarList>
        <variable name="ScriptName" property="ScriptName">collect.ps1</variable>
        <variable name="ExecutionPolicy" property="ExecutionPolicy">Bypass</variable>
      </defaultVarList>
    </step>
    <group name="Legacy" disable="true">
      <step type="SMS_TaskSequence_RunCommandLineAction" name="Old Tool" />
      <step type="SMS_TaskSequence_RebootAction" name="Restart" disable="true" />
    </group>
  </group>
  <group name="Install">
    <condition>
      <operator type="or">
        <expression type="SMS_TaskSequence_FileConditionExpression">
          <variable name="DateTime">20240307160509.000000+000</variable>
          <variable name="DateTimeOperator">greater</variable>
          <variable name="Path">C:\Windows\setup.exe</variable>
          <variable name="Version">10.0.1</variable>
          <variable name="VersionOperator">greaterEqual</variable>
        </expression>
        <operator type="not">
          <expression type="SMS_TaskSequence_RegistryConditionExpression">
            <variable name="Data">1</variable>
            <variable name="KeyPath">HKEY_LOCAL_MACHINE\SOFTWARE\Contoso</variable>
            <variable name="Operator">equals</variable>
            <variable name="Type">REG_SZ</variable>
            <variable name="Value">Installed</variable>
          </expression>
        </operator>
      </operator>
    </condition>
    <step type="SMS_TaskSequence_EnableBitLockerAction" name="Enable BitLocker" />
    <step type="SMS_TaskSequence_SomeNewAction" name="Something New" description="Newer step" />
  </group>
</sequence>"#;

/// Rows in `SAMPLE_XML`, in preorder.
#[allow(dead_code)]
pub const SAMPLE_ROW_NAMES: [&str; 8] = [
    "Capture Files",
    "Collect Logs",
    "Legacy",
    "Old Tool",
    "Restart",
    "Install",
    "Enable BitLocker",
    "Something New",
];

/// The minimal sequence: one group holding one step.
#[allow(dead_code)]
pub const MINIMAL_XML: &str = r#"<sequence><group name="G1"><step name="S1" type="SMS_TaskSequence_RunPowerShellScriptAction"/></group></sequence>"#;

/// Builds a tree three levels deep with a disabled middle group.
///
/// ```text
/// A (group)
///   a1 (step)
///   B (group, disabled)
///     b1 (step)
///     C (group)
///       c1 (step)
/// D (group, empty)
/// e1 (step, disabled)
/// ```
#[allow(dead_code)]
pub fn create_nested_tree() -> Group {
    Group::new("")
        .with_child(
            Group::new("A")
                .with_child(Step::new("a1", "SMS_TaskSequence_RunCommandLineAction"))
                .with_child(
                    Group::new("B")
                        .disabled(true)
                        .with_child(Step::new("b1", "SMS_TaskSequence_RebootAction"))
                        .with_child(
                            Group::new("C").with_child(Step::new(
                                "c1",
                                "SMS_TaskSequence_InstallSoftwareAction",
                            )),
                        ),
                ),
        )
        .with_child(Group::new("D"))
        .with_child(Step::new("e1", "SMS_TaskSequence_RunCommandLineAction").disabled(true))
}

/// Counts groups and steps below `group`, excluding `group` itself.
#[allow(dead_code)]
pub fn count_nodes(group: &Group) -> (usize, usize) {
    group
        .children
        .iter()
        .fold((0, 0), |(groups, steps), child| match child {
            Node::Group(g) => {
                let (inner_groups, inner_steps) = count_nodes(g);
                (groups + 1 + inner_groups, steps + inner_steps)
            }
            Node::Step(_) => (groups, steps + 1),
        })
}
