const TYPE_PREFIX: &str = "SMS_TaskSequence_";
const TYPE_SUFFIX: &str = "Action";

/// Display names that word splitting alone would get wrong.
const OVERRIDES: &[(&str, &str)] = &[
    ("RunPowerShellScript", "Run PowerShell Script"),
    ("EnableBitLocker", "Enable BitLocker"),
    ("DisableBitLocker", "Disable BitLocker"),
    ("OfflineEnableBitLocker", "Pre-provision BitLocker"),
    ("AutoApply", "Auto Apply Drivers"),
];

/// Turns a raw action type such as `SMS_TaskSequence_RunCommandLineAction`
/// into a readable label (`Run Command Line`).
pub fn friendly_name(raw_type: &str) -> String {
    let stripped = raw_type.strip_prefix(TYPE_PREFIX).unwrap_or(raw_type);
    let stripped = match stripped.strip_suffix(TYPE_SUFFIX) {
        Some(core) if !core.is_empty() => core,
        _ => stripped,
    };

    if let Some((_, label)) = OVERRIDES.iter().find(|(key, _)| *key == stripped) {
        return label.to_string();
    }
    split_words(stripped)
}

/// Inserts a space at each camel-case word boundary: `aB` and the `B` of `ABc`.
fn split_words(value: &str) -> String {
    let chars: Vec<char> = value.chars().collect();
    let mut result = String::with_capacity(value.len() + 8);
    for (i, &c) in chars.iter().enumerate() {
        if i > 0 && c.is_uppercase() {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            if prev.is_lowercase() || (prev.is_uppercase() && next_is_lower) {
                result.push(' ');
            }
        }
        result.push(c);
    }
    result
}
