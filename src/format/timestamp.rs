use chrono::NaiveDateTime;

/// Number of leading characters of a raw timestamp that carry meaning
/// (`yyyyMMddHHmmss.fff`).
const SIGNIFICANT_CHARS: usize = 18;

/// Renders a date/time as a short date followed by a long time,
/// e.g. `3/7/2024 4:05:09 PM`.
pub fn format_datetime(value: &NaiveDateTime) -> String {
    value.format("%-m/%-d/%Y %-I:%M:%S %p").to_string()
}

/// Renders a raw `yyyyMMddHHmmss.fff...` timestamp for display.
///
/// Values that do not parse are returned trimmed but otherwise untouched.
pub fn render_timestamp(raw: &str) -> String {
    let raw = raw.trim();
    let significant = raw.get(..SIGNIFICANT_CHARS).unwrap_or(raw);
    significant
        .get(..14)
        .and_then(|seconds| NaiveDateTime::parse_from_str(seconds, "%Y%m%d%H%M%S").ok())
        .map(|parsed| format_datetime(&parsed))
        .unwrap_or_else(|| raw.to_string())
}
