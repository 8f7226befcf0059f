//! Fixed layout and color constants of the rendered sheet.

use crate::engine::Color;

/// Row holding the merged title.
pub const TITLE_ROW: u32 = 0;
/// Row holding the column headers.
pub const HEADER_ROW: u32 = 1;
/// First row of flattened entries.
pub const DATA_START_ROW: u32 = 2;

pub const TITLE_FONT_SIZE: f64 = 14.0;

pub const GROUP_BACKGROUND: Color = Color(0x9BC2E6);
pub const GROUP_DISABLED_BACKGROUND: Color = Color(0xBFBFBF);
pub const STEP_BACKGROUND: Color = Color(0xDDEBF7);
pub const STEP_DISABLED_BACKGROUND: Color = Color(0xEDEDED);
pub const BORDER_COLOR: Color = Color(0x808080);

/// Width cap for the description and condition columns.
pub const TEXT_COLUMN_MAX_WIDTH: f64 = 50.0;
/// Width cap for the settings column.
pub const SETTINGS_COLUMN_MAX_WIDTH: f64 = 80.0;
pub const MIN_COLUMN_WIDTH: f64 = 8.0;
/// Extra characters added to the longest line when auto-sizing.
pub const COLUMN_PADDING: f64 = 2.0;
/// Characters of width consumed by one indent level.
pub const INDENT_WIDTH: f64 = 3.0;

pub const LINE_HEIGHT: f64 = 15.0;
pub const MAX_ROW_HEIGHT: f64 = 120.0;

/// Deepest outline level a spreadsheet supports for row grouping.
pub const MAX_OUTLINE_LEVEL: usize = 7;

/// Longest sheet name the workbook format accepts.
pub const MAX_SHEET_NAME_LEN: usize = 31;

/// A rendered column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Name,
    Type,
    Description,
    Conditions,
    ContinueOnError,
    Settings,
}

impl Column {
    pub fn header(&self) -> &'static str {
        match self {
            Column::Name => "Name",
            Column::Type => "Type",
            Column::Description => "Description",
            Column::Conditions => "Conditions",
            Column::ContinueOnError => "Continue on Error",
            Column::Settings => "Settings",
        }
    }

    pub fn max_width(&self) -> Option<f64> {
        match self {
            Column::Description | Column::Conditions => Some(TEXT_COLUMN_MAX_WIDTH),
            Column::Settings => Some(SETTINGS_COLUMN_MAX_WIDTH),
            _ => None,
        }
    }

    /// Column order for a layout with or without the continue-on-error column.
    pub fn layout(continue_on_error: bool) -> Vec<Column> {
        let mut columns = vec![
            Column::Name,
            Column::Type,
            Column::Description,
            Column::Conditions,
        ];
        if continue_on_error {
            columns.push(Column::ContinueOnError);
        }
        columns.push(Column::Settings);
        columns
    }
}

/// Strips characters a sheet name may not contain and enforces the length cap.
pub fn sheet_name(title: &str) -> String {
    let cleaned: String = title
        .chars()
        .filter(|c| !matches!(c, '[' | ']' | ':' | '*' | '?' | '/' | '\\'))
        .take(MAX_SHEET_NAME_LEN)
        .collect();
    let cleaned = cleaned.trim().trim_matches('\'').to_string();
    if cleaned.is_empty() {
        "Sequence".to_string()
    } else {
        cleaned
    }
}
