use std::fmt;
use std::path::Path;

/// A zero-based cell address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CellRef {
    pub row: u32,
    pub col: u16,
}

impl CellRef {
    pub const fn new(row: u32, col: u16) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for CellRef {
    /// A1-style notation.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut letters = Vec::new();
        let mut col = self.col as u32 + 1;
        while col > 0 {
            let rem = (col - 1) % 26;
            letters.push((b'A' + rem as u8) as char);
            col = (col - 1) / 26;
        }
        let column: String = letters.into_iter().rev().collect();
        write!(f, "{}{}", column, self.row + 1)
    }
}

/// An inclusive rectangular range of cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellRange {
    pub first: CellRef,
    pub last: CellRef,
}

impl CellRange {
    pub const fn new(first_row: u32, first_col: u16, last_row: u32, last_col: u16) -> Self {
        Self {
            first: CellRef::new(first_row, first_col),
            last: CellRef::new(last_row, last_col),
        }
    }

    pub const fn single(cell: CellRef) -> Self {
        Self {
            first: cell,
            last: cell,
        }
    }

    pub fn row(row: u32, first_col: u16, last_col: u16) -> Self {
        Self::new(row, first_col, row, last_col)
    }

    pub fn contains(&self, cell: CellRef) -> bool {
        (self.first.row..=self.last.row).contains(&cell.row)
            && (self.first.col..=self.last.col).contains(&cell.col)
    }

    pub fn cells(self) -> impl Iterator<Item = CellRef> {
        let (first, last) = (self.first, self.last);
        (first.row..=last.row)
            .flat_map(move |row| (first.col..=last.col).map(move |col| CellRef::new(row, col)))
    }
}

impl fmt::Display for CellRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.first, self.last)
    }
}

/// An inclusive range of rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RowRange {
    pub first: u32,
    pub last: u32,
}

impl RowRange {
    pub const fn new(first: u32, last: u32) -> Self {
        Self { first, last }
    }
}

/// A 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color(pub u32);

/// A single styling instruction applied over a range.
#[derive(Debug, Clone, PartialEq)]
pub enum StyleOp {
    Bold,
    FontSize(f64),
    Strikethrough,
    Background(Color),
    Indent(u8),
    Border(Color),
    WrapText,
    AlignTop,
}

/// The accumulated style of one cell.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CellStyle {
    pub bold: bool,
    pub font_size: Option<f64>,
    pub strikethrough: bool,
    pub background: Option<Color>,
    pub indent: u8,
    pub border: Option<Color>,
    pub wrap: bool,
    pub align_top: bool,
}

impl CellStyle {
    pub fn apply(&mut self, op: &StyleOp) {
        match op {
            StyleOp::Bold => self.bold = true,
            StyleOp::FontSize(size) => self.font_size = Some(*size),
            StyleOp::Strikethrough => self.strikethrough = true,
            StyleOp::Background(color) => self.background = Some(*color),
            StyleOp::Indent(level) => self.indent = *level,
            StyleOp::Border(color) => self.border = Some(*color),
            StyleOp::WrapText => self.wrap = true,
            StyleOp::AlignTop => self.align_top = true,
        }
    }
}

/// Output file format, selected by the export path's extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileFormat {
    /// Plain workbook (`.xlsx`).
    Xlsx,
    /// Macro-enabled workbook (`.xlsm`).
    Xlsm,
}

impl FileFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "xlsx" => Some(FileFormat::Xlsx),
            "xlsm" => Some(FileFormat::Xlsm),
            _ => None,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            FileFormat::Xlsx => "xlsx",
            FileFormat::Xlsm => "xlsm",
        }
    }

    pub fn supports_macros(&self) -> bool {
        matches!(self, FileFormat::Xlsm)
    }
}

/// The action wired to an expand/collapse control.
///
/// Flips the visibility of `rows` and turns the indicator between
/// 90 (collapsed) and 180 (expanded) degrees.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleAction {
    pub macro_name: String,
    pub rows: RowRange,
}

impl ToggleAction {
    pub fn for_rows(rows: RowRange) -> Self {
        Self {
            macro_name: format!("ToggleRows_{}_{}", rows.first + 1, rows.last + 1),
            rows,
        }
    }

    /// VBA source of the toggle routine (rows in 1-based sheet notation).
    pub fn macro_source(&self) -> String {
        format!(
            "Sub {name}()\n\
             \x20   Dim target As Range\n\
             \x20   Set target = ActiveSheet.Rows(\"{first}:{last}\")\n\
             \x20   target.Hidden = Not target.Hidden\n\
             \x20   With ActiveSheet.Shapes(Application.Caller)\n\
             \x20       If target.Hidden Then .Rotation = 90 Else .Rotation = 180\n\
             \x20   End With\n\
             End Sub\n",
            name = self.macro_name,
            first = self.rows.first + 1,
            last = self.rows.last + 1,
        )
    }
}
