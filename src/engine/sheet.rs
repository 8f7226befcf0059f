use super::types::{CellRange, CellRef, CellStyle, RowRange, StyleOp, ToggleAction};
use std::collections::BTreeMap;

/// One cell's text and style.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cell {
    pub value: String,
    pub style: CellStyle,
}

/// In-memory content of a worksheet, shared by all engine bindings.
#[derive(Debug, Clone, Default)]
pub struct Sheet {
    name: String,
    cells: BTreeMap<CellRef, Cell>,
    merges: Vec<CellRange>,
    column_widths: BTreeMap<u16, f64>,
    row_heights: BTreeMap<u32, f64>,
    frozen_rows: u32,
    row_groups: Vec<RowRange>,
    controls: Vec<(CellRef, ToggleAction)>,
}

impl Sheet {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn write(&mut self, cell: CellRef, value: &str) {
        self.cells.entry(cell).or_default().value = value.to_string();
    }

    pub fn merge(&mut self, range: CellRange) {
        self.merges.push(range);
    }

    /// Applies `op` to every cell in `range`, creating blank cells as needed.
    pub fn apply_style(&mut self, range: CellRange, op: &StyleOp) {
        for cell in range.cells() {
            self.cells.entry(cell).or_default().style.apply(op);
        }
    }

    pub fn set_column_width(&mut self, col: u16, width: f64) {
        self.column_widths.insert(col, width);
    }

    pub fn set_row_height(&mut self, row: u32, height: f64) {
        self.row_heights.insert(row, height);
    }

    pub fn freeze_rows(&mut self, rows: u32) {
        self.frozen_rows = rows;
    }

    pub fn group_rows(&mut self, rows: RowRange) {
        self.row_groups.push(rows);
    }

    pub fn add_control(&mut self, anchor: CellRef, action: ToggleAction) {
        self.controls.push((anchor, action));
    }

    pub fn cell(&self, cell: CellRef) -> Option<&Cell> {
        self.cells.get(&cell)
    }

    /// The text written to `cell`, if any.
    pub fn cell_text(&self, cell: CellRef) -> Option<&str> {
        self.cells
            .get(&cell)
            .map(|c| c.value.as_str())
            .filter(|v| !v.is_empty())
    }

    pub fn cells(&self) -> impl Iterator<Item = (&CellRef, &Cell)> {
        self.cells.iter()
    }

    pub fn merges(&self) -> &[CellRange] {
        &self.merges
    }

    /// The merged range whose top-left cell is `cell`.
    pub fn merge_anchored_at(&self, cell: CellRef) -> Option<&CellRange> {
        self.merges.iter().find(|range| range.first == cell)
    }

    pub fn is_merged(&self, cell: CellRef) -> bool {
        self.merges.iter().any(|range| range.contains(cell))
    }

    pub fn column_width(&self, col: u16) -> Option<f64> {
        self.column_widths.get(&col).copied()
    }

    pub fn column_widths(&self) -> impl Iterator<Item = (u16, f64)> {
        self.column_widths.iter().map(|(col, width)| (*col, *width))
    }

    pub fn row_height(&self, row: u32) -> Option<f64> {
        self.row_heights.get(&row).copied()
    }

    pub fn row_heights(&self) -> impl Iterator<Item = (u32, f64)> {
        self.row_heights.iter().map(|(row, height)| (*row, *height))
    }

    pub fn frozen_rows(&self) -> u32 {
        self.frozen_rows
    }

    pub fn row_groups(&self) -> &[RowRange] {
        &self.row_groups
    }

    pub fn controls(&self) -> &[(CellRef, ToggleAction)] {
        &self.controls
    }

    /// The last row holding any cell, or `None` for an empty sheet.
    pub fn last_row(&self) -> Option<u32> {
        self.cells.keys().map(|cell| cell.row).max()
    }
}
