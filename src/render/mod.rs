//! Writes flattened rows into a document and applies the sheet layout.

use crate::engine::{CellRange, CellRef, Document, RowRange, StyleOp, ToggleAction};
use crate::error::EngineError;
use crate::flatten::{FlattenedSequence, Row, RowKind};
use crate::format::format_datetime;
use chrono::{DateTime, Local};

pub mod layout;
mod options;
mod progress;

pub use layout::Column;
pub use options::{ExportOptions, RenderOptions, ValidatedOptions};
pub use progress::{LogProgress, NoProgress, ProgressReporter};

use layout::*;
use progress::percent_of;

/// Renders a flattened sequence onto a document through the engine capability.
pub struct Renderer {
    options: RenderOptions,
    columns: Vec<Column>,
}

impl Renderer {
    pub fn new(options: RenderOptions) -> Self {
        Self {
            columns: Column::layout(options.continue_on_error_column),
            options,
        }
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Zero-based index of `column` in this layout.
    pub fn column_index(&self, column: Column) -> Option<u16> {
        self.columns
            .iter()
            .position(|c| *c == column)
            .map(|i| i as u16)
    }

    /// Sheet row of the flattened row at `index`.
    pub fn sheet_row(index: usize) -> u32 {
        DATA_START_ROW + index as u32
    }

    /// Populates and styles `document`. `sequence` must have been flattened
    /// with one extra base depth level when expand controls are enabled.
    pub fn render<D: Document + ?Sized>(
        &self,
        document: &mut D,
        title: &str,
        last_updated: &DateTime<Local>,
        sequence: &FlattenedSequence,
        progress: &mut dyn ProgressReporter,
    ) -> Result<(), EngineError> {
        self.write_title(document, title, last_updated)?;
        self.write_headers(document)?;

        let total = sequence.rows.len();
        for (index, row) in sequence.rows.iter().enumerate() {
            self.write_row(document, Self::sheet_row(index), row)?;
            progress.report(
                percent_of(index + 1, total),
                &format!("Writing row {} of {}: {}", index + 1, total, row.name),
            );
        }

        self.apply_borders(document, total)?;
        self.apply_sizing(document, sequence)?;
        document.freeze_rows(DATA_START_ROW)?;

        if self.options.row_grouping {
            self.apply_row_grouping(document, sequence)?;
        }
        if self.options.expand_controls {
            self.add_controls(document, sequence)?;
        }

        progress.report(100, "Complete");
        Ok(())
    }

    fn last_col(&self) -> u16 {
        self.columns.len().saturating_sub(1) as u16
    }

    fn write_title<D: Document + ?Sized>(
        &self,
        document: &mut D,
        title: &str,
        last_updated: &DateTime<Local>,
    ) -> Result<(), EngineError> {
        let text = format!(
            "{} (Last updated: {})",
            title,
            format_datetime(&last_updated.naive_local())
        );
        let range = CellRange::row(TITLE_ROW, 0, self.last_col());
        document.write_cell(range.first, &text)?;
        document.merge_cells(range)?;
        document.set_style(range, &StyleOp::Bold)?;
        document.set_style(range, &StyleOp::FontSize(TITLE_FONT_SIZE))
    }

    fn write_headers<D: Document + ?Sized>(&self, document: &mut D) -> Result<(), EngineError> {
        for (col, column) in self.columns.iter().enumerate() {
            document.write_cell(CellRef::new(HEADER_ROW, col as u16), column.header())?;
        }
        document.set_style(
            CellRange::row(HEADER_ROW, 0, self.last_col()),
            &StyleOp::Bold,
        )
    }

    fn cell_text<'r>(column: Column, row: &'r Row) -> &'r str {
        match column {
            Column::Name => &row.name,
            Column::Type => &row.type_label,
            Column::Description => &row.description,
            Column::Conditions => &row.condition_text,
            Column::ContinueOnError if row.continue_on_error => "Yes",
            Column::ContinueOnError => "",
            Column::Settings => &row.settings,
        }
    }

    fn write_row<D: Document + ?Sized>(
        &self,
        document: &mut D,
        sheet_row: u32,
        row: &Row,
    ) -> Result<(), EngineError> {
        for (col, column) in self.columns.iter().enumerate() {
            let text = Self::cell_text(*column, row);
            if !text.is_empty() {
                document.write_cell(CellRef::new(sheet_row, col as u16), text)?;
            }
        }

        let whole_row = CellRange::row(sheet_row, 0, self.last_col());
        let background = match (row.kind, row.disabled) {
            (RowKind::Group, false) => GROUP_BACKGROUND,
            (RowKind::Group, true) => GROUP_DISABLED_BACKGROUND,
            (RowKind::Step, false) => STEP_BACKGROUND,
            (RowKind::Step, true) => STEP_DISABLED_BACKGROUND,
        };
        document.set_style(whole_row, &StyleOp::Background(background))?;
        document.set_style(whole_row, &StyleOp::WrapText)?;
        document.set_style(whole_row, &StyleOp::AlignTop)?;

        if row.depth > 0 {
            let indent = row.depth.min(u8::MAX as usize) as u8;
            document.set_style(
                CellRange::single(CellRef::new(sheet_row, 0)),
                &StyleOp::Indent(indent),
            )?;
        }

        match row.kind {
            RowKind::Group => {
                document.set_style(CellRange::row(sheet_row, 0, 1), &StyleOp::Bold)?;
            }
            RowKind::Step if row.disabled => {
                document.set_style(whole_row, &StyleOp::Strikethrough)?;
            }
            RowKind::Step => {}
        }
        Ok(())
    }

    fn apply_borders<D: Document + ?Sized>(
        &self,
        document: &mut D,
        rows: usize,
    ) -> Result<(), EngineError> {
        let last_row = Self::sheet_row(rows).saturating_sub(1).max(HEADER_ROW);
        document.set_style(
            CellRange::new(HEADER_ROW, 0, last_row, self.last_col()),
            &StyleOp::Border(BORDER_COLOR),
        )
    }

    /// Auto-sizes columns from their content, then clamps widths and row heights.
    fn apply_sizing<D: Document + ?Sized>(
        &self,
        document: &mut D,
        sequence: &FlattenedSequence,
    ) -> Result<(), EngineError> {
        let mut widths = Vec::with_capacity(self.columns.len());
        for (col, column) in self.columns.iter().enumerate() {
            let content_width = sequence
                .rows
                .iter()
                .map(|row| {
                    let indent = if *column == Column::Name {
                        row.depth as f64 * INDENT_WIDTH
                    } else {
                        0.0
                    };
                    longest_line(Self::cell_text(*column, row)) as f64 + indent
                })
                .fold(column.header().chars().count() as f64, f64::max);
            let mut width = (content_width + COLUMN_PADDING).max(MIN_COLUMN_WIDTH);
            if let Some(max) = column.max_width() {
                width = width.min(max);
            }
            document.set_column_width(col as u16, width)?;
            widths.push(width);
        }

        for (index, row) in sequence.rows.iter().enumerate() {
            let lines = self
                .columns
                .iter()
                .zip(&widths)
                .map(|(column, width)| wrapped_lines(Self::cell_text(*column, row), *width))
                .max()
                .unwrap_or(1)
                .max(1);
            let height = (lines as f64 * LINE_HEIGHT).min(MAX_ROW_HEIGHT);
            document.set_row_height(Self::sheet_row(index), height)?;
        }
        Ok(())
    }

    fn apply_row_grouping<D: Document + ?Sized>(
        &self,
        document: &mut D,
        sequence: &FlattenedSequence,
    ) -> Result<(), EngineError> {
        for span in sequence.spans().filter(|span| !span.is_empty()) {
            let level = self.nesting_level(&sequence.rows[span.group_row]);
            if level > MAX_OUTLINE_LEVEL {
                log::debug!(
                    "Skipping row grouping for '{}': nesting level {} exceeds {}",
                    sequence.rows[span.group_row].name,
                    level,
                    MAX_OUTLINE_LEVEL
                );
                continue;
            }
            document.group_rows(RowRange::new(
                Self::sheet_row(span.first_child_row),
                Self::sheet_row(span.last_row),
            ))?;
        }
        Ok(())
    }

    fn add_controls<D: Document + ?Sized>(
        &self,
        document: &mut D,
        sequence: &FlattenedSequence,
    ) -> Result<(), EngineError> {
        for span in sequence.spans().filter(|span| !span.is_empty()) {
            let rows = RowRange::new(
                Self::sheet_row(span.first_child_row),
                Self::sheet_row(span.last_row),
            );
            document.add_interactive_control(
                CellRef::new(Self::sheet_row(span.group_row), 0),
                ToggleAction::for_rows(rows),
            )?;
        }
        Ok(())
    }

    /// 1-based outline level of the rows inside the group at `row`.
    fn nesting_level(&self, row: &Row) -> usize {
        let base = usize::from(self.options.expand_controls);
        row.depth.saturating_sub(base) + 1
    }
}

fn longest_line(text: &str) -> usize {
    text.lines().map(|line| line.chars().count()).max().unwrap_or(0)
}

/// Lines `text` occupies once wrapped at roughly `width` characters.
fn wrapped_lines(text: &str, width: f64) -> usize {
    let width = width.max(1.0) as usize;
    text.lines()
        .map(|line| line.chars().count().div_ceil(width).max(1))
        .sum::<usize>()
}
