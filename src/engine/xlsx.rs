use super::sheet::Sheet;
use super::types::{CellStyle, FileFormat};
use super::{Document, DocumentEngine};
use crate::error::EngineError;
use itertools::Itertools;
use rust_xlsxwriter::{Button, Color, Format, FormatAlign, FormatBorder, Workbook, XlsxError};
use std::fs;
use std::path::{Path, PathBuf};

/// Writes documents as Excel workbooks through `rust_xlsxwriter`.
#[derive(Debug, Clone, Default)]
pub struct XlsxEngine {
    vba_project: Option<PathBuf>,
}

impl XlsxEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Embeds a compiled `vbaProject.bin` into macro-enabled workbooks.
    ///
    /// Without one the engine only writes plain `.xlsx` workbooks.
    pub fn with_vba_project(mut self, path: impl Into<PathBuf>) -> Self {
        self.vba_project = Some(path.into());
        self
    }
}

impl DocumentEngine for XlsxEngine {
    type Document = XlsxDocument;

    fn create_document(&self, sheet_name: &str) -> Result<XlsxDocument, EngineError> {
        Ok(XlsxDocument {
            sheet: Some(Sheet::new(sheet_name)),
            visible: false,
            vba_project: self.vba_project.clone(),
        })
    }

    fn supports_macro_workbooks(&self) -> bool {
        self.vba_project.is_some()
    }
}

/// A workbook buffered in memory until it is saved.
#[derive(Debug)]
pub struct XlsxDocument {
    sheet: Option<Sheet>,
    visible: bool,
    vba_project: Option<PathBuf>,
}

impl Document for XlsxDocument {
    fn sheet(&self) -> Option<&Sheet> {
        self.sheet.as_ref()
    }

    fn sheet_mut(&mut self) -> Result<&mut Sheet, EngineError> {
        self.sheet.as_mut().ok_or(EngineError::Closed)
    }

    fn save(&mut self, path: &Path, format: FileFormat) -> Result<(), EngineError> {
        let sheet = self.sheet.as_ref().ok_or(EngineError::Closed)?;
        let mut workbook = build_workbook(sheet)?;

        if format.supports_macros() {
            let project = self.vba_project.as_ref().ok_or_else(|| EngineError::Rejected {
                operation: "save".to_string(),
                message: format!(
                    "'{}' is macro-enabled but no VBA project was supplied",
                    path.display()
                ),
            })?;
            workbook
                .add_vba_project(project)
                .map_err(rejected("add_vba_project"))?;
            write_macro_module(sheet, path)?;
        }

        workbook.save(path).map_err(rejected("save"))?;
        log::info!("Saved workbook to '{}'", path.display());
        Ok(())
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    fn is_visible(&self) -> bool {
        self.visible
    }

    fn close(&mut self) {
        self.sheet = None;
    }
}

fn build_workbook(sheet: &Sheet) -> Result<Workbook, EngineError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet
        .set_name(sheet.name())
        .map_err(rejected("set_name"))?;

    for (cell, content) in sheet.cells() {
        let format = to_format(&content.style);
        if let Some(range) = sheet.merge_anchored_at(*cell) {
            worksheet
                .merge_range(
                    range.first.row,
                    range.first.col,
                    range.last.row,
                    range.last.col,
                    &content.value,
                    &format,
                )
                .map_err(rejected("merge_range"))?;
        } else if sheet.is_merged(*cell) {
            continue;
        } else if content.value.is_empty() {
            worksheet
                .write_blank(cell.row, cell.col, &format)
                .map_err(rejected("write_blank"))?;
        } else {
            worksheet
                .write_string_with_format(cell.row, cell.col, &content.value, &format)
                .map_err(rejected("write_string"))?;
        }
    }

    for (col, width) in sheet.column_widths() {
        worksheet
            .set_column_width(col, width)
            .map_err(rejected("set_column_width"))?;
    }
    for (row, height) in sheet.row_heights() {
        worksheet
            .set_row_height(row, height)
            .map_err(rejected("set_row_height"))?;
    }
    if sheet.frozen_rows() > 0 {
        worksheet
            .set_freeze_panes(sheet.frozen_rows(), 0)
            .map_err(rejected("set_freeze_panes"))?;
    }
    for rows in sheet.row_groups() {
        worksheet
            .group_rows(rows.first, rows.last)
            .map_err(rejected("group_rows"))?;
    }
    for (anchor, action) in sheet.controls() {
        let button = Button::new()
            .set_caption("-")
            .set_macro(&action.macro_name);
        worksheet
            .insert_button(anchor.row, anchor.col, &button)
            .map_err(rejected("insert_button"))?;
    }

    Ok(workbook)
}

fn to_format(style: &CellStyle) -> Format {
    let mut format = Format::new();
    if style.bold {
        format = format.set_bold();
    }
    if let Some(size) = style.font_size {
        format = format.set_font_size(size);
    }
    if style.strikethrough {
        format = format.set_font_strikethrough();
    }
    if let Some(color) = style.background {
        format = format.set_background_color(Color::RGB(color.0));
    }
    if style.indent > 0 {
        format = format.set_indent(style.indent);
    }
    if let Some(color) = style.border {
        format = format
            .set_border(FormatBorder::Thin)
            .set_border_color(Color::RGB(color.0));
    }
    if style.wrap {
        format = format.set_text_wrap();
    }
    if style.align_top {
        format = format.set_align(FormatAlign::Top);
    }
    format
}

/// Writes the toggle routines next to the workbook as an importable module.
fn write_macro_module(sheet: &Sheet, workbook_path: &Path) -> Result<(), EngineError> {
    if sheet.controls().is_empty() {
        return Ok(());
    }
    let module = sheet
        .controls()
        .iter()
        .map(|(_, action)| action.macro_source())
        .join("\n");
    let module_path = workbook_path.with_extension("bas");
    fs::write(
        &module_path,
        format!("Attribute VB_Name = \"SequenceToggles\"\n{}", module),
    )
    .map_err(|e| EngineError::Io(format!("'{}': {}", module_path.display(), e)))?;
    log::info!("Wrote toggle macros to '{}'", module_path.display());
    Ok(())
}

fn rejected(operation: &'static str) -> impl Fn(XlsxError) -> EngineError {
    move |e| EngineError::Rejected {
        operation: operation.to_string(),
        message: e.to_string(),
    }
}
