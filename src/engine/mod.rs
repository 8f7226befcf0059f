//! The document engine capability: the only surface the renderer uses to
//! produce output.
//!
//! Bindings keep their content in a [`Sheet`] and differ only in how they
//! persist it. [`MemoryEngine`] keeps everything in memory; `XlsxEngine`
//! (feature `xlsx`) writes real `.xlsx`/`.xlsm` workbooks.

use crate::error::EngineError;
use std::path::Path;

mod memory;
mod sheet;
mod types;
#[cfg(feature = "xlsx")]
mod xlsx;

pub use memory::{MemoryDocument, MemoryEngine};
pub use sheet::{Cell, Sheet};
pub use types::*;
#[cfg(feature = "xlsx")]
pub use xlsx::{XlsxDocument, XlsxEngine};

/// Creates documents. Each call yields an isolated document.
pub trait DocumentEngine {
    type Document: Document;

    fn create_document(&self, sheet_name: &str) -> Result<Self::Document, EngineError>;

    /// Whether saved `.xlsm` documents carry working macros.
    fn supports_macro_workbooks(&self) -> bool {
        true
    }
}

/// A single-sheet spreadsheet document.
///
/// Layout operations have default implementations over [`Document::sheet_mut`];
/// bindings provide storage, persistence, visibility and release.
pub trait Document {
    fn sheet(&self) -> Option<&Sheet>;

    /// Returns the live sheet, or [`EngineError::Closed`] after `close`.
    fn sheet_mut(&mut self) -> Result<&mut Sheet, EngineError>;

    fn save(&mut self, path: &Path, format: FileFormat) -> Result<(), EngineError>;

    fn set_visible(&mut self, visible: bool);

    fn is_visible(&self) -> bool;

    /// Releases the document. Unsaved content is discarded.
    fn close(&mut self);

    fn write_cell(&mut self, cell: CellRef, value: &str) -> Result<(), EngineError> {
        self.sheet_mut()?.write(cell, value);
        Ok(())
    }

    fn merge_cells(&mut self, range: CellRange) -> Result<(), EngineError> {
        self.sheet_mut()?.merge(range);
        Ok(())
    }

    fn set_style(&mut self, range: CellRange, style: &StyleOp) -> Result<(), EngineError> {
        self.sheet_mut()?.apply_style(range, style);
        Ok(())
    }

    fn set_column_width(&mut self, col: u16, width: f64) -> Result<(), EngineError> {
        self.sheet_mut()?.set_column_width(col, width);
        Ok(())
    }

    fn set_row_height(&mut self, row: u32, height: f64) -> Result<(), EngineError> {
        self.sheet_mut()?.set_row_height(row, height);
        Ok(())
    }

    fn freeze_rows(&mut self, rows: u32) -> Result<(), EngineError> {
        self.sheet_mut()?.freeze_rows(rows);
        Ok(())
    }

    fn group_rows(&mut self, rows: RowRange) -> Result<(), EngineError> {
        if rows.last < rows.first {
            return Err(EngineError::Rejected {
                operation: "group_rows".to_string(),
                message: format!("empty row range {}..={}", rows.first, rows.last),
            });
        }
        self.sheet_mut()?.group_rows(rows);
        Ok(())
    }

    fn add_interactive_control(
        &mut self,
        anchor: CellRef,
        on_toggle: ToggleAction,
    ) -> Result<(), EngineError> {
        self.sheet_mut()?.add_control(anchor, on_toggle);
        Ok(())
    }
}

/// Scoped ownership of a created document.
///
/// Dropping the session closes the document, so every exit path releases it.
/// [`DocumentSession::hand_back`] is the one way to keep a document alive.
pub struct DocumentSession<D: Document> {
    document: Option<D>,
}

impl<D: Document> DocumentSession<D> {
    pub fn new(document: D) -> Self {
        Self {
            document: Some(document),
        }
    }

    pub fn document(&mut self) -> Result<&mut D, EngineError> {
        self.document.as_mut().ok_or(EngineError::Closed)
    }

    /// Returns the document if it was made visible; closes it otherwise.
    pub fn hand_back(mut self) -> Option<D> {
        match self.document.take() {
            Some(document) if document.is_visible() => Some(document),
            Some(mut document) => {
                document.close();
                None
            }
            None => None,
        }
    }
}

impl<D: Document> Drop for DocumentSession<D> {
    fn drop(&mut self) {
        if let Some(mut document) = self.document.take() {
            log::debug!("Releasing document session");
            document.close();
        }
    }
}
