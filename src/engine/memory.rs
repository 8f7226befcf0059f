use super::sheet::Sheet;
use super::types::FileFormat;
use super::{Document, DocumentEngine};
use crate::error::EngineError;
use std::cell::Cell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

/// A document engine that keeps documents in memory.
///
/// Saving only records the requested destination. Useful for dry runs and
/// for inspecting rendered output.
#[derive(Debug, Clone, Default)]
pub struct MemoryEngine {
    reject_saves: bool,
    no_macro_workbooks: bool,
    created_documents: Rc<Cell<usize>>,
    open_documents: Rc<Cell<usize>>,
}

impl MemoryEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// An engine whose documents refuse every save.
    pub fn rejecting_saves() -> Self {
        Self {
            reject_saves: true,
            ..Self::default()
        }
    }

    /// An engine that cannot produce macro-enabled workbooks.
    pub fn without_macro_workbooks() -> Self {
        Self {
            no_macro_workbooks: true,
            ..Self::default()
        }
    }

    /// Number of documents created so far.
    pub fn created_documents(&self) -> usize {
        self.created_documents.get()
    }

    /// Number of created documents that have not been closed yet.
    pub fn open_documents(&self) -> usize {
        self.open_documents.get()
    }
}

impl DocumentEngine for MemoryEngine {
    type Document = MemoryDocument;

    fn create_document(&self, sheet_name: &str) -> Result<MemoryDocument, EngineError> {
        self.created_documents.set(self.created_documents.get() + 1);
        self.open_documents.set(self.open_documents.get() + 1);
        Ok(MemoryDocument {
            sheet: Some(Sheet::new(sheet_name)),
            visible: false,
            saved: Vec::new(),
            reject_saves: self.reject_saves,
            open_documents: Rc::clone(&self.open_documents),
        })
    }

    fn supports_macro_workbooks(&self) -> bool {
        !self.no_macro_workbooks
    }
}

/// A document produced by [`MemoryEngine`].
#[derive(Debug)]
pub struct MemoryDocument {
    sheet: Option<Sheet>,
    visible: bool,
    saved: Vec<(PathBuf, FileFormat)>,
    reject_saves: bool,
    open_documents: Rc<Cell<usize>>,
}

impl MemoryDocument {
    /// Every `save` call that succeeded, in order.
    pub fn saved(&self) -> &[(PathBuf, FileFormat)] {
        &self.saved
    }

    pub fn is_closed(&self) -> bool {
        self.sheet.is_none()
    }
}

impl Document for MemoryDocument {
    fn sheet(&self) -> Option<&Sheet> {
        self.sheet.as_ref()
    }

    fn sheet_mut(&mut self) -> Result<&mut Sheet, EngineError> {
        self.sheet.as_mut().ok_or(EngineError::Closed)
    }

    fn save(&mut self, path: &Path, format: FileFormat) -> Result<(), EngineError> {
        if self.sheet.is_none() {
            return Err(EngineError::Closed);
        }
        if self.reject_saves {
            return Err(EngineError::Rejected {
                operation: "save".to_string(),
                message: format!("refusing to write '{}'", path.display()),
            });
        }
        self.saved.push((path.to_path_buf(), format));
        Ok(())
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    fn is_visible(&self) -> bool {
        self.visible
    }

    fn close(&mut self) {
        if self.sheet.take().is_some() {
            self.open_documents
                .set(self.open_documents.get().saturating_sub(1));
        }
    }
}
