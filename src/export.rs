//! The end-to-end pipeline: validate, resolve, flatten, render, persist.

use crate::engine::{Document, DocumentEngine, DocumentSession};
use crate::error::ExportError;
use crate::flatten::{FlattenOptions, FlattenSummary, flatten_with};
use crate::input::{InputSource, ResolvedSequence};
use crate::render::layout::sheet_name;
use crate::render::{
    ExportOptions, LogProgress, NoProgress, ProgressReporter, Renderer, ValidatedOptions,
};
use std::path::PathBuf;

/// The result of a successful export.
#[derive(Debug)]
pub struct ExportOutcome<D> {
    pub title: String,
    /// The live document, present when it was left visible for the user.
    pub document: Option<D>,
    pub saved_to: Option<PathBuf>,
    pub summary: FlattenSummary,
    /// Non-fatal corrections applied to the options.
    pub warnings: Vec<String>,
}

/// Converts task sequences into spreadsheet documents using a document engine.
pub struct Exporter<E: DocumentEngine> {
    engine: E,
    options: ExportOptions,
}

/// Builder for [`Exporter`].
pub struct ExporterBuilder<E: DocumentEngine> {
    engine: E,
    options: ExportOptions,
}

impl<E: DocumentEngine> ExporterBuilder<E> {
    pub fn new(engine: E) -> Self {
        Self {
            engine,
            options: ExportOptions::default(),
        }
    }

    pub fn export_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.options.export_path = Some(path.into());
        self
    }

    pub fn display_name(mut self, name: impl Into<String>) -> Self {
        self.options.display_name = Some(name.into());
        self
    }

    pub fn show(mut self, show: bool) -> Self {
        self.options.show = show;
        self
    }

    pub fn expand_controls(mut self, enabled: bool) -> Self {
        self.options.expand_controls = enabled;
        self
    }

    pub fn row_grouping(mut self, enabled: bool) -> Self {
        self.options.row_grouping = enabled;
        self
    }

    pub fn hide_progress(mut self, hide: bool) -> Self {
        self.options.hide_progress = hide;
        self
    }

    pub fn continue_on_error_column(mut self, enabled: bool) -> Self {
        self.options.continue_on_error_column = enabled;
        self
    }

    pub fn options(mut self, options: ExportOptions) -> Self {
        self.options = options;
        self
    }

    pub fn build(self) -> Exporter<E> {
        Exporter {
            engine: self.engine,
            options: self.options,
        }
    }
}

impl<E: DocumentEngine> Exporter<E> {
    pub fn builder(engine: E) -> ExporterBuilder<E> {
        ExporterBuilder::new(engine)
    }

    pub fn new(engine: E, options: ExportOptions) -> Self {
        Self { engine, options }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn options(&self) -> &ExportOptions {
        &self.options
    }

    /// Runs the export, reporting progress through the `log` facade.
    pub fn export(&self, source: InputSource) -> Result<ExportOutcome<E::Document>, ExportError> {
        self.export_with_progress(source, &mut LogProgress)
    }

    /// Runs the export with a caller-supplied progress reporter.
    ///
    /// Options and input are fully checked before the document is created.
    pub fn export_with_progress(
        &self,
        source: InputSource,
        progress: &mut dyn ProgressReporter,
    ) -> Result<ExportOutcome<E::Document>, ExportError> {
        let validated = self.options.validate(&self.engine)?;
        let sequence = source.resolve(self.options.display_name.as_deref())?;
        self.render_sequence(&sequence, validated, progress)
    }

    fn render_sequence(
        &self,
        sequence: &ResolvedSequence,
        validated: ValidatedOptions,
        progress: &mut dyn ProgressReporter,
    ) -> Result<ExportOutcome<E::Document>, ExportError> {
        let base_depth = usize::from(validated.render.expand_controls);
        let flattened = flatten_with(&sequence.root, FlattenOptions { base_depth });
        let summary = flattened.summary();
        log::info!(
            "Flattened '{}': {} rows ({} groups, {} steps, {} disabled)",
            sequence.title,
            flattened.len(),
            summary.groups,
            summary.steps,
            summary.disabled
        );

        let mut session =
            DocumentSession::new(self.engine.create_document(&sheet_name(&sequence.title))?);
        let document = session.document()?;
        let renderer = Renderer::new(validated.render);
        let last_updated = &sequence.last_updated;
        if validated.hide_progress {
            renderer.render(document, &sequence.title, last_updated, &flattened, &mut NoProgress)?;
        } else {
            renderer.render(document, &sequence.title, last_updated, &flattened, progress)?;
        }

        if let Some((path, format)) = &validated.export {
            document.save(path, *format)?;
        }
        document.set_visible(validated.show);

        Ok(ExportOutcome {
            title: sequence.title.clone(),
            document: session.hand_back(),
            saved_to: validated.export.map(|(path, _)| path),
            summary,
            warnings: validated.warnings,
        })
    }
}
