use crate::engine::{DocumentEngine, FileFormat};
use crate::error::ExportError;
use std::path::PathBuf;

/// User-facing export settings.
#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Destination workbook; its extension selects the file format.
    pub export_path: Option<PathBuf>,
    /// Title for XML and file inputs. Ignored for task-sequence packages.
    pub display_name: Option<String>,
    /// Keep the document open for the user after it is generated.
    pub show: bool,
    /// Add an expand/collapse control per group (macro-enabled output only).
    pub expand_controls: bool,
    /// Outline each group's rows with native row grouping.
    pub row_grouping: bool,
    pub hide_progress: bool,
    /// Include the "Continue on Error" column.
    pub continue_on_error_column: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            export_path: None,
            display_name: None,
            show: false,
            expand_controls: false,
            row_grouping: false,
            hide_progress: false,
            continue_on_error_column: true,
        }
    }
}

/// Layout switches consumed by the renderer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    pub expand_controls: bool,
    pub row_grouping: bool,
    pub continue_on_error_column: bool,
}

/// Options after validation, with auto-corrections applied.
#[derive(Debug, Clone)]
pub struct ValidatedOptions {
    pub export: Option<(PathBuf, FileFormat)>,
    pub show: bool,
    pub hide_progress: bool,
    pub render: RenderOptions,
    /// Non-fatal corrections made during validation.
    pub warnings: Vec<String>,
}

impl ExportOptions {
    /// Checks the options before any document is created.
    ///
    /// A missing export path forces `show`; a macro-enabled path without
    /// controls only warns. Controls with a plain `.xlsx` path fail, as do
    /// controls or `.xlsm` paths on an engine without macro workbooks.
    pub fn validate<E: DocumentEngine + ?Sized>(
        &self,
        engine: &E,
    ) -> Result<ValidatedOptions, ExportError> {
        let mut warnings = Vec::new();
        let mut show = self.show;

        if self.expand_controls && !engine.supports_macro_workbooks() {
            return Err(ExportError::Configuration(
                "expand controls need macro support, but the document engine has no VBA project"
                    .to_string(),
            ));
        }

        let export = match &self.export_path {
            Some(path) => {
                let format = FileFormat::from_path(path).ok_or_else(|| {
                    ExportError::Configuration(format!(
                        "export path '{}' must end in .xlsx or .xlsm",
                        path.display()
                    ))
                })?;
                if self.expand_controls && !format.supports_macros() {
                    return Err(ExportError::Configuration(format!(
                        "expand controls require a macro-enabled .xlsm export path, got '{}'",
                        path.display()
                    )));
                }
                if format.supports_macros() && !engine.supports_macro_workbooks() {
                    return Err(ExportError::Configuration(format!(
                        "'{}' is macro-enabled, but the document engine has no VBA project",
                        path.display()
                    )));
                }
                if format.supports_macros() && !self.expand_controls {
                    warnings.push(format!(
                        "'{}' is macro-enabled but expand controls were not requested; exporting without controls",
                        path.display()
                    ));
                }
                Some((path.clone(), format))
            }
            None => {
                if !show {
                    warnings.push(
                        "No export path given; showing the document so it can be saved manually"
                            .to_string(),
                    );
                    show = true;
                }
                None
            }
        };

        for warning in &warnings {
            log::warn!("{}", warning);
        }

        Ok(ValidatedOptions {
            export,
            show,
            hide_progress: self.hide_progress,
            render: RenderOptions {
                expand_controls: self.expand_controls,
                row_grouping: self.row_grouping,
                continue_on_error_column: self.continue_on_error_column,
            },
            warnings,
        })
    }
}
