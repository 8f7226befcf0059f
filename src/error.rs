use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while resolving and reading the task-sequence input.
#[derive(Error, Debug, Clone)]
pub enum InputError {
    #[error("Input file '{}' does not exist", .0.display())]
    NotFound(PathBuf),

    #[error("Malformed task sequence XML: {0}")]
    Malformed(String),

    #[error("Failed to read input: {0}")]
    Io(String),
}

/// Errors raised by a document engine binding.
#[derive(Error, Debug, Clone)]
pub enum EngineError {
    #[error("Document engine rejected '{operation}': {message}")]
    Rejected { operation: String, message: String },

    #[error("Document has already been closed")]
    Closed,

    #[error("Document engine I/O failure: {0}")]
    Io(String),
}

/// Errors surfaced by a full export run.
#[derive(Error, Debug, Clone)]
pub enum ExportError {
    #[error("Input not found: '{}'", .0.display())]
    NotFound(PathBuf),

    #[error("Malformed input: {0}")]
    MalformedInput(String),

    #[error("Invalid export configuration: {0}")]
    Configuration(String),

    #[error("Document engine failure: {0}")]
    ExternalEngine(#[from] EngineError),
}

impl From<InputError> for ExportError {
    fn from(err: InputError) -> Self {
        match err {
            InputError::NotFound(path) => ExportError::NotFound(path),
            InputError::Malformed(message) => ExportError::MalformedInput(message),
            InputError::Io(message) => {
                ExportError::MalformedInput(format!("could not read input: {}", message))
            }
        }
    }
}
