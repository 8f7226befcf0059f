//! Prelude module for convenient imports
//!
//! Re-exports the types needed to resolve an input, flatten it and render it
//! into a document.
//!
//! # Example
//!
//! ```rust,no_run
//! use tasksheet::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let sequence = InputSource::File("path/to/sequence.xml".into()).resolve(None)?;
//! let flattened = flatten(&sequence.root);
//! for row in &flattened.rows {
//!     println!("{}{} [{}]", "  ".repeat(row.depth), row.name, row.type_label);
//! }
//! # Ok(())
//! # }
//! ```

// Pipeline
pub use crate::export::{ExportOutcome, Exporter, ExporterBuilder};
pub use crate::flatten::{FlattenOptions, FlattenedSequence, GroupSpan, Row, RowKind, flatten, flatten_with};
pub use crate::input::{InputSource, IntoSequence, ResolvedSequence, TaskSequencePackage};
pub use crate::render::{ExportOptions, LogProgress, NoProgress, ProgressReporter, Renderer};

// Model
pub use crate::model::{Condition, Expression, Group, Node, OperatorKind, Step, Variable};

// Formatting
pub use crate::format::{friendly_name, render_condition};

// Document engines
pub use crate::engine::{Document, DocumentEngine, FileFormat, MemoryEngine};
#[cfg(feature = "xlsx")]
pub use crate::engine::XlsxEngine;

// Error types
pub use crate::error::{EngineError, ExportError, InputError};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
