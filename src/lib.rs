//! # Tasksheet - Task Sequence Spreadsheet Renderer
//!
//! **Tasksheet** turns a hierarchical task-sequence definition (an XML tree of
//! nested `group` and `step` nodes with conditions and settings) into a
//! formatted spreadsheet for human review.
//!
//! ## Core Workflow
//!
//! 1.  **Resolve Input**: An [`InputSource`](input::InputSource) (raw XML, a file path, or an
//!     exported [`TaskSequencePackage`](input::TaskSequencePackage)) is parsed into an immutable
//!     tree of [`Node`](model::Node)s.
//! 2.  **Flatten**: The tree is walked depth-first in preorder into [`Row`](flatten::Row)s,
//!     with the row span of every group recorded for grouping and controls.
//! 3.  **Render**: The [`Renderer`](render::Renderer) writes the title, headers and one row per
//!     entry through a [`Document`](engine::Document), then applies colors, indentation,
//!     borders, sizing, a frozen header and optional row grouping or expand controls.
//! 4.  **Persist**: The document is saved to the export path and/or handed back
//!     for the user to keep.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use tasksheet::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let xml = std::fs::read_to_string("sequence.xml")?;
//!
//!     let exporter = Exporter::builder(XlsxEngine::new())
//!         .export_path("sequence.xlsx")
//!         .display_name("Windows 11 Deployment")
//!         .row_grouping(true)
//!         .build();
//!
//!     let outcome = exporter.export(InputSource::Xml(xml))?;
//!     println!(
//!         "Wrote {} groups and {} steps",
//!         outcome.summary.groups, outcome.summary.steps
//!     );
//!     Ok(())
//! }
//! ```

pub mod engine;
pub mod error;
pub mod export;
pub mod flatten;
pub mod format;
pub mod input;
pub mod model;
pub mod prelude;
pub mod render;
