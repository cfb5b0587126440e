//! Structural side-by-side comparison of JSON and YAML documents.
//!
//! `tapose-core` parses two documents, diffs them key by key, and lays the
//! result out as two aligned, numbered panels with unchanged runs folded
//! away. A single-document outline, a scroll coordinator for the two panels
//! and an editing session round out the pieces a front end needs.
//!
//! ```
//! use tapose_core::{compare, process, render_side_by_side, Format, RenderConfig, ViewOptions};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let nodes = compare(
//!         "{\"name\":\"tapose\",\"version\":1}",
//!         "{\"name\":\"tapose\",\"version\":2}",
//!         Format::Json,
//!     )?;
//!     let lines = process(&nodes, &ViewOptions::show_all());
//!     assert_eq!(lines.left.len(), lines.right.len());
//!
//!     let rendered = render_side_by_side(&lines, &RenderConfig::default());
//!     assert!(rendered.contains("-   \"version\": 1"));
//!     assert!(rendered.contains("+   \"version\": 2"));
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod diff;
pub mod document;
mod error;
pub mod number;
mod options;
pub mod scroll;
pub mod session;
pub mod tree;
pub mod value;
pub mod view;

pub use diff::{compare, DiffKind, DiffNode, DiffStats};
pub use document::Format;
pub use error::{CompareError, OptionsError, ParseError};
pub use options::{ViewOptions, CONTEXT_LINE_CHOICES};
pub use scroll::{ScrollCommand, ScrollCoordinator, ScrollPosition};
pub use session::{CompareSession, Side};
pub use tree::{build_tree, render_tree, TreeNode, ValueType};
pub use view::{
    filter, number, process, project, render_side_by_side, BracketRole, Collapsed, CollapsedRange,
    DisplayLine, LineKind, ProcessedLines, RenderConfig, SideBySide,
};

/// Returns the semantic version of the `tapose-core` crate.
///
/// ```
/// assert!(!tapose_core::version().is_empty());
/// ```
#[must_use]
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
