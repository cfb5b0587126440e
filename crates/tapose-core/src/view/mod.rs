//! Turning a diff tree into two aligned, numbered text panels.
//!
//! The pipeline is [`project`] → [`filter`] (diff-only mode) → [`number`],
//! bundled as [`process`]. Every stage keeps the left and right sequences
//! the same length so row `i` always means the same position on both sides.

mod filter;
mod numbering;
mod project;
mod render;

use serde::{Deserialize, Serialize};

use crate::{DiffNode, ViewOptions};

pub use filter::filter;
pub use numbering::number;
pub use project::project;
pub use render::{render_side_by_side, RenderConfig};

/// Display classification of a single line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineKind {
    /// Identical on both sides.
    Unchanged,
    /// Only present on the right.
    Added,
    /// Only present on the left.
    Removed,
    /// The root braces.
    Header,
    /// Blank filler that keeps both sides aligned.
    Placeholder,
    /// Stand-in for a run of collapsed unchanged lines.
    Expandable,
}

/// Marks lines that open or close a container.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BracketRole {
    /// `{` or `[` at the end of the line.
    Opening,
    /// A lone `}` or `]`, possibly followed by a comma.
    Closing,
}

/// Inclusive bounds into the unfiltered line sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollapsedRange {
    /// First hidden row.
    pub start: usize,
    /// Last hidden row.
    pub end: usize,
}

impl CollapsedRange {
    /// Number of rows covered; `0` when `start` is past `end`.
    #[must_use]
    pub fn len(self) -> usize {
        self.end.checked_sub(self.start).map_or(0, |span| span.saturating_add(1))
    }

    /// Returns `true` when the range covers no rows.
    #[must_use]
    pub fn is_empty(self) -> bool {
        self.len() == 0
    }
}

/// Details carried by an [`LineKind::Expandable`] line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collapsed {
    /// Number of hidden rows.
    pub count: usize,
    /// Where the hidden rows sit in the unfiltered sequence.
    pub range: CollapsedRange,
}

/// One renderable row for one panel.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayLine {
    /// Line content without indentation.
    pub text: String,
    /// How the line is colored.
    pub kind: LineKind,
    /// Nesting depth; the root braces sit at 0.
    pub indent: usize,
    /// Set when the line opens or closes a container.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bracket: Option<BracketRole>,
    /// Present on expandable lines only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collapsed: Option<Collapsed>,
    /// Row index before filtering, set on every line the filter keeps.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_index: Option<usize>,
}

impl DisplayLine {
    /// Creates a plain line.
    #[must_use]
    pub fn new(text: impl Into<String>, kind: LineKind, indent: usize) -> Self {
        Self {
            text: text.into(),
            kind,
            indent,
            bracket: None,
            collapsed: None,
            original_index: None,
        }
    }

    /// Creates an empty filler line.
    #[must_use]
    pub fn placeholder(indent: usize) -> Self {
        Self::new(String::new(), LineKind::Placeholder, indent)
    }

    /// Creates the summary line for the hidden rows in `range`.
    ///
    /// ```
    /// # use tapose_core::{CollapsedRange, DisplayLine, LineKind};
    /// let line = DisplayLine::expandable(CollapsedRange { start: 1, end: 8 });
    /// assert_eq!(line.text, "... 8 same lines ...");
    /// assert_eq!(line.kind, LineKind::Expandable);
    /// assert_eq!(line.collapsed.unwrap().count, 8);
    /// ```
    #[must_use]
    pub fn expandable(range: CollapsedRange) -> Self {
        let count = range.len();
        Self {
            collapsed: Some(Collapsed { count, range }),
            ..Self::new(format!("... {count} same lines ..."), LineKind::Expandable, 0)
        }
    }

    /// Marks the line as opening or closing a container.
    #[must_use]
    pub fn with_bracket(mut self, role: BracketRole) -> Self {
        self.bracket = Some(role);
        self
    }

    /// Returns `true` for lines the context filter must keep.
    #[must_use]
    pub fn is_change(&self) -> bool {
        matches!(self.kind, LineKind::Added | LineKind::Removed)
    }
}

/// A pair of equal-length line sequences.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SideBySide {
    /// Lines for the left panel.
    pub left: Vec<DisplayLine>,
    /// Lines for the right panel.
    pub right: Vec<DisplayLine>,
}

impl SideBySide {
    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.left.len()
    }

    /// Returns `true` when there are no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.left.is_empty()
    }

    fn push_both(&mut self, line: DisplayLine) {
        self.left.push(line.clone());
        self.right.push(line);
    }
}

/// Lines and gutter numbers ready for display.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessedLines {
    /// Lines for the left panel.
    pub left: Vec<DisplayLine>,
    /// Lines for the right panel.
    pub right: Vec<DisplayLine>,
    /// Left gutter; `0` means no number.
    pub left_numbers: Vec<usize>,
    /// Right gutter; `0` means no number.
    pub right_numbers: Vec<usize>,
}

/// Runs the full display pipeline over a diff tree.
///
/// ```
/// # use tapose_core::{compare, process, Format, LineKind, ViewOptions};
/// let nodes = compare("{\"a\":1}", "{\"a\":2}", Format::Json)?;
/// let lines = process(&nodes, &ViewOptions::show_all());
/// assert_eq!(lines.left[1].text, "\"a\": 1");
/// assert_eq!(lines.right[1].kind, LineKind::Added);
/// assert_eq!(lines.left_numbers, [1, 2, 3]);
/// # Ok::<(), tapose_core::CompareError>(())
/// ```
#[must_use]
pub fn process(nodes: &[DiffNode], options: &ViewOptions) -> ProcessedLines {
    let projected = project(nodes);
    let total = projected.len();
    let SideBySide { left, right } = if options.show_only_diff() {
        filter(&projected.left, &projected.right, options.context_lines())
    } else {
        projected
    };
    let left_numbers = number(&left);
    let right_numbers = number(&right);
    tracing::debug!(
        projected = total,
        shown = left.len(),
        show_only_diff = options.show_only_diff(),
        context_lines = options.context_lines(),
        "processed display lines"
    );
    ProcessedLines { left, right, left_numbers, right_numbers }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{compare, Format};

    #[test]
    fn inverted_range_collapses_nothing() {
        let line = DisplayLine::expandable(CollapsedRange { start: 5, end: 3 });
        assert_eq!(line.collapsed.map(|c| c.count), Some(0));
        assert_eq!(line.text, "... 0 same lines ...");
        assert!(CollapsedRange { start: 5, end: 3 }.is_empty());
        assert_eq!(CollapsedRange { start: 4, end: 4 }.len(), 1);
    }

    #[test]
    fn identical_documents_collapse_to_the_root_braces() {
        let nodes = compare("{\"a\":1,\"b\":2,\"c\":3}", "{\"a\":1,\"b\":2,\"c\":3}", Format::Json)
            .unwrap();
        let lines = process(&nodes, &ViewOptions::default());
        let kinds: Vec<_> = lines.left.iter().map(|line| line.kind).collect();
        assert_eq!(kinds, [LineKind::Header, LineKind::Expandable, LineKind::Header]);
        assert_eq!(lines.left_numbers, [1, 0, 5]);
    }

    #[test]
    fn show_all_skips_the_filter() {
        let nodes = compare("{\"a\":1,\"b\":2}", "{\"a\":1,\"b\":2}", Format::Json).unwrap();
        let lines = process(&nodes, &ViewOptions::show_all());
        assert_eq!(lines.left.len(), 4);
        assert!(lines.left.iter().all(|line| line.original_index.is_none()));
    }

    #[test]
    fn processed_lines_serialize_in_camel_case() {
        let nodes = compare("{\"a\":1}", "{\"a\":1}", Format::Json).unwrap();
        let lines = process(&nodes, &ViewOptions::show_all());
        let json = serde_json::to_value(&lines).unwrap();
        assert_eq!(json["leftNumbers"], serde_json::json!([1, 2, 3]));
        assert_eq!(json["left"][0]["bracket"], "opening");
        assert_eq!(json["left"][1]["kind"], "unchanged");
    }
}
