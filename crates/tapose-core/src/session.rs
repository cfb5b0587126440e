//! Editing state behind a two-panel comparison.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{document, CompareError, DiffNode, Format};

/// One of the two inputs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// The original document.
    Left,
    /// The document it is compared against.
    Right,
}

impl Side {
    /// Returns the opposite side.
    #[must_use]
    pub fn other(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Left => f.write_str("left"),
            Side::Right => f.write_str("right"),
        }
    }
}

#[derive(Debug, Default)]
enum Outcome {
    #[default]
    Pending,
    Diff(Vec<DiffNode>),
    Failed(CompareError),
}

#[derive(Debug, Default)]
struct Input {
    text: String,
    error: Option<String>,
}

/// Both input texts, their validation state, and the latest comparison.
///
/// A session holds either a diff result or a compare error, never both.
///
/// ```
/// # use tapose_core::{CompareSession, DiffKind, Format, Side};
/// let mut session = CompareSession::new(Format::Json);
/// session.set_text(Side::Left, "{\"a\":1}");
/// session.set_text(Side::Right, "{\"a\":2}");
/// let nodes = session.compare().unwrap();
/// assert_eq!(nodes[0].kind, DiffKind::Changed);
/// assert!(session.error().is_none());
/// ```
#[derive(Debug, Default)]
pub struct CompareSession {
    format: Format,
    left: Input,
    right: Input,
    outcome: Outcome,
}

impl CompareSession {
    /// Creates an empty session for `format`.
    #[must_use]
    pub fn new(format: Format) -> Self {
        Self { format, ..Self::default() }
    }

    /// The document format both inputs are parsed as.
    #[must_use]
    pub fn format_kind(&self) -> Format {
        self.format
    }

    /// Current text of one side.
    #[must_use]
    pub fn text(&self, side: Side) -> &str {
        &self.input(side).text
    }

    /// Validation message for one side, if it last failed to parse.
    #[must_use]
    pub fn side_error(&self, side: Side) -> Option<&str> {
        self.input(side).error.as_deref()
    }

    /// The latest diff, if the last comparison succeeded.
    #[must_use]
    pub fn result(&self) -> Option<&[DiffNode]> {
        match &self.outcome {
            Outcome::Diff(nodes) => Some(nodes),
            Outcome::Pending | Outcome::Failed(_) => None,
        }
    }

    /// The latest compare error, if the last comparison failed.
    #[must_use]
    pub fn error(&self) -> Option<&CompareError> {
        match &self.outcome {
            Outcome::Failed(err) => Some(err),
            Outcome::Pending | Outcome::Diff(_) => None,
        }
    }

    /// Replaces one side's text and clears its validation message.
    pub fn set_text(&mut self, side: Side, text: impl Into<String>) {
        let input = self.input_mut(side);
        input.text = text.into();
        input.error = None;
    }

    /// Replaces both texts at once, dropping every message and the last
    /// result.
    pub fn load(&mut self, left: impl Into<String>, right: impl Into<String>) {
        self.left = Input { text: left.into(), error: None };
        self.right = Input { text: right.into(), error: None };
        self.outcome = Outcome::Pending;
    }

    /// Checks one side the way an editor does on blur. Blank text is left
    /// alone.
    pub fn validate(&mut self, side: Side) {
        let format = self.format;
        let input = self.input_mut(side);
        if input.text.trim().is_empty() {
            return;
        }
        input.error = document::validate(&input.text, format);
    }

    /// Runs the comparison and stores its outcome.
    pub fn compare(&mut self) -> Result<&[DiffNode], &CompareError> {
        self.outcome = match crate::compare(&self.left.text, &self.right.text, self.format) {
            Ok(nodes) => Outcome::Diff(nodes),
            Err(err) => {
                tracing::debug!(error = %err, "comparison failed");
                Outcome::Failed(err)
            }
        };
        match &self.outcome {
            Outcome::Diff(nodes) => Ok(nodes),
            Outcome::Failed(err) => Err(err),
            Outcome::Pending => Ok(&[]),
        }
    }

    /// Pretty-prints one side in place. Invalid text is kept as typed and
    /// the parser message is stored as that side's error.
    pub fn format(&mut self, side: Side) {
        let format = self.format;
        let input = self.input_mut(side);
        if input.text.trim().is_empty() {
            return;
        }
        match document::format_document(&input.text, format) {
            Ok(pretty) => {
                input.text = pretty;
                input.error = None;
            }
            Err(err) => input.error = Some(err.to_string()),
        }
    }

    /// Resets both inputs and forgets the last comparison.
    pub fn clear(&mut self) {
        *self = Self::new(self.format);
    }

    fn input(&self, side: Side) -> &Input {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    fn input_mut(&mut self, side: Side) -> &mut Input {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }
}
