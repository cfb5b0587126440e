use serde::{Deserialize, Serialize};

use crate::OptionsError;

/// Context radii offered to the user, smallest first.
pub const CONTEXT_LINE_CHOICES: [usize; 6] = [0, 1, 2, 3, 5, 10];

/// Configuration knobs for turning a diff into display lines.
///
/// Deserializes from camelCase JSON so it can be passed on the command line:
///
/// ```
/// # use tapose_core::ViewOptions;
/// let opts = ViewOptions::from_json_str(r#"{"showOnlyDiff":false,"contextLines":5}"#)?;
/// assert!(!opts.show_only_diff());
/// assert_eq!(opts.context_lines(), 5);
/// # Ok::<(), tapose_core::OptionsError>(())
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawViewOptions")]
pub struct ViewOptions {
    show_only_diff: bool,
    context_lines: usize,
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self { show_only_diff: true, context_lines: 3 }
    }
}

// Wire shape before validation.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RawViewOptions {
    show_only_diff: bool,
    context_lines: usize,
}

impl Default for RawViewOptions {
    fn default() -> Self {
        let ViewOptions { show_only_diff, context_lines } = ViewOptions::default();
        Self { show_only_diff, context_lines }
    }
}

impl TryFrom<RawViewOptions> for ViewOptions {
    type Error = OptionsError;

    fn try_from(raw: RawViewOptions) -> Result<Self, Self::Error> {
        let opts = Self { show_only_diff: raw.show_only_diff, context_lines: raw.context_lines };
        opts.validate()?;
        Ok(opts)
    }
}

impl ViewOptions {
    /// Options that skip the context filter entirely.
    ///
    /// ```
    /// # use tapose_core::ViewOptions;
    /// assert!(!ViewOptions::show_all().show_only_diff());
    /// ```
    #[must_use]
    pub fn show_all() -> Self {
        Self { show_only_diff: false, ..Self::default() }
    }

    /// Decodes and validates options from a JSON object.
    pub fn from_json_str(text: &str) -> Result<Self, OptionsError> {
        let raw: RawViewOptions =
            serde_json::from_str(text).map_err(|err| OptionsError::Decode(err.to_string()))?;
        Self::try_from(raw)
    }

    /// Returns `true` when unchanged runs are collapsed.
    #[must_use]
    pub fn show_only_diff(&self) -> bool {
        self.show_only_diff
    }

    /// Returns the number of unchanged lines kept around each change.
    #[must_use]
    pub fn context_lines(&self) -> usize {
        self.context_lines
    }

    /// Toggles diff-only mode.
    #[must_use]
    pub fn with_show_only_diff(mut self, show_only_diff: bool) -> Self {
        self.show_only_diff = show_only_diff;
        self
    }

    /// Sets the context radius.
    ///
    /// ```
    /// # use tapose_core::{OptionsError, ViewOptions};
    /// let opts = ViewOptions::default().with_context_lines(10)?;
    /// assert_eq!(opts.context_lines(), 10);
    /// assert_eq!(
    ///     ViewOptions::default().with_context_lines(4),
    ///     Err(OptionsError::UnsupportedContextLines { value: 4 })
    /// );
    /// # Ok::<(), OptionsError>(())
    /// ```
    pub fn with_context_lines(mut self, context_lines: usize) -> Result<Self, OptionsError> {
        self.context_lines = context_lines;
        self.validate()?;
        Ok(self)
    }

    fn validate(&self) -> Result<(), OptionsError> {
        if !CONTEXT_LINE_CHOICES.contains(&self.context_lines) {
            return Err(OptionsError::UnsupportedContextLines { value: self.context_lines });
        }
        Ok(())
    }
}
