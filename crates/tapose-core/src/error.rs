use thiserror::Error;

use crate::{Format, Side};

/// Errors that can occur while turning document text into a value tree.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The provided JSON input was invalid.
    #[error("{0}")]
    Json(#[from] serde_json::Error),
    /// The provided YAML input was invalid.
    #[error("{0}")]
    Yaml(#[from] serde_yaml::Error),
    /// YAML allows `.inf` and `.nan`, which have no JSON representation.
    #[error("number {value} cannot be represented in a JSON document")]
    NotFinite {
        /// The offending numeric value.
        value: f64,
    },
    /// YAML mapping keys must be scalars to become object keys.
    #[error("unsupported YAML key: {found}")]
    NonScalarKey {
        /// A description of the key that triggered the error.
        found: String,
    },
}

/// Errors reported by [`crate::compare`] before the diff engine runs.
///
/// Every variant is recoverable: the caller shows the message and waits for
/// the input to change.
#[derive(Debug, Error)]
pub enum CompareError {
    /// One or both inputs are empty or whitespace-only.
    #[error("Both input fields are required")]
    BothRequired,
    /// One input failed to parse; the parser message is kept verbatim.
    #[error("Invalid {format} in {side} input: {source}")]
    Parse {
        /// The side whose text failed to parse.
        side: Side,
        /// The document format that was expected.
        format: Format,
        /// The underlying parser error.
        #[source]
        source: ParseError,
    },
    /// A root value was an array, a primitive, or null.
    #[error("{format} must be an object at the root level, not an array or primitive")]
    RootShape {
        /// The document format being compared.
        format: Format,
    },
}

/// Errors emitted when constructing [`crate::ViewOptions`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum OptionsError {
    /// The context radius is not one of the offered choices.
    #[error("context lines must be one of 0, 1, 2, 3, 5 or 10 (got {value})")]
    UnsupportedContextLines {
        /// The rejected value.
        value: usize,
    },
    /// `ViewOptions` JSON could not be decoded.
    #[error("invalid view options: {0}")]
    Decode(String),
}
