//! Parsing, validation and pretty-printing of JSON and YAML documents.
//!
//! Both formats land in the same value model, `serde_json::Value`, with
//! object keys kept in document order.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};
use serde_yaml::Value as YamlValue;

use crate::{number::normalize_f64, ParseError};

/// The two document syntaxes understood by the comparer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// Strict JSON.
    #[default]
    Json,
    /// YAML 1.2 (with the common 1.1 scalars accepted by `serde_yaml`).
    Yaml,
}

impl Format {
    /// Guesses the format from a file extension, defaulting to JSON.
    ///
    /// ```
    /// # use tapose_core::Format;
    /// use std::path::Path;
    /// assert_eq!(Format::from_path(Path::new("config.yml")), Format::Yaml);
    /// assert_eq!(Format::from_path(Path::new("data.json")), Format::Json);
    /// ```
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        let extension = path.extension().and_then(|ext| ext.to_str()).map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("yaml") | Some("yml") => Self::Yaml,
            _ => Self::Json,
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Format::Json => f.write_str("JSON"),
            Format::Yaml => f.write_str("YAML"),
        }
    }
}

/// Parses document text into a value tree.
///
/// Invalid syntax is always an error; partial data is never returned.
///
/// ```
/// # use tapose_core::{document, Format};
/// let value = document::parse("name: tapose\nversion: 2\n", Format::Yaml)?;
/// assert_eq!(value["version"], 2);
/// # Ok::<(), tapose_core::ParseError>(())
/// ```
pub fn parse(text: &str, format: Format) -> Result<JsonValue, ParseError> {
    match format {
        Format::Json => Ok(serde_json::from_str(text)?),
        Format::Yaml => {
            let value: YamlValue = serde_yaml::from_str(text)?;
            from_yaml_value(value)
        }
    }
}

/// Checks document text the way an editor does on blur.
///
/// Empty or whitespace-only text counts as valid so half-typed input is not
/// flagged; otherwise the parser's message is returned verbatim.
#[must_use]
pub fn validate(text: &str, format: Format) -> Option<String> {
    if text.trim().is_empty() {
        return None;
    }
    parse(text, format).err().map(|err| err.to_string())
}

/// Re-emits a document in canonical pretty form: two-space indented JSON, or
/// block-style YAML. Parsing the result yields the same value tree.
///
/// ```
/// # use tapose_core::{document, Format};
/// let pretty = document::format_document("{\"a\":[1,2]}", Format::Json)?;
/// assert_eq!(pretty, "{\n  \"a\": [\n    1,\n    2\n  ]\n}");
/// # Ok::<(), tapose_core::ParseError>(())
/// ```
pub fn format_document(text: &str, format: Format) -> Result<String, ParseError> {
    let value = parse(text, format)?;
    match format {
        Format::Json => Ok(serde_json::to_string_pretty(&value)?),
        Format::Yaml => Ok(serde_yaml::to_string(&value)?),
    }
}

/// Returns the root object when the value is a plain (non-array, non-null)
/// object.
#[must_use]
pub fn as_root_object(value: &JsonValue) -> Option<&Map<String, JsonValue>> {
    value.as_object()
}

fn from_yaml_value(value: YamlValue) -> Result<JsonValue, ParseError> {
    match value {
        YamlValue::Null => Ok(JsonValue::Null),
        YamlValue::Bool(v) => Ok(JsonValue::Bool(v)),
        YamlValue::Number(num) => {
            if let Some(i) = num.as_i64() {
                return Ok(JsonValue::Number(i.into()));
            }
            if let Some(u) = num.as_u64() {
                return Ok(JsonValue::Number(u.into()));
            }
            let f = num.as_f64().unwrap_or(f64::NAN);
            Ok(JsonValue::Number(normalize_f64(f)?))
        }
        YamlValue::String(s) => Ok(JsonValue::String(s)),
        YamlValue::Sequence(seq) => {
            let mut items = Vec::with_capacity(seq.len());
            for value in seq {
                items.push(from_yaml_value(value)?);
            }
            Ok(JsonValue::Array(items))
        }
        YamlValue::Mapping(map) => {
            let mut object = Map::with_capacity(map.len());
            for (key, value) in map {
                object.insert(yaml_key(key)?, from_yaml_value(value)?);
            }
            Ok(JsonValue::Object(object))
        }
        YamlValue::Tagged(tagged) => from_yaml_value(tagged.value),
    }
}

fn yaml_key(key: YamlValue) -> Result<String, ParseError> {
    match key {
        YamlValue::String(s) => Ok(s),
        YamlValue::Number(n) => Ok(n.to_string()),
        YamlValue::Bool(b) => Ok(b.to_string()),
        YamlValue::Null => Ok("null".to_string()),
        YamlValue::Tagged(tagged) => yaml_key(tagged.value),
        other => Err(ParseError::NonScalarKey { found: format!("{other:?}") }),
    }
}
