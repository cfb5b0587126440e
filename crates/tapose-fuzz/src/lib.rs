//! Fuzzing harnesses for `tapose-core`.
//!
//! Each public function accepts raw bytes so it can be driven both from
//! `cargo fuzz` targets and from plain unit tests. Recoverable errors are
//! swallowed; broken invariants panic.
//!
//! # Examples
//!
//! Run the parse harness on a JSON snippet:
//!
//! ```
//! tapose_fuzz::fuzz_parse(b"{\"a\":1}");
//! ```
//!
//! Drive the compare pipeline with deterministic input:
//!
//! ```
//! tapose_fuzz::fuzz_compare(&[1, 2, 3, 4]);
//! ```
#![forbid(unsafe_code)]
#![warn(missing_docs)]

use arbitrary::Unstructured;
use serde_json::{Map as JsonMap, Number as JsonNumber, Value as JsonValue};
use tapose_core::{
    build_tree, diff::diff, document, filter, number, project, render_tree, Format,
    CONTEXT_LINE_CHOICES,
};

const DEPTH_LIMIT: usize = 4;
const WIDTH_LIMIT: u8 = 6;
const TEXT_LIMIT: u8 = 12;

// A small key pool so both documents share keys and every diff kind shows up.
const KEY_POOL: [&str; 8] = ["id", "name", "tags", "meta", "a", "b", "\"q\"", "ünï"];

/// Feeds arbitrary bytes through the JSON and YAML parsers, and checks that
/// anything that parses survives pretty-printing unchanged.
///
/// ```
/// tapose_fuzz::fuzz_parse(b"key: value\n");
/// ```
pub fn fuzz_parse(data: &[u8]) {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    for format in [Format::Json, Format::Yaml] {
        let Ok(value) = document::parse(text, format) else {
            continue;
        };
        let _ = render_tree(&build_tree(&value, None));
        if let Ok(formatted) = document::format_document(text, format) {
            let reparsed = document::parse(&formatted, format)
                .unwrap_or_else(|err| panic!("formatted {format} failed to parse: {err}"));
            assert_eq!(reparsed, value, "{format} formatting changed the document");
        }
    }
}

/// Diffs two random documents and checks the display invariants.
///
/// ```
/// tapose_fuzz::fuzz_compare(b"seed");
/// ```
pub fn fuzz_compare(data: &[u8]) {
    let mut source = Unstructured::new(data);
    let (Ok(lhs), Ok(rhs)) = (random_object(&mut source, 0), random_object(&mut source, 0)) else {
        return;
    };
    let radius = source.choose(&CONTEXT_LINE_CHOICES).copied().unwrap_or(3);

    let nodes = diff(Some(&lhs), Some(&rhs));
    let lines = project(&nodes);
    assert_eq!(lines.left.len(), lines.right.len(), "projected sides differ in length");

    if lhs == rhs {
        assert!(lines.left.iter().all(|line| !line.is_change()), "identical inputs show changes");
    }

    let filtered = filter(&lines.left, &lines.right, radius);
    assert_eq!(filtered.left.len(), filtered.right.len(), "filtered sides differ in length");
    for (row, line) in lines.left.iter().enumerate() {
        if line.is_change() || lines.right[row].is_change() {
            assert!(
                filtered.left.iter().any(|kept| kept.original_index == Some(row)),
                "changed row {row} was collapsed"
            );
        }
    }

    for side in [&filtered.left, &filtered.right] {
        let numbers: Vec<usize> = number(side).into_iter().filter(|&n| n > 0).collect();
        assert!(numbers.windows(2).all(|pair| pair[0] < pair[1]), "line numbers not increasing");
    }
}

fn random_object(
    source: &mut Unstructured<'_>,
    depth: usize,
) -> Result<JsonMap<String, JsonValue>, arbitrary::Error> {
    let width = source.int_in_range::<u8>(0..=WIDTH_LIMIT)?;
    let mut object = JsonMap::new();
    for _ in 0..width {
        let key = if source.ratio(3u8, 4u8)? {
            (*source.choose(&KEY_POOL)?).to_owned()
        } else {
            random_text(source)?
        };
        object.insert(key, random_value(source, depth + 1)?);
    }
    Ok(object)
}

fn random_value(source: &mut Unstructured<'_>, depth: usize) -> Result<JsonValue, arbitrary::Error> {
    let nested = depth < DEPTH_LIMIT && source.ratio(1u8, 3u8)?;
    if !nested {
        return random_scalar(source);
    }
    if source.arbitrary()? {
        let width = source.int_in_range::<u8>(0..=WIDTH_LIMIT)?;
        (0..width)
            .map(|_| random_value(source, depth + 1))
            .collect::<Result<Vec<_>, _>>()
            .map(JsonValue::Array)
    } else {
        random_object(source, depth).map(JsonValue::Object)
    }
}

fn random_scalar(source: &mut Unstructured<'_>) -> Result<JsonValue, arbitrary::Error> {
    Ok(match source.int_in_range::<u8>(0..=4)? {
        0 => JsonValue::Null,
        1 => JsonValue::Bool(source.arbitrary()?),
        2 => JsonValue::Number(JsonNumber::from(source.int_in_range::<i64>(-3..=3)?)),
        3 => JsonValue::Number(random_fraction(source)?),
        _ => JsonValue::String(random_text(source)?),
    })
}

// Halves and quarters keep `1` and `1.0` colliding now and then.
fn random_fraction(source: &mut Unstructured<'_>) -> Result<JsonNumber, arbitrary::Error> {
    let numerator = f64::from(source.int_in_range::<i16>(-16..=16)?);
    let divisor = f64::from(*source.choose(&[1u8, 2, 4])?);
    JsonNumber::from_f64(numerator / divisor).ok_or(arbitrary::Error::IncorrectFormat)
}

fn random_text(source: &mut Unstructured<'_>) -> Result<String, arbitrary::Error> {
    let len = source.int_in_range::<u8>(0..=TEXT_LIMIT)?;
    (0..len).map(|_| source.int_in_range::<u8>(b' '..=b'~').map(char::from)).collect()
}
