//! Benchmark corpora for the tapose diff engine.
//!
//! Each corpus is a pair of synthetic JSON documents built in memory, so the
//! Criterion groups in `benches/` need no fixture files on disk.
//!
//! # Examples
//!
//! ```
//! let corpus = tapose_benches::available_corpora()
//!     .into_iter()
//!     .find(|c| c.name() == "flat-config")
//!     .unwrap();
//! assert!(corpus.fixture_bytes() > 0);
//! ```
#![forbid(unsafe_code)]
#![warn(missing_docs)]

use serde_json::{json, Map, Value};
use tapose_core::{CompareError, DiffNode, Format};

/// A named pair of documents to compare.
#[derive(Clone, Debug)]
pub struct Corpus {
    name: &'static str,
    left: String,
    right: String,
}

impl Corpus {
    fn new(name: &'static str, left: &Value, right: &Value) -> Self {
        Self { name, left: left.to_string(), right: right.to_string() }
    }

    /// Short identifier used as the benchmark id.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Left document text.
    #[must_use]
    pub fn left(&self) -> &str {
        &self.left
    }

    /// Right document text.
    #[must_use]
    pub fn right(&self) -> &str {
        &self.right
    }

    /// Combined size of both documents.
    #[must_use]
    pub fn fixture_bytes(&self) -> usize {
        self.left.len() + self.right.len()
    }

    /// Diffs the two documents as JSON.
    ///
    /// # Errors
    ///
    /// Returns the compare error if either document is rejected.
    pub fn diff(&self) -> Result<Vec<DiffNode>, CompareError> {
        tapose_core::compare(&self.left, &self.right, Format::Json)
    }
}

/// Indicates whether Criterion benchmarks have corpora to run against.
#[must_use]
pub fn is_ready() -> bool {
    !available_corpora().is_empty()
}

/// Every registered corpus, smallest first.
#[must_use]
pub fn available_corpora() -> Vec<Corpus> {
    vec![flat_config(), nested_catalog(), long_list()]
}

fn flat_config() -> Corpus {
    let left: Map<String, Value> =
        (0..200).map(|i| (format!("setting_{i:03}"), json!(i))).collect();
    let mut right = left.clone();
    for i in (0..200).step_by(25) {
        right.insert(format!("setting_{i:03}"), json!(format!("changed-{i}")));
    }
    right.remove("setting_199");
    right.insert("setting_new".to_owned(), json!(true));
    Corpus::new("flat-config", &Value::Object(left), &Value::Object(right))
}

fn nested_catalog() -> Corpus {
    let product = |id: usize, price: f64| {
        json!({
            "id": id,
            "name": format!("product {id}"),
            "price": price,
            "tags": ["a", "b", "c"],
            "stock": { "warehouse": id % 7, "shelf": format!("S-{id}") },
        })
    };
    let left: Vec<Value> = (0..60).map(|id| product(id, 9.5)).collect();
    let right: Vec<Value> =
        (0..60).map(|id| product(id, if id % 10 == 0 { 11.0 } else { 9.5 })).collect();
    Corpus::new(
        "nested-catalog",
        &json!({ "catalog": { "products": left }, "version": 1 }),
        &json!({ "catalog": { "products": right }, "version": 2 }),
    )
}

fn long_list() -> Corpus {
    let left: Vec<Value> = (0..1_000).map(|i| json!(i)).collect();
    let mut right = left.clone();
    right.truncate(990);
    right.extend((0..20).map(|i| json!(format!("tail-{i}"))));
    Corpus::new("long-list", &json!({ "items": left }), &json!({ "items": right }))
}
