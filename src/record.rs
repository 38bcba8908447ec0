//! Raw record values.
//!
//! A record is the decoded content of exactly one source file: a flat
//! mapping from attribute name to value. The value vocabulary is a closed
//! set; parsers reject anything outside it instead of coercing.

use serde::Serialize;
use std::collections::BTreeMap;

/// A single decoded attribute value.
///
/// Values serialize without a tag, so a record renders as plain JSON/YAML
/// (`{"common_names": ["Quince"], "usda_hardiness": "4"}`).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RawValue {
    /// Plain text.
    Text(String),
    /// Signed integer.
    Integer(i64),
    /// Boolean.
    Boolean(bool),
    /// Ordered sequence of values.
    List(Vec<RawValue>),
    /// Nested mapping.
    Map(BTreeMap<String, RawValue>),
}

impl RawValue {
    /// Shorthand for a text value.
    pub fn text(value: impl Into<String>) -> RawValue {
        RawValue::Text(value.into())
    }

    /// Shorthand for a list of text entries.
    pub fn text_list<I, S>(entries: I) -> RawValue
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        RawValue::List(entries.into_iter().map(RawValue::text).collect())
    }
}

/// One decoded source file: attribute name → value.
///
/// Immutable once produced by a record parser.
pub type RawRecord = BTreeMap<String, RawValue>;
