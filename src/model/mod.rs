//! Schema inference over aggregated raw data.
//!
//! `infer` reduces a raw data map to the (attribute, type) pairs observed
//! per subcategory; `columns` collapses those sets into one type per
//! attribute; `generate` renders the result to schema-definition files.

pub mod columns;
pub mod generate;

pub use columns::{resolve_columns, BufferSink, ColumnSpec, LogSink, WarningSink};
pub use generate::{
    write_schema_file, ClusteringKey, OverwritePolicy, SortOrder, TableModel,
};

use crate::aggregate::RawDataMap;
use crate::record::RawValue;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Coarse data types used for schema generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TypeTag {
    /// Plain text.
    Text,
    /// Signed integer.
    Integer,
    /// Boolean.
    Boolean,
    /// Nested mapping.
    Map,
    /// Ordered sequence.
    List,
}

impl TypeTag {
    /// The tag describing a raw value.
    ///
    /// Closed mapping over the raw-value vocabulary; parsers have already
    /// rejected everything outside it.
    pub fn of(value: &RawValue) -> TypeTag {
        match value {
            RawValue::Text(_) => TypeTag::Text,
            RawValue::Integer(_) => TypeTag::Integer,
            RawValue::Boolean(_) => TypeTag::Boolean,
            RawValue::Map(_) => TypeTag::Map,
            RawValue::List(_) => TypeTag::List,
        }
    }

    /// Convert tag to string identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            TypeTag::Text => "Text",
            TypeTag::Integer => "Integer",
            TypeTag::Boolean => "Boolean",
            TypeTag::Map => "Map",
            TypeTag::List => "List",
        }
    }
}

/// The (attribute, type) pairs observed across one subcategory's records.
///
/// Set semantics: the same attribute may appear with several tags when
/// records disagree. That disagreement is kept as signal for
/// `resolve_columns`, not collapsed here.
pub type AttributeTypeSet = BTreeSet<(String, TypeTag)>;

/// Inference output: category → subcategory → observed attribute/type set.
pub type AttributeMap = BTreeMap<String, BTreeMap<String, AttributeTypeSet>>;

/// Infer the attribute/type sets of every subcategory in `raw`.
///
/// Attribute names are lower-cased regardless of source casing. Pure
/// function of its input: no I/O, and running it twice yields identical
/// results.
pub fn infer(raw: &RawDataMap) -> AttributeMap {
    let mut attributes = AttributeMap::new();
    for (category, subcategories) in raw {
        let by_subcategory = attributes.entry(category.clone()).or_default();
        for (subcategory, records) in subcategories {
            let set = by_subcategory.entry(subcategory.clone()).or_default();
            for record in records.values() {
                for (attribute, value) in record {
                    set.insert((attribute.to_lowercase(), TypeTag::of(value)));
                }
            }
        }
    }
    attributes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::RawRecord;

    fn raw_fixture() -> RawDataMap {
        let mut quince = RawRecord::new();
        quince.insert("latin".to_string(), RawValue::text("Cydonia oblonga"));
        quince.insert("common_names".to_string(), RawValue::text_list(["Quince"]));
        quince.insert("usda_hardiness".to_string(), RawValue::text("4"));

        let mut juneberry = RawRecord::new();
        juneberry.insert(
            "latin".to_string(),
            RawValue::text("Armelancher canadensis"),
        );
        juneberry.insert(
            "common_names".to_string(),
            RawValue::text_list(["Juneberry", "Serviceberry"]),
        );
        juneberry.insert("USDA_hardiness".to_string(), RawValue::Integer(4));

        let mut records = BTreeMap::new();
        records.insert("Cydonia_oblonga".to_string(), quince);
        records.insert("Armelancher_canadensis".to_string(), juneberry);

        let mut subcategories = BTreeMap::new();
        subcategories.insert("fruiting_trees".to_string(), records);
        subcategories.insert("plant_matrix".to_string(), BTreeMap::new());

        let mut raw = RawDataMap::new();
        raw.insert("crawford".to_string(), subcategories);
        raw
    }

    #[test]
    fn test_conflicting_types_both_kept() {
        let attributes = infer(&raw_fixture());
        let set = &attributes["crawford"]["fruiting_trees"];

        assert!(set.contains(&("usda_hardiness".to_string(), TypeTag::Text)));
        assert!(set.contains(&("usda_hardiness".to_string(), TypeTag::Integer)));
    }

    #[test]
    fn test_attribute_names_lowercased() {
        let attributes = infer(&raw_fixture());
        let set = &attributes["crawford"]["fruiting_trees"];

        assert!(set
            .iter()
            .all(|(attribute, _)| attribute == &attribute.to_lowercase()));
    }

    #[test]
    fn test_identical_pairs_deduplicated() {
        let attributes = infer(&raw_fixture());
        let set = &attributes["crawford"]["fruiting_trees"];

        // both records contribute ("latin", Text) exactly once
        let latin: Vec<_> = set.iter().filter(|(a, _)| a == "latin").collect();
        assert_eq!(latin.len(), 1);
    }

    #[test]
    fn test_empty_subcategory_present_with_empty_set() {
        let attributes = infer(&raw_fixture());
        assert!(attributes["crawford"]["plant_matrix"].is_empty());
    }

    #[test]
    fn test_infer_is_idempotent() {
        let raw = raw_fixture();
        assert_eq!(infer(&raw), infer(&raw));
    }

    #[test]
    fn test_tag_of_covers_vocabulary() {
        assert_eq!(TypeTag::of(&RawValue::text("x")), TypeTag::Text);
        assert_eq!(TypeTag::of(&RawValue::Integer(1)), TypeTag::Integer);
        assert_eq!(TypeTag::of(&RawValue::Boolean(true)), TypeTag::Boolean);
        assert_eq!(TypeTag::of(&RawValue::List(vec![])), TypeTag::List);
        assert_eq!(TypeTag::of(&RawValue::Map(BTreeMap::new())), TypeTag::Map);
    }
}
