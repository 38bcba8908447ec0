//! YAML record parser.
//!
//! Records keep their native typing: strings, integers, booleans, sequences
//! and nested mappings. The accepted kinds are a closed set; floats, nulls
//! and tagged values are rejected rather than coerced.

use crate::error::{Result, UnderstoryError};
use crate::record::{RawRecord, RawValue};
use serde_yaml::Value;
use std::collections::BTreeMap;
use std::path::Path;

/// Parse a YAML record.
///
/// The document must be a mapping with string keys. Key casing is
/// preserved; lower-casing happens later, during schema inference.
pub fn parse(path: &Path, bytes: &[u8]) -> Result<RawRecord> {
    let document: Value =
        serde_yaml::from_slice(bytes).map_err(|e| UnderstoryError::MalformedRecord {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    let Value::Mapping(mapping) = document else {
        return Err(UnderstoryError::MalformedRecord {
            path: path.to_path_buf(),
            message: "top-level value is not a mapping".to_string(),
        });
    };

    let mut record = RawRecord::new();
    for (key, value) in mapping {
        let Value::String(key) = key else {
            return Err(UnderstoryError::MalformedRecord {
                path: path.to_path_buf(),
                message: "non-string attribute name".to_string(),
            });
        };
        let converted = convert(path, &key, value)?;
        record.insert(key, converted);
    }

    Ok(record)
}

/// Convert a YAML value into the closed raw-value vocabulary.
fn convert(path: &Path, attribute: &str, value: Value) -> Result<RawValue> {
    match value {
        Value::String(text) => Ok(RawValue::Text(text)),
        Value::Bool(flag) => Ok(RawValue::Boolean(flag)),
        Value::Number(number) => number
            .as_i64()
            .map(RawValue::Integer)
            .ok_or_else(|| reject(path, attribute, "non-integer number")),
        Value::Sequence(items) => items
            .into_iter()
            .map(|item| convert(path, attribute, item))
            .collect::<Result<Vec<_>>>()
            .map(RawValue::List),
        Value::Mapping(mapping) => {
            let mut nested = BTreeMap::new();
            for (key, value) in mapping {
                let Value::String(key) = key else {
                    return Err(reject(path, attribute, "non-string key in nested mapping"));
                };
                let value = convert(path, &key, value)?;
                nested.insert(key, value);
            }
            Ok(RawValue::Map(nested))
        }
        Value::Null => Err(reject(path, attribute, "null value")),
        Value::Tagged(_) => Err(reject(path, attribute, "tagged value")),
    }
}

fn reject(path: &Path, attribute: &str, kind: &str) -> UnderstoryError {
    UnderstoryError::MalformedRecord {
        path: path.to_path_buf(),
        message: format!("attribute '{attribute}': {kind} is outside the supported value kinds"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn parse_str(text: &str) -> Result<RawRecord> {
        parse(&PathBuf::from("record.yml"), text.as_bytes())
    }

    #[test]
    fn test_parse_typed_record() {
        let record = parse_str(
            "common_names:\n  - PawPaw\n  - Pawpaw\nUSDA_hardiness: 5\nevergreen: false\n",
        )
        .unwrap();

        assert_eq!(
            record.get("common_names"),
            Some(&RawValue::text_list(["PawPaw", "Pawpaw"]))
        );
        // native typing preserved, no string coercion
        assert_eq!(record.get("USDA_hardiness"), Some(&RawValue::Integer(5)));
        assert_eq!(record.get("evergreen"), Some(&RawValue::Boolean(false)));
    }

    #[test]
    fn test_key_casing_preserved() {
        let record = parse_str("USDA_hardiness: 5\n").unwrap();
        assert!(record.contains_key("USDA_hardiness"));
        assert!(!record.contains_key("usda_hardiness"));
    }

    #[test]
    fn test_nested_mapping() {
        let record = parse_str("hardiness:\n  min: 4\n  max: 8\n").unwrap();
        let mut expected = BTreeMap::new();
        expected.insert("min".to_string(), RawValue::Integer(4));
        expected.insert("max".to_string(), RawValue::Integer(8));
        assert_eq!(record.get("hardiness"), Some(&RawValue::Map(expected)));
    }

    #[test]
    fn test_float_rejected() {
        let err = parse_str("height_m: 4.5\n").unwrap_err();
        assert!(matches!(err, UnderstoryError::MalformedRecord { .. }));
        assert!(err.to_string().contains("height_m"));
    }

    #[test]
    fn test_null_rejected() {
        let err = parse_str("notes:\n").unwrap_err();
        assert!(err.to_string().contains("null value"));
    }

    #[test]
    fn test_non_mapping_document_rejected() {
        let err = parse_str("- just\n- a\n- list\n").unwrap_err();
        assert!(err.to_string().contains("not a mapping"));
    }

    #[test]
    fn test_invalid_yaml_rejected() {
        let err = parse_str("latin: [unclosed\n").unwrap_err();
        assert!(matches!(err, UnderstoryError::MalformedRecord { .. }));
    }
}
