//! Delimited key-value record parser.
//!
//! Record files carry a `[default]` section of `key = value` pairs. Keys
//! are lower-cased, values are kept as text verbatim after trimming. The
//! designated `common_names` field is re-parsed as a comma-separated list
//! with empty entries discarded.

use crate::error::{Result, UnderstoryError};
use crate::record::{RawRecord, RawValue};
use std::path::Path;

/// The section holding record attributes. Other sections are ignored.
const DEFAULT_SECTION: &str = "default";

/// The one designated multi-value field.
pub const LIST_FIELD: &str = "common_names";

/// Parse a delimited key-value record.
///
/// Accepts `key = value` and `key: value` pairs; `#` and `;` start comment
/// lines. A pair before any section header, a line that is neither header,
/// comment, blank nor pair, or a missing `[default]` section is
/// `MalformedRecord`.
pub fn parse(path: &Path, bytes: &[u8]) -> Result<RawRecord> {
    let text = std::str::from_utf8(bytes).map_err(|e| UnderstoryError::MalformedRecord {
        path: path.to_path_buf(),
        message: format!("not valid UTF-8: {e}"),
    })?;

    let mut record = RawRecord::new();
    let mut section: Option<String> = None;
    let mut saw_default = false;

    for (idx, line) in text.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with(';') {
            continue;
        }

        if trimmed.starts_with('[') {
            let Some(name) = trimmed
                .strip_prefix('[')
                .and_then(|rest| rest.strip_suffix(']'))
            else {
                return Err(malformed(path, idx, "unterminated section header"));
            };
            let name = name.trim().to_string();
            if name == DEFAULT_SECTION {
                saw_default = true;
            }
            section = Some(name);
            continue;
        }

        let Some((key, value)) = split_pair(trimmed) else {
            return Err(malformed(path, idx, "expected `key = value`"));
        };
        let Some(current) = &section else {
            return Err(malformed(path, idx, "key-value pair before any section header"));
        };
        if current != DEFAULT_SECTION {
            continue;
        }

        record.insert(
            key.trim().to_lowercase(),
            RawValue::Text(value.trim().to_string()),
        );
    }

    if !saw_default {
        return Err(UnderstoryError::MalformedRecord {
            path: path.to_path_buf(),
            message: format!("missing [{DEFAULT_SECTION}] section"),
        });
    }

    if let Some(RawValue::Text(joined)) = record.remove(LIST_FIELD) {
        let names = joined
            .split(',')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .map(RawValue::text)
            .collect();
        record.insert(LIST_FIELD.to_string(), RawValue::List(names));
    }

    Ok(record)
}

/// Split a `key = value` or `key: value` line at the first delimiter.
fn split_pair(line: &str) -> Option<(&str, &str)> {
    let position = match (line.find('='), line.find(':')) {
        (Some(eq), Some(colon)) => eq.min(colon),
        (Some(eq), None) => eq,
        (None, Some(colon)) => colon,
        (None, None) => return None,
    };
    Some((&line[..position], &line[position + 1..]))
}

fn malformed(path: &Path, line_idx: usize, message: &str) -> UnderstoryError {
    UnderstoryError::MalformedRecord {
        path: path.to_path_buf(),
        message: format!("line {}: {}", line_idx + 1, message),
    }
}
