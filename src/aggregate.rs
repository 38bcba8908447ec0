//! Raw-data aggregation: walker output × record parsers → raw data map.
//!
//! This is the read side of the pipeline: fetch every admitted file from
//! the source backend, parse it with the parser registered for its
//! extension, and assemble the nested map consumed by schema inference.

use crate::error::{Result, UnderstoryError};
use crate::reader::{self, Format};
use crate::record::RawRecord;
use crate::source::{map_file_tree, RawSource, WalkOptions};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Fully aggregated raw data:
/// category → subcategory → record-id → record.
pub type RawDataMap = BTreeMap<String, BTreeMap<String, BTreeMap<String, RawRecord>>>;

/// Record-id of a file name: the text before the first `.`.
pub fn record_id(file_name: &str) -> &str {
    match file_name.split_once('.') {
        Some((id, _)) => id,
        None => file_name,
    }
}

/// Build the raw data map of `source`.
///
/// Walks the category/subcategory tree, fetches every admitted file, and
/// parses it with the parser registered for its extension. Record-ids
/// collide last-write-wins within a subcategory; the walker's file order
/// is alphabetical, so the later-sorting file wins.
pub fn to_map(source: &dyn RawSource, options: &WalkOptions) -> Result<RawDataMap> {
    let tree = map_file_tree(source, options)?;

    let mut raw = RawDataMap::new();
    for (category, subcategories) in tree {
        let mut by_subcategory = BTreeMap::new();
        for (subcategory, files) in subcategories {
            let mut records = BTreeMap::new();
            for file_name in files {
                let rel = format!("{category}/{subcategory}/{file_name}");
                let format = detect_format(&file_name)?;
                let bytes = source.read_record(&rel)?;
                let record = reader::parse_record(&PathBuf::from(&rel), &bytes, format)?;
                records.insert(record_id(&file_name).to_string(), record);
            }
            by_subcategory.insert(subcategory, records);
        }
        raw.insert(category, by_subcategory);
    }

    log::debug!(
        "aggregated {} categories from raw source",
        raw.len()
    );
    Ok(raw)
}

/// Format of `file_name`, or `UnsupportedFormat` when no parser is
/// registered for its extension.
///
/// Reachable only under an `All` extension filter; a concrete filter
/// admits a single known extension.
fn detect_format(file_name: &str) -> Result<Format> {
    let extension = reader::file_extension(file_name).unwrap_or("");
    Format::from_extension(extension).ok_or_else(|| UnderstoryError::UnsupportedFormat {
        extension: extension.to_string(),
    })
}
