//! Registry of generated schema files.
//!
//! A flat `"<category>.<subcategory>" → path` document persisted as pretty
//! JSON. The generation pipeline records one entry per schema file it
//! writes.

use crate::error::{Result, UnderstoryError};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Flat key-value store of generated schema-file locations.
#[derive(Debug, Clone)]
pub struct Registry {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl Registry {
    /// Load the registry at `path`, or start empty when the file is absent.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(text) => serde_json::from_str(&text).map_err(|e| UnderstoryError::Registry {
                path: path.clone(),
                message: e.to_string(),
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                return Err(UnderstoryError::Io {
                    path: path.clone(),
                    source: e,
                })
            }
        };
        Ok(Registry { path, entries })
    }

    /// Record the schema file generated for (category, subcategory).
    ///
    /// An existing entry for the same pair is replaced.
    pub fn record(&mut self, category: &str, subcategory: &str, file_path: &Path) {
        self.entries.insert(
            format!("{category}.{subcategory}"),
            file_path.to_string_lossy().into_owned(),
        );
    }

    /// Look up the recorded location for (category, subcategory).
    pub fn get(&self, category: &str, subcategory: &str) -> Option<&str> {
        self.entries
            .get(&format!("{category}.{subcategory}"))
            .map(String::as_str)
    }

    /// Number of recorded entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Persist the registry to its document path.
    pub fn save(&self) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.entries).map_err(|e| {
            UnderstoryError::Registry {
                path: self.path.clone(),
                message: e.to_string(),
            }
        })?;
        fs::write(&self.path, json).map_err(|e| UnderstoryError::Io {
            path: self.path.clone(),
            source: e,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_absent_file_loads_empty() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let registry = Registry::load(dir.path().join("registry.json")).unwrap();
        assert!(registry.is_empty());
    }

    #[test]
    fn test_record_save_and_reload() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let doc = dir.path().join("registry.json");

        let mut registry = Registry::load(&doc).unwrap();
        registry.record(
            "crawford",
            "common_fruiting_trees",
            Path::new("/db/crawford/common_fruiting_trees.yaml"),
        );
        registry.save().unwrap();

        let reloaded = Registry::load(&doc).unwrap();
        assert_eq!(reloaded.len(), 1);
        assert_eq!(
            reloaded.get("crawford", "common_fruiting_trees"),
            Some("/db/crawford/common_fruiting_trees.yaml")
        );
    }

    #[test]
    fn test_record_replaces_existing_entry() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let mut registry = Registry::load(dir.path().join("registry.json")).unwrap();

        registry.record("c", "s", Path::new("/db/old.yaml"));
        registry.record("c", "s", Path::new("/db/new.yaml"));

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("c", "s"), Some("/db/new.yaml"));
    }

    #[test]
    fn test_corrupt_document_is_registry_error() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let doc = dir.path().join("registry.json");
        fs::write(&doc, "not json").unwrap();

        let err = Registry::load(&doc).unwrap_err();
        assert!(matches!(err, UnderstoryError::Registry { .. }));
    }
}
