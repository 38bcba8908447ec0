//! Local filesystem backend.

use crate::error::{Result, UnderstoryError};
use crate::source::RawSource;
use std::fs;
use std::path::{Path, PathBuf};

/// Raw-data backend over a local directory tree.
pub struct LocalSource {
    root: PathBuf,
}

impl LocalSource {
    /// Create a backend rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        LocalSource { root: root.into() }
    }

    /// Top-level folder of this source.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, rel: &str) -> PathBuf {
        if rel.is_empty() {
            self.root.clone()
        } else {
            self.root.join(rel)
        }
    }

    fn scan(&self, rel: &str, want_dirs: bool) -> Result<Vec<String>> {
        let path = self.resolve(rel);
        let entries = fs::read_dir(&path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                UnderstoryError::PathNotFound { path: path.clone() }
            } else {
                UnderstoryError::Io {
                    path: path.clone(),
                    source: e,
                }
            }
        })?;

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| UnderstoryError::Io {
                path: path.clone(),
                source: e,
            })?;
            let file_type = entry.file_type().map_err(|e| UnderstoryError::Io {
                path: entry.path(),
                source: e,
            })?;
            if file_type.is_dir() == want_dirs {
                names.push(entry.file_name().to_string_lossy().into_owned());
            }
        }

        Ok(names)
    }
}

impl RawSource for LocalSource {
    fn list_folders(&self, rel: &str) -> Result<Vec<String>> {
        self.scan(rel, true)
    }

    fn list_files(&self, rel: &str) -> Result<Vec<String>> {
        self.scan(rel, false)
    }

    fn read_record(&self, rel: &str) -> Result<Vec<u8>> {
        let path = self.resolve(rel);
        fs::read(&path).map_err(|e| UnderstoryError::RecordRead {
            path,
            reason: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample_tree() -> TempDir {
        let dir = TempDir::new().expect("Failed to create temp dir");
        fs::create_dir_all(dir.path().join("crawford/common")).unwrap();
        fs::create_dir_all(dir.path().join("jacke")).unwrap();
        fs::write(dir.path().join("NOTES.txt"), "top-level file").unwrap();
        fs::write(
            dir.path().join("crawford/common/Cydonia_oblonga.txt"),
            "[default]\nusda_hardiness = 4\n",
        )
        .unwrap();
        dir
    }

    #[test]
    fn test_list_folders_only_dirs() {
        let dir = sample_tree();
        let source = LocalSource::new(dir.path());

        let mut folders = source.list_folders("").unwrap();
        folders.sort();
        assert_eq!(folders, ["crawford", "jacke"]);
    }

    #[test]
    fn test_list_files_only_files() {
        let dir = sample_tree();
        let source = LocalSource::new(dir.path());

        let files = source.list_files("crawford/common").unwrap();
        assert_eq!(files, ["Cydonia_oblonga.txt"]);
    }

    #[test]
    fn test_missing_directory_is_path_not_found() {
        let dir = sample_tree();
        let source = LocalSource::new(dir.path());

        let err = source.list_folders("no_such_category").unwrap_err();
        assert!(matches!(err, UnderstoryError::PathNotFound { .. }));
    }

    #[test]
    fn test_read_record() {
        let dir = sample_tree();
        let source = LocalSource::new(dir.path());

        let bytes = source
            .read_record("crawford/common/Cydonia_oblonga.txt")
            .unwrap();
        assert!(bytes.starts_with(b"[default]"));
    }

    #[test]
    fn test_read_missing_record_is_record_read_error() {
        let dir = sample_tree();
        let source = LocalSource::new(dir.path());

        let err = source.read_record("crawford/common/missing.txt").unwrap_err();
        match err {
            UnderstoryError::RecordRead { path, .. } => {
                assert!(path.ends_with("crawford/common/missing.txt"));
            }
            other => panic!("expected RecordRead, got: {other:?}"),
        }
    }
}
