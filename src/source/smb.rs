//! Network-share backend.
//!
//! The share protocol is opaque to the pipeline: a `ShareClient` provides
//! directory listings and whole-file reads, and `SmbSource` adapts it to
//! the `RawSource` contract. Share listings include `.` and `..` entries,
//! which are dropped here. A single client failure is fatal for the run;
//! there are no retries.

use crate::error::{Result, UnderstoryError};
use crate::source::RawSource;
use std::path::PathBuf;

/// One entry of a share directory listing.
#[derive(Debug, Clone)]
pub struct ShareEntry {
    /// Entry name within its directory.
    pub name: String,
    /// Whether the entry is a directory.
    pub is_directory: bool,
}

impl ShareEntry {
    /// Convenience constructor for a file entry.
    pub fn file(name: impl Into<String>) -> ShareEntry {
        ShareEntry {
            name: name.into(),
            is_directory: false,
        }
    }

    /// Convenience constructor for a directory entry.
    pub fn directory(name: impl Into<String>) -> ShareEntry {
        ShareEntry {
            name: name.into(),
            is_directory: true,
        }
    }
}

/// Minimal connection surface understory needs from a share protocol.
///
/// Implementations wrap an established network-share connection. Failures
/// should surface as `UnderstoryError::Share` with the protocol message.
pub trait ShareClient {
    /// List the entries of the directory at `path` on `share`.
    fn list_dir(&self, share: &str, path: &str) -> Result<Vec<ShareEntry>>;

    /// Read the whole file at `path` on `share`.
    fn read_file(&self, share: &str, path: &str) -> Result<Vec<u8>>;
}

/// Raw-data backend over a remote network share.
pub struct SmbSource<C> {
    client: C,
    share: String,
    top_level: String,
}

impl<C: ShareClient> SmbSource<C> {
    /// Create a backend for `share`, rooted at `top_level` within it.
    pub fn new(client: C, share: impl Into<String>, top_level: impl Into<String>) -> Self {
        SmbSource {
            client,
            share: share.into(),
            top_level: top_level.into(),
        }
    }

    /// Name of the share this backend reads from.
    pub fn share(&self) -> &str {
        &self.share
    }

    fn resolve(&self, rel: &str) -> String {
        if rel.is_empty() {
            self.top_level.clone()
        } else {
            format!("{}/{}", self.top_level, rel)
        }
    }

    fn entries(&self, rel: &str, want_dirs: bool) -> Result<Vec<String>> {
        let path = self.resolve(rel);
        let listing = self.client.list_dir(&self.share, &path)?;
        Ok(listing
            .into_iter()
            .filter(|entry| entry.is_directory == want_dirs)
            .filter(|entry| entry.name != "." && entry.name != "..")
            .map(|entry| entry.name)
            .collect())
    }
}

impl<C: ShareClient> RawSource for SmbSource<C> {
    fn list_folders(&self, rel: &str) -> Result<Vec<String>> {
        self.entries(rel, true)
    }

    fn list_files(&self, rel: &str) -> Result<Vec<String>> {
        self.entries(rel, false)
    }

    fn read_record(&self, rel: &str) -> Result<Vec<u8>> {
        let path = self.resolve(rel);
        self.client.read_file(&self.share, &path).map_err(|e| match e {
            already @ UnderstoryError::RecordRead { .. } => already,
            other => UnderstoryError::RecordRead {
                path: PathBuf::from(&path),
                reason: other.to_string(),
            },
        })
    }
}
