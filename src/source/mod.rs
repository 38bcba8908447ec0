//! Raw-data source interfaces and the tree walker.
//!
//! Ownership model:
//! - `RawSource` is the capability surface a backend must provide: list
//!   subfolders, list files, fetch record bytes.
//! - `map_file_tree` owns ordering and filtering, so every backend yields
//!   identical walk semantics.

pub mod local;
pub mod smb;

pub use local::LocalSource;
pub use smb::{ShareClient, ShareEntry, SmbSource};

use crate::error::Result;
use crate::reader;
use std::collections::BTreeMap;

/// Walker output: category → subcategory → sorted file names.
pub type FileTree = BTreeMap<String, BTreeMap<String, Vec<String>>>;

/// Capability surface of a raw-data backend.
///
/// Relative paths use `/` separators and are rooted at the backend's
/// top-level folder; the empty string denotes the top level itself.
pub trait RawSource {
    /// List the names of subfolders directly under `rel`.
    fn list_folders(&self, rel: &str) -> Result<Vec<String>>;

    /// List the names of plain files directly under `rel`.
    fn list_files(&self, rel: &str) -> Result<Vec<String>>;

    /// Fetch the raw bytes of the record file at `rel`.
    fn read_record(&self, rel: &str) -> Result<Vec<u8>>;
}

/// Category selection for a walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryFilter {
    /// Traverse every category folder.
    All,
    /// Traverse only the named categories. Names that are not present in
    /// the tree are silently absent from the result, not an error.
    Only(Vec<String>),
}

impl CategoryFilter {
    /// Whether `category` passes this filter.
    pub fn admits(&self, category: &str) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(names) => names.iter().any(|name| name == category),
        }
    }
}

/// Extension selection for a walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtensionFilter {
    /// Keep every file.
    All,
    /// Keep only files whose extension (text after the last `.`) matches.
    Only(String),
}

impl ExtensionFilter {
    /// Whether `file_name` passes this filter.
    pub fn admits(&self, file_name: &str) -> bool {
        match self {
            ExtensionFilter::All => true,
            ExtensionFilter::Only(extension) => {
                reader::file_extension(file_name) == Some(extension.as_str())
            }
        }
    }
}

/// Options controlling a raw-data walk.
#[derive(Debug, Clone)]
pub struct WalkOptions {
    /// Which categories to traverse.
    pub categories: CategoryFilter,
    /// Which file extensions to keep.
    pub extension: ExtensionFilter,
    /// Folder names skipped at every level.
    pub excluded_dirs: Vec<String>,
}

impl Default for WalkOptions {
    fn default() -> Self {
        WalkOptions {
            categories: CategoryFilter::All,
            extension: ExtensionFilter::All,
            excluded_dirs: Vec::new(),
        }
    }
}

/// Map the two-level category/subcategory file tree of a source.
///
/// Folder listings are alphabetically sorted with excluded names dropped;
/// file listings are alphabetically sorted, then extension-filtered. A
/// subcategory whose files are all filtered out keeps its (empty) entry.
pub fn map_file_tree(source: &dyn RawSource, options: &WalkOptions) -> Result<FileTree> {
    let categories: Vec<String> = folders(source, "", options)?
        .into_iter()
        .filter(|category| options.categories.admits(category))
        .collect();

    let mut tree = FileTree::new();
    for category in categories {
        let mut subtree = BTreeMap::new();
        for subcategory in folders(source, &category, options)? {
            let rel = format!("{category}/{subcategory}");
            let mut files = source.list_files(&rel)?;
            files.sort();
            files.retain(|name| options.extension.admits(name));
            subtree.insert(subcategory, files);
        }
        tree.insert(category, subtree);
    }

    Ok(tree)
}

/// Sorted folder listing with excluded names dropped.
fn folders(source: &dyn RawSource, rel: &str, options: &WalkOptions) -> Result<Vec<String>> {
    let mut names: Vec<String> = source
        .list_folders(rel)?
        .into_iter()
        .filter(|name| !options.excluded_dirs.iter().any(|excluded| excluded == name))
        .collect();
    names.sort();
    Ok(names)
}
