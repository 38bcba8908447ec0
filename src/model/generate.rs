//! Schema-definition artifact generation.
//!
//! Renders a resolved table model to a YAML schema file under the database
//! folder and, when requested, preserves the previous file in a
//! manifest-tracked backup directory before overwriting.

use super::columns::ColumnSpec;
use crate::error::{Result, UnderstoryError};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};

/// Directory name holding schema-file backups.
pub const BACKUP_DIR: &str = ".understory-backup";

/// Sort direction of a clustering key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    /// Ascending order.
    Ascending,
    /// Descending order.
    Descending,
}

/// One clustering-key column with its sort direction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusteringKey {
    /// Column name.
    pub attribute: String,
    /// Sort direction.
    pub order: SortOrder,
}

/// What to do when the target schema file already exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverwritePolicy {
    /// Replace the file in place.
    Overwrite,
    /// Copy the previous file into the backup directory first.
    Backup,
}

/// A resolved table model ready for rendering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableModel {
    /// Table name.
    pub table: String,
    /// Column name → resolved type.
    pub columns: ColumnSpec,
    /// Primary-key columns.
    pub primary_key: Vec<String>,
    /// Ordered clustering-key columns.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub clustering_keys: Vec<ClusteringKey>,
}

impl TableModel {
    /// Validate that the primary key is non-empty and that every key
    /// column names an existing column.
    pub fn validate(&self) -> Result<()> {
        if self.primary_key.is_empty() {
            return Err(UnderstoryError::InvalidModel {
                message: format!(
                    "table '{}': primary key must name at least one column",
                    self.table
                ),
            });
        }
        for key in &self.primary_key {
            if !self.columns.contains_key(key) {
                return Err(UnderstoryError::InvalidModel {
                    message: format!(
                        "table '{}': primary-key column '{key}' is not a column",
                        self.table
                    ),
                });
            }
        }
        for key in &self.clustering_keys {
            if !self.columns.contains_key(&key.attribute) {
                return Err(UnderstoryError::InvalidModel {
                    message: format!(
                        "table '{}': clustering-key column '{}' is not a column",
                        self.table, key.attribute
                    ),
                });
            }
        }
        Ok(())
    }
}

/// Manifest describing one backed-up schema file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackupManifest {
    /// Unique identifier of the generation run.
    pub operation_id: String,
    /// Backup creation time (RFC 3339).
    pub timestamp: String,
    /// Original path of the preserved file.
    pub original_path: PathBuf,
    /// SHA-256 hash of the preserved content.
    pub hash: String,
    /// Byte count of the preserved content.
    pub size: u64,
}

/// Render `model` to `<database_root>/<category>/<subcategory>.yaml`.
///
/// Creates parent directories as needed; an existing target is handled per
/// `policy`. Returns the generated file's path.
pub fn write_schema_file(
    database_root: &Path,
    category: &str,
    subcategory: &str,
    model: &TableModel,
    policy: OverwritePolicy,
) -> Result<PathBuf> {
    model.validate()?;

    let dir = database_root.join(category);
    fs::create_dir_all(&dir).map_err(|e| UnderstoryError::Io {
        path: dir.clone(),
        source: e,
    })?;

    let target = dir.join(format!("{subcategory}.yaml"));
    if target.exists() && policy == OverwritePolicy::Backup {
        backup_existing(database_root, category, &target)?;
    }

    let rendered = serde_yaml::to_string(model).map_err(|e| {
        UnderstoryError::Other(format!(
            "failed to render schema for table '{}': {e}",
            model.table
        ))
    })?;
    fs::write(&target, rendered).map_err(|e| UnderstoryError::Io {
        path: target.clone(),
        source: e,
    })?;

    log::debug!("wrote schema file {}", target.display());
    Ok(target)
}

/// Copy `target` into the backup directory and write its manifest.
fn backup_existing(database_root: &Path, category: &str, target: &Path) -> Result<()> {
    let content = fs::read(target).map_err(|e| UnderstoryError::Io {
        path: target.to_path_buf(),
        source: e,
    })?;

    let operation_id = uuid::Uuid::new_v4().to_string();
    let backup_dir = database_root
        .join(BACKUP_DIR)
        .join(&operation_id)
        .join(category);
    fs::create_dir_all(&backup_dir).map_err(|e| UnderstoryError::Io {
        path: backup_dir.clone(),
        source: e,
    })?;

    let file_name = target.file_name().ok_or_else(|| {
        UnderstoryError::Other(format!(
            "schema path has no file name: {}",
            target.display()
        ))
    })?;
    let backup_path = backup_dir.join(file_name);
    fs::write(&backup_path, &content).map_err(|e| UnderstoryError::Io {
        path: backup_path.clone(),
        source: e,
    })?;

    let manifest = BackupManifest {
        operation_id,
        timestamp: chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
        original_path: target.to_path_buf(),
        hash: compute_hash(&content),
        size: content.len() as u64,
    };
    let manifest_path = backup_dir.join("manifest.json");
    let json = serde_json::to_string_pretty(&manifest).map_err(|e| {
        UnderstoryError::Other(format!("failed to serialize backup manifest: {e}"))
    })?;
    fs::write(&manifest_path, json).map_err(|e| UnderstoryError::Io {
        path: manifest_path,
        source: e,
    })?;

    log::debug!(
        "backed up {} to {}",
        target.display(),
        backup_path.display()
    );
    Ok(())
}

/// Compute SHA-256 hash of bytes, hex-encoded.
fn compute_hash(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}
