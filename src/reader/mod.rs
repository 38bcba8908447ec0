//! Record parsing: format detection and per-format dispatch.
//!
//! Table-driven format detection from file extensions. No heuristics, no
//! content sniffing. Unknown extensions map to no format, never a guess.

pub mod config;
pub mod yaml;

use crate::error::Result;
use crate::record::RawRecord;
use std::path::Path;

/// Record file formats understood by the reader.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Delimited key-value text (.txt, .cfg).
    Config,
    /// YAML markup (.yml, .yaml).
    Yaml,
}

impl Format {
    /// Convert format to string identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            Format::Config => "config",
            Format::Yaml => "yaml",
        }
    }

    /// Detect the record format from a file extension.
    ///
    /// Table-driven mapping (case-sensitive). Returns None for unknown
    /// extensions.
    ///
    /// # Examples
    ///
    /// ```
    /// # use understory::reader::Format;
    /// assert_eq!(Format::from_extension("txt"), Some(Format::Config));
    /// assert_eq!(Format::from_extension("yml"), Some(Format::Yaml));
    /// assert_eq!(Format::from_extension("rst"), None);
    /// ```
    pub fn from_extension(extension: &str) -> Option<Format> {
        let format = match extension {
            // Delimited key-value text
            "txt" | "cfg" => Format::Config,

            // YAML markup
            "yml" | "yaml" => Format::Yaml,

            // Unknown extension
            _ => return None,
        };

        Some(format)
    }
}

/// Extension of a record file name: the text after the last `.`.
///
/// Returns None when the name contains no dot.
pub fn file_extension(file_name: &str) -> Option<&str> {
    file_name.rsplit_once('.').map(|(_, extension)| extension)
}

/// Parse a record file's contents according to `format`.
///
/// `path` is used for error reporting only; the bytes have already been
/// fetched by the source backend.
pub fn parse_record(path: &Path, bytes: &[u8], format: Format) -> Result<RawRecord> {
    match format {
        Format::Config => config::parse(path, bytes),
        Format::Yaml => yaml::parse(path, bytes),
    }
}
