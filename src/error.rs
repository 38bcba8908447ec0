//! Understory error types.
//!
//! All errors are typed and carry the offending path where one exists.
//! Every failure in the ingestion pipeline is fatal: a run either produces
//! the full raw map and schema, or nothing. Type conflicts during schema
//! resolution are warnings, not errors.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for understory operations.
#[derive(Error, Debug)]
pub enum UnderstoryError {
    /// A required directory is absent.
    #[error("Path not found: {path}")]
    PathNotFound {
        /// The directory that was expected to exist.
        path: PathBuf,
    },

    /// I/O error during file operations.
    #[error("I/O error for path {path}: {source}")]
    Io {
        /// The file path that caused the I/O error.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A record file could not be fetched from its source.
    #[error("Failed to read record {path}: {reason}")]
    RecordRead {
        /// The record file that could not be read.
        path: PathBuf,
        /// Reason for the failure.
        reason: String,
    },

    /// File extension has no registered parser.
    #[error("Unsupported record format: '{extension}'")]
    UnsupportedFormat {
        /// The unrecognized extension (empty for files without one).
        extension: String,
    },

    /// File content does not conform to its declared format.
    #[error("Malformed record {path}: {message}")]
    MalformedRecord {
        /// The record file that failed to decode.
        path: PathBuf,
        /// The decode error message.
        message: String,
    },

    /// Remote share protocol failure.
    #[error("Share error: {message}")]
    Share {
        /// The protocol error message.
        message: String,
    },

    /// Table model validation failed.
    #[error("Invalid table model: {message}")]
    InvalidModel {
        /// The validation error message.
        message: String,
    },

    /// Registry document could not be decoded.
    #[error("Registry error for {path}: {message}")]
    Registry {
        /// The registry document path.
        path: PathBuf,
        /// The decode error message.
        message: String,
    },

    /// Generic error with context.
    #[error("{0}")]
    Other(String),
}

impl From<std::io::Error> for UnderstoryError {
    fn from(err: std::io::Error) -> Self {
        UnderstoryError::Io {
            path: PathBuf::from("<unknown>"),
            source: err,
        }
    }
}

/// Result type alias for understory operations.
pub type Result<T> = std::result::Result<T, UnderstoryError>;
