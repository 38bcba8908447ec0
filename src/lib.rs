//! Understory: raw-data ingestion and schema inference for a forest-garden
//! plant catalog.
//!
//! The library walks a two-level category/subcategory tree of record files,
//! parses each record into a flat attribute mapping, aggregates everything
//! into a nested raw-data map, and infers per-subcategory attribute/type
//! schemas ready for schema-definition generation.

#![warn(missing_docs)]
// env_logger is used by src/main.rs (binary), not this library
#![expect(unused_crate_dependencies)]

pub mod aggregate;
pub mod cli;
pub mod error;
pub mod model;
pub mod reader;
pub mod record;
pub mod registry;
pub mod setup;
pub mod source;

/// Re-export common error types for convenience.
pub use error::{Result, UnderstoryError};

/// Re-export the aggregated raw map type for convenience.
pub use aggregate::RawDataMap;

/// Understory version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
