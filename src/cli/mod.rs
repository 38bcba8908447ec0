//! Command-line interface for understory.
//!
//! This module handles argument parsing and user interface only.
//! NO pipeline logic is implemented here.

use crate::model::{ClusteringKey, SortOrder};
use crate::source::{CategoryFilter, ExtensionFilter, WalkOptions};
use clap::Parser;
use std::path::PathBuf;

/// understory: schema inference for a forest-garden plant catalog.
#[derive(Parser, Debug)]
#[command(name = "understory")]
#[command(author, version, about, long_about = None)]
#[command(subcommand_required = true)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available understory commands.
#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Create the home and database folders and write the config file.
    Init {
        /// Tool home folder.
        #[arg(long)]
        home: PathBuf,

        /// Database top-level folder.
        #[arg(long)]
        database: PathBuf,

        /// Config file name inside the home folder.
        #[arg(long, default_value = "conf.cfg")]
        config: String,
    },

    /// Read the raw tree and print the aggregated data map as JSON.
    Map {
        /// Tree selection arguments.
        #[command(flatten)]
        walk: WalkArgs,
    },

    /// Infer per-subcategory attribute/type sets and print them as JSON.
    Infer {
        /// Tree selection arguments.
        #[command(flatten)]
        walk: WalkArgs,
    },

    /// Run the full pipeline and write schema-definition files.
    Generate {
        /// Tree selection arguments.
        #[command(flatten)]
        walk: WalkArgs,

        /// Database folder receiving the generated schema files.
        #[arg(long)]
        database: PathBuf,

        /// Primary-key attribute names.
        #[arg(long = "primary-key", value_name = "ATTR", required = true, num_args = 1..)]
        primary_key: Vec<String>,

        /// Clustering keys as `attr:asc` or `attr:desc`, in order.
        #[arg(long = "cluster", value_name = "ATTR:ORDER", value_parser = parse_cluster_arg)]
        cluster: Vec<ClusteringKey>,

        /// Back up existing schema files instead of overwriting in place.
        #[arg(long)]
        backup: bool,

        /// Registry document recording generated file locations.
        #[arg(long)]
        registry: PathBuf,
    },
}

/// Arguments shared by the tree-reading commands.
#[derive(clap::Args, Debug)]
pub struct WalkArgs {
    /// Top-level folder of the raw data tree.
    #[arg(short, long)]
    pub root: PathBuf,

    /// Comma-separated categories to include, or `all`.
    #[arg(long, default_value = "all", value_delimiter = ',')]
    pub categories: Vec<String>,

    /// File extension to keep, or `all` to disable filtering.
    #[arg(long, default_value = "txt")]
    pub dtype: String,

    /// Folder name excluded at every level (repeatable).
    #[arg(long = "exclude", value_name = "NAME")]
    pub excluded: Vec<String>,
}

impl WalkArgs {
    /// Convert to walker options.
    pub fn to_options(&self) -> WalkOptions {
        let categories = if self.categories.iter().any(|name| name == "all") {
            CategoryFilter::All
        } else {
            CategoryFilter::Only(self.categories.clone())
        };
        let extension = if self.dtype == "all" {
            ExtensionFilter::All
        } else {
            ExtensionFilter::Only(self.dtype.clone())
        };

        WalkOptions {
            categories,
            extension,
            excluded_dirs: self.excluded.clone(),
        }
    }
}

/// Parse an `attr:asc|desc` clustering-key argument.
fn parse_cluster_arg(arg: &str) -> Result<ClusteringKey, String> {
    let Some((attribute, order)) = arg.rsplit_once(':') else {
        return Err(format!("expected `attr:asc` or `attr:desc`, got '{arg}'"));
    };
    let order = match order {
        "asc" => SortOrder::Ascending,
        "desc" => SortOrder::Descending,
        other => return Err(format!("unknown sort order '{other}' (expected asc or desc)")),
    };
    Ok(ClusteringKey {
        attribute: attribute.to_string(),
        order,
    })
}

/// Parse command-line arguments.
///
/// This function is the entry point for CLI argument parsing.
/// It returns the parsed Cli struct or exits on error.
pub fn parse_args() -> Cli {
    Cli::parse()
}
