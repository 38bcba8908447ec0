//! understory CLI binary
//!
//! This is the main entry point for the understory command-line interface.
//! The CLI is a thin adapter over the library APIs - NO logic is
//! implemented here.

use std::path::Path;
use std::process::ExitCode;

use understory::cli::{self, Commands, WalkArgs};
use understory::model::{
    infer, resolve_columns, write_schema_file, ClusteringKey, LogSink, OverwritePolicy,
    TableModel,
};
use understory::registry::Registry;
use understory::setup::Initializer;
use understory::source::LocalSource;
use understory::{aggregate, UnderstoryError};

fn main() -> ExitCode {
    // Parse CLI arguments
    let cli = cli::parse_args();

    // Initialize logger; type-conflict warnings are reported at warn level
    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    // Execute command
    let result = match cli.command {
        Commands::Init {
            home,
            database,
            config,
        } => execute_init(&home, &database, &config),

        Commands::Map { walk } => execute_map(&walk),

        Commands::Infer { walk } => execute_infer(&walk),

        Commands::Generate {
            walk,
            database,
            primary_key,
            cluster,
            backup,
            registry,
        } => execute_generate(&walk, &database, primary_key, cluster, backup, &registry),
    };

    // Handle result
    match result {
        Ok(msg) => {
            println!("{}", msg);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(1)
        }
    }
}

/// Execute the init command: create folders and the config file.
fn execute_init(home: &Path, database: &Path, config: &str) -> Result<String, UnderstoryError> {
    let init = Initializer::new(home, database, config)?;

    Ok(format!(
        "Initialized understory home at {} (database: {})",
        init.home.display(),
        init.database.display()
    ))
}

/// Execute the map command: aggregate the raw tree and render it as JSON.
fn execute_map(walk: &WalkArgs) -> Result<String, UnderstoryError> {
    let source = LocalSource::new(&walk.root);
    let raw = aggregate::to_map(&source, &walk.to_options())?;

    serde_json::to_string_pretty(&raw)
        .map_err(|e| UnderstoryError::Other(format!("failed to encode raw data map: {e}")))
}

/// Execute the infer command: aggregate, infer, and render the
/// attribute/type sets as JSON.
fn execute_infer(walk: &WalkArgs) -> Result<String, UnderstoryError> {
    let source = LocalSource::new(&walk.root);
    let raw = aggregate::to_map(&source, &walk.to_options())?;
    let attributes = infer(&raw);

    serde_json::to_string_pretty(&attributes)
        .map_err(|e| UnderstoryError::Other(format!("failed to encode attribute sets: {e}")))
}

/// Execute the generate command.
///
/// This function is a thin adapter that:
/// 1. Aggregates the raw tree and infers attribute/type sets
/// 2. Resolves type conflicts per subcategory
/// 3. Writes one schema-definition file per non-empty subcategory
/// 4. Records each generated path in the registry
fn execute_generate(
    walk: &WalkArgs,
    database: &Path,
    primary_key: Vec<String>,
    cluster: Vec<ClusteringKey>,
    backup: bool,
    registry_path: &Path,
) -> Result<String, UnderstoryError> {
    let source = LocalSource::new(&walk.root);
    let raw = aggregate::to_map(&source, &walk.to_options())?;
    let attributes = infer(&raw);

    let policy = if backup {
        OverwritePolicy::Backup
    } else {
        OverwritePolicy::Overwrite
    };
    let mut registry = Registry::load(registry_path)?;
    let mut sink = LogSink;
    let mut written = Vec::new();

    for (category, subcategories) in &attributes {
        for (subcategory, set) in subcategories {
            if set.is_empty() {
                log::debug!("skipping {category}/{subcategory}: no attributes observed");
                continue;
            }

            let table_model = TableModel {
                table: format!("{category}_{subcategory}"),
                columns: resolve_columns(set, &mut sink),
                primary_key: primary_key.clone(),
                clustering_keys: cluster.clone(),
            };
            let path = write_schema_file(database, category, subcategory, &table_model, policy)?;
            registry.record(category, subcategory, &path);
            written.push(path.display().to_string());
        }
    }

    registry.save()?;

    Ok(format!(
        "Generated {} schema file(s):\n{}",
        written.len(),
        written.join("\n")
    ))
}
