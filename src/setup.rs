//! Tool initialization: home and database folders plus the config file.

use crate::error::{Result, UnderstoryError};
use std::fs;
use std::path::{Path, PathBuf};

/// Default config file name inside the home folder.
pub const DEFAULT_CONFIG_NAME: &str = "conf.cfg";

/// Holds the initialization details and writes them into a config file
/// inside the home folder.
#[derive(Debug, Clone)]
pub struct Initializer {
    /// Tool home folder.
    pub home: PathBuf,
    /// Database top-level folder.
    pub database: PathBuf,
    /// Config file name within the home folder.
    pub config_file_name: String,
    /// Full path of the written config file.
    pub config_file_path: PathBuf,
}

impl Initializer {
    /// Create both folders and write the config file.
    pub fn new(
        home: impl Into<PathBuf>,
        database: impl Into<PathBuf>,
        config_name: impl Into<String>,
    ) -> Result<Self> {
        let home = home.into();
        let database = database.into();
        let config_file_name = config_name.into();

        create_folder(&home)?;
        log::debug!("initialized home in {}", home.display());

        create_folder(&database)?;
        log::debug!("initialized database folder in {}", database.display());

        let config_file_path = home.join(&config_file_name);
        let contents = format!(
            "[default]\n\
             home = {}\n\
             database = {}\n\
             config_file_name = {}\n\
             config_file_path = {}\n",
            home.display(),
            database.display(),
            config_file_name,
            config_file_path.display(),
        );
        fs::write(&config_file_path, contents).map_err(|e| UnderstoryError::Io {
            path: config_file_path.clone(),
            source: e,
        })?;
        log::debug!("wrote config file at {}", config_file_path.display());

        Ok(Initializer {
            home,
            database,
            config_file_name,
            config_file_path,
        })
    }
}

fn create_folder(path: &Path) -> Result<()> {
    fs::create_dir_all(path).map_err(|e| UnderstoryError::Io {
        path: path.to_path_buf(),
        source: e,
    })
}
