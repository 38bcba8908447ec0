//! Shared fixture tree for the integration suites.

use std::fs;
use std::path::Path;
use tempfile::TempDir;
use understory::source::{CategoryFilter, ExtensionFilter, WalkOptions};

/// Build the two-category plant catalog used across the integration suites.
///
/// Layout:
/// - `test_crawford/common_fruiting_trees`: two `.txt` records
/// - `test_crawford/less_common_fruiting_trees`: one `.txt`, one `.cfg`
///   (with a space in the file name), one `.yml`
/// - `test_jacke/plant_matrix`: one `.txt` record
/// - top-level cruft the walker must ignore (`NOTES.txt`) or exclude
///   (`SCRATCH/`)
pub fn plant_catalog() -> TempDir {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let root = dir.path();

    write(
        root,
        "test_crawford/common_fruiting_trees/Cydonia_oblonga.txt",
        "[default]\ncommon_names = Quince\nUSDA_hardiness = 4\n",
    );
    write(
        root,
        "test_crawford/common_fruiting_trees/Ficus_carica.txt",
        "[default]\ncommon_names = Fig\nUSDA_hardiness = 7\n",
    );
    write(
        root,
        "test_crawford/less_common_fruiting_trees/Armelancher_canadensis.txt",
        "[default]\ncommon_names = Juneberry, Serviceberry\nUSDA_hardiness = 4\n",
    );
    write(
        root,
        "test_crawford/less_common_fruiting_trees/Arbutus unedo.cfg",
        "[default]\ncommon_names = Strawberry Tree,\nUSDA_hardiness = 7\n",
    );
    write(
        root,
        "test_crawford/less_common_fruiting_trees/Asimina_triloba.yml",
        "common_names:\n  - PawPaw\n  - Pawpaw\nUSDA_hardiness: 5\n",
    );
    write(
        root,
        "test_jacke/plant_matrix/Cydonia_oblonga.txt",
        "[default]\ncommon_names = Quince\nUSDA_hardiness = 4\n",
    );

    write(root, "NOTES.txt", "not a category\n");
    write(root, "SCRATCH/leftovers/old.txt", "[default]\nstale = yes\n");

    dir
}

/// Walk options matching the fixture: exclude the scratch folder and filter
/// on `dtype` (`"all"` disables extension filtering).
pub fn catalog_options(dtype: &str) -> WalkOptions {
    let extension = if dtype == "all" {
        ExtensionFilter::All
    } else {
        ExtensionFilter::Only(dtype.to_string())
    };
    WalkOptions {
        categories: CategoryFilter::All,
        extension,
        excluded_dirs: vec!["SCRATCH".to_string()],
    }
}

fn write(root: &Path, rel: &str, contents: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().expect("fixture path has a parent"))
        .expect("Failed to create fixture dir");
    fs::write(path, contents).expect("Failed to write fixture file");
}
