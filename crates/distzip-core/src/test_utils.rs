//! Shared fixtures for unit tests.

#![allow(clippy::unwrap_used)]

use std::fs;
use std::path::Path;
use std::path::PathBuf;
use tempfile::TempDir;

/// Creates a temporary directory containing the given files.
///
/// Each file's content is its own relative path, so archive contents can be
/// checked against names.
pub fn tree(files: &[&str]) -> TempDir {
    let temp = TempDir::new().unwrap();
    write_files(temp.path(), files);
    temp
}

/// Writes `files` (relative, `/`-separated) below `root`.
pub fn write_files(root: &Path, files: &[&str]) {
    for file in files {
        let path = root.join(file);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, file).unwrap();
    }
}

/// Converts string literals to the `PathBuf`s `resolve` returns.
pub fn paths(files: &[&str]) -> Vec<PathBuf> {
    files
        .iter()
        .map(|f| f.split('/').collect::<PathBuf>())
        .collect()
}

/// Lists entry names of a zip archive in stored order.
pub fn zip_names(archive: &Path) -> Vec<String> {
    let file = fs::File::open(archive).unwrap();
    let mut zip = zip::ZipArchive::new(file).unwrap();
    (0..zip.len())
        .map(|i| zip.by_index(i).unwrap().name().to_string())
        .collect()
}
