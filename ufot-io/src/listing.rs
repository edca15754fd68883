//! Image file discovery.

use std::path::{Path, PathBuf};

use crate::raster::is_image_file;
use crate::Result;

/// List the image files directly inside `dir`, sorted by path.
///
/// Only files with one of [`crate::IMAGE_EXTENSIONS`] are returned;
/// subdirectories are not descended into.
///
/// # Errors
/// Returns an error if the directory cannot be read.
pub fn list_image_files<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && is_image_file(&path) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}
