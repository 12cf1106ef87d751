//! Source directory enumeration.
//!
//! Only files directly inside the source directory are considered; nothing is
//! recursed into. A file is eligible when its name ends (case-insensitively)
//! in one of [`IMAGE_EXTENSIONS`]. The match is on the name suffix, so
//! `photo.JPG` and `scanpng` both qualify while `notes.txt` does not.
//!
//! The result is sorted by path so the grid order is reproducible regardless
//! of the order the filesystem lists entries in.

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name suffixes of files treated as images.
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "gif"];

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("The folder '{}' does not exist", .0.display())]
    DirectoryNotFound(PathBuf),
    #[error("No images found in '{}'", .0.display())]
    NoImagesFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// List eligible images in `dir`, sorted.
///
/// Fails with [`ScanError::DirectoryNotFound`] when `dir` is missing (or is
/// not a directory) and with [`ScanError::NoImagesFound`] when nothing in it
/// qualifies.
pub fn collect_images(dir: &Path) -> Result<Vec<PathBuf>, ScanError> {
    if !dir.is_dir() {
        return Err(ScanError::DirectoryNotFound(dir.to_path_buf()));
    }

    let mut images: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| is_image(p))
        .collect();

    if images.is_empty() {
        return Err(ScanError::NoImagesFound(dir.to_path_buf()));
    }

    images.sort();
    log::debug!("found {} images in {}", images.len(), dir.display());
    Ok(images)
}

fn is_image(path: &Path) -> bool {
    if !path.is_file() {
        return false;
    }
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    IMAGE_EXTENSIONS.iter().any(|ext| name.ends_with(ext))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(dir: &Path, name: &str) {
        fs::write(dir.join(name), b"").unwrap();
    }

    fn names(paths: &[PathBuf]) -> Vec<String> {
        paths
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect()
    }

    #[test]
    fn missing_directory_is_error() {
        let tmp = TempDir::new().unwrap();
        let result = collect_images(&tmp.path().join("nope"));
        assert!(matches!(result, Err(ScanError::DirectoryNotFound(_))));
    }

    #[test]
    fn file_instead_of_directory_is_not_found() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "a.png");
        let result = collect_images(&tmp.path().join("a.png"));
        assert!(matches!(result, Err(ScanError::DirectoryNotFound(_))));
    }

    #[test]
    fn empty_directory_has_no_images() {
        let tmp = TempDir::new().unwrap();
        let result = collect_images(tmp.path());
        assert!(matches!(result, Err(ScanError::NoImagesFound(_))));
    }

    #[test]
    fn only_non_images_has_no_images() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "notes.txt");
        touch(tmp.path(), "photo.webp");
        let result = collect_images(tmp.path());
        assert!(matches!(result, Err(ScanError::NoImagesFound(_))));
    }

    #[test]
    fn filters_by_extension_case_insensitive() {
        let tmp = TempDir::new().unwrap();
        for name in ["a.png", "b.JPG", "c.jpeg", "d.Bmp", "e.gif", "f.txt", "g.tiff"] {
            touch(tmp.path(), name);
        }
        let images = collect_images(tmp.path()).unwrap();
        assert_eq!(names(&images), vec!["a.png", "b.JPG", "c.jpeg", "d.Bmp", "e.gif"]);
    }

    #[test]
    fn suffix_match_without_dot_is_eligible() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "scanpng");
        let images = collect_images(tmp.path()).unwrap();
        assert_eq!(names(&images), vec!["scanpng"]);
    }

    #[test]
    fn subdirectories_are_not_traversed() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "top.png");
        let nested = tmp.path().join("nested.png");
        fs::create_dir(&nested).unwrap();
        touch(&nested, "inner.png");

        let images = collect_images(tmp.path()).unwrap();
        assert_eq!(names(&images), vec!["top.png"]);
    }

    #[test]
    fn results_are_sorted() {
        let tmp = TempDir::new().unwrap();
        for name in ["c.png", "a.png", "b.png", "10.png", "2.png"] {
            touch(tmp.path(), name);
        }
        let images = collect_images(tmp.path()).unwrap();
        assert_eq!(
            names(&images),
            vec!["10.png", "2.png", "a.png", "b.png", "c.png"]
        );
    }
}
