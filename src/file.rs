//! Descriptor for a file moving through the upload pipeline.

use std::path::{Path, PathBuf};

/// A detected file and what is known about it so far.
///
/// `path` always points at the file's current location. Steps that move
/// the file return a new descriptor instead of patching this one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShotFile {
    /// Current on-disk location.
    pub path: PathBuf,
    /// Extension including the leading dot, or empty.
    pub extension: String,
    /// Base name.
    pub name: String,
    /// Public URL, set once the upload has finished.
    pub url: Option<String>,
}

impl ShotFile {
    /// Describe the file at `path`.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = base_name(&path);
        let extension = path
            .extension()
            .map(|ext| format!(".{}", ext.to_string_lossy()))
            .unwrap_or_default();

        Self {
            path,
            extension,
            name,
            url: None,
        }
    }
}

/// Final path component as a string, lossy for non UTF-8 names.
pub fn base_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_path_splits_name_and_extension() {
        let file = ShotFile::from_path("/tmp/shots/Screen Shot 2024-05-01 at 09.00.00.png");
        assert_eq!(file.name, "Screen Shot 2024-05-01 at 09.00.00.png");
        assert_eq!(file.extension, ".png");
        assert!(file.url.is_none());
    }

    #[test]
    fn test_no_extension() {
        let file = ShotFile::from_path("/tmp/shots/README");
        assert_eq!(file.name, "README");
        assert_eq!(file.extension, "");
    }

    #[test]
    fn test_dotfile_has_no_extension() {
        let file = ShotFile::from_path("/tmp/shots/.DS_Store");
        assert_eq!(file.name, ".DS_Store");
        assert_eq!(file.extension, "");
    }
}
