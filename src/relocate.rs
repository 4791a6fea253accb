//! Moving detected files out of the way before and after upload.

use std::path::PathBuf;

use thiserror::Error;

use crate::config::Settings;
use crate::file::ShotFile;
use crate::naming::{self, NamingError};

#[derive(Error, Debug)]
pub enum RelocateError {
    #[error("error generating filename: {0}")]
    Naming(#[from] NamingError),

    #[error("failed to move {from} to {to}: {source}")]
    Rename {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to delete {path}: {source}")]
    Delete {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Rename `file` to its hashed name, moving it into the archive directory
/// when one is configured and renaming it in place otherwise.
///
/// `unix_secs` is mixed into the name so the same file name uploaded twice
/// gets two different names.
pub fn relocate(
    settings: &Settings,
    file: &ShotFile,
    unix_secs: i64,
) -> Result<ShotFile, RelocateError> {
    let hash = naming::generate_hash(&naming::hash_seed(&file.name, unix_secs))?;
    let name = format!("{hash}{}", file.extension);

    let dir = match settings.archive_dir() {
        Some(archive) => archive,
        None => file
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(settings.local_path.as_path()),
    };
    let destination = dir.join(&name);

    std::fs::rename(&file.path, &destination).map_err(|source| RelocateError::Rename {
        from: file.path.clone(),
        to: destination.clone(),
        source,
    })?;

    crate::debug_event!(
        "relocate",
        "moved",
        "{} -> {}",
        file.path.display(),
        destination.display()
    );

    Ok(ShotFile {
        path: destination,
        extension: file.extension.clone(),
        name,
        url: None,
    })
}

/// Delete the file at its current location.
pub fn trash(file: &ShotFile) -> Result<(), RelocateError> {
    std::fs::remove_file(&file.path).map_err(|source| RelocateError::Delete {
        path: file.path.clone(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn settings_for(watch: &Path, archive: Option<&Path>) -> Settings {
        Settings {
            local_path: watch.to_path_buf(),
            archive_path: archive.map(Path::to_path_buf),
            ..Settings::default()
        }
    }

    #[test]
    fn test_rename_in_place() {
        let watch = TempDir::new().unwrap();
        let original = watch.path().join("Screen Shot 2024-05-01 at 09.00.00.png");
        fs::write(&original, b"png").unwrap();

        let settings = settings_for(watch.path(), None);
        let file = ShotFile::from_path(&original);
        let moved = relocate(&settings, &file, 1_714_554_000).unwrap();

        assert!(!original.exists());
        assert_eq!(moved.path.parent(), Some(watch.path()));
        assert!(moved.name.ends_with(".png"));
        assert_eq!(moved.name.len(), naming::HASH_LEN + ".png".len());
        assert_eq!(fs::read(&moved.path).unwrap(), b"png");
        assert_eq!(fs::read_dir(watch.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_move_to_archive() {
        let watch = TempDir::new().unwrap();
        let archive = TempDir::new().unwrap();
        let original = watch.path().join("shot.png");
        fs::write(&original, b"png").unwrap();

        let settings = settings_for(watch.path(), Some(archive.path()));
        let moved = relocate(&settings, &ShotFile::from_path(&original), 42).unwrap();

        assert!(!original.exists());
        assert_eq!(moved.path.parent(), Some(archive.path()));
        assert!(moved.path.exists());
        assert_eq!(fs::read_dir(watch.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_name_depends_on_time() {
        let watch = TempDir::new().unwrap();
        let settings = settings_for(watch.path(), None);

        let first = watch.path().join("a.png");
        fs::write(&first, b"1").unwrap();
        let one = relocate(&settings, &ShotFile::from_path(&first), 1).unwrap();

        fs::write(&first, b"2").unwrap();
        let two = relocate(&settings, &ShotFile::from_path(&first), 2).unwrap();

        assert_ne!(one.name, two.name);
    }

    #[test]
    fn test_missing_archive_dir_is_rename_error() {
        let watch = TempDir::new().unwrap();
        let original = watch.path().join("shot.png");
        fs::write(&original, b"png").unwrap();

        let missing = watch.path().join("does-not-exist");
        let settings = settings_for(watch.path(), Some(&missing));
        let err = relocate(&settings, &ShotFile::from_path(&original), 42).unwrap_err();

        assert!(matches!(err, RelocateError::Rename { .. }));
        // Left where it was
        assert!(original.exists());
    }

    #[test]
    fn test_trash_removes_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("x.png");
        fs::write(&path, b"png").unwrap();

        trash(&ShotFile::from_path(&path)).unwrap();
        assert!(!path.exists());

        let err = trash(&ShotFile::from_path(&path)).unwrap_err();
        assert!(matches!(err, RelocateError::Delete { .. }));
    }
}
