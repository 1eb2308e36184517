use std::fs;
use std::path::Path;

use crate::{BlurBenchError, Result};

/// Make `folder` an empty directory.
///
/// Removes the folder and everything in it if it exists, then recreates it
/// (including missing parents). Calling it twice in a row is fine.
pub fn reset_folder(folder: &Path) -> Result<()> {
    if folder.is_dir() {
        fs::remove_dir_all(folder).map_err(|e| {
            BlurBenchError::FilesystemError(format!(
                "Failed to clear folder {}: {}",
                folder.display(),
                e
            ))
        })?;
    } else if folder.exists() {
        return Err(BlurBenchError::FilesystemError(format!(
            "Output path {} exists and is not a directory",
            folder.display()
        )));
    }

    fs::create_dir_all(folder).map_err(|e| {
        BlurBenchError::FilesystemError(format!(
            "Failed to create folder {}: {}",
            folder.display(),
            e
        ))
    })?;

    Ok(())
}

/// List the regular files directly inside `dir`, sorted by name.
///
/// Subdirectories are not descended into. Names that are not valid UTF-8
/// are skipped with a warning.
pub fn list_source_files(dir: &Path) -> Result<Vec<String>> {
    let entries = fs::read_dir(dir).map_err(|e| {
        BlurBenchError::FilesystemError(format!("Failed to read folder {}: {}", dir.display(), e))
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry?;
        if !entry.path().is_file() {
            continue;
        }
        match entry.file_name().into_string() {
            Ok(name) => files.push(name),
            Err(name) => log::warn!("skipping non UTF-8 file name {:?}", name),
        }
    }

    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_reset_creates_missing_folder() {
        let root = tempdir().unwrap();
        let folder = root.path().join("nested").join("out");

        reset_folder(&folder).unwrap();
        assert!(folder.is_dir());
        assert_eq!(fs::read_dir(&folder).unwrap().count(), 0);
    }

    #[test]
    fn test_reset_removes_previous_contents() {
        let root = tempdir().unwrap();
        let folder = root.path().join("out");
        fs::create_dir_all(folder.join("sub")).unwrap();
        fs::write(folder.join("old.png"), b"old").unwrap();
        fs::write(folder.join("sub").join("deep.png"), b"old").unwrap();

        reset_folder(&folder).unwrap();
        assert!(folder.is_dir());
        assert_eq!(fs::read_dir(&folder).unwrap().count(), 0);
    }

    #[test]
    fn test_reset_is_idempotent() {
        let root = tempdir().unwrap();
        let folder = root.path().join("out");

        reset_folder(&folder).unwrap();
        reset_folder(&folder).unwrap();
        assert!(folder.is_dir());
        assert_eq!(fs::read_dir(&folder).unwrap().count(), 0);
    }

    #[test]
    fn test_reset_rejects_regular_file() {
        let root = tempdir().unwrap();
        let path = root.path().join("out");
        fs::write(&path, b"file").unwrap();

        let result = reset_folder(&path);
        assert!(matches!(result, Err(BlurBenchError::FilesystemError(_))));
        assert!(path.is_file());
    }

    #[test]
    fn test_list_source_files_sorted_and_flat() {
        let root = tempdir().unwrap();
        fs::write(root.path().join("c.png"), b"c").unwrap();
        fs::write(root.path().join("a.png"), b"a").unwrap();
        fs::write(root.path().join("b.jpg"), b"b").unwrap();
        fs::create_dir(root.path().join("nested")).unwrap();
        fs::write(root.path().join("nested").join("d.png"), b"d").unwrap();

        let files = list_source_files(root.path()).unwrap();
        assert_eq!(files, vec!["a.png", "b.jpg", "c.png"]);
    }

    #[test]
    fn test_list_source_files_empty() {
        let root = tempdir().unwrap();
        assert!(list_source_files(root.path()).unwrap().is_empty());
    }

    #[test]
    fn test_list_source_files_missing_folder() {
        let root = tempdir().unwrap();
        let result = list_source_files(&root.path().join("missing"));
        assert!(matches!(result, Err(BlurBenchError::FilesystemError(_))));
    }
}
