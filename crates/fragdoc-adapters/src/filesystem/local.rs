//! Local filesystem adapter using std::fs and walkdir.

use std::io;
use std::path::{Path, PathBuf};

use fragdoc_core::{
    application::{ApplicationError, ports::Filesystem},
    error::{FragdocError, FragdocResult},
};
use tracing::trace;
use walkdir::WalkDir;

/// Production filesystem implementation using `std::fs`.
#[derive(Debug, Clone, Copy)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    /// Create a new local filesystem adapter.
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for LocalFilesystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn list_files(&self, dir: &Path) -> FragdocResult<Vec<PathBuf>> {
        let entries = std::fs::read_dir(dir).map_err(|e| map_io_error(dir, e, "list directory"))?;

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| map_io_error(dir, e, "read directory entry"))?;
            let file_type = entry
                .file_type()
                .map_err(|e| map_io_error(&entry.path(), e, "get file type"))?;
            if file_type.is_file() {
                files.push(entry.path());
            }
        }

        files.sort();
        Ok(files)
    }

    fn walk_files(&self, root: &Path) -> FragdocResult<Vec<PathBuf>> {
        let mut files = Vec::new();
        for entry in WalkDir::new(root).follow_links(false).sort_by_file_name() {
            let entry = entry.map_err(|e| map_walk_error(root, e))?;
            if entry.file_type().is_file() {
                files.push(entry.into_path());
            } else {
                trace!(path = %entry.path().display(), "Skipping non-regular entry");
            }
        }

        files.sort();
        Ok(files)
    }

    fn read_to_string(&self, path: &Path) -> FragdocResult<String> {
        std::fs::read_to_string(path).map_err(|e| map_io_error(path, e, "read file"))
    }

    fn write_file(&self, path: &Path, content: &str) -> FragdocResult<()> {
        std::fs::write(path, content).map_err(|e| map_io_error(path, e, "write file"))
    }
}

fn map_io_error(path: &Path, e: io::Error, operation: &str) -> FragdocError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: format!("Failed to {}: {}", operation, e),
    }
    .into()
}

fn map_walk_error(root: &Path, e: walkdir::Error) -> FragdocError {
    let path = e.path().unwrap_or(root).to_path_buf();
    ApplicationError::FilesystemError {
        path,
        reason: format!("Failed to walk directory: {}", e),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn list_files_skips_directories_and_nested_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b_template.md"), "").unwrap();
        fs::write(dir.path().join("a.js"), "").unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("sub").join("c_template.md"), "").unwrap();

        let files = LocalFilesystem::new().list_files(dir.path()).unwrap();

        assert_eq!(
            files,
            vec![dir.path().join("a.js"), dir.path().join("b_template.md")]
        );
    }

    #[test]
    fn walk_files_is_recursive_and_sorted() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("z").join("deep")).unwrap();
        fs::write(dir.path().join("z").join("deep").join("b.js"), "").unwrap();
        fs::write(dir.path().join("a.js"), "").unwrap();

        let files = LocalFilesystem::new().walk_files(dir.path()).unwrap();

        assert_eq!(
            files,
            vec![
                dir.path().join("a.js"),
                dir.path().join("z").join("deep").join("b.js"),
            ]
        );
    }

    #[test]
    fn read_missing_file_is_filesystem_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.js");

        let err = LocalFilesystem::new().read_to_string(&path).unwrap_err();

        assert!(matches!(
            err,
            FragdocError::Application(ApplicationError::FilesystemError { .. })
        ));
        assert!(err.to_string().contains("read file"));
    }

    #[test]
    fn read_rejects_invalid_utf8() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bin.js");
        fs::write(&path, [0xff, 0xfe, 0x00]).unwrap();

        assert!(LocalFilesystem::new().read_to_string(&path).is_err());
    }

    #[test]
    fn write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.md");
        let fs = LocalFilesystem::new();

        fs.write_file(&path, "first").unwrap();
        fs.write_file(&path, "second").unwrap();

        assert_eq!(fs.read_to_string(&path).unwrap(), "second");
    }

    #[cfg(unix)]
    #[test]
    fn symlinks_are_not_followed() {
        let dir = tempfile::tempdir().unwrap();
        let outside = tempfile::tempdir().unwrap();
        fs::write(outside.path().join("x.js"), "").unwrap();
        std::os::unix::fs::symlink(outside.path(), dir.path().join("link")).unwrap();

        let files = LocalFilesystem::new().walk_files(dir.path()).unwrap();

        assert!(files.is_empty());
    }
}
