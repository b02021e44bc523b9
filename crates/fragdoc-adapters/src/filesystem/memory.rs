//! In-memory filesystem adapter for testing.

use std::{
    collections::{HashMap, HashSet},
    path::{Path, PathBuf},
    sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use fragdoc_core::{
    application::{ApplicationError, ports::Filesystem},
    error::{FragdocError, FragdocResult},
};

/// In-memory filesystem for testing.
///
/// Clones share the same contents, so a test can keep a handle after boxing
/// one into a service.
#[derive(Debug, Clone)]
pub struct MemoryFilesystem {
    inner: Arc<RwLock<MemoryFilesystemInner>>,
}

#[derive(Debug, Default)]
struct MemoryFilesystemInner {
    files: HashMap<PathBuf, String>,
    directories: HashSet<PathBuf>,
}

impl MemoryFilesystemInner {
    fn add_dir_all(&mut self, path: &Path) {
        let mut current = PathBuf::new();
        for component in path.components() {
            current.push(component);
            self.directories.insert(current.clone());
        }
    }
}

impl MemoryFilesystem {
    /// Create a new empty memory filesystem.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(MemoryFilesystemInner::default())),
        }
    }

    /// Add a file, creating its parent directories (builder style).
    pub fn with_file(self, path: impl AsRef<Path>, content: impl Into<String>) -> Self {
        self.add_file(path, content);
        self
    }

    /// Add a file, creating its parent directories.
    pub fn add_file(&self, path: impl AsRef<Path>, content: impl Into<String>) {
        let path = path.as_ref();
        if let Ok(mut inner) = self.inner.write() {
            if let Some(parent) = path.parent() {
                inner.add_dir_all(parent);
            }
            inner.files.insert(path.to_path_buf(), content.into());
        }
    }

    /// Add a directory and its ancestors.
    pub fn add_dir(&self, path: impl AsRef<Path>) {
        if let Ok(mut inner) = self.inner.write() {
            inner.add_dir_all(path.as_ref());
        }
    }

    /// Read a file's content (testing helper).
    pub fn read_file(&self, path: &Path) -> Option<String> {
        let inner = self.inner.read().ok()?;
        inner.files.get(path).cloned()
    }

    fn read(&self) -> FragdocResult<RwLockReadGuard<'_, MemoryFilesystemInner>> {
        self.inner.read().map_err(|_| lock_error())
    }

    fn write(&self) -> FragdocResult<RwLockWriteGuard<'_, MemoryFilesystemInner>> {
        self.inner.write().map_err(|_| lock_error())
    }
}

impl Default for MemoryFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for MemoryFilesystem {
    fn exists(&self, path: &Path) -> bool {
        self.read()
            .map(|inner| inner.files.contains_key(path) || inner.directories.contains(path))
            .unwrap_or(false)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.read()
            .map(|inner| inner.directories.contains(path))
            .unwrap_or(false)
    }

    fn list_files(&self, dir: &Path) -> FragdocResult<Vec<PathBuf>> {
        let inner = self.read()?;
        let mut files: Vec<PathBuf> = inner
            .files
            .keys()
            .filter(|p| p.parent() == Some(dir))
            .cloned()
            .collect();
        files.sort();
        Ok(files)
    }

    fn walk_files(&self, root: &Path) -> FragdocResult<Vec<PathBuf>> {
        let inner = self.read()?;
        let mut files: Vec<PathBuf> = inner
            .files
            .keys()
            .filter(|p| p.starts_with(root))
            .cloned()
            .collect();
        files.sort();
        Ok(files)
    }

    fn read_to_string(&self, path: &Path) -> FragdocResult<String> {
        let inner = self.read()?;
        inner.files.get(path).cloned().ok_or_else(|| {
            ApplicationError::FilesystemError {
                path: path.to_path_buf(),
                reason: "No such file".into(),
            }
            .into()
        })
    }

    fn write_file(&self, path: &Path, content: &str) -> FragdocResult<()> {
        let mut inner = self.write()?;

        // Parent must exist
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !inner.directories.contains(parent) {
                return Err(ApplicationError::FilesystemError {
                    path: path.to_path_buf(),
                    reason: "Parent directory does not exist".into(),
                }
                .into());
            }
        }

        inner.files.insert(path.to_path_buf(), content.to_string());
        Ok(())
    }
}

fn lock_error() -> FragdocError {
    FragdocError::Internal {
        message: "memory filesystem lock poisoned".into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_file_creates_parents() {
        let fs = MemoryFilesystem::new().with_file("/docs/src/app.js", "x");

        assert!(fs.is_dir(Path::new("/docs")));
        assert!(fs.is_dir(Path::new("/docs/src")));
        assert!(fs.exists(Path::new("/docs/src/app.js")));
        assert!(!fs.is_dir(Path::new("/docs/src/app.js")));
    }

    #[test]
    fn list_is_top_level_walk_is_recursive() {
        let fs = MemoryFilesystem::new()
            .with_file("/docs/b.js", "")
            .with_file("/docs/a_template.md", "")
            .with_file("/docs/sub/c.js", "");

        assert_eq!(
            fs.list_files(Path::new("/docs")).unwrap(),
            vec![PathBuf::from("/docs/a_template.md"), PathBuf::from("/docs/b.js")]
        );
        assert_eq!(fs.walk_files(Path::new("/docs")).unwrap().len(), 3);
    }

    #[test]
    fn write_requires_parent() {
        let fs = MemoryFilesystem::new();

        assert!(fs.write_file(Path::new("/nope/out.md"), "x").is_err());

        fs.add_dir("/docs");
        fs.write_file(Path::new("/docs/out.md"), "x").unwrap();
        assert_eq!(fs.read_file(Path::new("/docs/out.md")).as_deref(), Some("x"));
    }

    #[test]
    fn clones_share_contents() {
        let fs = MemoryFilesystem::new();
        let handle = fs.clone();

        fs.add_file("/a.js", "1");

        assert_eq!(handle.read_file(Path::new("/a.js")).as_deref(), Some("1"));
    }
}
