//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `fragdoc-adapters` crate provides implementations.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::domain::RenderContext;
use crate::error::FragdocResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `fragdoc_adapters::filesystem::LocalFilesystem` (production)
/// - `fragdoc_adapters::filesystem::MemoryFilesystem` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Check if path is a directory.
    fn is_dir(&self, path: &Path) -> bool;

    /// Regular files directly inside `dir`, sorted.
    fn list_files(&self, dir: &Path) -> FragdocResult<Vec<PathBuf>>;

    /// Regular files anywhere under `root`, sorted. Symlinks are not followed.
    fn walk_files(&self, root: &Path) -> FragdocResult<Vec<PathBuf>>;

    /// Read a whole file as UTF-8.
    fn read_to_string(&self, path: &Path) -> FragdocResult<String>;

    /// Write content to a file, replacing it if present.
    fn write_file(&self, path: &Path, content: &str) -> FragdocResult<()>;
}

/// Port for template rendering.
///
/// Implemented by:
/// - `fragdoc_adapters::renderer::TeraRenderer` (Jinja-style templates)
/// - `fragdoc_adapters::renderer::SimpleRenderer` (plain `{{ name }}` substitution)
#[cfg_attr(test, mockall::automock)]
pub trait TemplateRenderer: Send + Sync {
    /// Short engine name for logs.
    fn name(&self) -> &'static str;

    /// Context names `template` cannot render without.
    ///
    /// Names the template guards itself (a `default` filter, an `is defined`
    /// test) or binds itself (loops, `set`) are not included.
    fn required_names(&self, template: &str) -> FragdocResult<BTreeSet<String>>;

    /// Render `template` with every context variable bound by name.
    fn render(&self, template: &str, context: &RenderContext) -> FragdocResult<String>;
}
