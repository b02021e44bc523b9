// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable
/// - Categorizable (for CLI display and exit codes)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Target directory
    // ========================================================================
    #[error("Target path does not exist: {}", path.display())]
    TargetNotFound { path: PathBuf },

    #[error("Target path is not a directory: {}", path.display())]
    TargetNotDirectory { path: PathBuf },

    // ========================================================================
    // Template resolution
    // ========================================================================
    #[error("No template file matching '*_template.md' found in {}", dir.display())]
    NoTemplateFound { dir: PathBuf },

    #[error(
        "Found {} template files in {}, expected exactly one: {}",
        candidates.len(),
        dir.display(),
        candidates.join(", ")
    )]
    MultipleTemplates {
        dir: PathBuf,
        candidates: Vec<String>,
    },

    #[error("Template file name must end with '_template.md': {name}")]
    InvalidTemplateName { name: String },

    // ========================================================================
    // Scan configuration
    // ========================================================================
    #[error("Invalid source extension: {0:?}")]
    InvalidExtension(String),

    #[error("No source extensions configured")]
    NoExtensions,

    // ========================================================================
    // Fragment content
    // ========================================================================
    #[error(
        "Tab character in fragment '{fragment}' ({}:{line}); tabs are not allowed",
        file.display()
    )]
    TabInFragment {
        fragment: String,
        file: PathBuf,
        line: usize,
    },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::TargetNotFound { path } => vec![
                format!("Check the path: {}", path.display()),
                "Pass the directory that holds your *_template.md file".into(),
            ],
            Self::TargetNotDirectory { path } => vec![
                format!("'{}' is a file, not a directory", path.display()),
                "Pass the directory that holds your *_template.md file".into(),
            ],
            Self::NoTemplateFound { dir } => vec![
                format!("Create a template such as {}/README_template.md", dir.display()),
                "Only the top level of the target directory is searched".into(),
            ],
            Self::MultipleTemplates { .. } => vec![
                "Keep exactly one *_template.md file per target directory".into(),
                "Rename or move the extra templates".into(),
            ],
            Self::InvalidTemplateName { .. } => {
                vec!["Template names look like <name>_template.md".into()]
            }
            Self::InvalidExtension(_) | Self::NoExtensions => vec![
                "Extensions look like '.js' or '.html'".into(),
                "Check scan.extensions in your config or the --ext flags".into(),
            ],
            Self::TabInFragment { file, line, .. } => vec![
                format!("Replace the tab at {}:{} with spaces", file.display(), line),
                "Fragment indentation is measured in spaces only".into(),
            ],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::TargetNotFound { .. } | Self::NoTemplateFound { .. } => ErrorCategory::NotFound,
            Self::InvalidExtension(_) | Self::NoExtensions => ErrorCategory::Configuration,
            Self::TargetNotDirectory { .. }
            | Self::MultipleTemplates { .. }
            | Self::InvalidTemplateName { .. }
            | Self::TabInFragment { .. } => ErrorCategory::Validation,
        }
    }
}
