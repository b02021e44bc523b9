//! Application layer errors.
//!
//! These errors represent failures in orchestration, not business rules.
//! Business rule errors are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApplicationError {
    /// Filesystem operation failed.
    #[error("Filesystem error at {}: {reason}", path.display())]
    FilesystemError { path: PathBuf, reason: String },

    /// Template rendering failed.
    #[error("Template rendering failed: {reason}")]
    RenderingFailed { reason: String },

    /// Placeholders without a fragment, in strict mode.
    #[error("Template references undefined fragments: {}", names.join(", "))]
    UndefinedPlaceholders { names: Vec<String> },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that the file is readable UTF-8 text".into(),
                "Check that you have write permissions in the target directory".into(),
            ],
            Self::RenderingFailed { .. } => vec![
                "Check the template syntax around the reported location".into(),
                "Use {% raw %}...{% endraw %} for literal braces".into(),
            ],
            Self::UndefinedPlaceholders { names } => vec![
                format!(
                    "Add a '/*** CODE FRAGMENT {} ***/' block to a source file",
                    names.first().map(String::as_str).unwrap_or("<name>")
                ),
                "Or drop --strict to render undefined placeholders as empty text".into(),
            ],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::FilesystemError { .. } | Self::RenderingFailed { .. } => ErrorCategory::Internal,
            Self::UndefinedPlaceholders { .. } => ErrorCategory::Validation,
        }
    }
}
