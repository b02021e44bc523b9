use std::fmt;
use std::path::Path;

use crate::domain::error::DomainError;

/// Extensions scanned when nothing else is configured.
pub const DEFAULT_SOURCE_EXTENSIONS: [&str; 2] = [".html", ".js"];

/// Ordered, non-empty set of source file extensions.
///
/// Order matters: files are processed extension by extension, so with
/// duplicate fragment names the last extension's files win.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceExtensions(Vec<String>);

impl SourceExtensions {
    /// Build from user input. `js` and `.js` are equivalent.
    ///
    /// # Errors
    /// - [`DomainError::InvalidExtension`] for empty or path-like entries
    /// - [`DomainError::NoExtensions`] if nothing is left
    pub fn new<I, S>(extensions: I) -> Result<Self, DomainError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut normalized: Vec<String> = Vec::new();
        for raw in extensions {
            let ext = normalize(raw.as_ref())?;
            if !normalized.contains(&ext) {
                normalized.push(ext);
            }
        }

        if normalized.is_empty() {
            return Err(DomainError::NoExtensions);
        }
        Ok(Self(normalized))
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether the file name of `path` ends with `extension`.
    pub fn file_has_extension(path: &Path, extension: &str) -> bool {
        path.file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|name| name.ends_with(extension))
    }
}

impl Default for SourceExtensions {
    fn default() -> Self {
        Self(DEFAULT_SOURCE_EXTENSIONS.iter().map(|e| e.to_string()).collect())
    }
}

impl fmt::Display for SourceExtensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join(", "))
    }
}

fn normalize(raw: &str) -> Result<String, DomainError> {
    let ext = raw.trim();
    if ext.is_empty() || ext.contains(['/', '\\']) || ext.chars().any(char::is_whitespace) {
        return Err(DomainError::InvalidExtension(raw.to_string()));
    }
    if ext.starts_with('.') {
        Ok(ext.to_string())
    } else {
        Ok(format!(".{ext}"))
    }
}
