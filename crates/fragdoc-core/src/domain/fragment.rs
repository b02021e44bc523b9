use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::domain::{dedent::dedent, error::DomainError, scanner::FragmentScanner};

/// Where a fragment was found.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct FragmentOrigin {
    pub file: PathBuf,
    /// 1-based line of the start marker.
    pub line: usize,
}

impl FragmentOrigin {
    pub fn new(file: impl Into<PathBuf>, line: usize) -> Self {
        Self {
            file: file.into(),
            line,
        }
    }
}

impl fmt::Display for FragmentOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file.display(), self.line)
    }
}

/// A named code fragment with its raw (still indented) body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    name: String,
    body: String,
    origin: FragmentOrigin,
}

impl Fragment {
    pub fn new(name: impl Into<String>, body: impl Into<String>, origin: FragmentOrigin) -> Self {
        Self {
            name: name.into(),
            body: body.into(),
            origin,
        }
    }

    /// Extract every fragment from the contents of `file`, in match order.
    pub fn scan_all(text: &str, file: &Path) -> Vec<Fragment> {
        FragmentScanner::new(text)
            .map(|raw| Fragment::new(raw.name, raw.body, FragmentOrigin::new(file, raw.line)))
            .collect()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn origin(&self) -> &FragmentOrigin {
        &self.origin
    }

    /// The body with its first line's indentation removed from every line.
    ///
    /// # Errors
    /// [`DomainError::TabInFragment`] if the body contains a tab. The reported
    /// line is the line in the source file.
    pub fn dedented(&self) -> Result<String, DomainError> {
        dedent(&self.body).map_err(|tab| DomainError::TabInFragment {
            fragment: self.name.clone(),
            file: self.origin.file.clone(),
            line: self.origin.line + tab.line,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Entry {
    body: String,
    origin: FragmentOrigin,
}

/// Fragment name → dedented body, last write wins.
///
/// Iteration is sorted by name so renders are reproducible.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FragmentMap {
    entries: BTreeMap<String, Entry>,
}

impl FragmentMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a body, replacing any earlier fragment of the same name.
    ///
    /// Returns the origin of the replaced fragment, if there was one.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        body: impl Into<String>,
        origin: FragmentOrigin,
    ) -> Option<FragmentOrigin> {
        self.entries
            .insert(
                name.into(),
                Entry {
                    body: body.into(),
                    origin,
                },
            )
            .map(|previous| previous.origin)
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(|e| e.body.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(name, entry)| (name.as_str(), entry.body.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
