//! The Markdown template and the output file derived from it.

use std::path::{Path, PathBuf};

use crate::domain::error::DomainError;

/// File name suffix that marks a template.
pub const TEMPLATE_SUFFIX: &str = "_template.md";

/// Replaces [`TEMPLATE_SUFFIX`] in the output file name.
pub const OUTPUT_SUFFIX: &str = ".md";

/// Whether a file name marks a template (`<name>_template.md`).
pub fn is_template_name(name: &str) -> bool {
    name.ends_with(TEMPLATE_SUFFIX)
}

/// The single template of a target directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateFile {
    path: PathBuf,
    output: PathBuf,
}

impl TemplateFile {
    /// Wrap a template path and derive its sibling output path.
    ///
    /// `docs/guide_template.md` renders to `docs/guide.md`.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self, DomainError> {
        let path = path.into();
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| DomainError::InvalidTemplateName {
                name: path.display().to_string(),
            })?;
        let stem = name
            .strip_suffix(TEMPLATE_SUFFIX)
            .ok_or_else(|| DomainError::InvalidTemplateName {
                name: name.to_string(),
            })?;

        let output = path.with_file_name(format!("{stem}{OUTPUT_SUFFIX}"));
        Ok(Self { path, output })
    }

    /// Pick the one template among the regular files of `dir`.
    ///
    /// # Errors
    /// - [`DomainError::NoTemplateFound`] if no file matches
    /// - [`DomainError::MultipleTemplates`] if several do; the names are sorted
    pub fn resolve(dir: &Path, files: &[PathBuf]) -> Result<Self, DomainError> {
        let mut candidates: Vec<&PathBuf> = files
            .iter()
            .filter(|p| {
                p.file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(is_template_name)
            })
            .collect();
        candidates.sort();

        match candidates.as_slice() {
            [] => Err(DomainError::NoTemplateFound {
                dir: dir.to_path_buf(),
            }),
            [only] => Self::new(only.as_path()),
            many => Err(DomainError::MultipleTemplates {
                dir: dir.to_path_buf(),
                candidates: many
                    .iter()
                    .map(|p| {
                        p.file_name()
                            .map(|n| n.to_string_lossy().into_owned())
                            .unwrap_or_default()
                    })
                    .collect(),
            }),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn output_path(&self) -> &Path {
        &self.output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derives_output_name() {
        let t = TemplateFile::new("docs/guide_template.md").unwrap();
        assert_eq!(t.output_path(), Path::new("docs/guide.md"));
    }

    #[test]
    fn bare_suffix_becomes_dot_md() {
        let t = TemplateFile::new("docs/_template.md").unwrap();
        assert_eq!(t.output_path(), Path::new("docs/.md"));
    }

    #[test]
    fn only_trailing_suffix_is_replaced() {
        let t = TemplateFile::new("a_template.md_template.md").unwrap();
        assert_eq!(t.output_path(), Path::new("a_template.md.md"));
    }

    #[test]
    fn rejects_non_template_name() {
        assert!(matches!(
            TemplateFile::new("README.md"),
            Err(DomainError::InvalidTemplateName { .. })
        ));
    }

    #[test]
    fn resolve_picks_single_match() {
        let files = vec![
            PathBuf::from("d/app.js"),
            PathBuf::from("d/README_template.md"),
            PathBuf::from("d/README.md"),
        ];
        let t = TemplateFile::resolve(Path::new("d"), &files).unwrap();
        assert_eq!(t.path(), Path::new("d/README_template.md"));
        assert_eq!(t.output_path(), Path::new("d/README.md"));
    }

    #[test]
    fn resolve_rejects_none() {
        let files = vec![PathBuf::from("d/README.md")];
        assert!(matches!(
            TemplateFile::resolve(Path::new("d"), &files),
            Err(DomainError::NoTemplateFound { .. })
        ));
    }

    #[test]
    fn resolve_lists_all_candidates_when_ambiguous() {
        let files = vec![
            PathBuf::from("d/b_template.md"),
            PathBuf::from("d/a_template.md"),
        ];
        match TemplateFile::resolve(Path::new("d"), &files) {
            Err(DomainError::MultipleTemplates { candidates, .. }) => {
                assert_eq!(candidates, ["a_template.md", "b_template.md"]);
            }
            other => panic!("expected MultipleTemplates, got {other:?}"),
        }
    }
}
