//! Doc Build Service - main application orchestrator.
//!
//! This service coordinates one documentation build:
//! 1. Validate the target directory and locate its single template
//! 2. Scan source files for fragments, extension by extension
//! 3. Render the template with the fragment bodies
//! 4. Write `<name>.md` next to the template

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        ports::{Filesystem, TemplateRenderer},
    },
    domain::{
        DomainError, Fragment, FragmentMap, RenderContext, SourceExtensions, TemplateFile,
        UndefinedPolicy,
    },
    error::FragdocResult,
};

/// Options for a build.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildOptions {
    pub extensions: SourceExtensions,
    pub undefined: UndefinedPolicy,
}

impl BuildOptions {
    pub fn new(extensions: SourceExtensions) -> Self {
        Self {
            extensions,
            undefined: UndefinedPolicy::default(),
        }
    }

    pub fn with_undefined_policy(mut self, policy: UndefinedPolicy) -> Self {
        self.undefined = policy;
        self
    }
}

/// Fragments gathered from one target directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FragmentCollection {
    pub fragments: FragmentMap,
    /// Source files read, in processing order.
    pub sources: Vec<PathBuf>,
    /// Names defined more than once, sorted.
    pub duplicates: Vec<String>,
}

/// A rendered document that has not been written yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDocument {
    pub template: TemplateFile,
    pub content: String,
    pub collection: FragmentCollection,
    /// Placeholders that named no fragment and rendered empty.
    pub undefined: Vec<String>,
}

impl RenderedDocument {
    /// Summarize this document. `written` is false for dry runs.
    pub fn report(&self, written: bool) -> BuildReport {
        BuildReport {
            template: self.template.path().to_path_buf(),
            output: self.template.output_path().to_path_buf(),
            sources_scanned: self.collection.sources.len(),
            fragments: self.collection.fragments.names().map(str::to_string).collect(),
            duplicates: self.collection.duplicates.clone(),
            undefined_placeholders: self.undefined.clone(),
            bytes_written: if written { self.content.len() } else { 0 },
            dry_run: !written,
        }
    }
}

/// Outcome of a build, serialized for `--output-format json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildReport {
    pub template: PathBuf,
    pub output: PathBuf,
    pub sources_scanned: usize,
    pub fragments: Vec<String>,
    pub duplicates: Vec<String>,
    pub undefined_placeholders: Vec<String>,
    pub bytes_written: usize,
    pub dry_run: bool,
}

/// Main build service.
///
/// Everything that can fail runs before the output file is touched, so a
/// failed build leaves the target directory unchanged.
pub struct DocBuildService {
    filesystem: Box<dyn Filesystem>,
    renderer: Box<dyn TemplateRenderer>,
    options: BuildOptions,
}

impl DocBuildService {
    /// Create a new build service with the given adapters.
    pub fn new(
        filesystem: Box<dyn Filesystem>,
        renderer: Box<dyn TemplateRenderer>,
        options: BuildOptions,
    ) -> Self {
        Self {
            filesystem,
            renderer,
            options,
        }
    }

    pub fn options(&self) -> &BuildOptions {
        &self.options
    }

    /// Render the template of `target` and write the output file.
    #[instrument(skip_all, fields(target = %target.as_ref().display()))]
    pub fn build(&self, target: impl AsRef<Path>) -> FragdocResult<BuildReport> {
        let document = self.prepare(target.as_ref())?;
        let output = document.template.output_path();

        self.filesystem.write_file(output, &document.content)?;
        info!(
            output = %output.display(),
            bytes = document.content.len(),
            "Documentation written"
        );

        Ok(document.report(true))
    }

    /// Everything [`build`](Self::build) does except writing.
    #[instrument(skip_all, fields(target = %target.as_ref().display()))]
    pub fn prepare(&self, target: impl AsRef<Path>) -> FragdocResult<RenderedDocument> {
        let target = target.as_ref();

        let template = self.locate_template(target)?;
        info!(template = %template.path().display(), "Template located");

        let collection = self.collect_fragments(target)?;
        info!(
            sources = collection.sources.len(),
            fragments = collection.fragments.len(),
            "Fragments collected"
        );

        let source = self.filesystem.read_to_string(template.path())?;
        let (context, undefined) = self.build_context(&source, &collection.fragments)?;

        debug!(engine = self.renderer.name(), "Rendering template");
        let content = self.renderer.render(&source, &context)?;

        Ok(RenderedDocument {
            template,
            content,
            collection,
            undefined,
        })
    }

    /// Find the single `*_template.md` directly inside `target`.
    pub fn locate_template(&self, target: &Path) -> FragdocResult<TemplateFile> {
        self.check_target(target)?;
        let files = self.filesystem.list_files(target)?;
        Ok(TemplateFile::resolve(target, &files)?)
    }

    /// Scan every source file under `target` and dedent its fragments.
    ///
    /// Files are processed one extension at a time, in configured order, and
    /// in sorted path order within an extension. A later definition of a name
    /// replaces an earlier one.
    pub fn collect_fragments(&self, target: &Path) -> FragdocResult<FragmentCollection> {
        self.check_target(target)?;
        let sources = self.source_files(target)?;

        let mut fragments = FragmentMap::new();
        let mut duplicates = BTreeSet::new();

        for path in &sources {
            let text = self.filesystem.read_to_string(path)?;
            let found = Fragment::scan_all(&text, path);
            if !found.is_empty() {
                debug!(file = %path.display(), count = found.len(), "Scanned source");
            }

            for fragment in found {
                let body = fragment.dedented()?;
                let origin = fragment.origin().clone();
                if let Some(previous) = fragments.insert(fragment.name(), body, origin) {
                    warn!(
                        fragment = fragment.name(),
                        replaced = %previous,
                        by = %fragment.origin(),
                        "Duplicate fragment name, later definition wins"
                    );
                    duplicates.insert(fragment.name().to_string());
                }
            }
        }

        Ok(FragmentCollection {
            fragments,
            sources,
            duplicates: duplicates.into_iter().collect(),
        })
    }

    /// Source files under `target` in processing order.
    ///
    /// A file matching several extensions is read once per extension.
    pub fn source_files(&self, target: &Path) -> FragdocResult<Vec<PathBuf>> {
        let all = self.filesystem.walk_files(target)?;

        let mut ordered = Vec::new();
        for extension in self.options.extensions.iter() {
            ordered.extend(
                all.iter()
                    .filter(|path| SourceExtensions::file_has_extension(path, extension))
                    .cloned(),
            );
        }
        Ok(ordered)
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    fn check_target(&self, target: &Path) -> FragdocResult<()> {
        if !self.filesystem.exists(target) {
            return Err(DomainError::TargetNotFound {
                path: target.to_path_buf(),
            }
            .into());
        }
        if !self.filesystem.is_dir(target) {
            return Err(DomainError::TargetNotDirectory {
                path: target.to_path_buf(),
            }
            .into());
        }
        Ok(())
    }

    /// Bind every fragment, then apply the undefined policy to the names the
    /// template requires but no fragment defines.
    ///
    /// Names the template can do without stay unbound, so its own fallbacks
    /// (`default`, `is defined`) still apply.
    fn build_context(
        &self,
        template: &str,
        fragments: &FragmentMap,
    ) -> FragdocResult<(RenderContext, Vec<String>)> {
        let mut context = RenderContext::from_fragments(fragments);

        let undefined: Vec<String> = self
            .renderer
            .required_names(template)?
            .into_iter()
            .filter(|name| !fragments.contains(name))
            .collect();

        if undefined.is_empty() {
            return Ok((context, undefined));
        }

        match self.options.undefined {
            UndefinedPolicy::Strict => {
                Err(ApplicationError::UndefinedPlaceholders { names: undefined }.into())
            }
            UndefinedPolicy::Empty => {
                for name in &undefined {
                    warn!(placeholder = %name, "No fragment defines placeholder, rendering empty");
                    context.insert(name.as_str(), "");
                }
                Ok((context, undefined))
            }
        }
    }
}
