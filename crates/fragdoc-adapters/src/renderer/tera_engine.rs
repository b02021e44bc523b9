//! Tera-based renderer (Jinja2-style templates).

use std::collections::BTreeSet;
use std::error::Error as _;

use fragdoc_core::{
    application::{ApplicationError, ports::TemplateRenderer},
    domain::RenderContext,
    error::{FragdocError, FragdocResult},
};
use tera::{Context, Tera};
use tracing::instrument;

use super::tera_variables::required_variables;

/// Renders templates with Tera.
///
/// Autoescaping is off: fragment bodies are code and go into Markdown verbatim.
#[derive(Debug, Clone, Copy, Default)]
pub struct TeraRenderer;

impl TeraRenderer {
    /// Create a new Tera renderer.
    pub fn new() -> Self {
        Self
    }
}

impl TemplateRenderer for TeraRenderer {
    fn name(&self) -> &'static str {
        "tera"
    }

    fn required_names(&self, template: &str) -> FragdocResult<BTreeSet<String>> {
        required_variables(template).map_err(rendering_failed)
    }

    #[instrument(skip_all, fields(variables = context.len()))]
    fn render(&self, template: &str, context: &RenderContext) -> FragdocResult<String> {
        let mut tera_context = Context::new();
        for (name, value) in context.variables() {
            tera_context.insert(name, value);
        }

        Tera::one_off(template, &tera_context, false).map_err(rendering_failed)
    }
}

fn rendering_failed(err: tera::Error) -> FragdocError {
    ApplicationError::RenderingFailed {
        reason: error_chain(&err),
    }
    .into()
}

/// Tera puts the useful detail (line, column, variable) in the source chain.
fn error_chain(err: &tera::Error) -> String {
    let mut reason = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        reason.push_str(": ");
        reason.push_str(&cause.to_string());
        source = cause.source();
    }
    reason
}
