//! Simple variable substitution renderer.

use std::collections::BTreeSet;

use fragdoc_core::{
    application::ports::TemplateRenderer,
    domain::{RenderContext, referenced_names},
    error::FragdocResult,
};
use tracing::instrument;

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

/// Renderer that replaces `{{ name }}` with the value bound to `name`.
///
/// Tokens whose trimmed content is not a bound variable, and any other
/// template syntax, are copied unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleRenderer;

impl SimpleRenderer {
    /// Create a new simple renderer.
    pub fn new() -> Self {
        Self
    }
}

impl TemplateRenderer for SimpleRenderer {
    fn name(&self) -> &'static str {
        "simple"
    }

    fn required_names(&self, template: &str) -> FragdocResult<BTreeSet<String>> {
        Ok(referenced_names(template))
    }

    #[instrument(skip_all, fields(variables = context.len()))]
    fn render(&self, template: &str, context: &RenderContext) -> FragdocResult<String> {
        Ok(substitute(template, context))
    }
}

fn substitute(template: &str, context: &RenderContext) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find(OPEN) {
        out.push_str(&rest[..open]);
        let after = &rest[open + OPEN.len()..];

        let Some(close) = after.find(CLOSE) else {
            out.push_str(&rest[open..]);
            return out;
        };

        match context.get(after[..close].trim()) {
            Some(value) => out.push_str(value),
            None => out.push_str(&rest[open..open + OPEN.len() + close + CLOSE.len()]),
        }
        rest = &after[close + CLOSE.len()..];
    }

    out.push_str(rest);
    out
}
