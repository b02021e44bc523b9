//! Plain `{{ name }}` placeholders.
//!
//! A placeholder is a `{{ ... }}` token whose trimmed content is a single
//! identifier. Tokens holding anything else (filters, calls, literals,
//! operators) are not placeholders and are left to the renderer.

use std::collections::BTreeSet;

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

/// Names of all plain placeholders in `source`, sorted.
pub fn referenced_names(source: &str) -> BTreeSet<String> {
    let mut names = BTreeSet::new();
    let mut rest = source;

    while let Some(open) = rest.find(OPEN) {
        let after = &rest[open + OPEN.len()..];
        let Some(close) = after.find(CLOSE) else {
            break;
        };

        let content = after[..close].trim();
        if is_identifier(content) {
            names.insert(content.to_string());
        }

        rest = &after[close + CLOSE.len()..];
    }

    names
}

/// `[A-Za-z_][A-Za-z0-9_]*`
fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
