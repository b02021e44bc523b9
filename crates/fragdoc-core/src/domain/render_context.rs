use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::fragment::FragmentMap;

/// What to do with placeholders that name no fragment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UndefinedPolicy {
    /// Substitute empty text and log a warning.
    #[default]
    Empty,
    /// Fail the run, write nothing.
    Strict,
}

/// Variables handed to a [`TemplateRenderer`](crate::application::ports::TemplateRenderer).
///
/// A **Value Object**: fragment names map to dedented bodies. Sorted so that
/// engines iterating the context behave the same on every run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderContext {
    variables: BTreeMap<String, String>,
}

impl RenderContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// One variable per fragment.
    pub fn from_fragments(fragments: &FragmentMap) -> Self {
        Self {
            variables: fragments
                .iter()
                .map(|(name, body)| (name.to_string(), body.to_string()))
                .collect(),
        }
    }

    /// Add a variable (builder style).
    pub fn with_variable(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.variables.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.variables.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.variables.contains_key(key)
    }

    pub fn variables(&self) -> impl Iterator<Item = (&str, &str)> {
        self.variables
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FragmentOrigin;

    #[test]
    fn built_from_fragments() {
        let mut map = FragmentMap::new();
        map.insert("a", "alpha", FragmentOrigin::new("x.js", 1));
        let ctx = RenderContext::from_fragments(&map);
        assert_eq!(ctx.get("a"), Some("alpha"));
        assert_eq!(ctx.len(), 1);
    }

    #[test]
    fn with_variable_adds_and_overrides() {
        let ctx = RenderContext::new()
            .with_variable("k", "1")
            .with_variable("k", "2");
        assert_eq!(ctx.get("k"), Some("2"));
    }

    #[test]
    fn default_policy_is_empty() {
        assert_eq!(UndefinedPolicy::default(), UndefinedPolicy::Empty);
    }
}
