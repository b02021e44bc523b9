// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for fragdoc.
//!
//! This module contains pure logic with no I/O. Reading directories, reading
//! and writing files, and template rendering are handled via ports (traits)
//! defined in the application layer.
//!
//! - **No I/O**: the scanner and dedent work on `&str`
//! - **No external crates**: only std, thiserror, and serde derives
//! - **Deterministic**: maps are ordered, scanning is left to right
//!
pub mod dedent;
pub mod error;
pub mod fragment;
pub mod placeholder;
pub mod render_context;
pub mod scanner;
pub mod source;
pub mod template;

// Re-exports for convenience
pub use dedent::{TabFound, dedent};
pub use error::DomainError;
pub use fragment::{Fragment, FragmentMap, FragmentOrigin};
pub use placeholder::referenced_names;
pub use render_context::{RenderContext, UndefinedPolicy};
pub use scanner::{END_MARKER, FragmentScanner, RawFragment, START_MARKER};
pub use source::{DEFAULT_SOURCE_EXTENSIONS, SourceExtensions};
pub use template::{TEMPLATE_SUFFIX, TemplateFile, is_template_name};

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;

    // ========================================================================
    // Scan + dedent + map, as the build service chains them
    // ========================================================================

    fn collect(files: &[(&str, &str)]) -> Result<FragmentMap, DomainError> {
        let mut map = FragmentMap::new();
        for (path, text) in files {
            for fragment in Fragment::scan_all(text, Path::new(path)) {
                let body = fragment.dedented()?;
                map.insert(fragment.name(), body, fragment.origin().clone());
            }
        }
        Ok(map)
    }

    #[test]
    fn example_fragment_dedents_to_top_level() {
        let map = collect(&[(
            "a.js",
            "/*** CODE FRAGMENT foo ***/\n  hello\n  world\n/*** END CODE FRAGMENT ***/",
        )])
        .unwrap();
        assert_eq!(map.get("foo"), Some("hello\nworld"));
    }

    #[test]
    fn later_file_wins_on_duplicate_name() {
        let first = "/*** CODE FRAGMENT dup ***/\nfrom first\n/*** END CODE FRAGMENT ***/";
        let second = "/*** CODE FRAGMENT dup ***/\nfrom second\n/*** END CODE FRAGMENT ***/";
        let map = collect(&[("a.html", first), ("b.js", second)]).unwrap();
        assert_eq!(map.get("dup"), Some("from second"));
    }

    #[test]
    fn later_match_in_same_file_wins() {
        let text = "\
/*** CODE FRAGMENT dup ***/
one
/*** END CODE FRAGMENT ***/
/*** CODE FRAGMENT dup ***/
two
/*** END CODE FRAGMENT ***/";
        let map = collect(&[("a.js", text)]).unwrap();
        assert_eq!(map.get("dup"), Some("two"));
    }

    #[test]
    fn tab_anywhere_in_body_fails_collection() {
        let text = "/*** CODE FRAGMENT t ***/\n  a\n  \tb\n/*** END CODE FRAGMENT ***/";
        assert!(matches!(
            collect(&[("a.js", text)]),
            Err(DomainError::TabInFragment { line: 3, .. })
        ));
    }

    #[test]
    fn tab_outside_fragments_is_fine() {
        let text = "\tlet x;\n/*** CODE FRAGMENT ok ***/\n  y\n/*** END CODE FRAGMENT ***/";
        assert_eq!(collect(&[("a.js", text)]).unwrap().get("ok"), Some("y"));
    }

    #[test]
    fn template_suffix_constant_matches_helper() {
        assert!(is_template_name(&format!("x{TEMPLATE_SUFFIX}")));
        assert!(!is_template_name("x_template.markdown"));
    }
}
