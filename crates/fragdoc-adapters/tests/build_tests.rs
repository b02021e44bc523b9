//! Builds wired with real adapters.

use std::fs;
use std::path::Path;

use fragdoc_adapters::{LocalFilesystem, MemoryFilesystem, SimpleRenderer, TeraRenderer};
use fragdoc_core::{
    application::{ApplicationError, BuildOptions, DocBuildService},
    domain::{DomainError, SourceExtensions, UndefinedPolicy},
    error::FragdocError,
};

const APP_JS: &str = "\
function main() {
    /*** CODE FRAGMENT greet ***/
    function greet() {
        return 'hi';
    }
    /*** END CODE FRAGMENT ***/
}
";

fn local_service(options: BuildOptions) -> DocBuildService {
    DocBuildService::new(
        Box::new(LocalFilesystem::new()),
        Box::new(TeraRenderer::new()),
        options,
    )
}

#[test]
fn renders_fragment_into_sibling_markdown() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("guide_template.md"), "# Guide\n\n{{ greet }}").unwrap();
    fs::create_dir(dir.path().join("src")).unwrap();
    fs::write(dir.path().join("src").join("app.js"), APP_JS).unwrap();

    let report = local_service(BuildOptions::default())
        .build(dir.path())
        .unwrap();

    let output = fs::read_to_string(dir.path().join("guide.md")).unwrap();
    assert_eq!(
        output,
        "# Guide\n\nfunction greet() {\n    return 'hi';\n}"
    );
    assert_eq!(report.output, dir.path().join("guide.md"));
    assert_eq!(report.fragments, vec!["greet".to_string()]);
}

#[test]
fn output_is_overwritten() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("t_template.md"), "new").unwrap();
    fs::write(dir.path().join("t.md"), "old").unwrap();

    local_service(BuildOptions::default())
        .build(dir.path())
        .unwrap();

    assert_eq!(fs::read_to_string(dir.path().join("t.md")).unwrap(), "new");
}

#[test]
fn configured_extensions_limit_scanned_files() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("t_template.md"), "[{{ a }}]").unwrap();
    fs::write(
        dir.path().join("lib.rs"),
        "/*** CODE FRAGMENT a ***/\nfrom-rs\n/*** END CODE FRAGMENT ***/\n",
    )
    .unwrap();

    let default = local_service(BuildOptions::default())
        .prepare(dir.path())
        .unwrap();
    assert_eq!(default.content, "[]");

    let rust_only = BuildOptions::new(SourceExtensions::new(["rs"]).unwrap());
    let document = local_service(rust_only).prepare(dir.path()).unwrap();
    assert_eq!(document.content, "[from-rs]");
}

#[test]
fn prepare_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("t_template.md"), "x").unwrap();

    local_service(BuildOptions::default())
        .prepare(dir.path())
        .unwrap();

    assert!(!dir.path().join("t.md").exists());
}

#[test]
fn tab_leaves_directory_untouched() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("t_template.md"), "{{ x }}").unwrap();
    fs::write(
        dir.path().join("a.js"),
        "/*** CODE FRAGMENT x ***/\n\tx\n/*** END CODE FRAGMENT ***/\n",
    )
    .unwrap();

    let err = local_service(BuildOptions::default())
        .build(dir.path())
        .unwrap_err();

    assert!(matches!(
        err,
        FragdocError::Domain(DomainError::TabInFragment { .. })
    ));
    assert!(!dir.path().join("t.md").exists());
}

#[test]
fn memory_filesystem_with_simple_renderer() {
    let fs = MemoryFilesystem::new()
        .with_file("/docs/readme_template.md", "A {{ x }} B {{ y }}")
        .with_file(
            "/docs/web/page.html",
            "<p>\n  /*** CODE FRAGMENT x ***/\n  <b>x</b>\n  /*** END CODE FRAGMENT ***/\n</p>\n",
        );
    let handle = fs.clone();

    let service = DocBuildService::new(
        Box::new(fs),
        Box::new(SimpleRenderer::new()),
        BuildOptions::default().with_undefined_policy(UndefinedPolicy::Empty),
    );
    let report = service.build("/docs").unwrap();

    assert_eq!(
        handle.read_file(Path::new("/docs/readme.md")).as_deref(),
        Some("A <b>x</b> B ")
    );
    assert_eq!(report.undefined_placeholders, vec!["y".to_string()]);
}

fn template_only(template: &str) -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("t_template.md"), template).unwrap();
    fs::write(
        dir.path().join("a.js"),
        "/*** CODE FRAGMENT real ***/\nR\n/*** END CODE FRAGMENT ***/\n",
    )
    .unwrap();
    dir
}

#[test]
fn missing_name_inside_expression_renders_empty() {
    let dir = template_only("[{{ real ~ ghost }}]");

    let document = local_service(BuildOptions::default())
        .prepare(dir.path())
        .unwrap();

    assert_eq!(document.content, "[R]");
    assert_eq!(document.undefined, vec!["ghost".to_string()]);
}

#[test]
fn template_fallback_survives_missing_fragment() {
    let dir = template_only("[{{ ghost | default(value=\"fallback\") }}]");

    let document = local_service(BuildOptions::default())
        .prepare(dir.path())
        .unwrap();

    assert_eq!(document.content, "[fallback]");
    assert!(document.undefined.is_empty());
}

#[test]
fn is_defined_sees_missing_fragment() {
    let dir = template_only("{% if ghost is defined %}yes{% else %}no{% endif %}");

    let document = local_service(BuildOptions::default())
        .prepare(dir.path())
        .unwrap();

    assert_eq!(document.content, "no");
}

#[test]
fn strict_ignores_raw_comments_and_set() {
    let dir = template_only(
        "{% raw %}{{ literal }}{% endraw %}{# {{ note }} #}{% set local = real %}{{ local }}",
    );
    let strict = BuildOptions::default().with_undefined_policy(UndefinedPolicy::Strict);

    let document = local_service(strict).prepare(dir.path()).unwrap();

    assert_eq!(document.content, "{{ literal }}R");
}

#[test]
fn strict_reports_every_missing_name() {
    let dir = template_only("{{ real ~ ghost }}{{ other | upper }}");
    let strict = BuildOptions::default().with_undefined_policy(UndefinedPolicy::Strict);

    let err = local_service(strict).prepare(dir.path()).unwrap_err();

    assert_eq!(
        err,
        FragdocError::Application(ApplicationError::UndefinedPlaceholders {
            names: vec!["ghost".into(), "other".into()]
        })
    );
}
