//! Implementation of a documentation build.
//!
//! Responsibility: merge CLI flags over the loaded configuration, wire the
//! adapters into the core build service, and display results. No business
//! logic lives here.

use serde::Serialize;
use tracing::{debug, info, instrument};

use fragdoc_adapters::{LocalFilesystem, SimpleRenderer, TeraRenderer};
use fragdoc_core::{
    application::{BuildOptions, BuildReport, DocBuildService, ports::TemplateRenderer},
    domain::{SourceExtensions, UndefinedPolicy},
};

use crate::{
    cli::{BuildArgs, OutputFormat},
    config::{AppConfig, RendererKind},
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

/// JSON document printed by `--dry-run --output-format json`.
#[derive(Debug, Serialize)]
struct DryRunOutput<'a> {
    #[serde(flatten)]
    report: &'a BuildReport,
    content: &'a str,
}

/// Execute a build of `args.target_dir`.
///
/// 1. Resolve extensions, undefined-placeholder policy and engine
/// 2. Render via `DocBuildService`
/// 3. Write the output file, or print it for `--dry-run`
/// 4. Report
#[instrument(skip_all, fields(target = %args.target_dir.display()))]
pub fn execute(args: BuildArgs, config: &AppConfig, output: &OutputManager) -> CliResult<()> {
    let (options, engine) = resolve_options(&args, config)?;
    debug!(
        extensions = %options.extensions,
        undefined = ?options.undefined,
        ?engine,
        "Build options resolved"
    );

    let service = DocBuildService::new(
        Box::new(LocalFilesystem::new()),
        renderer_for(engine),
        options,
    );

    if args.dry_run {
        let document = service
            .prepare(&args.target_dir)
            .with_cli_context(|| "rendering template")?;
        let report = document.report(false);
        info!(output = %report.output.display(), "Dry run, nothing written");

        return match output.format() {
            OutputFormat::Json => output
                .json(&DryRunOutput {
                    report: &report,
                    content: &document.content,
                })
                .with_cli_context(|| "writing build report"),
            _ => output
                .raw(&document.content)
                .with_cli_context(|| "writing rendered document"),
        };
    }

    let report = service
        .build(&args.target_dir)
        .with_cli_context(|| "building documentation")?;

    match output.format() {
        OutputFormat::Json => output
            .json(&report)
            .with_cli_context(|| "writing build report"),
        _ => summarize(&report, output),
    }
}

/// CLI flags win over configuration.
fn resolve_options(
    args: &BuildArgs,
    config: &AppConfig,
) -> CliResult<(BuildOptions, RendererKind)> {
    let extensions = if args.extensions.is_empty() {
        // Invalid configured extensions surface as configuration errors.
        SourceExtensions::new(&config.scan.extensions).map_err(|e| CliError::Core(e.into()))?
    } else {
        SourceExtensions::new(&args.extensions).map_err(|e| CliError::InvalidInput {
            message: e.to_string(),
            source: Some(Box::new(e)),
        })?
    };

    let undefined = if args.strict || config.render.strict {
        UndefinedPolicy::Strict
    } else {
        UndefinedPolicy::Empty
    };

    let engine = args.engine.unwrap_or(config.render.engine);

    Ok((
        BuildOptions::new(extensions).with_undefined_policy(undefined),
        engine,
    ))
}

fn renderer_for(kind: RendererKind) -> Box<dyn TemplateRenderer> {
    match kind {
        RendererKind::Tera => Box::new(TeraRenderer::new()),
        RendererKind::Simple => Box::new(SimpleRenderer::new()),
    }
}

fn summarize(report: &BuildReport, output: &OutputManager) -> CliResult<()> {
    for name in &report.duplicates {
        output.warning(&format!(
            "Fragment '{name}' is defined more than once; the last definition was used"
        ))?;
    }
    for name in &report.undefined_placeholders {
        output.warning(&format!(
            "Placeholder '{name}' names no fragment and was left empty"
        ))?;
    }

    output.success(&format!("Wrote {}", report.output.display()))?;
    output.print(&format!(
        "  {} fragment(s) from {} source file(s), {} bytes",
        report.fragments.len(),
        report.sources_scanned,
        report.bytes_written
    ))?;
    Ok(())
}

// ── tests ─────────────────────────────────────────────────────────────────────
