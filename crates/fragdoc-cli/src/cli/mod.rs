//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser};

use crate::config::RendererKind;

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name     = "fragdoc",
    bin_name = "fragdoc",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Splice code fragments from source files into a Markdown template",
    long_about = "Given a target directory, fragdoc:\n\
        - finds the single Markdown file named <name>_template.md in it\n\
        - searches the source files below it for\n\
        \n\
        \x20   /*** CODE FRAGMENT fragment_name ***/\n\
        \x20   ...code...\n\
        \x20   /*** END CODE FRAGMENT ***/\n\
        \n\
        \x20 building a map of fragment name -> dedented code\n\
        - renders the template, where {{ fragment_name }} is replaced by the\n\
        \x20 fragment, and writes the result to <name>.md",
    after_help = "EXAMPLES:\n\
        \x20 fragdoc docs/\n\
        \x20 fragdoc docs/ --ext .ts --ext .tsx\n\
        \x20 fragdoc docs/ --strict --engine simple\n\
        \x20 fragdoc docs/ --dry-run --output-format json",
    arg_required_else_help = true,
)]
pub struct Cli {
    /// Logging, colour and output flags.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// What to build.
    #[command(flatten)]
    pub build: BuildArgs,
}

// ── Build arguments ───────────────────────────────────────────────────────────

/// Arguments for a documentation build.
#[derive(Debug, Args)]
pub struct BuildArgs {
    /// Directory holding the template and the source files.
    #[arg(value_name = "TARGET_DIR")]
    pub target_dir: PathBuf,

    /// Source file extension to scan (repeatable, replaces the configured list).
    #[arg(
        short = 'e',
        long = "ext",
        value_name = "EXT",
        value_delimiter = ','
    )]
    pub extensions: Vec<String>,

    /// Fail when the template names a fragment that does not exist.
    #[arg(long)]
    pub strict: bool,

    /// Template engine.
    #[arg(long, value_enum, value_name = "ENGINE")]
    pub engine: Option<RendererKind>,

    /// Render and print to stdout without writing the output file.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

// ── tests ─────────────────────────────────────────────────────────────────────
