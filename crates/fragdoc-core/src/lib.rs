//! Fragdoc Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for `fragdoc`,
//! the tool that splices delimited code fragments out of source files and
//! into a single Markdown template.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           fragdoc-cli (CLI)             │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │            (DocBuildService)            │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │       (Filesystem, TemplateRenderer)    │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    fragdoc-adapters (Infrastructure)    │
//! │  (LocalFilesystem, TeraRenderer, etc)   │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │        Domain Layer (Pure Logic)        │
//! │  (scanner, dedent, FragmentMap, etc)    │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use fragdoc_core::{
//!     application::{BuildOptions, DocBuildService},
//!     domain::SourceExtensions,
//! };
//!
//! let options = BuildOptions::new(SourceExtensions::default());
//! let service = DocBuildService::new(filesystem, renderer, options);
//! let report = service.build("./docs").unwrap();
//! println!("wrote {}", report.output.display());
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        BuildOptions, BuildReport, DocBuildService, RenderedDocument,
        ports::{Filesystem, TemplateRenderer},
    };
    pub use crate::domain::{
        Fragment, FragmentMap, FragmentOrigin, RenderContext, SourceExtensions, TemplateFile,
        UndefinedPolicy,
    };
    pub use crate::error::{FragdocError, FragdocResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
