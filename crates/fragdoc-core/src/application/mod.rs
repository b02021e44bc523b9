//! Application layer for fragdoc.
//!
//! This layer contains:
//! - **Services**: use case orchestration (`DocBuildService`)
//! - **Ports**: interface definitions (traits) for external dependencies
//! - **Errors**: application-specific error types
//!
//! The application layer coordinates the domain layer. Scanning, dedenting and
//! naming rules live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

pub use services::{BuildOptions, BuildReport, DocBuildService, FragmentCollection, RenderedDocument};

pub use ports::{Filesystem, TemplateRenderer};

pub use error::ApplicationError;
