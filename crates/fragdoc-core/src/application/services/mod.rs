//! Application services - orchestrate use cases.

pub mod build_service;

pub use build_service::{
    BuildOptions, BuildReport, DocBuildService, FragmentCollection, RenderedDocument,
};
