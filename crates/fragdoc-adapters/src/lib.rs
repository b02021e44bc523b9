//! Infrastructure adapters for fragdoc.
//!
//! This crate implements the ports defined in `fragdoc-core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod filesystem;
pub mod renderer;

// Re-export commonly used adapters
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use renderer::{SimpleRenderer, TeraRenderer};
