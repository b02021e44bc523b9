//! Application ports (traits) for external dependencies.
//!
//! Ports define the interfaces the application needs from the outside world.
//! Adapters in `fragdoc-adapters` implement them.
//!
//! - `Filesystem`: directory listing, file reads and writes
//! - `TemplateRenderer`: template rendering

pub mod output;

pub use output::{Filesystem, TemplateRenderer};

#[cfg(test)]
pub use output::{MockFilesystem, MockTemplateRenderer};
