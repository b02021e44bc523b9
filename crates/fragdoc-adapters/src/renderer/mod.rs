//! Template renderers.

mod simple;
mod tera_engine;
mod tera_variables;

pub use simple::SimpleRenderer;
pub use tera_engine::TeraRenderer;
