//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by reference.  The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables: `FRAGDOC_<SECTION>__<KEY>`, e.g.
//!    `FRAGDOC_RENDER__STRICT=true` or `FRAGDOC_SCAN__EXTENSIONS=.js,.ts`
//! 3. Config file: `--config <FILE>` (must exist) or the platform config
//!    dir's `fragdoc/config.toml` (optional)
//! 4. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use fragdoc_core::domain::DEFAULT_SOURCE_EXTENSIONS;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{CliError, CliResult};

const ENV_PREFIX: &str = "FRAGDOC";

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Which files are scanned.
    pub scan: ScanConfig,
    /// How the template is rendered.
    pub render: RenderConfig,
    /// Output settings.
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanConfig {
    pub extensions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderConfig {
    pub engine: RendererKind,
    pub strict: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub no_color: bool,
}

/// Template engine selection.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum RendererKind {
    /// Tera (Jinja2-style: filters, conditionals, loops).
    #[default]
    Tera,
    /// Plain `{{ name }}` substitution.
    Simple,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            scan: ScanConfig {
                extensions: DEFAULT_SOURCE_EXTENSIONS
                    .iter()
                    .map(|e| e.to_string())
                    .collect(),
            },
            render: RenderConfig {
                engine: RendererKind::default(),
                strict: false,
            },
            output: OutputConfig { no_color: false },
        }
    }
}

impl AppConfig {
    /// Load configuration: defaults, then file, then environment.
    ///
    /// `config_file` is the path passed via `--config`; it must exist. Without
    /// it the default location is used if present.
    pub fn load(config_file: Option<&Path>) -> CliResult<Self> {
        let defaults = Config::try_from(&Self::default())
            .map_err(|e| config_error("Failed to build default configuration", e))?;

        let file = match config_file {
            Some(path) => File::from(path).required(true),
            None => File::from(Self::config_path()).required(false),
        };

        let environment = Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .list_separator(",")
            .with_list_parse_key("scan.extensions")
            .try_parsing(true);

        let settings = Config::builder()
            .add_source(defaults)
            .add_source(file)
            .add_source(environment)
            .build()
            .map_err(|e| config_error("Failed to load configuration", e))?;

        let config: Self = settings
            .try_deserialize()
            .map_err(|e| config_error("Invalid configuration", e))?;

        debug!(?config, "Configuration loaded");
        Ok(config)
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.fragdoc.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("com", "fragdoc", "fragdoc")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".fragdoc.toml"))
    }
}

fn config_error(context: &str, e: config::ConfigError) -> CliError {
    CliError::ConfigError {
        message: format!("{context}: {e}"),
        source: Some(Box::new(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn defaults_match_reference_extensions() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.scan.extensions, vec![".html", ".js"]);
        assert_eq!(cfg.render.engine, RendererKind::Tera);
        assert!(!cfg.render.strict);
        assert!(!cfg.output.no_color);
    }

    #[test]
    fn explicit_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fragdoc.toml");
        fs::write(
            &path,
            "[scan]\nextensions = [\".ts\"]\n\n[render]\nengine = \"simple\"\nstrict = true\n",
        )
        .unwrap();

        let cfg = AppConfig::load(Some(&path)).unwrap();

        assert_eq!(cfg.scan.extensions, vec![".ts"]);
        assert_eq!(cfg.render.engine, RendererKind::Simple);
        assert!(cfg.render.strict);
        assert!(!cfg.output.no_color);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fragdoc.toml");
        fs::write(&path, "[output]\nno_color = true\n").unwrap();

        let cfg = AppConfig::load(Some(&path)).unwrap();

        assert!(cfg.output.no_color);
        assert_eq!(cfg.scan.extensions, vec![".html", ".js"]);
    }

    #[test]
    fn missing_explicit_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = AppConfig::load(Some(&dir.path().join("absent.toml"))).unwrap_err();
        assert_eq!(err.exit_code(), 4);
    }

    #[test]
    fn unknown_engine_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fragdoc.toml");
        fs::write(&path, "[render]\nengine = \"handlebars\"\n").unwrap();

        assert!(matches!(
            AppConfig::load(Some(&path)),
            Err(CliError::ConfigError { .. })
        ));
    }

    #[test]
    fn config_path_is_not_empty() {
        assert!(!AppConfig::config_path().as_os_str().is_empty());
    }
}
