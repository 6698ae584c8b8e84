//! Configuration management for `mdindex.toml`.
//!
//! # Sections
//!
//! | Section     | Purpose                                          |
//! |-------------|--------------------------------------------------|
//! | `[build]`   | Source/output paths, file names, excerpt length  |
//!
//! # Example
//!
//! ```toml
//! [build]
//! source = "Article"
//! output = "."
//! excerpt_length = 200
//! ```
//!
//! The config file is optional: when it does not exist, defaults apply.

mod build;
pub mod defaults;
mod error;

pub use error::ConfigError;

use build::BuildConfig;

use crate::cli::{Cli, Commands};
use anyhow::{Result, bail};
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Component, Path, PathBuf},
};

// ============================================================================
// Root Configuration
// ============================================================================

/// Root configuration structure representing mdindex.toml
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct SiteConfig {
    /// Path to the config file (set after loading)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Build settings
    #[serde(default)]
    pub build: BuildConfig,
}

impl SiteConfig {
    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        let config: SiteConfig = toml::from_str(content).map_err(ConfigError::from)?;
        Ok(config)
    }

    /// Load configuration from file path
    pub fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        let mut config = Self::from_str(&content)?;
        config.config_path = path.to_path_buf();
        Ok(config)
    }

    /// Get the root directory path
    pub fn get_root(&self) -> &Path {
        self.build.root.as_deref().unwrap_or(Path::new("./"))
    }

    /// Set the root directory path
    pub fn set_root(&mut self, path: &Path) {
        self.build.root = Some(path.to_path_buf())
    }

    /// Directory scanned for markdown articles
    pub fn source_dir(&self) -> PathBuf {
        self.resolve(&[self.build.source.as_path()])
    }

    /// Destination of the article index document
    pub fn index_path(&self) -> PathBuf {
        self.resolve(&[self.build.output.as_path(), Path::new(&self.build.index_file)])
    }

    /// Destination of the tag catalog document
    pub fn tags_path(&self) -> PathBuf {
        self.resolve(&[self.build.output.as_path(), Path::new(&self.build.tags_file)])
    }

    /// Join `parts` onto the root, dropping `.` segments.
    ///
    /// With the default root and output, `./` + `.` + `index.json` becomes
    /// `index.json`. A path made only of `.` segments becomes `.`.
    fn resolve(&self, parts: &[&Path]) -> PathBuf {
        let joined = parts
            .iter()
            .fold(self.get_root().to_path_buf(), |acc, part| acc.join(part));
        let path: PathBuf = joined
            .components()
            .filter(|c| !matches!(c, Component::CurDir))
            .collect();

        if path.as_os_str().is_empty() {
            PathBuf::from(".")
        } else {
            path
        }
    }

    /// Prefix used to build each article's `path` field.
    ///
    /// Uses `[build.path_prefix]` when set, otherwise the source directory
    /// exactly as configured (e.g. `Article`), with `/` separators.
    pub fn path_prefix(&self) -> String {
        let prefix = match &self.build.path_prefix {
            Some(prefix) => prefix.clone(),
            None => self.build.source.to_string_lossy().replace('\\', "/"),
        };
        prefix.trim_end_matches('/').to_owned()
    }

    /// Update configuration with CLI arguments
    pub fn update_with_cli(&mut self, cli: &Cli) {
        let root = cli
            .root
            .clone()
            .unwrap_or_else(|| self.get_root().to_owned());
        self.set_root(&root);
        self.config_path = root.join(&cli.config);

        Self::update_option(&mut self.build.source, cli.source.as_ref());
        Self::update_option(&mut self.build.output, cli.output.as_ref());

        if let Commands::Build {
            excerpt_length,
            quiet,
        } = &cli.command
        {
            Self::update_option(&mut self.build.excerpt_length, excerpt_length.as_ref());
            if *quiet {
                self.build.summary = false;
            }
        }
    }

    /// Update config option if CLI value is provided
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    /// Validate configuration before building
    pub fn validate(&self) -> Result<()> {
        let build = &self.build;

        if build.excerpt_length == 0 {
            bail!(ConfigError::Validation(
                "[build.excerpt_length] must be greater than 0".into()
            ));
        }

        for (field, name) in [
            ("[build.index_file]", &build.index_file),
            ("[build.tags_file]", &build.tags_file),
        ] {
            if name.trim().is_empty() {
                bail!(ConfigError::Validation(format!("{field} must not be empty")));
            }
        }

        if build.index_file == build.tags_file {
            bail!(ConfigError::Validation(
                "[build.index_file] and [build.tags_file] must differ".into()
            ));
        }

        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
