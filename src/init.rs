//! Project initialization.
//!
//! Writes `mdindex.toml` (defaults plus CLI overrides) and creates the
//! source directory.

use crate::{config::SiteConfig, log};
use anyhow::{Context, Result, bail};
use std::{fs, path::Path};

/// Write the config file and create the article directory.
pub fn new_project(config: &SiteConfig) -> Result<()> {
    let config_path = config.config_path.as_path();
    if config_path.exists() {
        bail!(
            "Config file `{}` already exists. Remove it manually or init in a different path.",
            config_path.display()
        );
    }

    write_config(config_path, config)?;
    log!("init"; "wrote {}", config_path.display());

    let source = config.source_dir();
    if !source.exists() {
        fs::create_dir_all(&source)
            .with_context(|| format!("Failed to create {}", source.display()))?;
        log!("init"; "created {}", source.display());
    }

    Ok(())
}

/// Write `config` to `path`, minus the root it was resolved against.
///
/// CLI overrides given to `init` (`--source`, `--output`) end up in the file.
fn write_config(path: &Path, config: &SiteConfig) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let mut config = config.clone();
    config.build.root = None;
    let content = toml::to_string_pretty(&config)?;
    fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}
