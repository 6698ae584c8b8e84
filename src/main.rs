//! mdindex - json article and tag indexes for a folder of markdown posts.

mod build;
mod cli;
mod config;
mod data;
mod init;
mod logger;
mod utils;

use anyhow::{Result, bail};
use build::{build_index, log_report};
use clap::Parser;
use cli::{Cli, Commands};
use config::SiteConfig;
use init::new_project;
use std::path::Path;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;

    match &cli.command {
        Commands::Init => new_project(&config),
        Commands::Build { .. } => {
            let report = build_index(&config)?;
            log_report(&report, config.build.summary);
            Ok(())
        }
    }
}

/// Load and validate configuration from CLI arguments.
///
/// A missing config file is fine for `build`; defaults apply.
fn load_config(cli: &Cli) -> Result<SiteConfig> {
    let root = cli.root.as_deref().unwrap_or(Path::new("./"));
    let config_path = root.join(&cli.config);

    let mut config = if config_path.exists() {
        SiteConfig::from_path(&config_path)?
    } else {
        SiteConfig::default()
    };
    config.update_with_cli(cli);

    if cli.is_init() && config.config_path.exists() {
        bail!("Config file already exists. Remove it manually or init in a different path.")
    }

    if !cli.is_init() {
        config.validate()?;
    }

    Ok(config)
}
