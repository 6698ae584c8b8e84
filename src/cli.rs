//! Command-line interface definitions.
//!
//! Defines all CLI arguments and subcommands using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// mdindex: json indexes for a folder of markdown articles
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Project root directory (default: current directory)
    #[arg(short, long)]
    pub root: Option<PathBuf>,

    /// Source directory with markdown articles (relative to project root)
    #[arg(short, long)]
    pub source: Option<PathBuf>,

    /// Output directory for the json files (relative to project root)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Config file name (default: mdindex.toml)
    #[arg(short = 'C', long, default_value = "mdindex.toml")]
    pub config: PathBuf,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Write a default config file into the project root
    Init,

    /// Scan the source directory and write index.json and tags.json
    Build {
        /// Maximum excerpt length in characters
        #[arg(long = "excerpt-length")]
        excerpt_length: Option<usize>,

        /// Do not print the per-article and per-tag summary
        #[arg(short, long)]
        quiet: bool,
    },
}

impl Cli {
    pub const fn is_init(&self) -> bool {
        matches!(self.command, Commands::Init)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_build_with_overrides() {
        let cli = Cli::parse_from([
            "mdindex",
            "--source",
            "posts",
            "-o",
            "public",
            "build",
            "--excerpt-length",
            "80",
            "--quiet",
        ]);

        assert_eq!(cli.source, Some(PathBuf::from("posts")));
        assert_eq!(cli.output, Some(PathBuf::from("public")));
        assert_eq!(cli.config, PathBuf::from("mdindex.toml"));
        match cli.command {
            Commands::Build {
                excerpt_length,
                quiet,
            } => {
                assert_eq!(excerpt_length, Some(80));
                assert!(quiet);
            }
            Commands::Init => panic!("expected build"),
        }
    }

    #[test]
    fn test_parse_init() {
        let cli = Cli::parse_from(["mdindex", "--root", "blog", "init"]);
        assert!(cli.is_init());
        assert_eq!(cli.root, Some(PathBuf::from("blog")));
    }
}
