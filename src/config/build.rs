//! `[build]` section configuration.
//!
//! Source/output locations, file names and excerpt settings.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// `[build]` section in mdindex.toml - index build configuration.
///
/// # Example
/// ```toml
/// [build]
/// source = "Article"       # Markdown directory
/// output = "."             # Where index.json / tags.json go
/// excerpt_length = 200
/// exclude = ["README.md"]
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(default, deny_unknown_fields)]
pub struct BuildConfig {
    /// Project root directory (usually set via CLI `--root`).
    #[serde(
        default = "defaults::build::root",
        skip_serializing_if = "Option::is_none"
    )]
    #[educe(Default = defaults::build::root())]
    pub root: Option<PathBuf>,

    /// Directory holding the markdown articles.
    #[serde(default = "defaults::build::source")]
    #[educe(Default = defaults::build::source())]
    pub source: PathBuf,

    /// Directory the json documents are written to.
    #[serde(default = "defaults::build::output")]
    #[educe(Default = defaults::build::output())]
    pub output: PathBuf,

    /// File name of the article index document.
    #[serde(default = "defaults::build::index_file")]
    #[educe(Default = defaults::build::index_file())]
    pub index_file: String,

    /// File name of the tag catalog document.
    #[serde(default = "defaults::build::tags_file")]
    #[educe(Default = defaults::build::tags_file())]
    pub tags_file: String,

    /// File names inside `source` that are never treated as articles.
    #[serde(default = "defaults::build::exclude")]
    #[educe(Default = defaults::build::exclude())]
    pub exclude: Vec<String>,

    /// Maximum excerpt length in characters (before the `...` marker).
    #[serde(default = "defaults::build::excerpt_length")]
    #[educe(Default = defaults::build::excerpt_length())]
    pub excerpt_length: usize,

    /// Prefix for each article's `path` field.
    /// Falls back to `source` as written when unset.
    #[serde(
        default = "defaults::build::path_prefix",
        skip_serializing_if = "Option::is_none"
    )]
    #[educe(Default = defaults::build::path_prefix())]
    pub path_prefix: Option<String>,

    /// Print the per-article and per-tag summary after a build.
    #[serde(default = "defaults::r#true")]
    #[educe(Default = true)]
    pub summary: bool,
}

impl BuildConfig {
    /// Whether `filename` is listed in `exclude`.
    pub fn is_excluded(&self, filename: &str) -> bool {
        self.exclude.iter().any(|name| name == filename)
    }
}
