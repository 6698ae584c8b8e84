//! Errors raised while loading `mdindex.toml`.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("invalid mdindex.toml: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid [build] settings: {0}")]
    Validation(String),
}
