use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to read config {}: {source}", .path.display())]
    ConfigRead { path: PathBuf, source: io::Error },

    #[error("failed to parse config {}: {source}", .path.display())]
    ConfigParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("failed to render config: {0}")]
    ConfigRender(#[from] toml::ser::Error),

    #[error("failed to write {}: {source}", .path.display())]
    Write { path: PathBuf, source: io::Error },

    #[error("failed to read {}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("digit source failed: {0}")]
    DigitSource(String),

    #[error(transparent)]
    Io(#[from] io::Error),
}
