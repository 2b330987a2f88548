use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlatformStateError {
    #[error("Unknown environment: {0}")]
    UnknownEnvironment(String),
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),
    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("Seed error: {0}")]
    SeedError(String),
    #[error("Not found: {0}")]
    NotFound(String),
}
