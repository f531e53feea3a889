//! Errors raised while loading and checking `docgate.toml`.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("docgate.toml is not valid TOML or has unknown keys")]
    Toml(#[from] toml::de::Error),

    /// Loaded fine but describes an unusable setup.
    #[error("invalid docgate config: {0}")]
    Validation(String),
}
