//! Configuration error types.

use std::path::PathBuf;

use thiserror::Error;

/// Configuration errors. All of them are fatal to a run.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No configuration file at the given location.
    #[error("no release configuration at {}", .0.display())]
    NotFound(PathBuf),

    /// The file is not valid TOML or does not match the schema.
    #[error("invalid release configuration: {0}")]
    InvalidToml(#[from] toml::de::Error),

    /// A value is syntactically fine but not usable.
    #[error("invalid configuration: {0}")]
    Invalid(String),

    /// The file could not be read.
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;
