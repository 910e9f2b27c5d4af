//! Cache error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur when reading or writing the cache.
#[derive(Debug, Error)]
pub enum CacheError {
    /// Failed to read or write the cache file.
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The cache file is not valid TOML.
    #[error("invalid cache file: {0}")]
    InvalidToml(#[from] toml::de::Error),

    /// The release could not be serialized.
    #[error("failed to serialize cache: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// A stored version string is not valid SemVer.
    #[error("invalid cached version {version:?}: {source}")]
    InvalidVersion {
        version: String,
        #[source]
        source: semver::Error,
    },
}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;
