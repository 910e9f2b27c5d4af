//! Core error types.

use std::path::PathBuf;

use thiserror::Error;

/// Core-related errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Git error.
    #[error("git error: {0}")]
    Git(#[from] semrel_git::GitError),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(#[from] semrel_config::ConfigError),

    /// Commit analysis setup failed.
    #[error("analyzer error: {0}")]
    Analyzer(#[from] semrel_analyzer::AnalyzerError),

    /// Version calculation failed.
    #[error("calculator error: {0}")]
    Calculator(#[from] semrel_calculator::CalculatorError),

    /// Changelog rendering failed.
    #[error("changelog error: {0}")]
    Render(#[from] semrel_changelog::RenderError),

    /// Version cache could not be written.
    #[error("cache error: {0}")]
    Cache(#[from] semrel_cache::CacheError),

    /// Release provider failed.
    #[error("provider error: {0}")]
    Provider(#[from] crate::ProviderError),

    /// Version parsing error.
    #[error("version error: {0}")]
    Version(#[from] semver::Error),

    /// IO error on a given file.
    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;
