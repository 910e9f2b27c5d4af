//! Analyzer error types.

use thiserror::Error;

/// Analyzer-related errors.
#[derive(Debug, Error)]
pub enum AnalyzerError {
    /// The configured commit format is not supported.
    #[error("invalid commit format: {0}")]
    UnknownGrammar(String),

    /// A footer token separator could not be compiled into a pattern.
    #[error("invalid footer token separator {separator:?}: {source}")]
    InvalidSeparator {
        separator: String,
        #[source]
        source: regex::Error,
    },
}

/// Result type for analyzer operations.
pub type AnalyzerResult<T> = Result<T, AnalyzerError>;
