//! Calculator error types.

use thiserror::Error;

/// Version calculation errors.
#[derive(Debug, Error)]
pub enum CalculatorError {
    /// The release policy name is not supported.
    #[error("unknown release policy: {0}")]
    UnknownPolicy(String),

    /// A prerelease label could not be turned into a valid suffix.
    #[error("invalid prerelease {label:?}: {source}")]
    InvalidPrerelease {
        label: String,
        #[source]
        source: semver::Error,
    },
}

/// Result type for calculator operations.
pub type CalculatorResult<T> = Result<T, CalculatorError>;
