//! Changelog rendering errors.

use thiserror::Error;

/// Errors raised while rendering a changelog.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RenderError {
    /// A `{{` has no matching `}}`.
    #[error("unclosed placeholder at byte {position} in template {template:?}")]
    UnclosedPlaceholder { template: String, position: usize },

    /// A placeholder names a value the template does not provide.
    #[error("unknown placeholder {{{{{name}}}}} in template {template:?}")]
    UnknownPlaceholder { template: String, name: String },
}

/// Result type for rendering operations.
pub type RenderResult<T> = Result<T, RenderError>;
