//! Git error types.

use std::path::PathBuf;

use thiserror::Error;

/// Git-related errors.
#[derive(Debug, Error)]
pub enum GitError {
    /// Not a git repository.
    #[error("not a git repository: {}", .0.display())]
    NotARepo(PathBuf),

    /// Tag or commit reference could not be resolved.
    #[error("reference not found: {0}")]
    ReferenceNotFound(String),

    /// HEAD does not point at a branch and no branch contains it.
    #[error("no branch found for HEAD, please checkout a branch (git checkout -b <BRANCH>)")]
    NoBranch,

    /// Git2 error.
    #[error("git error: {0}")]
    Git2(#[from] git2::Error),
}

/// Result type for git operations.
pub type GitResult<T> = Result<T, GitError>;
