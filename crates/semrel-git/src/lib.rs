//! Git access for semrel.
//!
//! [`CommitSource`] is what the release pipeline needs from version control;
//! [`Repository`] implements it on top of `git2`.

mod error;
mod repository;
mod source;

pub use error::{GitError, GitResult};
pub use repository::Repository;
pub use source::{CommitSource, VersionTag};
