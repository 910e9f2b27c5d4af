//! Commit types for semrel.
//!
//! This crate provides the data model shared by every pipeline stage:
//! - [`Commit`]: A commit as handed over by the commit source
//! - [`AnalyzedCommit`]: A commit after classification by the analyzer
//! - [`Bucket`] and [`ClassifiedCommits`]: The release impact buckets

mod analyzed;
mod bucket;
mod commit;

pub use analyzed::{AnalyzedCommit, AnalyzedCommitBuilder, MessageBlock};
pub use bucket::{Bucket, ClassifiedCommits};
pub use commit::Commit;
