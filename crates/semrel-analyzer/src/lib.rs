//! Commit analysis for semrel.
//!
//! This crate turns raw commits into classified ones:
//! - [`Grammar`]: The supported commit header grammars (Angular, Conventional Commits)
//! - [`FooterScanner`]: Splits the text after the header into body and footer blocks
//! - [`Rule`]: The ordered rule table mapping commit types to release buckets
//! - [`Analyzer`]: Classifies commits into [`ClassifiedCommits`](semrel_commit::ClassifiedCommits)

mod analyzer;
mod error;
mod footer;
mod grammar;
mod rules;

pub use analyzer::{Analyzer, AnalyzerConfig};
pub use error::{AnalyzerError, AnalyzerResult};
pub use footer::{BREAKING_CHANGE_PREFIX, DEFAULT_TOKEN_SEPARATORS, FooterScanner, MessageBlocks};
pub use grammar::{Grammar, Header};
pub use rules::{DEFAULT_RULES, Rule};
