//! Commit type as handed over by the commit source.

use serde::{Deserialize, Serialize};

/// A commit as retrieved from the repository, before analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    /// The commit hash (SHA).
    pub hash: String,

    /// The full commit message (header + body).
    pub message: String,

    /// The commit author name.
    pub author: String,
}

impl Commit {
    /// Creates a new commit.
    #[must_use]
    pub fn new(
        hash: impl Into<String>,
        message: impl Into<String>,
        author: impl Into<String>,
    ) -> Self {
        Self {
            hash: hash.into(),
            message: message.into(),
            author: author.into(),
        }
    }

    /// Returns the first line of the commit message (the header).
    #[must_use]
    pub fn header(&self) -> &str {
        self.message.lines().next().unwrap_or("")
    }

    /// Returns everything after the header line.
    ///
    /// The returned text is untouched: blank separator lines are kept so the
    /// footer scanner sees the message exactly as written.
    #[must_use]
    pub fn rest(&self) -> &str {
        self.message.split_once('\n').map_or("", |(_, rest)| rest)
    }

    /// Returns the short hash (first 7 characters).
    #[must_use]
    pub fn short_hash(&self) -> &str {
        let end = self
            .hash
            .char_indices()
            .nth(7)
            .map_or(self.hash.len(), |(idx, _)| idx);
        &self.hash[..end]
    }
}
