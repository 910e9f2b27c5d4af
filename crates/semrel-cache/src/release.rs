//! Cached release types.

use semrel_commit::ClassifiedCommits;
use semver::Version;

/// A version together with the commit it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseVersionEntry {
    /// Full commit hash.
    pub commit_hash: String,
    /// The version at that commit.
    pub version: Version,
}

impl ReleaseVersionEntry {
    /// Creates a new entry.
    #[must_use]
    pub fn new(commit_hash: impl Into<String>, version: Version) -> Self {
        Self {
            commit_hash: commit_hash.into(),
            version,
        }
    }
}

/// The outcome of a version computation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseVersion {
    /// Branch the computation ran on.
    pub branch: String,

    /// The last released version and its tagged commit.
    pub last: ReleaseVersionEntry,

    /// The next version and the HEAD commit it was computed for.
    pub next: ReleaseVersionEntry,

    /// Commits since the last release, by bucket.
    pub commits: ClassifiedCommits,

    /// No version tag existed yet.
    pub first_release: bool,
}

impl ReleaseVersion {
    /// Returns true if there is something to publish.
    ///
    /// A first release is always publishable, otherwise the next version
    /// must differ from the last one.
    #[must_use]
    pub fn should_release(&self) -> bool {
        self.first_release || self.next.version != self.last.version
    }
}
