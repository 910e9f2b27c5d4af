//! Commit source abstraction.

use semrel_commit::Commit;
use semver::Version;

use crate::GitResult;

/// The latest released version found in history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionTag {
    /// The tag name, prefix included.
    pub name: String,
    /// The parsed version.
    pub version: Version,
    /// Hash of the tagged commit.
    pub reference: String,
}

/// Provides the commits a release is computed from.
pub trait CommitSource {
    /// Returns the highest version tag, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if tags cannot be read.
    fn last_version_tag(&self) -> GitResult<Option<VersionTag>>;

    /// Returns commits reachable from HEAD but not from `reference`, newest
    /// first. `None` returns the whole history.
    ///
    /// # Errors
    ///
    /// Returns an error if the history cannot be walked.
    fn commits_since(&self, reference: Option<&str>) -> GitResult<Vec<Commit>>;
}
