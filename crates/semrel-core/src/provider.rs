//! Release publication.

use semrel_cache::ReleaseVersion;
use semrel_changelog::GeneratedChangelog;
use semrel_git::{GitError, Repository};
use thiserror::Error;
use tracing::info;

/// Release provider errors.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Git operation failed.
    #[error("{0}")]
    Git(#[from] GitError),

    /// Provider-specific failure.
    #[error("{provider}: {message}")]
    Failed { provider: String, message: String },
}

/// Result type for provider operations.
pub type ProviderResult<T> = Result<T, ProviderError>;

/// Publishes a computed release somewhere.
pub trait ReleaseProvider {
    /// Returns the provider name.
    fn name(&self) -> &str;

    /// Publishes the release with its changelog.
    ///
    /// # Errors
    ///
    /// Returns an error if publication fails.
    fn create_release(
        &self,
        release: &ReleaseVersion,
        changelog: &GeneratedChangelog,
    ) -> ProviderResult<()>;
}

/// Publishes a release as an annotated tag in the local repository.
///
/// The tag is not pushed.
pub struct GitTagProvider<'a> {
    repo: &'a Repository,
}

impl<'a> GitTagProvider<'a> {
    /// Creates a provider tagging `repo`.
    #[must_use]
    pub fn new(repo: &'a Repository) -> Self {
        Self { repo }
    }

    /// Returns the tag name for a release.
    #[must_use]
    pub fn tag_name(&self, release: &ReleaseVersion) -> String {
        format!("{}{}", self.repo.tag_prefix(), release.next.version)
    }
}

impl ReleaseProvider for GitTagProvider<'_> {
    fn name(&self) -> &str {
        "git-tag"
    }

    fn create_release(
        &self,
        release: &ReleaseVersion,
        changelog: &GeneratedChangelog,
    ) -> ProviderResult<()> {
        let tag = self.tag_name(release);
        let message = format!("Release {}\n\n{}", release.next.version, changelog.content);
        self.repo.create_tag(&tag, &message)?;
        info!(%tag, "created release tag");
        Ok(())
    }
}
