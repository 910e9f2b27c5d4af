//! Git repository wrapper.

use std::path::Path;

use git2::{BranchType, Oid, Repository as Git2Repo};
use semrel_commit::Commit;
use semver::Version;
use tracing::{debug, trace};

use crate::{CommitSource, GitError, GitResult, VersionTag};

const DEFAULT_TAG_PREFIX: &str = "v";

/// A Git repository wrapper.
pub struct Repository {
    inner: Git2Repo,
    tag_prefix: String,
}

impl Repository {
    /// Opens a repository at the given path.
    ///
    /// Version tags are expected to carry the `v` prefix.
    ///
    /// # Errors
    ///
    /// Returns an error if the path is not a valid Git repository.
    pub fn open(path: impl AsRef<Path>) -> GitResult<Self> {
        let path = path.as_ref();
        let inner = Git2Repo::open(path).map_err(|_| GitError::NotARepo(path.to_path_buf()))?;
        Ok(Self {
            inner,
            tag_prefix: DEFAULT_TAG_PREFIX.to_string(),
        })
    }

    /// Sets the prefix version tags carry.
    #[must_use]
    pub fn with_tag_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.tag_prefix = prefix.into();
        self
    }

    /// Returns the version tag prefix.
    #[must_use]
    pub fn tag_prefix(&self) -> &str {
        &self.tag_prefix
    }

    /// Returns the repository root path.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.inner.workdir().unwrap_or_else(|| self.inner.path())
    }

    /// Returns the full hash of the HEAD commit.
    ///
    /// # Errors
    ///
    /// Returns an error if HEAD does not point at a commit.
    pub fn head_hash(&self) -> GitResult<String> {
        Ok(self.head_oid()?.to_string())
    }

    /// Returns the checked out branch.
    ///
    /// On a detached HEAD, the first local branch pointing at the HEAD commit
    /// is used.
    ///
    /// # Errors
    ///
    /// Returns an error if no branch matches HEAD.
    pub fn current_branch(&self) -> GitResult<String> {
        let head = self.inner.head()?;
        if head.is_branch()
            && let Some(name) = head.shorthand()
        {
            debug!(branch = name, "found branch");
            return Ok(name.to_string());
        }

        let target = self.head_oid()?;
        for branch in self.inner.branches(Some(BranchType::Local))? {
            let (branch, _) = branch?;
            if branch.get().peel_to_commit()?.id() == target
                && let Some(name) = branch.name()?
            {
                debug!(branch = name, "found branch from detached HEAD");
                return Ok(name.to_string());
            }
        }

        Err(GitError::NoBranch)
    }

    /// Returns all tags in the repository.
    ///
    /// # Errors
    ///
    /// Returns an error if tags cannot be read.
    pub fn tags(&self) -> GitResult<Vec<String>> {
        let tags = self.inner.tag_names(None)?;
        Ok(tags.iter().flatten().map(String::from).collect())
    }

    /// Creates an annotated tag on HEAD.
    ///
    /// # Errors
    ///
    /// Returns an error if the tag exists or cannot be created.
    pub fn create_tag(&self, name: &str, message: &str) -> GitResult<()> {
        let commit = self.inner.head()?.peel_to_commit()?;
        let sig = self.inner.signature()?;

        self.inner
            .tag(name, commit.as_object(), &sig, message, false)?;
        debug!(tag = name, hash = %commit.id(), "created tag");

        Ok(())
    }

    fn head_oid(&self) -> GitResult<Oid> {
        Ok(self.inner.head()?.peel_to_commit()?.id())
    }

    fn resolve_commit(&self, reference: &str) -> GitResult<Oid> {
        self.inner
            .revparse_single(reference)
            .and_then(|object| object.peel_to_commit())
            .map(|commit| commit.id())
            .map_err(|_| GitError::ReferenceNotFound(reference.to_string()))
    }
}

impl CommitSource for Repository {
    fn last_version_tag(&self) -> GitResult<Option<VersionTag>> {
        let latest = self
            .tags()?
            .into_iter()
            .filter_map(|name| {
                let parsed = name
                    .strip_prefix(self.tag_prefix.as_str())
                    .and_then(|v| Version::parse(v).ok());
                if parsed.is_none() {
                    trace!(tag = %name, "tag is not a version, skip");
                }
                parsed.map(|version| (name, version))
            })
            .max_by(|a, b| a.1.cmp(&b.1));

        let Some((name, version)) = latest else {
            debug!("found no version tags");
            return Ok(None);
        };

        let reference = self.resolve_commit(&format!("refs/tags/{name}"))?.to_string();
        debug!(tag = %name, %version, hash = %reference, "found last version");

        Ok(Some(VersionTag {
            name,
            version,
            reference,
        }))
    }

    fn commits_since(&self, reference: Option<&str>) -> GitResult<Vec<Commit>> {
        let mut revwalk = self.inner.revwalk()?;
        revwalk.push_head()?;

        if let Some(reference) = reference {
            revwalk.hide(self.resolve_commit(reference)?)?;
        }

        let mut commits = Vec::new();
        for oid in revwalk {
            let commit = self.inner.find_commit(oid?)?;
            if commit.parent_count() > 1 {
                trace!(hash = %commit.id(), "skipping merge commit");
                continue;
            }

            commits.push(Commit::new(
                commit.id().to_string(),
                commit.message().unwrap_or_default(),
                commit.author().name().unwrap_or("Unknown"),
            ));
        }

        debug!(count = commits.len(), since = ?reference, "read commits");
        Ok(commits)
    }
}
