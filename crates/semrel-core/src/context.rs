//! Build environment detection.

use semrel_git::Repository;
use tracing::{debug, info};

use crate::CoreResult;

/// The commit and branch a release is computed for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CiContext {
    /// The commit being built.
    pub commit_hash: String,
    /// The branch being built.
    pub branch: String,
    /// Whether the build runs for a pull or merge request.
    pub is_pull_request: bool,
    /// Name of the detected CI service, if any.
    pub service: Option<&'static str>,
}

impl CiContext {
    /// Creates a context outside of any CI service.
    #[must_use]
    pub fn new(commit_hash: impl Into<String>, branch: impl Into<String>) -> Self {
        Self {
            commit_hash: commit_hash.into(),
            branch: branch.into(),
            is_pull_request: false,
            service: None,
        }
    }

    /// Marks the context as a pull request build.
    #[must_use]
    pub fn pull_request(mut self, is_pull_request: bool) -> Self {
        self.is_pull_request = is_pull_request;
        self
    }

    /// Detects the context from the process environment, falling back to
    /// the repository HEAD.
    ///
    /// # Errors
    ///
    /// Returns an error if no CI service is detected and HEAD cannot be read.
    pub fn detect(repo: &Repository) -> CoreResult<Self> {
        Self::detect_with(repo, |key| std::env::var(key).ok())
    }

    /// Same as [`CiContext::detect`] with a custom variable lookup.
    ///
    /// # Errors
    ///
    /// Returns an error if no CI service is detected and HEAD cannot be read.
    pub fn detect_with<F>(repo: &Repository, lookup: F) -> CoreResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(context) = Self::from_env(lookup) {
            info!(
                service = context.service.unwrap_or_default(),
                branch = %context.branch,
                "detected CI service"
            );
            return Ok(context);
        }

        let context = Self::new(repo.head_hash()?, repo.current_branch()?);
        debug!(branch = %context.branch, hash = %context.commit_hash, "using repository HEAD");
        Ok(context)
    }

    /// Reads the context of a supported CI service.
    ///
    /// Recognizes GitHub Actions, GitLab CI and Travis CI.
    pub fn from_env<F>(lookup: F) -> Option<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let set = |key: &str| lookup(key).is_some_and(|v| !v.is_empty());
        let value = |key: &str| lookup(key).unwrap_or_default();

        if set("GITHUB_ACTION") {
            let reference = value("GITHUB_REF");
            let branch = reference
                .strip_prefix("refs/heads/")
                .unwrap_or(&reference)
                .to_string();
            return Some(Self {
                commit_hash: value("GITHUB_SHA"),
                branch,
                is_pull_request: value("GITHUB_EVENT_NAME") == "pull_request",
                service: Some("GitHub Actions"),
            });
        }

        if set("GITLAB_CI") {
            return Some(Self {
                commit_hash: value("CI_COMMIT_SHA"),
                branch: value("CI_COMMIT_REF_NAME"),
                is_pull_request: set("CI_MERGE_REQUEST_IID"),
                service: Some("GitLab CI"),
            });
        }

        if set("TRAVIS") {
            let pull_request = value("TRAVIS_PULL_REQUEST");
            return Some(Self {
                commit_hash: value("TRAVIS_COMMIT"),
                branch: value("TRAVIS_BRANCH"),
                is_pull_request: !pull_request.is_empty() && pull_request != "false",
                service: Some("Travis CI"),
            });
        }

        None
    }
}
