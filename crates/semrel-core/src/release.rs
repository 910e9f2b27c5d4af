//! Release orchestration.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use semrel_analyzer::{Analyzer, AnalyzerConfig, Grammar};
use semrel_cache::{ReleaseVersion, ReleaseVersionEntry};
use semrel_calculator::{ReleasePolicy, calculate_new_version, policy_for_branch};
use semrel_changelog::{
    ChangelogOptions, ChangelogRenderer, DockerOptions, GeneratedChangelog, NpmOptions,
    TemplateConfig,
};
use semrel_commit::ClassifiedCommits;
use semrel_config::{ChangelogConfig, Config};
use semrel_git::CommitSource;
use semver::Version;
use tracing::{debug, info};

use crate::{CiContext, CoreError, CoreResult, ReleaseProvider};

/// Version assumed when no version tag exists yet.
const FIRST_VERSION: Version = Version::new(1, 0, 0);

/// Computes, caches and publishes releases of one repository.
pub struct SemanticRelease<'a> {
    config: Config,
    source: &'a dyn CommitSource,
    repository: PathBuf,
    analyzer: Analyzer,
    renderer: ChangelogRenderer,
}

impl<'a> SemanticRelease<'a> {
    /// Creates a release runner.
    ///
    /// `repository` is the working tree path; the version cache is stored
    /// beside it.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration names an unknown commit format
    /// or release policy, or holds an invalid token separator.
    pub fn new(
        config: Config,
        source: &'a dyn CommitSource,
        repository: impl Into<PathBuf>,
    ) -> CoreResult<Self> {
        config.validate()?;

        let grammar: Grammar = config.commit_format.parse()?;
        for policy in config.branch.values() {
            policy.parse::<ReleasePolicy>()?;
        }

        let analyzer = Analyzer::new(
            grammar,
            &AnalyzerConfig {
                token_separators: config.analyzer.token_separators.clone(),
                print_all: config.changelog.print_all,
            },
        )?;
        let renderer = ChangelogRenderer::new(analyzer.rules(), changelog_options(&config.changelog));

        Ok(Self {
            config,
            source,
            repository: repository.into(),
            analyzer,
            renderer,
        })
    }

    /// Returns the release policy of a branch, if it is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the matching entry names an unknown policy.
    pub fn policy(&self, branch: &str) -> CoreResult<Option<ReleasePolicy>> {
        Ok(policy_for_branch(&self.config.branch, branch)?)
    }

    /// Computes the next version for the context.
    ///
    /// A cached result for the same commit is reused unless `force` is set.
    /// The result is written to the cache.
    ///
    /// # Errors
    ///
    /// Returns an error if history cannot be read, the version cannot be
    /// computed, or the cache cannot be written.
    pub fn next_version(&self, ctx: &CiContext, force: bool) -> CoreResult<ReleaseVersion> {
        if !force
            && let Some(cached) = semrel_cache::read_matching(&self.repository, &ctx.commit_hash)
        {
            return Ok(cached);
        }

        let release = self.compute(ctx, None)?;
        semrel_cache::write(&self.repository, &release)?;
        Ok(release)
    }

    /// Records `version` as the next version for the context.
    ///
    /// Commits since the last tag are still analyzed so the changelog can be
    /// rendered from the cache.
    ///
    /// # Errors
    ///
    /// Returns an error if `version` is not valid semver, history cannot be
    /// read, or the cache cannot be written.
    pub fn set_version(&self, ctx: &CiContext, version: &str) -> CoreResult<ReleaseVersion> {
        let version = Version::parse(version.trim_start_matches(self.config.tag_prefix.as_str()))?;
        info!(%version, "setting version");

        let release = self.compute(ctx, Some(version))?;
        semrel_cache::write(&self.repository, &release)?;
        Ok(release)
    }

    /// Renders the changelog of a release.
    ///
    /// # Errors
    ///
    /// Returns an error if a template is invalid.
    pub fn changelog(
        &self,
        release: &ReleaseVersion,
        as_of: DateTime<Utc>,
    ) -> CoreResult<GeneratedChangelog> {
        let mut template = TemplateConfig::new(release.next.version.to_string());
        if let Some(url) = &self.config.commit_url {
            template = template.with_commit_url(url.as_str());
        }

        Ok(self.renderer.render(&release.commits, &template, as_of)?)
    }

    /// Computes the next version and publishes it through `provider`.
    ///
    /// Returns `None` without publishing for pull request builds, branches
    /// without a release policy, and when nothing changed since the last
    /// release.
    ///
    /// # Errors
    ///
    /// Returns an error if any step of the release fails.
    pub fn release(
        &self,
        ctx: &CiContext,
        provider: &dyn ReleaseProvider,
        force: bool,
    ) -> CoreResult<Option<ReleaseVersion>> {
        if ctx.is_pull_request {
            info!("pull request build, skipping release");
            return Ok(None);
        }
        if self.policy(&ctx.branch)?.is_none() {
            info!(branch = %ctx.branch, "branch has no release policy, skipping release");
            return Ok(None);
        }

        let release = self.next_version(ctx, force)?;
        if !release.should_release() {
            info!(version = %release.last.version, "no change since last release");
            return Ok(None);
        }

        let changelog = self.changelog(&release, Utc::now())?;
        info!(
            provider = provider.name(),
            version = %release.next.version,
            "publishing release"
        );
        provider.create_release(&release, &changelog)?;

        Ok(Some(release))
    }

    fn compute(&self, ctx: &CiContext, forced: Option<Version>) -> CoreResult<ReleaseVersion> {
        let tag = self.source.last_version_tag()?;
        let first_release = tag.is_none();
        let last = match &tag {
            Some(tag) => {
                debug!(tag = %tag.name, hash = %tag.reference, "found last version tag");
                ReleaseVersionEntry::new(tag.reference.clone(), tag.version.clone())
            }
            None => {
                info!(version = %FIRST_VERSION, "no version tag found, first release");
                ReleaseVersionEntry::new("", FIRST_VERSION)
            }
        };

        let commits = self
            .source
            .commits_since(tag.as_ref().map(|t| t.reference.as_str()))?;
        info!(count = commits.len(), "found commits since last release");
        let commits = self.analyzer.analyze(&commits);

        let next = match forced {
            Some(version) => version,
            None => self.calculate(ctx, &commits, &last.version, first_release)?,
        };
        info!(last = %last.version, next = %next, "calculated new version");

        Ok(ReleaseVersion {
            branch: ctx.branch.clone(),
            last,
            next: ReleaseVersionEntry::new(ctx.commit_hash.clone(), next),
            commits,
            first_release,
        })
    }

    fn calculate(
        &self,
        ctx: &CiContext,
        commits: &ClassifiedCommits,
        last: &Version,
        first_release: bool,
    ) -> CoreResult<Version> {
        match self.policy(&ctx.branch)? {
            Some(policy) => Ok(calculate_new_version(commits, last, policy, first_release)?),
            None => {
                info!(branch = %ctx.branch, "branch has no release policy, keeping version");
                Ok(last.clone())
            }
        }
    }
}

/// Writes a rendered changelog to `path`.
///
/// The content is prepended to an existing file unless `overwrite` is set.
///
/// # Errors
///
/// Returns an error if the file cannot be read or written.
pub fn write_changelog(content: &str, path: &Path, overwrite: bool) -> CoreResult<()> {
    let io_error = |source| CoreError::Io {
        path: path.to_path_buf(),
        source,
    };

    let previous = if overwrite {
        String::new()
    } else {
        match fs::read_to_string(path) {
            Ok(previous) => previous,
            Err(e) if e.kind() == ErrorKind::NotFound => String::new(),
            Err(e) => return Err(io_error(e)),
        }
    };

    let output = if previous.is_empty() {
        content.to_string()
    } else {
        format!("{content}\n{previous}")
    };
    fs::write(path, output).map_err(io_error)?;

    debug!(path = %path.display(), overwrite, "wrote changelog");
    Ok(())
}

fn changelog_options(config: &ChangelogConfig) -> ChangelogOptions {
    ChangelogOptions {
        print_all: config.print_all,
        show_authors: config.show_authors,
        show_body_as_header: config.show_body_as_header,
        title_template: config.title_template.clone(),
        docker: config.docker.as_ref().map(|d| DockerOptions {
            repository: d.repository.clone(),
            latest: d.latest,
        }),
        npm: config.npm.as_ref().map(|n| NpmOptions {
            package_name: n.package_name.clone(),
            repository: n.repository.clone(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ProviderError, ProviderResult};
    use chrono::TimeZone;
    use semrel_commit::Commit;
    use semrel_git::{GitResult, VersionTag};
    use std::cell::{Cell, RefCell};
    use tempfile::TempDir;

    const HEAD: &str = "ffffffffffffffffffffffffffffffffffffffff";

    #[derive(Default)]
    struct MockSource {
        tag: Option<VersionTag>,
        commits: Vec<Commit>,
        since: RefCell<Vec<Option<String>>>,
    }

    impl MockSource {
        fn with_tag(mut self, version: &str) -> Self {
            self.tag = Some(VersionTag {
                name: format!("v{version}"),
                version: Version::parse(version).unwrap(),
                reference: "a".repeat(40),
            });
            self
        }

        fn commit(mut self, message: &str) -> Self {
            let hash = format!("{:0>40}", self.commits.len());
            self.commits.push(Commit::new(hash, message, "Alice"));
            self
        }

        fn walks(&self) -> usize {
            self.since.borrow().len()
        }
    }

    impl CommitSource for MockSource {
        fn last_version_tag(&self) -> GitResult<Option<VersionTag>> {
            Ok(self.tag.clone())
        }

        fn commits_since(&self, reference: Option<&str>) -> GitResult<Vec<Commit>> {
            self.since.borrow_mut().push(reference.map(String::from));
            Ok(self.commits.clone())
        }
    }

    #[derive(Default)]
    struct MockProvider {
        published: RefCell<Vec<(String, String)>>,
        fail: Cell<bool>,
    }

    impl ReleaseProvider for MockProvider {
        fn name(&self) -> &str {
            "mock"
        }

        fn create_release(
            &self,
            release: &ReleaseVersion,
            changelog: &GeneratedChangelog,
        ) -> ProviderResult<()> {
            if self.fail.get() {
                return Err(ProviderError::Failed {
                    provider: "mock".to_string(),
                    message: "rejected".to_string(),
                });
            }
            self.published
                .borrow_mut()
                .push((release.next.version.to_string(), changelog.title.clone()));
            Ok(())
        }
    }

    fn config() -> Config {
        let mut config = Config::default();
        config.branch.insert("main".to_string(), "release".to_string());
        config.branch.insert("release/".to_string(), "rc".to_string());
        config
    }

    fn workspace() -> (TempDir, PathBuf) {
        let dir = TempDir::new().unwrap();
        let repo = dir.path().join("repo");
        fs::create_dir(&repo).unwrap();
        (dir, repo)
    }

    fn ctx(branch: &str) -> CiContext {
        CiContext::new(HEAD, branch)
    }

    fn as_of() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 9, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_first_release() {
        let (_dir, repo) = workspace();
        let source = MockSource::default().commit("feat: first");
        let release = SemanticRelease::new(config(), &source, &repo).unwrap();

        let next = release.next_version(&ctx("main"), false).unwrap();
        assert!(next.first_release);
        assert_eq!(next.last.version, Version::new(1, 0, 0));
        assert_eq!(next.next.version, Version::new(1, 0, 0));
        assert_eq!(next.next.commit_hash, HEAD);
        assert_eq!(source.since.borrow()[0], None);
        assert!(next.should_release());
    }

    #[test]
    fn test_minor_bump_since_tag() {
        let (_dir, repo) = workspace();
        let source = MockSource::default()
            .with_tag("1.2.3")
            .commit("feat(api): add endpoint")
            .commit("fix: crash");
        let release = SemanticRelease::new(config(), &source, &repo).unwrap();

        let next = release.next_version(&ctx("main"), false).unwrap();
        assert_eq!(next.next.version, Version::new(1, 3, 0));
        assert_eq!(next.last.commit_hash, "a".repeat(40));
        assert_eq!(source.since.borrow()[0].as_deref(), Some("a".repeat(40).as_str()));
        assert_eq!(next.commits.len(), 2);
        assert!(!next.first_release);
    }

    #[test]
    fn test_breaking_change_bumps_major() {
        let (_dir, repo) = workspace();
        let source = MockSource::default()
            .with_tag("1.2.3")
            .commit("fix: x\n\nBREAKING CHANGE: removed y");
        let release = SemanticRelease::new(config(), &source, &repo).unwrap();

        let next = release.next_version(&ctx("main"), false).unwrap();
        assert_eq!(next.next.version, Version::new(2, 0, 0));
    }

    #[test]
    fn test_prefix_branch_prerelease() {
        let (_dir, repo) = workspace();
        let source = MockSource::default().with_tag("1.2.3").commit("feat: a");
        let release = SemanticRelease::new(config(), &source, &repo).unwrap();

        let next = release.next_version(&ctx("release/1.x"), false).unwrap();
        assert_eq!(next.next.version.to_string(), "1.3.0-rc.0");
        assert_eq!(next.branch, "release/1.x");
    }

    #[test]
    fn test_unconfigured_branch_keeps_version() {
        let (_dir, repo) = workspace();
        let source = MockSource::default().with_tag("1.2.3").commit("feat: a");
        let release = SemanticRelease::new(config(), &source, &repo).unwrap();

        let next = release.next_version(&ctx("feature/x"), false).unwrap();
        assert_eq!(next.next.version, Version::new(1, 2, 3));
        assert!(!next.should_release());
    }

    #[test]
    fn test_cache_reused_for_same_commit() {
        let (_dir, repo) = workspace();
        let source = MockSource::default().with_tag("1.2.3").commit("fix: a");
        let release = SemanticRelease::new(config(), &source, &repo).unwrap();

        let first = release.next_version(&ctx("main"), false).unwrap();
        let second = release.next_version(&ctx("main"), false).unwrap();
        assert_eq!(first, second);
        assert_eq!(source.walks(), 1);

        release.next_version(&ctx("main"), true).unwrap();
        assert_eq!(source.walks(), 2);
    }

    #[test]
    fn test_cache_ignored_for_other_commit() {
        let (_dir, repo) = workspace();
        let source = MockSource::default().with_tag("1.2.3").commit("fix: a");
        let release = SemanticRelease::new(config(), &source, &repo).unwrap();

        release.next_version(&ctx("main"), false).unwrap();
        let other = CiContext::new("e".repeat(40), "main");
        let next = release.next_version(&other, false).unwrap();

        assert_eq!(source.walks(), 2);
        assert_eq!(next.next.commit_hash, "e".repeat(40));
    }

    #[test]
    fn test_set_version() {
        let (_dir, repo) = workspace();
        let source = MockSource::default().with_tag("1.2.3").commit("fix: a");
        let release = SemanticRelease::new(config(), &source, &repo).unwrap();

        let set = release.set_version(&ctx("main"), "v3.0.0").unwrap();
        assert_eq!(set.next.version, Version::new(3, 0, 0));
        assert_eq!(set.commits.len(), 1);

        let cached = release.next_version(&ctx("main"), false).unwrap();
        assert_eq!(cached.next.version, Version::new(3, 0, 0));
    }

    #[test]
    fn test_set_invalid_version() {
        let (_dir, repo) = workspace();
        let source = MockSource::default();
        let release = SemanticRelease::new(config(), &source, &repo).unwrap();

        assert!(matches!(
            release.set_version(&ctx("main"), "three"),
            Err(CoreError::Version(_))
        ));
    }

    #[test]
    fn test_unknown_commit_format() {
        let source = MockSource::default();
        let mut config = config();
        config.commit_format = "gitmoji".to_string();

        assert!(matches!(
            SemanticRelease::new(config, &source, "repo"),
            Err(CoreError::Analyzer(_))
        ));
    }

    #[test]
    fn test_unknown_policy() {
        let source = MockSource::default();
        let mut config = config();
        config.branch.insert("dev".to_string(), "gamma".to_string());

        assert!(matches!(
            SemanticRelease::new(config, &source, "repo"),
            Err(CoreError::Calculator(_))
        ));
    }

    #[test]
    fn test_changelog() {
        let (_dir, repo) = workspace();
        let source = MockSource::default()
            .with_tag("1.2.3")
            .commit("feat(api): add endpoint")
            .commit("docs: readme");
        let mut config = config();
        config.commit_url = Some("https://example.com/c/{{hash}}".to_string());
        let release = SemanticRelease::new(config, &source, &repo).unwrap();

        let next = release.next_version(&ctx("main"), false).unwrap();
        let changelog = release.changelog(&next, as_of()).unwrap();

        assert_eq!(changelog.title, "v1.3.0 (2024-03-09)");
        assert!(changelog.content.starts_with("# v1.3.0 (2024-03-09)\n"));
        assert!(changelog.content.contains("### Features"));
        assert!(changelog.content.contains("**`api`** add endpoint"));
        assert!(changelog.content.contains("https://example.com/c/"));
        assert!(!changelog.content.contains("readme"));
    }

    #[test]
    fn test_changelog_print_all() {
        let (_dir, repo) = workspace();
        let source = MockSource::default().with_tag("1.2.3").commit("docs: readme");
        let mut config = config();
        config.changelog.print_all = true;
        let release = SemanticRelease::new(config, &source, &repo).unwrap();

        let next = release.next_version(&ctx("main"), false).unwrap();
        let changelog = release.changelog(&next, as_of()).unwrap();
        assert!(changelog.content.contains("### Documentation changes"));
    }

    #[test]
    fn test_release_publishes() {
        let (_dir, repo) = workspace();
        let source = MockSource::default().with_tag("1.2.3").commit("fix: a");
        let release = SemanticRelease::new(config(), &source, &repo).unwrap();
        let provider = MockProvider::default();

        let published = release.release(&ctx("main"), &provider, false).unwrap();
        assert_eq!(published.unwrap().next.version, Version::new(1, 2, 4));
        assert_eq!(provider.published.borrow()[0].0, "1.2.4");
        assert!(provider.published.borrow()[0].1.starts_with("v1.2.4 ("));
    }

    #[test]
    fn test_release_skips_pull_request() {
        let (_dir, repo) = workspace();
        let source = MockSource::default().with_tag("1.2.3").commit("fix: a");
        let release = SemanticRelease::new(config(), &source, &repo).unwrap();
        let provider = MockProvider::default();

        let ctx = ctx("main").pull_request(true);
        assert!(release.release(&ctx, &provider, false).unwrap().is_none());
        assert!(provider.published.borrow().is_empty());
        assert_eq!(source.walks(), 0);
    }

    #[test]
    fn test_release_skips_unconfigured_branch() {
        let (_dir, repo) = workspace();
        let source = MockSource::default().with_tag("1.2.3").commit("feat: a");
        let release = SemanticRelease::new(config(), &source, &repo).unwrap();
        let provider = MockProvider::default();

        assert!(release.release(&ctx("topic"), &provider, false).unwrap().is_none());
        assert!(provider.published.borrow().is_empty());
    }

    #[test]
    fn test_release_skips_without_changes() {
        let (_dir, repo) = workspace();
        let source = MockSource::default().with_tag("1.2.3").commit("chore: deps");
        let release = SemanticRelease::new(config(), &source, &repo).unwrap();
        let provider = MockProvider::default();

        assert!(release.release(&ctx("main"), &provider, false).unwrap().is_none());
        assert!(provider.published.borrow().is_empty());
    }

    #[test]
    fn test_release_provider_failure() {
        let (_dir, repo) = workspace();
        let source = MockSource::default().with_tag("1.2.3").commit("fix: a");
        let release = SemanticRelease::new(config(), &source, &repo).unwrap();
        let provider = MockProvider::default();
        provider.fail.set(true);

        assert!(matches!(
            release.release(&ctx("main"), &provider, false),
            Err(CoreError::Provider(_))
        ));
    }

    #[test]
    fn test_write_changelog_prepends() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("CHANGELOG.md");
        fs::write(&path, "# v1.0.0\n").unwrap();

        write_changelog("# v1.1.0\n", &path, false).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "# v1.1.0\n\n# v1.0.0\n");
    }

    #[test]
    fn test_write_changelog_overwrites() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("CHANGELOG.md");
        fs::write(&path, "# v1.0.0\n").unwrap();

        write_changelog("# v1.1.0\n", &path, true).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "# v1.1.0\n");
    }

    #[test]
    fn test_write_changelog_creates_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("CHANGELOG.md");

        write_changelog("# v1.0.0\n", &path, false).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "# v1.0.0\n");
    }

    #[test]
    fn test_changelog_options_mapping() {
        let config = ChangelogConfig {
            show_authors: true,
            docker: Some(semrel_config::DockerConfig {
                repository: "org/image".to_string(),
                latest: true,
            }),
            ..Default::default()
        };

        let options = changelog_options(&config);
        assert!(options.show_authors);
        assert_eq!(options.docker.unwrap().repository, "org/image");
        assert!(options.npm.is_none());
    }
}
