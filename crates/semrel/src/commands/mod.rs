//! Subcommand implementations.

pub mod changelog;
pub mod next;
pub mod release;
pub mod set;

use std::path::Path;

use anyhow::{Context, Result};
use semrel_config::{Config, ConfigError, find_and_load_config_from, load_config};
use semrel_core::{CiContext, SemanticRelease};
use semrel_git::Repository;
use tracing::{debug, warn};

use crate::cli::GlobalArgs;

/// Everything a command needs from the environment.
pub struct Session {
    pub repo: Repository,
    pub config: Config,
    pub ctx: CiContext,
    pub force: bool,
}

impl Session {
    /// Opens the repository, loads the configuration and detects the build
    /// context.
    pub fn open(global: &GlobalArgs) -> Result<Self> {
        let repo =
            Repository::open(&global.repository).context("failed to open git repository")?;
        let config = load(global, repo.path())?;
        let repo = repo.with_tag_prefix(config.tag_prefix.as_str());
        let ctx = CiContext::detect(&repo).context("failed to detect commit and branch")?;
        debug!(branch = %ctx.branch, hash = %ctx.commit_hash, "build context");

        Ok(Self {
            repo,
            config,
            ctx,
            force: global.force,
        })
    }

    /// Creates the release runner over this session's repository.
    pub fn release(&self) -> Result<SemanticRelease<'_>> {
        SemanticRelease::new(self.config.clone(), &self.repo, self.repo.path())
            .context("invalid release configuration")
    }
}

fn load(global: &GlobalArgs, root: &Path) -> Result<Config> {
    if let Some(path) = &global.config {
        return load_config(path).context("failed to load configuration");
    }

    match find_and_load_config_from(root) {
        Ok(config) => Ok(config),
        Err(ConfigError::NotFound(_)) => {
            warn!("no .release.toml found, using defaults");
            Ok(Config::default())
        }
        Err(e) => Err(e).context("failed to load configuration"),
    }
}
