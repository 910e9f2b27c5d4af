//! Configuration schema.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{ConfigError, ConfigResult};

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Commit grammar, `angular` or `conventional`.
    #[serde(default = "default_commit_format")]
    pub commit_format: String,

    /// Commit link template using `{{hash}}`.
    #[serde(default)]
    pub commit_url: Option<String>,

    /// Prefix of version tags.
    #[serde(default = "default_tag_prefix")]
    pub tag_prefix: String,

    /// Release policy per branch name or prefix.
    #[serde(default)]
    pub branch: BTreeMap<String, String>,

    /// Analyzer configuration.
    #[serde(default)]
    pub analyzer: AnalyzerSection,

    /// Changelog configuration.
    #[serde(default)]
    pub changelog: ChangelogConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            commit_format: default_commit_format(),
            commit_url: None,
            tag_prefix: default_tag_prefix(),
            branch: BTreeMap::new(),
            analyzer: AnalyzerSection::default(),
            changelog: ChangelogConfig::default(),
        }
    }
}

impl Config {
    /// Checks values serde cannot check.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] describing the first problem found.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.commit_format.trim().is_empty() {
            return Err(ConfigError::Invalid("commit_format must not be empty".into()));
        }
        if self.branch.keys().any(|name| name.trim().is_empty()) {
            return Err(ConfigError::Invalid("empty branch name in [branch]".into()));
        }
        if self
            .changelog
            .docker
            .as_ref()
            .is_some_and(|d| d.repository.is_empty())
        {
            return Err(ConfigError::Invalid(
                "[changelog.docker] requires a repository".into(),
            ));
        }
        if self
            .changelog
            .npm
            .as_ref()
            .is_some_and(|n| n.package_name.is_empty())
        {
            return Err(ConfigError::Invalid(
                "[changelog.npm] requires a package_name".into(),
            ));
        }
        Ok(())
    }
}

fn default_commit_format() -> String {
    "conventional".to_string()
}

fn default_tag_prefix() -> String {
    "v".to_string()
}

/// Analyzer configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalyzerSection {
    /// Footer token separators tried before `": "` and `" #"`.
    #[serde(default)]
    pub token_separators: Vec<String>,
}

/// Changelog configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChangelogConfig {
    /// Include hidden commit types.
    #[serde(default)]
    pub print_all: bool,

    /// Thank all commit authors.
    #[serde(default)]
    pub show_authors: bool,

    /// Print commit bodies under the title.
    #[serde(default)]
    pub show_body_as_header: bool,

    /// Release title template.
    #[serde(default)]
    pub title_template: Option<String>,

    /// Docker image section.
    #[serde(default)]
    pub docker: Option<DockerConfig>,

    /// NodeJS package section.
    #[serde(default)]
    pub npm: Option<NpmConfig>,
}

/// Docker image section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DockerConfig {
    /// Image repository.
    #[serde(default)]
    pub repository: String,

    /// Whether `latest` is published too.
    #[serde(default)]
    pub latest: bool,
}

/// NodeJS package section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NpmConfig {
    /// Package name.
    #[serde(default)]
    pub package_name: String,

    /// Package page URL.
    #[serde(default)]
    pub repository: String,
}
