//! Renderer options and output types.

use serde::{Deserialize, Serialize};

/// Default release title template.
pub const DEFAULT_TITLE_TEMPLATE: &str = "v{{version}} ({{date}})";

/// Format of the `{{date}}` placeholder.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Docker image section settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DockerOptions {
    /// Image repository, e.g. `org/image`.
    pub repository: String,

    /// Whether a `latest` tag is pushed as well.
    pub latest: bool,
}

/// NodeJS package section settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NpmOptions {
    /// Package name on the registry.
    pub package_name: String,

    /// Link to the package page.
    pub repository: String,
}

/// Changelog layout settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangelogOptions {
    /// Render sections for hidden rules too.
    pub print_all: bool,

    /// Append a "Special Thanks" section with all authors.
    pub show_authors: bool,

    /// Print commit bodies under the title instead of under each bullet.
    pub show_body_as_header: bool,

    /// Title template, [`DEFAULT_TITLE_TEMPLATE`] when unset.
    pub title_template: Option<String>,

    /// Docker image usage section.
    pub docker: Option<DockerOptions>,

    /// NodeJS package usage section.
    pub npm: Option<NpmOptions>,
}

impl ChangelogOptions {
    /// Returns the title template in effect.
    #[must_use]
    pub fn title_template(&self) -> &str {
        self.title_template
            .as_deref()
            .filter(|t| !t.is_empty())
            .unwrap_or(DEFAULT_TITLE_TEMPLATE)
    }
}

/// Values for a single render.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateConfig {
    /// The version being released, without prefix.
    pub version: String,

    /// Commit link template using `{{hash}}`.
    pub commit_url: Option<String>,
}

impl TemplateConfig {
    /// Creates a template config without commit links.
    #[must_use]
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            commit_url: None,
        }
    }

    /// Sets the commit link template.
    #[must_use]
    pub fn with_commit_url(mut self, url: impl Into<String>) -> Self {
        let url = url.into();
        self.commit_url = (!url.is_empty()).then_some(url);
        self
    }
}

/// A rendered changelog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedChangelog {
    /// The release title.
    pub title: String,

    /// The Markdown body, starting with `# <title>`.
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_title_template() {
        let options = ChangelogOptions::default();
        assert_eq!(options.title_template(), DEFAULT_TITLE_TEMPLATE);
    }

    #[test]
    fn test_empty_title_template_falls_back() {
        let options = ChangelogOptions {
            title_template: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(options.title_template(), DEFAULT_TITLE_TEMPLATE);
    }

    #[test]
    fn test_custom_title_template() {
        let options = ChangelogOptions {
            title_template: Some("Release {{version}}".to_string()),
            ..Default::default()
        };
        assert_eq!(options.title_template(), "Release {{version}}");
    }

    #[test]
    fn test_template_config_empty_url() {
        let config = TemplateConfig::new("1.0.0").with_commit_url("");
        assert!(config.commit_url.is_none());
    }

    #[test]
    fn test_generated_changelog_serialization() {
        let changelog = GeneratedChangelog {
            title: "v1.0.0".to_string(),
            content: "# v1.0.0\n".to_string(),
        };
        let json = serde_json::to_string(&changelog).unwrap();
        assert!(json.contains("\"title\":\"v1.0.0\""));
    }
}
