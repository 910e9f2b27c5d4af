//! Markdown changelog renderer.

use std::collections::{BTreeSet, HashMap};
use std::fmt::Write;

use chrono::{DateTime, Utc};
use semrel_analyzer::Rule;
use semrel_commit::{AnalyzedCommit, ClassifiedCommits};
use tracing::debug;

use crate::{
    ChangelogOptions, DATE_FORMAT, GeneratedChangelog, RenderResult, TemplateConfig,
    render_template,
};

/// Renders classified commits as a Markdown changelog.
///
/// Sections follow the order of the rule table. Breaking changes are listed
/// first, in the order they were found.
#[derive(Debug, Clone)]
pub struct ChangelogRenderer {
    rules: Vec<Rule>,
    options: ChangelogOptions,
}

impl ChangelogRenderer {
    /// Creates a renderer for the given rule table.
    #[must_use]
    pub fn new(rules: &[Rule], options: ChangelogOptions) -> Self {
        Self {
            rules: rules.to_vec(),
            options,
        }
    }

    /// Section labels in render order.
    fn order(&self) -> Vec<&str> {
        self.rules
            .iter()
            .filter(|rule| rule.visible_in_changelog || self.options.print_all)
            .map(|rule| rule.tag_label)
            .collect()
    }

    /// Renders the changelog for a release.
    ///
    /// # Errors
    ///
    /// Returns an error if the title or commit link template is invalid.
    pub fn render(
        &self,
        commits: &ClassifiedCommits,
        config: &TemplateConfig,
        as_of: DateTime<Utc>,
    ) -> RenderResult<GeneratedChangelog> {
        let date = as_of.format(DATE_FORMAT).to_string();
        let title = render_template(
            self.options.title_template(),
            &[("version", config.version.as_str()), ("date", date.as_str())],
        )?;
        debug!(%title, commits = commits.len(), "rendering changelog");

        let mut breaking = Vec::new();
        let mut sections: HashMap<&str, Vec<&AnalyzedCommit>> = HashMap::new();
        for (_, commit) in commits.iter().filter(|(_, c)| c.visible) {
            if commit.is_breaking {
                breaking.push(commit);
            } else {
                sections.entry(commit.tag_label.as_str()).or_default().push(commit);
            }
        }
        let order = self.order();

        let mut output = String::new();
        _ = writeln!(output, "# {title}");

        if self.options.show_body_as_header {
            output.push('\n');
            for label in &order {
                for commit in sections.get(label).into_iter().flatten() {
                    for block in &commit.body_blocks {
                        _ = writeln!(output, "{}", block.content);
                    }
                }
            }
        }
        output.push('\n');

        if !breaking.is_empty() {
            output.push_str("## BREAKING CHANGES\n");
            for commit in &breaking {
                _ = writeln!(
                    output,
                    "* {}{}  \nintroduced by commit: \n{}{}",
                    scope_prefix(commit),
                    commit.breaking_message,
                    commit.subject,
                    commit_link(commit, config)?,
                );
            }
            output.push('\n');
        }

        for label in &order {
            let Some(section) = sections.get(label) else {
                continue;
            };

            _ = writeln!(output, "### {label}");
            for commit in section {
                _ = writeln!(
                    output,
                    "* {}{}{}",
                    scope_prefix(commit),
                    commit.subject,
                    commit_link(commit, config)?,
                );
                if !self.options.show_body_as_header {
                    for block in &commit.body_blocks {
                        for line in block.content.lines() {
                            _ = writeln!(output, "  > {line}");
                        }
                    }
                }
            }
            output.push('\n');
        }

        self.write_docker(&mut output, &config.version);
        self.write_npm(&mut output, &config.version);
        self.write_authors(&mut output, commits);

        Ok(GeneratedChangelog {
            title,
            content: output,
        })
    }

    fn write_docker(&self, output: &mut String, version: &str) {
        let Some(docker) = self
            .options
            .docker
            .as_ref()
            .filter(|d| !d.repository.is_empty())
        else {
            return;
        };
        let repository = &docker.repository;

        _ = writeln!(output, "## Docker image\n");
        _ = writeln!(
            output,
            "New docker image is released under `{repository}:{version}`\n"
        );
        _ = writeln!(output, "### Usage\n");
        _ = writeln!(output, "`docker run {repository}:{version}`");
        if docker.latest {
            _ = writeln!(output, "\nor\n\n`docker run {repository}:latest`");
        }
        output.push('\n');
    }

    fn write_npm(&self, output: &mut String, version: &str) {
        let Some(npm) = self
            .options
            .npm
            .as_ref()
            .filter(|n| !n.package_name.is_empty())
        else {
            return;
        };
        let name = &npm.package_name;

        _ = writeln!(output, "## NodeJS Package\n");
        _ = writeln!(
            output,
            "New NodeJS package is released under [{name}]({})\n",
            npm.repository
        );
        _ = writeln!(output, "### Usage\n");
        _ = writeln!(output, "`yarn add {name}@{version}`\n");
        _ = writeln!(output, "or\n");
        _ = writeln!(output, "`npm install -save {name}@{version}`\n");
    }

    fn write_authors(&self, output: &mut String, commits: &ClassifiedCommits) {
        if !self.options.show_authors {
            return;
        }

        let authors: BTreeSet<&str> = commits.iter().map(|(_, c)| c.author()).collect();
        if authors.is_empty() {
            return;
        }

        _ = writeln!(output, "# Special Thanks\n");
        _ = writeln!(output, "{}", authors.into_iter().collect::<Vec<_>>().join(", "));
    }
}

fn scope_prefix(commit: &AnalyzedCommit) -> String {
    commit
        .scope
        .as_ref()
        .map(|scope| format!("**`{scope}`** "))
        .unwrap_or_default()
}

fn commit_link(commit: &AnalyzedCommit, config: &TemplateConfig) -> RenderResult<String> {
    let Some(url) = &config.commit_url else {
        return Ok(String::new());
    };
    let url = render_template(url, &[("hash", commit.commit.hash.as_str())])?;
    Ok(format!(" ([{}]({url}))", commit.commit.short_hash()))
}
