//! Analyzed commit type produced by the commit analyzer.

use serde::{Deserialize, Serialize};

use crate::Commit;

/// One paragraph of a commit body or one labeled footer entry.
///
/// Body paragraphs carry an empty label; footers carry their token
/// (e.g. `BREAKING CHANGE`, `Issue`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageBlock {
    /// The footer token, empty for body text.
    pub label: String,

    /// The block text, trimmed.
    pub content: String,
}

impl MessageBlock {
    /// Creates a new message block.
    #[must_use]
    pub fn new(label: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            content: content.into(),
        }
    }

    /// Creates an unlabeled body block.
    #[must_use]
    pub fn body(content: impl Into<String>) -> Self {
        Self::new("", content)
    }
}

/// A commit after classification against a rule table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyzedCommit {
    /// The source commit.
    pub commit: Commit,

    /// The matched rule tag (feat, fix, ...).
    pub tag: String,

    /// The human readable label of the matched rule.
    pub tag_label: String,

    /// The optional scope from the header.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,

    /// The header subject.
    pub subject: String,

    /// Body paragraphs.
    #[serde(default)]
    pub body_blocks: Vec<MessageBlock>,

    /// Footer entries in message order.
    #[serde(default)]
    pub footer_blocks: Vec<MessageBlock>,

    /// Whether this commit is a breaking change.
    pub is_breaking: bool,

    /// Free text describing the breaking change.
    #[serde(default)]
    pub breaking_message: String,

    /// Whether the commit shows up in the changelog.
    pub visible: bool,
}

impl AnalyzedCommit {
    /// Creates a new analyzed commit builder.
    #[must_use]
    pub fn builder(commit: Commit, tag: impl Into<String>) -> AnalyzedCommitBuilder {
        AnalyzedCommitBuilder::new(commit, tag)
    }

    /// Returns the commit author.
    #[must_use]
    pub fn author(&self) -> &str {
        &self.commit.author
    }
}

/// Builder for [`AnalyzedCommit`].
#[derive(Debug)]
pub struct AnalyzedCommitBuilder {
    commit: Commit,
    tag: String,
    tag_label: String,
    scope: Option<String>,
    subject: String,
    body_blocks: Vec<MessageBlock>,
    footer_blocks: Vec<MessageBlock>,
    is_breaking: bool,
    breaking_message: String,
    visible: bool,
}

impl AnalyzedCommitBuilder {
    /// Creates a new builder with required fields.
    fn new(commit: Commit, tag: impl Into<String>) -> Self {
        Self {
            commit,
            tag: tag.into(),
            tag_label: String::new(),
            scope: None,
            subject: String::new(),
            body_blocks: Vec::new(),
            footer_blocks: Vec::new(),
            is_breaking: false,
            breaking_message: String::new(),
            visible: false,
        }
    }

    /// Sets the rule label.
    #[must_use]
    pub fn tag_label(mut self, label: impl Into<String>) -> Self {
        self.tag_label = label.into();
        self
    }

    /// Sets the scope. Empty scopes are stored as `None`.
    #[must_use]
    pub fn scope(mut self, scope: impl Into<String>) -> Self {
        let scope = scope.into();
        self.scope = (!scope.is_empty()).then_some(scope);
        self
    }

    /// Sets the subject.
    #[must_use]
    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = subject.into();
        self
    }

    /// Sets the body blocks.
    #[must_use]
    pub fn body_blocks(mut self, blocks: Vec<MessageBlock>) -> Self {
        self.body_blocks = blocks;
        self
    }

    /// Sets the footer blocks.
    #[must_use]
    pub fn footer_blocks(mut self, blocks: Vec<MessageBlock>) -> Self {
        self.footer_blocks = blocks;
        self
    }

    /// Marks the commit as breaking with the given description.
    #[must_use]
    pub fn breaking(mut self, message: impl Into<String>) -> Self {
        self.is_breaking = true;
        self.breaking_message = message.into();
        self
    }

    /// Sets the changelog visibility.
    #[must_use]
    pub fn visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    /// Builds the [`AnalyzedCommit`].
    #[must_use]
    pub fn build(self) -> AnalyzedCommit {
        AnalyzedCommit {
            commit: self.commit,
            tag: self.tag,
            tag_label: self.tag_label,
            scope: self.scope,
            subject: self.subject,
            body_blocks: self.body_blocks,
            footer_blocks: self.footer_blocks,
            is_breaking: self.is_breaking,
            breaking_message: self.breaking_message,
            visible: self.visible,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn commit() -> Commit {
        Commit::new("abc123", "feat(api): add endpoint", "Test")
    }

    #[test]
    fn test_builder() {
        let analyzed = AnalyzedCommit::builder(commit(), "feat")
            .tag_label("Features")
            .scope("api")
            .subject("add endpoint")
            .visible(true)
            .build();

        assert_eq!(analyzed.tag, "feat");
        assert_eq!(analyzed.tag_label, "Features");
        assert_eq!(analyzed.scope.as_deref(), Some("api"));
        assert_eq!(analyzed.subject, "add endpoint");
        assert!(analyzed.visible);
        assert!(!analyzed.is_breaking);
        assert!(analyzed.breaking_message.is_empty());
    }

    #[test]
    fn test_builder_empty_scope_is_none() {
        let analyzed = AnalyzedCommit::builder(commit(), "feat").scope("").build();
        assert!(analyzed.scope.is_none());
    }

    #[test]
    fn test_builder_breaking() {
        let analyzed = AnalyzedCommit::builder(commit(), "feat")
            .breaking("remove legacy route")
            .build();

        assert!(analyzed.is_breaking);
        assert_eq!(analyzed.breaking_message, "remove legacy route");
    }

    #[test]
    fn test_author() {
        let analyzed = AnalyzedCommit::builder(commit(), "feat").build();
        assert_eq!(analyzed.author(), "Test");
    }

    #[test]
    fn test_message_block_body() {
        let block = MessageBlock::body("some text");
        assert!(block.label.is_empty());
        assert_eq!(block.content, "some text");
    }

    #[test]
    fn test_serialize_skips_missing_scope() {
        let analyzed = AnalyzedCommit::builder(commit(), "fix").build();
        let json = serde_json::to_string(&analyzed).unwrap();
        assert!(!json.contains("scope"));

        let back: AnalyzedCommit = serde_json::from_str(&json).unwrap();
        assert_eq!(back, analyzed);
    }
}
