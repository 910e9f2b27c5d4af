//! Commit classification rules.

use semrel_commit::Bucket;

/// Maps a commit type to its release bucket and changelog section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rule {
    /// The commit type this rule matches.
    pub tag: &'static str,
    /// The changelog section title.
    pub tag_label: &'static str,
    /// The release impact of a non-breaking commit of this type.
    pub bucket: Bucket,
    /// Whether commits of this type appear in the changelog.
    pub visible_in_changelog: bool,
}

impl Rule {
    const fn new(
        tag: &'static str,
        tag_label: &'static str,
        bucket: Bucket,
        visible_in_changelog: bool,
    ) -> Self {
        Self {
            tag,
            tag_label,
            bucket,
            visible_in_changelog,
        }
    }
}

/// The rule table shared by the Angular and Conventional grammars.
pub const DEFAULT_RULES: [Rule; 9] = [
    Rule::new("feat", "Features", Bucket::Minor, true),
    Rule::new("fix", "Bug fixes", Bucket::Patch, true),
    Rule::new("perf", "Performance improvements", Bucket::Patch, true),
    Rule::new("docs", "Documentation changes", Bucket::None, false),
    Rule::new("style", "Style", Bucket::None, false),
    Rule::new("refactor", "Code refactor", Bucket::None, false),
    Rule::new("test", "Testing", Bucket::None, false),
    Rule::new(
        "chore",
        "Changes to the build process or auxiliary tools and libraries such as documentation generation",
        Bucket::None,
        false,
    ),
    Rule::new("build", "Changes to CI/CD", Bucket::None, false),
];
