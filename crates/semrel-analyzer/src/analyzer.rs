//! Commit classification.

use semrel_commit::{AnalyzedCommit, Bucket, ClassifiedCommits, Commit};
use tracing::{debug, info, trace};

use crate::{AnalyzerResult, BREAKING_CHANGE_PREFIX, FooterScanner, Grammar, Rule};

/// Analyzer options.
#[derive(Debug, Clone, Default)]
pub struct AnalyzerConfig {
    /// Footer token separators tried before the defaults.
    pub token_separators: Vec<String>,

    /// Mark every classified commit as changelog visible.
    pub print_all: bool,
}

/// Classifies commits against the rule table of a grammar.
#[derive(Debug, Clone)]
pub struct Analyzer {
    grammar: Grammar,
    scanner: FooterScanner,
    print_all: bool,
}

impl Analyzer {
    /// Creates an analyzer for the given grammar.
    ///
    /// # Errors
    ///
    /// Returns an error if a configured token separator is invalid.
    pub fn new(grammar: Grammar, config: &AnalyzerConfig) -> AnalyzerResult<Self> {
        debug!(%grammar, "commit format set");
        Ok(Self {
            grammar,
            scanner: FooterScanner::new(&config.token_separators)?,
            print_all: config.print_all,
        })
    }

    /// Returns the active rule table.
    #[must_use]
    pub fn rules(&self) -> &'static [Rule] {
        self.grammar.rules()
    }

    /// Classifies a single commit.
    ///
    /// Returns `None` if the header does not follow the grammar or its type
    /// matches no rule.
    #[must_use]
    pub fn analyze_commit(&self, commit: &Commit) -> Option<(Bucket, AnalyzedCommit)> {
        let header = self.grammar.parse_header(commit.header())?;
        let rule = self.rules().iter().find(|rule| {
            let matched = rule.tag == header.r#type;
            if !matched {
                trace!(tag = rule.tag, header = commit.header(), "rule does not match");
            }
            matched
        })?;

        let blocks = self.scanner.split_body(commit.rest());

        let mut builder = AnalyzedCommit::builder(commit.clone(), rule.tag)
            .tag_label(rule.tag_label)
            .subject(&header.subject)
            .body_blocks(blocks.body)
            .footer_blocks(blocks.footers)
            .visible(rule.visible_in_changelog || self.print_all);
        if let Some(scope) = header.scope {
            builder = builder.scope(scope);
        }

        let is_breaking = header.breaking || commit.message.contains(BREAKING_CHANGE_PREFIX);
        if !is_breaking {
            trace!(tag = rule.tag, hash = commit.short_hash(), "commit matched");
            return Some((rule.bucket, builder.build()));
        }

        let breaking_message = match commit.message.split_once(BREAKING_CHANGE_PREFIX) {
            Some((_, after)) => after.trim().to_string(),
            None => format!("{}\n{}", header.subject, commit.rest())
                .trim()
                .to_string(),
        };
        info!(hash = commit.short_hash(), subject = %header.subject, "breaking change found");

        Some((Bucket::Major, builder.breaking(breaking_message).build()))
    }

    /// Classifies commits into buckets.
    ///
    /// Commits keep their input order inside each bucket. Commits that match
    /// no rule are dropped.
    #[must_use]
    pub fn analyze(&self, commits: &[Commit]) -> ClassifiedCommits {
        let mut classified = ClassifiedCommits::new();

        for commit in commits {
            match self.analyze_commit(commit) {
                Some((bucket, analyzed)) => classified.push(bucket, analyzed),
                None => debug!(
                    hash = commit.short_hash(),
                    header = commit.header(),
                    "skipping unmatched commit"
                ),
            }
        }

        debug!(
            major = classified.major.len(),
            minor = classified.minor.len(),
            patch = classified.patch.len(),
            none = classified.none.len(),
            "analyzed commits"
        );
        classified
    }
}
