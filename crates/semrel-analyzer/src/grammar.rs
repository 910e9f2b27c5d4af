//! Commit header grammars.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

use crate::{AnalyzerError, DEFAULT_RULES, Rule};

static ANGULAR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<type>\w+)(?:\((?P<scope>.*)\))?: (?P<subject>.*)$")
        .expect("invalid regex")
});

static CONVENTIONAL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<type>\w+)(?:\((?P<scope>.*)\))?(?P<breaking>!)?: (?P<subject>.*)$")
        .expect("invalid regex")
});

/// Parsed fields of a commit header line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    /// The commit type (feat, fix, ...).
    pub r#type: String,

    /// The scope, `None` when absent or empty.
    pub scope: Option<String>,

    /// Whether the header carries the `!` breaking marker.
    pub breaking: bool,

    /// The trimmed subject.
    pub subject: String,
}

/// Supported commit message grammars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Grammar {
    /// `type(scope): subject`, breaking changes only via `BREAKING CHANGE:`.
    Angular,
    /// `type(scope)!: subject`, the `!` marker also signals a breaking change.
    Conventional,
}

impl Grammar {
    /// Returns the configuration name of the grammar.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Angular => "angular",
            Self::Conventional => "conventional",
        }
    }

    /// Returns the rule table of the grammar, in match order.
    #[must_use]
    pub fn rules(self) -> &'static [Rule] {
        &DEFAULT_RULES
    }

    /// Parses a header line.
    ///
    /// Returns `None` if the line does not follow the grammar.
    #[must_use]
    pub fn parse_header(self, line: &str) -> Option<Header> {
        let re = match self {
            Self::Angular => &*ANGULAR_RE,
            Self::Conventional => &*CONVENTIONAL_RE,
        };
        let captures = re.captures(line)?;

        let scope = captures
            .name("scope")
            .map(|m| m.as_str().trim())
            .filter(|s| !s.is_empty())
            .map(ToString::to_string);

        Some(Header {
            r#type: captures.name("type")?.as_str().to_string(),
            scope,
            breaking: captures.name("breaking").is_some(),
            subject: captures.name("subject")?.as_str().trim().to_string(),
        })
    }
}

impl FromStr for Grammar {
    type Err = AnalyzerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "angular" => Ok(Self::Angular),
            "conventional" => Ok(Self::Conventional),
            other => Err(AnalyzerError::UnknownGrammar(other.to_string())),
        }
    }
}

impl fmt::Display for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
