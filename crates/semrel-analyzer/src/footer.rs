//! Body and footer splitting.
//!
//! Footers ("trailers") are line based: a line starting with a token followed
//! by a separator opens a new footer block, and every following line belongs
//! to that block until the next token line. Everything before the first token
//! line is body text.

use regex::Regex;
use semrel_commit::MessageBlock;

use crate::{AnalyzerError, AnalyzerResult};

/// Separators that always end a footer token.
pub const DEFAULT_TOKEN_SEPARATORS: [&str; 2] = [": ", " #"];

/// Marker that flags a breaking change anywhere in a commit message.
pub const BREAKING_CHANGE_PREFIX: &str = "BREAKING CHANGE:";

const TOKEN_PATTERN: &str = r"^(?P<token>[^\s*-][\w\- ]+[^\s])";

/// Body and footer blocks of a commit message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageBlocks {
    /// The body, at most one block.
    pub body: Vec<MessageBlock>,
    /// Footer blocks in message order.
    pub footers: Vec<MessageBlock>,
}

/// Line scanner that splits commit text into body and footer blocks.
#[derive(Debug, Clone)]
pub struct FooterScanner {
    separators: Vec<(String, Regex)>,
}

impl FooterScanner {
    /// Creates a scanner for the given extra separators.
    ///
    /// Extra separators are tried before [`DEFAULT_TOKEN_SEPARATORS`].
    ///
    /// # Errors
    ///
    /// Returns an error if a separator cannot be compiled into a pattern.
    pub fn new<S: AsRef<str>>(extra_separators: &[S]) -> AnalyzerResult<Self> {
        let separators = extra_separators
            .iter()
            .map(AsRef::as_ref)
            .chain(DEFAULT_TOKEN_SEPARATORS)
            .filter(|sep| !sep.is_empty())
            .map(|sep| {
                Regex::new(&format!("{TOKEN_PATTERN}{}", regex::escape(sep)))
                    .map(|re| (sep.to_string(), re))
                    .map_err(|source| AnalyzerError::InvalidSeparator {
                        separator: sep.to_string(),
                        source,
                    })
            })
            .collect::<AnalyzerResult<Vec<_>>>()?;

        Ok(Self { separators })
    }

    /// Returns the footer token and separator a line starts with.
    #[must_use]
    pub fn find_token<'a>(&self, line: &'a str) -> Option<(&'a str, &str)> {
        self.separators.iter().find_map(|(sep, re)| {
            re.captures(line)
                .and_then(|caps| caps.name("token"))
                .map(|token| (token.as_str(), sep.as_str()))
        })
    }

    /// Splits the text following a commit header into body and footers.
    #[must_use]
    pub fn split_body(&self, text: &str) -> MessageBlocks {
        let mut body = String::new();
        let mut footers = Vec::new();
        let mut footer: Option<String> = None;

        for line in text.lines() {
            if self.find_token(line).is_some() {
                if let Some(previous) = footer.take() {
                    footers.push(previous.trim().to_string());
                }
                footer = Some(String::new());
            }

            let target = footer.as_mut().unwrap_or(&mut body);
            target.push_str(line);
            target.push('\n');
        }
        if let Some(last) = footer {
            footers.push(last.trim().to_string());
        }

        let body = body.trim();
        MessageBlocks {
            body: if body.is_empty() {
                Vec::new()
            } else {
                vec![MessageBlock::body(body)]
            },
            footers: footers
                .iter()
                .filter(|text| !text.is_empty())
                .map(|text| self.parse_block(text))
                .collect(),
        }
    }

    fn parse_block(&self, text: &str) -> MessageBlock {
        match self.find_token(text) {
            Some((token, sep)) => {
                let content = text.replacen(&format!("{token}{sep}"), "", 1);
                MessageBlock::new(token, content.trim())
            }
            None => MessageBlock::body(text),
        }
    }
}
