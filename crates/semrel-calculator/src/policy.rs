//! Release policies and branch lookup.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::{CalculatorError, CalculatorResult};

/// How versions are computed on a branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReleasePolicy {
    /// Plain releases.
    Release,
    /// Release candidates (`-rc.N`).
    Rc,
    /// Beta prereleases (`-beta.N`).
    Beta,
    /// Alpha prereleases (`-alpha.N`).
    Alpha,
}

impl ReleasePolicy {
    /// Returns the policy name, also used as prerelease label.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Release => "release",
            Self::Rc => "rc",
            Self::Beta => "beta",
            Self::Alpha => "alpha",
        }
    }
}

impl FromStr for ReleasePolicy {
    type Err = CalculatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "release" => Ok(Self::Release),
            "rc" => Ok(Self::Rc),
            "beta" => Ok(Self::Beta),
            "alpha" => Ok(Self::Alpha),
            other => Err(CalculatorError::UnknownPolicy(other.to_string())),
        }
    }
}

impl fmt::Display for ReleasePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Looks up the release policy configured for a branch.
///
/// An exact branch name wins; otherwise the longest configured name that
/// prefixes the branch is used (`release/` matches `release/1.x`).
///
/// # Errors
///
/// Returns an error if the matching entry names an unknown policy.
pub fn policy_for_branch(
    branches: &BTreeMap<String, String>,
    branch: &str,
) -> CalculatorResult<Option<ReleasePolicy>> {
    let entry = branches.get(branch).or_else(|| {
        branches
            .iter()
            .filter(|(name, _)| !name.is_empty() && branch.starts_with(name.as_str()))
            .max_by_key(|(name, _)| name.len())
            .map(|(_, policy)| policy)
    });

    entry.map(|policy| policy.parse()).transpose()
}
