//! Prerelease suffix handling.

use semver::{Prerelease, Version};
use tracing::warn;

use crate::{CalculatorError, CalculatorResult};

/// Increments the prerelease counter for `label`.
///
/// A version without a suffix, or with a suffix for another label, starts at
/// `label.0`. A `label.N` suffix becomes `label.(N+1)`. Any other suffix is
/// reset to `label.0`.
///
/// # Errors
///
/// Returns an error if `label` is not a valid prerelease identifier. The
/// labels of [`ReleasePolicy`](crate::ReleasePolicy) are always valid, so this
/// only fires for labels supplied by other callers.
pub fn inc_prerelease(label: &str, version: &Version) -> CalculatorResult<Version> {
    let counter = if has_prerelease(version, label) {
        let current = version.pre.as_str();
        let parsed = match current.split('.').collect::<Vec<_>>()[..] {
            [_, n] => n.parse::<u64>().ok(),
            _ => None,
        };
        parsed.map_or_else(
            || {
                warn!(prerelease = current, %version, "could not parse prerelease, starting over");
                0
            },
            |n| n + 1,
        )
    } else {
        0
    };

    let suffix = format!("{label}.{counter}");
    let pre = Prerelease::new(&suffix).map_err(|source| CalculatorError::InvalidPrerelease {
        label: label.to_string(),
        source,
    })?;

    let mut next = version.clone();
    next.pre = pre;
    Ok(next)
}

/// Returns true if the version carries a suffix starting with `label`.
pub(crate) fn has_prerelease(version: &Version, label: &str) -> bool {
    !version.pre.is_empty() && version.pre.as_str().starts_with(label)
}
