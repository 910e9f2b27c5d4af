//! Next version computation.

use semrel_commit::{Bucket, ClassifiedCommits};
use semver::{Prerelease, Version};
use tracing::debug;

use crate::prerelease::has_prerelease;
use crate::{CalculatorResult, ReleasePolicy, inc_prerelease};

/// Computes the next version from classified commits.
///
/// - `release`: the last version on a first release. A prerelease is
///   promoted by dropping its suffix. Otherwise the version is bumped by the
///   highest non-empty bucket (major, minor, patch).
/// - `alpha`, `beta`, `rc`: keep the release triple if the last version
///   already is a prerelease of this policy, else bump it as for `release`.
///   The prerelease counter is then incremented when anything releasable
///   was found.
///
/// A patch bump of a prerelease only drops the suffix, so `2.0.0-beta.1`
/// moves to `2.0.0-rc.0` and not `2.0.1-rc.0`.
///
/// # Errors
///
/// Returns an error if the prerelease suffix cannot be built.
pub fn calculate_new_version(
    commits: &ClassifiedCommits,
    last: &Version,
    policy: ReleasePolicy,
    is_first_release: bool,
) -> CalculatorResult<Version> {
    let next = match policy {
        ReleasePolicy::Release if is_first_release => last.clone(),
        ReleasePolicy::Release if !last.pre.is_empty() => {
            let mut promoted = last.clone();
            promoted.pre = Prerelease::EMPTY;
            promoted
        }
        ReleasePolicy::Release => bump(last, commits.release_bucket()),
        ReleasePolicy::Alpha | ReleasePolicy::Beta | ReleasePolicy::Rc => {
            let label = policy.as_str();
            let base = if has_prerelease(last, label) {
                last.clone()
            } else {
                bump(last, commits.release_bucket())
            };

            if commits.release_bucket().is_some() {
                inc_prerelease(label, &base)?
            } else {
                base
            }
        }
    };

    debug!(%last, %next, %policy, is_first_release, "calculated version");
    Ok(next)
}

fn bump(version: &Version, bucket: Option<Bucket>) -> Version {
    let mut next = version.clone();

    match bucket {
        Some(Bucket::Major) => {
            next.major += 1;
            next.minor = 0;
            next.patch = 0;
        }
        Some(Bucket::Minor) => {
            next.minor += 1;
            next.patch = 0;
        }
        Some(Bucket::Patch) if !version.pre.is_empty() => {}
        Some(Bucket::Patch) => next.patch += 1,
        Some(Bucket::None) | None => return next,
    }

    next.pre = Prerelease::EMPTY;
    next
}
