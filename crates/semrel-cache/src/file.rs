//! `.version` file access.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use semrel_commit::ClassifiedCommits;
use semver::Version;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::{CacheError, CacheResult, ReleaseVersion, ReleaseVersionEntry};

/// Name of the cache file.
pub const CACHE_FILE_NAME: &str = ".version";

#[derive(Debug, Serialize, Deserialize)]
struct CacheFile {
    branch: String,
    last: StoredEntry,
    next: StoredEntry,
    #[serde(default)]
    first_release: bool,
    #[serde(default)]
    commits: ClassifiedCommits,
}

#[derive(Debug, Serialize, Deserialize)]
struct StoredEntry {
    commit: String,
    version: String,
}

impl From<&ReleaseVersionEntry> for StoredEntry {
    fn from(entry: &ReleaseVersionEntry) -> Self {
        Self {
            commit: entry.commit_hash.clone(),
            version: entry.version.to_string(),
        }
    }
}

impl TryFrom<StoredEntry> for ReleaseVersionEntry {
    type Error = CacheError;

    fn try_from(entry: StoredEntry) -> CacheResult<Self> {
        let version = Version::parse(&entry.version).map_err(|source| {
            CacheError::InvalidVersion {
                version: entry.version.clone(),
                source,
            }
        })?;
        Ok(Self::new(entry.commit, version))
    }
}

/// Returns the cache file location for a repository.
///
/// The file lives in the parent directory of the repository path. Existing
/// paths are canonicalized first so that `.` or `repo/..` resolve to a real
/// parent; paths that cannot be resolved are used as given.
#[must_use]
pub fn cache_path(repository: &Path) -> PathBuf {
    let resolved = repository
        .canonicalize()
        .unwrap_or_else(|_| repository.to_path_buf());
    resolved
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."))
        .join(CACHE_FILE_NAME)
}

/// Writes a release to the cache.
///
/// # Errors
///
/// Returns an error if the release cannot be serialized or written.
pub fn write(repository: &Path, release: &ReleaseVersion) -> CacheResult<()> {
    let path = cache_path(repository);
    let file = CacheFile {
        branch: release.branch.clone(),
        last: StoredEntry::from(&release.last),
        next: StoredEntry::from(&release.next),
        first_release: release.first_release,
        commits: release.commits.clone(),
    };

    let content = toml::to_string(&file)?;
    fs::write(&path, content).map_err(|source| CacheError::Io {
        path: path.clone(),
        source,
    })?;

    debug!(
        path = %path.display(),
        version = %release.next.version,
        hash = %release.next.commit_hash,
        "saved release to cache"
    );
    Ok(())
}

/// Reads the cached release.
///
/// # Errors
///
/// Returns an error if the file is missing, malformed, or holds an invalid
/// version.
pub fn read(repository: &Path) -> CacheResult<ReleaseVersion> {
    let path = cache_path(repository);
    let content = fs::read_to_string(&path).map_err(|source| CacheError::Io {
        path: path.clone(),
        source,
    })?;
    let file: CacheFile = toml::from_str(&content)?;

    Ok(ReleaseVersion {
        branch: file.branch,
        last: file.last.try_into()?,
        next: file.next.try_into()?,
        commits: file.commits,
        first_release: file.first_release,
    })
}

/// Reads the cached release if it was computed for `head`.
///
/// Any failure counts as a miss.
#[must_use]
pub fn read_matching(repository: &Path, head: &str) -> Option<ReleaseVersion> {
    match read(repository) {
        Ok(release) if release.next.commit_hash == head => {
            info!(version = %release.next.version, "found cached version");
            Some(release)
        }
        Ok(release) => {
            debug!(cached = %release.next.commit_hash, head, "cache does not match HEAD");
            None
        }
        Err(CacheError::Io { source, .. }) if source.kind() == ErrorKind::NotFound => {
            debug!("no cached version");
            None
        }
        Err(e) => {
            warn!(error = %e, "ignoring unreadable cache");
            None
        }
    }
}
