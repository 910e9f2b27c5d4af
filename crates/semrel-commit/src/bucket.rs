//! Release impact buckets.

use serde::{Deserialize, Serialize};

use crate::AnalyzedCommit;

/// Release impact of a commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Bucket {
    /// Major version bump (breaking changes).
    Major,
    /// Minor version bump (new features).
    Minor,
    /// Patch version bump (bug fixes).
    Patch,
    /// No version bump.
    None,
}

impl Bucket {
    /// All buckets, highest impact first.
    pub const ALL: [Self; 4] = [Self::Major, Self::Minor, Self::Patch, Self::None];

    /// Returns the lowercase bucket name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Major => "major",
            Self::Minor => "minor",
            Self::Patch => "patch",
            Self::None => "none",
        }
    }
}

impl std::fmt::Display for Bucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Analyzed commits split by bucket.
///
/// All four buckets are always present. Each bucket keeps the order in which
/// commits were pushed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedCommits {
    /// Breaking changes.
    #[serde(default)]
    pub major: Vec<AnalyzedCommit>,
    /// Features.
    #[serde(default)]
    pub minor: Vec<AnalyzedCommit>,
    /// Fixes.
    #[serde(default)]
    pub patch: Vec<AnalyzedCommit>,
    /// Everything that does not trigger a release.
    #[serde(default)]
    pub none: Vec<AnalyzedCommit>,
}

impl ClassifiedCommits {
    /// Creates an empty classification.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the commits of one bucket.
    #[must_use]
    pub fn get(&self, bucket: Bucket) -> &[AnalyzedCommit] {
        match bucket {
            Bucket::Major => &self.major,
            Bucket::Minor => &self.minor,
            Bucket::Patch => &self.patch,
            Bucket::None => &self.none,
        }
    }

    /// Appends a commit to a bucket.
    pub fn push(&mut self, bucket: Bucket, commit: AnalyzedCommit) {
        match bucket {
            Bucket::Major => self.major.push(commit),
            Bucket::Minor => self.minor.push(commit),
            Bucket::Patch => self.patch.push(commit),
            Bucket::None => self.none.push(commit),
        }
    }

    /// Iterates all commits, bucket by bucket in [`Bucket::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = (Bucket, &AnalyzedCommit)> {
        Bucket::ALL
            .into_iter()
            .flat_map(move |bucket| self.get(bucket).iter().map(move |c| (bucket, c)))
    }

    /// Returns the total number of classified commits.
    #[must_use]
    pub fn len(&self) -> usize {
        self.major.len() + self.minor.len() + self.patch.len() + self.none.len()
    }

    /// Returns true if no commit was classified.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the highest bucket that triggers a release.
    ///
    /// `none` never triggers a release, so it is never returned.
    #[must_use]
    pub fn release_bucket(&self) -> Option<Bucket> {
        [Bucket::Major, Bucket::Minor, Bucket::Patch]
            .into_iter()
            .find(|bucket| !self.get(*bucket).is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Commit;

    fn make(tag: &str) -> AnalyzedCommit {
        AnalyzedCommit::builder(Commit::new("abc", format!("{tag}: x"), "me"), tag).build()
    }

    #[test]
    fn test_bucket_display() {
        assert_eq!(Bucket::Major.to_string(), "major");
        assert_eq!(Bucket::Minor.to_string(), "minor");
        assert_eq!(Bucket::Patch.to_string(), "patch");
        assert_eq!(Bucket::None.to_string(), "none");
    }

    #[test]
    fn test_serialize_lowercase() {
        let json = serde_json::to_string(&Bucket::Minor).unwrap();
        assert_eq!(json, "\"minor\"");
        let bucket: Bucket = serde_json::from_str("\"none\"").unwrap();
        assert_eq!(bucket, Bucket::None);
    }

    #[test]
    fn test_new_has_all_buckets_empty() {
        let classified = ClassifiedCommits::new();
        for bucket in Bucket::ALL {
            assert!(classified.get(bucket).is_empty());
        }
        assert!(classified.is_empty());
        assert_eq!(classified.release_bucket(), None);
    }

    #[test]
    fn test_push_and_get() {
        let mut classified = ClassifiedCommits::new();
        classified.push(Bucket::Minor, make("feat"));
        classified.push(Bucket::Minor, make("feat"));
        classified.push(Bucket::None, make("chore"));

        assert_eq!(classified.get(Bucket::Minor).len(), 2);
        assert_eq!(classified.get(Bucket::None).len(), 1);
        assert_eq!(classified.len(), 3);
    }

    #[test]
    fn test_release_bucket_priority() {
        let mut classified = ClassifiedCommits::new();
        classified.push(Bucket::None, make("chore"));
        assert_eq!(classified.release_bucket(), None);

        classified.push(Bucket::Patch, make("fix"));
        assert_eq!(classified.release_bucket(), Some(Bucket::Patch));

        classified.push(Bucket::Major, make("feat"));
        assert_eq!(classified.release_bucket(), Some(Bucket::Major));
    }

    #[test]
    fn test_iter_order() {
        let mut classified = ClassifiedCommits::new();
        classified.push(Bucket::None, make("chore"));
        classified.push(Bucket::Patch, make("fix"));
        classified.push(Bucket::Major, make("feat"));

        let order: Vec<Bucket> = classified.iter().map(|(bucket, _)| bucket).collect();
        assert_eq!(order, vec![Bucket::Major, Bucket::Patch, Bucket::None]);
    }
}
