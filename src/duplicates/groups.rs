//! Digest-keyed duplicate grouping.
//!
//! Grouping is the single-consumer stage of the pipeline: hashed candidates
//! arrive in enumeration order and are folded into digest buckets held in
//! first-observed order. Only buckets with two or more members survive into
//! the result; a file with a unique digest is not a duplicate of anything.
//!
//! Determinism: the same candidate sequence always produces the same group
//! order (first observation of each digest) and the same member order
//! (discovery order), run to run.

use indexmap::IndexMap;
use serde::Serialize;

use crate::scanner::{hash_to_hex, FileEntry, Hash};

/// A group of byte-identical files.
///
/// Invariant: every member shares `digest` and `size`, and the group holds
/// at least two members while it lives in a [`ScanResult`]. Only the
/// deletion manager mutates membership.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DuplicateGroup {
    /// BLAKE3 digest shared by all members
    #[serde(serialize_with = "serialize_digest")]
    pub digest: Hash,
    /// Size in bytes shared by all members
    pub size: u64,
    /// Members in discovery order
    pub files: Vec<FileEntry>,
}

fn serialize_digest<S: serde::Serializer>(digest: &Hash, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&hash_to_hex(digest))
}

impl DuplicateGroup {
    /// Create a new group.
    #[must_use]
    pub fn new(digest: Hash, size: u64, files: Vec<FileEntry>) -> Self {
        Self { digest, size, files }
    }

    /// Number of files in this group.
    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Whether the group has no members.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Redundant copies beyond the one retained original.
    #[must_use]
    pub fn duplicate_count(&self) -> usize {
        self.files.len().saturating_sub(1)
    }

    /// Bytes occupied by the redundant copies.
    #[must_use]
    pub fn wasted_space(&self) -> u64 {
        self.size * self.duplicate_count() as u64
    }

    /// Digest as a lowercase hex string.
    #[must_use]
    pub fn digest_hex(&self) -> String {
        hash_to_hex(&self.digest)
    }
}

/// The outcome of one scan: duplicate groups plus the candidate count.
///
/// Owned by the session that produced it and superseded wholesale by the
/// next scan. The deletion manager mutates the current instance in place;
/// prior results are never touched retroactively.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ScanResult {
    /// Duplicate groups, ordered by first observation of their digest
    pub groups: Vec<DuplicateGroup>,
    /// Candidates that were hashed and considered for grouping
    pub total_files_considered: usize,
}

impl ScanResult {
    /// Whether the scan found any duplicates at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Fold hashed candidates into a [`ScanResult`].
///
/// Consumes `(entry, digest)` pairs in enumeration order. Buckets are kept
/// in the order their digest was first observed; within a bucket, files
/// keep their discovery order. Buckets with a single member are dropped.
///
/// # Example
///
/// ```
/// use dupescan::duplicates::group_by_digest;
/// use dupescan::scanner::FileEntry;
/// use std::path::PathBuf;
/// use std::time::SystemTime;
///
/// let entry = |p: &str| FileEntry::new(PathBuf::from(p), 100, SystemTime::UNIX_EPOCH);
/// let result = group_by_digest(vec![
///     (entry("/a"), [1u8; 32]),
///     (entry("/b"), [2u8; 32]),
///     (entry("/c"), [1u8; 32]),
/// ]);
///
/// assert_eq!(result.total_files_considered, 3);
/// assert_eq!(result.groups.len(), 1);
/// assert_eq!(result.groups[0].files.len(), 2);
/// ```
#[must_use]
pub fn group_by_digest(hashed: impl IntoIterator<Item = (FileEntry, Hash)>) -> ScanResult {
    let mut buckets: IndexMap<Hash, Vec<FileEntry>> = IndexMap::new();
    let mut total = 0usize;

    for (entry, digest) in hashed {
        total += 1;
        buckets.entry(digest).or_default().push(entry);
    }

    let groups: Vec<DuplicateGroup> = buckets
        .into_iter()
        .filter(|(_, files)| files.len() > 1)
        .map(|(digest, files)| {
            let size = files.first().map_or(0, |f| f.size);
            log::debug!(
                "duplicate group {}: {} files, {} bytes each",
                hash_to_hex(&digest),
                files.len(),
                size
            );
            DuplicateGroup::new(digest, size, files)
        })
        .collect();

    ScanResult {
        groups,
        total_files_considered: total,
    }
}
