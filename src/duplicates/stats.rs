//! Duplicate-set statistics.
//!
//! [`aggregate`] is a pure function of a [`ScanResult`]; it performs no
//! I/O and never mutates its input.

use serde::Serialize;

use super::ScanResult;

/// Aggregated statistics over one scan result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScanStats {
    /// Candidates that were hashed and considered for grouping
    pub total_files: usize,
    /// Number of duplicate groups
    pub duplicate_groups: usize,
    /// Redundant copies across all groups (one original retained per group)
    pub duplicate_files: usize,
    /// Bytes occupied by the redundant copies
    pub wasted_bytes: u64,
}

/// Derive statistics from a scan result.
///
/// # Example
///
/// ```
/// use dupescan::duplicates::{aggregate, DuplicateGroup, ScanResult};
/// use dupescan::scanner::FileEntry;
/// use std::path::PathBuf;
/// use std::time::SystemTime;
///
/// let entry = |p: &str, size| FileEntry::new(PathBuf::from(p), size, SystemTime::UNIX_EPOCH);
/// let result = ScanResult {
///     groups: vec![DuplicateGroup::new(
///         [0u8; 32],
///         100,
///         vec![entry("/a", 100), entry("/b", 100), entry("/c", 100)],
///     )],
///     total_files_considered: 10,
/// };
///
/// let stats = aggregate(&result);
/// assert_eq!(stats.duplicate_files, 2);
/// assert_eq!(stats.wasted_bytes, 200);
/// ```
#[must_use]
pub fn aggregate(result: &ScanResult) -> ScanStats {
    ScanStats {
        total_files: result.total_files_considered,
        duplicate_groups: result.groups.len(),
        duplicate_files: result.groups.iter().map(|g| g.duplicate_count()).sum(),
        wasted_bytes: result.groups.iter().map(|g| g.wasted_space()).sum(),
    }
}
