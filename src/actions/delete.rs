//! Deletion manager for duplicate-group members.
//!
//! Deleting a member is a two-step mutation: remove the file from storage,
//! then remove it from the in-memory group. The order matters — if the
//! storage deletion fails, the in-memory result is left exactly as it was
//! and the error is surfaced. The deletion is permanent
//! (`std::fs::remove_file`); there are no recycle-bin semantics.
//!
//! A group whose membership drops below two is dissolved: a singleton is
//! no longer a duplicate of anything and leaves the result set entirely.
//!
//! Deletion must not run concurrently with a scan over the same result;
//! callers serialize scan and delete against a given [`ScanResult`].

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::duplicates::ScanResult;

/// Errors from the deletion manager.
#[derive(Debug, Error)]
pub enum DeleteError {
    /// The caller referenced a group or member that does not exist.
    /// This is caller misuse, not a runtime condition to retry.
    #[error("no such group member: group {group_index}, file {file_index}")]
    IndexOutOfRange {
        /// The offending group index
        group_index: usize,
        /// The offending file index
        file_index: usize,
    },

    /// The file was already gone when deletion was attempted.
    #[error("file not found: {0}")]
    NotFound(PathBuf),

    /// Permission was denied when deleting.
    #[error("permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// Any other I/O failure from the storage layer.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path that failed to delete
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },
}

/// Outcome of a successful member deletion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteResult {
    /// Path that was removed from storage
    pub path: PathBuf,
    /// Size of the removed file in bytes
    pub size: u64,
    /// Whether the whole group was dissolved (membership fell below 2)
    pub group_removed: bool,
}

/// Delete one member of one duplicate group.
///
/// Removes the file at `result.groups[group_index].files[file_index]` from
/// storage, then from the group. When the group is left with fewer than
/// two members it is removed from the result set, shifting the indices of
/// later groups down by one.
///
/// # Errors
///
/// - [`DeleteError::IndexOutOfRange`] if either index is stale or bogus;
///   nothing is touched.
/// - [`DeleteError::NotFound`] / [`DeleteError::PermissionDenied`] /
///   [`DeleteError::Io`] if the storage deletion fails; the in-memory
///   result is left unchanged so the caller can retry or re-scan.
pub fn delete_member(
    result: &mut ScanResult,
    group_index: usize,
    file_index: usize,
) -> Result<DeleteResult, DeleteError> {
    let Some(group) = result.groups.get(group_index) else {
        return Err(DeleteError::IndexOutOfRange {
            group_index,
            file_index,
        });
    };
    let Some(file) = group.files.get(file_index) else {
        return Err(DeleteError::IndexOutOfRange {
            group_index,
            file_index,
        });
    };

    // Storage first. On failure the group is untouched, so memory and
    // disk never disagree about which copies still exist.
    remove_from_storage(&file.path)?;

    let group = &mut result.groups[group_index];
    let removed = group.files.remove(file_index);
    log::info!(
        "deleted {} ({} bytes) from group {}",
        removed.path.display(),
        removed.size,
        group_index
    );

    let group_removed = group.files.len() < 2;
    if group_removed {
        let dissolved = result.groups.remove(group_index);
        log::debug!(
            "group {} dissolved, {} member(s) left",
            group_index,
            dissolved.files.len()
        );
    }

    Ok(DeleteResult {
        path: removed.path,
        size: removed.size,
        group_removed,
    })
}

/// Permanently remove a file, mapping I/O failures to [`DeleteError`].
fn remove_from_storage(path: &Path) -> Result<(), DeleteError> {
    fs::remove_file(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => DeleteError::NotFound(path.to_path_buf()),
        io::ErrorKind::PermissionDenied => DeleteError::PermissionDenied(path.to_path_buf()),
        _ => DeleteError::Io {
            path: path.to_path_buf(),
            source: e,
        },
    })
}
