//! Scanner module: directory enumeration, candidate filtering, and hashing.
//!
//! The scanner is divided into submodules:
//! - [`walker`]: recursive directory traversal and file discovery
//! - [`filter`]: size and extension-category candidate filtering
//! - [`hasher`]: BLAKE3 content hashing
//!
//! # Example
//!
//! ```no_run
//! use dupescan::scanner::{ScanConfig, Walker};
//! use std::path::Path;
//!
//! let config = ScanConfig {
//!     min_size: 1024,
//!     ..Default::default()
//! };
//!
//! let walker = Walker::new(Path::new("."), config);
//! for entry in walker.walk() {
//!     match entry {
//!         Ok(file) => println!("{}: {} bytes", file.path.display(), file.size),
//!         Err(e) => eprintln!("Warning: {}", e),
//!     }
//! }
//! ```

pub mod filter;
pub mod hasher;
pub mod walker;

use std::path::PathBuf;
use std::time::SystemTime;

use serde::Serialize;

pub use filter::{is_candidate, FileCategory};
pub use hasher::{hash_to_hex, Hash, Hasher};
pub use walker::Walker;

/// Metadata for a discovered file.
///
/// Produced by the enumerator, immutable afterwards, and identified by
/// `path` within a single scan.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileEntry {
    /// Absolute path to the file
    pub path: PathBuf,
    /// Base name component of the path
    pub name: String,
    /// File size in bytes
    pub size: u64,
    /// Last modification time
    #[serde(skip)]
    pub modified: SystemTime,
    /// Whether the entry is a directory. The walker only emits regular
    /// files; the candidate filter still checks the flag.
    pub is_directory: bool,
}

impl FileEntry {
    /// Create a new file entry. The name is derived from the path.
    #[must_use]
    pub fn new(path: PathBuf, size: u64, modified: SystemTime) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self {
            path,
            name,
            size,
            modified,
            is_directory: false,
        }
    }

    /// Lowercased extension (text after the final `.`), if any.
    #[must_use]
    pub fn extension(&self) -> Option<String> {
        self.path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase)
    }
}

/// Configuration for one scan invocation.
///
/// Constructed once per scan and immutable for its duration.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Minimum file size in bytes; smaller files are not candidates.
    pub min_size: u64,

    /// Allowed extension categories. [`FileCategory::All`] admits
    /// everything, including files without an extension.
    pub categories: Vec<FileCategory>,

    /// Follow symbolic links during traversal.
    /// Warning: may loop forever on symlink cycles.
    pub follow_symlinks: bool,

    /// Skip hidden files and directories (names starting with `.`).
    pub skip_hidden: bool,

    /// Gitignore-style patterns excluded from the walk.
    pub ignore_patterns: Vec<String>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            min_size: 0,
            categories: vec![FileCategory::All],
            follow_symlinks: false,
            skip_hidden: false,
            ignore_patterns: Vec::new(),
        }
    }
}

/// Errors that can occur while enumerating a directory tree.
///
/// These are recoverable: the walker reports them and keeps going.
#[derive(thiserror::Error, Debug)]
pub enum ScanError {
    /// Permission was denied when accessing a file or directory.
    #[error("permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// The entry vanished between listing and stat.
    #[error("path not found: {0}")]
    NotFound(PathBuf),

    /// Any other I/O error while reading an entry or listing.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

/// Errors that can occur while hashing a single file.
///
/// A hash failure excludes that file from grouping; it never aborts
/// the scan.
#[derive(thiserror::Error, Debug)]
pub enum HashError {
    /// The file was deleted or moved between enumeration and hashing.
    #[error("file not found: {0}")]
    NotFound(PathBuf),

    /// Permission was denied when reading the file.
    #[error("permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// An I/O error occurred while reading the file.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

impl HashError {
    pub(crate) fn from_io(path: &std::path::Path, error: std::io::Error) -> Self {
        use std::io::ErrorKind;
        match error.kind() {
            ErrorKind::NotFound => Self::NotFound(path.to_path_buf()),
            ErrorKind::PermissionDenied => Self::PermissionDenied(path.to_path_buf()),
            _ => Self::Io {
                path: path.to_path_buf(),
                source: error,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_entry_new() {
        let entry = FileEntry::new(PathBuf::from("/data/photo.JPG"), 2048, SystemTime::now());

        assert_eq!(entry.path, PathBuf::from("/data/photo.JPG"));
        assert_eq!(entry.name, "photo.JPG");
        assert_eq!(entry.size, 2048);
        assert!(!entry.is_directory);
    }

    #[test]
    fn test_file_entry_extension_lowercased() {
        let entry = FileEntry::new(PathBuf::from("/data/photo.JPG"), 1, SystemTime::now());
        assert_eq!(entry.extension().as_deref(), Some("jpg"));

        let entry = FileEntry::new(PathBuf::from("/data/archive.tar.gz"), 1, SystemTime::now());
        assert_eq!(entry.extension().as_deref(), Some("gz"));

        let entry = FileEntry::new(PathBuf::from("/data/README"), 1, SystemTime::now());
        assert_eq!(entry.extension(), None);
    }

    #[test]
    fn test_scan_config_default() {
        let config = ScanConfig::default();

        assert_eq!(config.min_size, 0);
        assert_eq!(config.categories, vec![FileCategory::All]);
        assert!(!config.follow_symlinks);
        assert!(!config.skip_hidden);
        assert!(config.ignore_patterns.is_empty());
    }

    #[test]
    fn test_scan_error_display() {
        let err = ScanError::PermissionDenied(PathBuf::from("/locked"));
        assert_eq!(err.to_string(), "permission denied: /locked");

        let err = ScanError::NotFound(PathBuf::from("/missing"));
        assert_eq!(err.to_string(), "path not found: /missing");
    }

    #[test]
    fn test_hash_error_from_io() {
        let err = HashError::from_io(
            std::path::Path::new("/gone"),
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert!(matches!(err, HashError::NotFound(_)));

        let err = HashError::from_io(
            std::path::Path::new("/secret"),
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "nope"),
        );
        assert!(matches!(err, HashError::PermissionDenied(_)));
    }
}
