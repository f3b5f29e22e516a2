//! Candidate filtering by size and extension category.
//!
//! A file is a *candidate* (eligible for hashing) when it is a regular
//! file, at least `min_size` bytes, and its extension falls in one of the
//! configured categories. The extension-to-category table is fixed;
//! [`FileCategory::All`] is the sentinel that admits every file, including
//! files without an extension.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use super::{FileEntry, ScanConfig};

/// Extension categories selectable for a scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileCategory {
    /// Common raster and vector image formats
    Images,
    /// Video container formats
    Videos,
    /// Audio formats
    Audio,
    /// Office documents, PDFs, and plain text
    Documents,
    /// Sentinel: admit every file regardless of extension
    All,
}

impl FileCategory {
    /// Extensions belonging to this category (lowercase, no dot).
    ///
    /// [`FileCategory::All`] has no table of its own; it matches by fiat.
    #[must_use]
    pub fn extensions(self) -> &'static [&'static str] {
        match self {
            Self::Images => &[
                "jpg", "jpeg", "png", "gif", "bmp", "webp", "svg", "tiff", "ico",
            ],
            Self::Videos => &[
                "mp4", "avi", "mkv", "mov", "wmv", "flv", "webm", "mpg", "mpeg", "3gp",
            ],
            Self::Audio => &["mp3", "wav", "flac", "aac", "ogg", "wma", "m4a", "opus"],
            Self::Documents => &[
                "pdf", "doc", "docx", "txt", "xlsx", "xls", "ppt", "pptx", "rtf", "odt",
            ],
            Self::All => &[],
        }
    }

    /// Whether a file with the given (lowercased) extension belongs here.
    #[must_use]
    pub fn admits(self, extension: Option<&str>) -> bool {
        match self {
            Self::All => true,
            _ => extension.is_some_and(|ext| self.extensions().iter().any(|e| *e == ext)),
        }
    }
}

impl std::fmt::Display for FileCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Images => "images",
            Self::Videos => "videos",
            Self::Audio => "audio",
            Self::Documents => "documents",
            Self::All => "all",
        };
        write!(f, "{name}")
    }
}

/// Check whether a file entry is a candidate for hashing.
///
/// True iff the entry is not a directory, meets the minimum size, and its
/// extension (case-insensitive) is admitted by at least one configured
/// category. Pure function; no I/O.
///
/// # Example
///
/// ```
/// use dupescan::scanner::{is_candidate, FileCategory, FileEntry, ScanConfig};
/// use std::path::PathBuf;
/// use std::time::SystemTime;
///
/// let config = ScanConfig {
///     min_size: 1000,
///     categories: vec![FileCategory::Documents],
///     ..Default::default()
/// };
///
/// let entry = FileEntry::new(PathBuf::from("/report.pdf"), 1500, SystemTime::now());
/// assert!(is_candidate(&entry, &config));
///
/// let entry = FileEntry::new(PathBuf::from("/tiny.pdf"), 500, SystemTime::now());
/// assert!(!is_candidate(&entry, &config));
/// ```
#[must_use]
pub fn is_candidate(entry: &FileEntry, config: &ScanConfig) -> bool {
    if entry.is_directory {
        return false;
    }
    if entry.size < config.min_size {
        return false;
    }

    let ext = entry.extension();
    config
        .categories
        .iter()
        .any(|cat| cat.admits(ext.as_deref()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::time::SystemTime;

    fn entry(path: &str, size: u64) -> FileEntry {
        FileEntry::new(PathBuf::from(path), size, SystemTime::now())
    }

    fn config(min_size: u64, categories: Vec<FileCategory>) -> ScanConfig {
        ScanConfig {
            min_size,
            categories,
            ..Default::default()
        }
    }

    #[test]
    fn test_min_size_threshold() {
        let cfg = config(1000, vec![FileCategory::All]);

        assert!(!is_candidate(&entry("/a.bin", 500), &cfg));
        assert!(is_candidate(&entry("/b.bin", 1000), &cfg));
        assert!(is_candidate(&entry("/c.bin", 1500), &cfg));
    }

    #[test]
    fn test_pdf_category_membership() {
        let pdf = entry("/report.pdf", 100);

        assert!(is_candidate(&pdf, &config(0, vec![FileCategory::Documents])));
        assert!(is_candidate(&pdf, &config(0, vec![FileCategory::All])));
        assert!(!is_candidate(&pdf, &config(0, vec![FileCategory::Images])));
    }

    #[test]
    fn test_extension_case_insensitive() {
        let cfg = config(0, vec![FileCategory::Images]);

        assert!(is_candidate(&entry("/photo.JPG", 10), &cfg));
        assert!(is_candidate(&entry("/photo.Png", 10), &cfg));
    }

    #[test]
    fn test_no_extension_only_matches_all() {
        let bare = entry("/Makefile", 10);

        assert!(!is_candidate(
            &bare,
            &config(
                0,
                vec![
                    FileCategory::Images,
                    FileCategory::Videos,
                    FileCategory::Audio,
                    FileCategory::Documents,
                ],
            )
        ));
        assert!(is_candidate(&bare, &config(0, vec![FileCategory::All])));
    }

    #[test]
    fn test_directories_never_candidates() {
        let mut dir = entry("/some/dir", 4096);
        dir.is_directory = true;

        assert!(!is_candidate(&dir, &config(0, vec![FileCategory::All])));
    }

    #[test]
    fn test_multiple_categories_union() {
        let cfg = config(0, vec![FileCategory::Audio, FileCategory::Videos]);

        assert!(is_candidate(&entry("/song.mp3", 10), &cfg));
        assert!(is_candidate(&entry("/clip.mkv", 10), &cfg));
        assert!(!is_candidate(&entry("/photo.jpg", 10), &cfg));
    }

    #[test]
    fn test_final_extension_wins() {
        // Category matching looks at the text after the final dot only.
        let cfg = config(0, vec![FileCategory::Documents]);
        assert!(is_candidate(&entry("/notes.backup.txt", 10), &cfg));
        assert!(!is_candidate(&entry("/notes.txt.bak", 10), &cfg));
    }

    #[test]
    fn test_category_tables_are_lowercase() {
        for cat in [
            FileCategory::Images,
            FileCategory::Videos,
            FileCategory::Audio,
            FileCategory::Documents,
        ] {
            for ext in cat.extensions() {
                assert_eq!(*ext, ext.to_lowercase());
            }
        }
    }

    #[test]
    fn test_category_display() {
        assert_eq!(FileCategory::Images.to_string(), "images");
        assert_eq!(FileCategory::All.to_string(), "all");
    }
}
