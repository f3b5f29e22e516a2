//! Recursive directory enumerator built on jwalk.
//!
//! The walker descends from a root path and yields one [`FileEntry`] per
//! regular file that passes the candidate filter. Directory listings are
//! visited in name order so fixtures enumerate reproducibly; traversal
//! across sibling subtrees runs on jwalk's bounded rayon pool and carries
//! no cross-subtree ordering guarantee.
//!
//! Unreadable entries and subtrees are never fatal: they surface as
//! [`ScanError`] items in the stream, get logged, and the walk continues.
//! Validating that the root itself is readable is the pipeline's job (see
//! [`crate::duplicates::DuplicateFinder`]); a bad root simply produces an
//! error-only stream here.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::SystemTime;

use ignore::gitignore::{Gitignore, GitignoreBuilder};
use jwalk::WalkDir;

use super::{is_candidate, FileEntry, ScanConfig, ScanError};

/// Directory walker for recursive candidate discovery.
#[derive(Debug)]
pub struct Walker {
    /// Root path to walk
    root: PathBuf,
    /// Scan configuration (size, categories, traversal options)
    config: ScanConfig,
    /// Optional shutdown flag for early termination
    shutdown_flag: Option<Arc<AtomicBool>>,
}

impl Walker {
    /// Create a new walker for the given root.
    #[must_use]
    pub fn new(root: &Path, config: ScanConfig) -> Self {
        Self {
            root: root.to_path_buf(),
            config,
            shutdown_flag: None,
        }
    }

    /// Attach a shutdown flag; when it flips to `true` the walker stops
    /// yielding as soon as possible.
    #[must_use]
    pub fn with_shutdown_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.shutdown_flag = Some(flag);
        self
    }

    fn is_shutdown_requested(&self) -> bool {
        self.shutdown_flag
            .as_ref()
            .is_some_and(|f| f.load(Ordering::SeqCst))
    }

    /// Build a matcher from the configured ignore patterns, if any.
    fn build_ignore_matcher(&self) -> Option<Gitignore> {
        if self.config.ignore_patterns.is_empty() {
            return None;
        }

        let mut builder = GitignoreBuilder::new(&self.root);
        for pattern in &self.config.ignore_patterns {
            if let Err(e) = builder.add_line(None, pattern) {
                log::warn!("invalid ignore pattern '{}': {}", pattern, e);
            }
        }

        match builder.build() {
            Ok(matcher) if !matcher.is_empty() => Some(matcher),
            Ok(_) => None,
            Err(e) => {
                log::warn!("failed to build ignore patterns: {}", e);
                None
            }
        }
    }

    /// Whether a path matches the configured ignore patterns.
    fn is_ignored(&self, path: &Path, is_dir: bool, matcher: &Option<Gitignore>) -> bool {
        let Some(m) = matcher else { return false };

        let relative = path.strip_prefix(&self.root).unwrap_or(path);
        let text = relative.to_string_lossy();
        // Gitignore matching expects forward slashes even on Windows.
        let normalized = if cfg!(windows) {
            text.replace('\\', "/")
        } else {
            text.into_owned()
        };

        // Check parents too so directory patterns exclude whole subtrees.
        m.matched_path_or_any_parents(normalized, is_dir)
            .is_ignore()
    }

    /// Walk the tree, yielding candidate file entries.
    ///
    /// The sequence is lazy, finite, and not restartable mid-walk. Errors
    /// are yielded inline rather than terminating iteration.
    pub fn walk(&self) -> impl Iterator<Item = Result<FileEntry, ScanError>> + '_ {
        let matcher = self.build_ignore_matcher();

        let walk_dir = WalkDir::new(&self.root)
            .follow_links(self.config.follow_symlinks)
            .skip_hidden(self.config.skip_hidden)
            .process_read_dir(|_depth, _path, _state, children| {
                // Name-sort each listing for deterministic fixtures.
                children.sort_by(|a, b| match (a, b) {
                    (Ok(a), Ok(b)) => a.file_name().cmp(b.file_name()),
                    (Ok(_), Err(_)) => std::cmp::Ordering::Less,
                    (Err(_), Ok(_)) => std::cmp::Ordering::Greater,
                    (Err(_), Err(_)) => std::cmp::Ordering::Equal,
                });
            });

        walk_dir.into_iter().filter_map(move |entry_result| {
            if self.is_shutdown_requested() {
                log::debug!("walker: shutdown requested, stopping iteration");
                return None;
            }

            match entry_result {
                Ok(entry) => {
                    let path = entry.path();
                    if path == self.root {
                        return None;
                    }

                    let file_type = entry.file_type();
                    if file_type.is_dir() {
                        return None;
                    }

                    if self.is_ignored(&path, false, &matcher) {
                        log::trace!("ignoring file: {}", path.display());
                        return None;
                    }

                    if file_type.is_symlink() && !self.config.follow_symlinks {
                        log::trace!("skipping symlink: {}", path.display());
                        return None;
                    }

                    let metadata = if self.config.follow_symlinks {
                        std::fs::metadata(&path)
                    } else {
                        std::fs::symlink_metadata(&path)
                    };
                    let metadata = match metadata {
                        Ok(m) => m,
                        Err(e) => return Some(Err(map_io_error(&path, e))),
                    };

                    // Not a regular file once the symlink is resolved.
                    if !metadata.is_file() {
                        return None;
                    }

                    let modified = metadata.modified().unwrap_or(SystemTime::UNIX_EPOCH);
                    let file = FileEntry::new(path, metadata.len(), modified);

                    if !is_candidate(&file, &self.config) {
                        log::trace!("filtered out: {}", file.path.display());
                        return None;
                    }

                    Some(Ok(file))
                }
                Err(e) => {
                    let path = e
                        .path()
                        .map_or_else(|| self.root.clone(), std::borrow::ToOwned::to_owned);
                    log::warn!("unreadable entry, skipping subtree: {}", path.display());
                    Some(Err(ScanError::Io {
                        path,
                        source: std::io::Error::other(e.to_string()),
                    }))
                }
            }
        })
    }
}

/// Map a std I/O error on a specific path into a [`ScanError`].
fn map_io_error(path: &Path, error: std::io::Error) -> ScanError {
    use std::io::ErrorKind;

    match error.kind() {
        ErrorKind::PermissionDenied => {
            log::warn!("permission denied: {}", path.display());
            ScanError::PermissionDenied(path.to_path_buf())
        }
        ErrorKind::NotFound => {
            log::debug!("entry vanished during walk: {}", path.display());
            ScanError::NotFound(path.to_path_buf())
        }
        _ => {
            log::warn!("I/O error for {}: {}", path.display(), error);
            ScanError::Io {
                path: path.to_path_buf(),
                source: error,
            }
        }
    }
}
