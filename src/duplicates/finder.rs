//! Scan pipeline orchestrator.
//!
//! Wires the stages together: validate the root, enumerate candidates,
//! hash them on a bounded worker pool, and fold the digests into duplicate
//! groups on the calling thread.
//!
//! Data flows strictly forward. Hashing is the dominant cost and runs on a
//! dedicated rayon pool whose size is capped by
//! [`FinderConfig::io_threads`]; the indexed parallel collect returns
//! results in enumeration order no matter which worker finished first, so
//! grouping sees a stable sequence and the output is deterministic. The
//! grouping fold itself runs on a single consumer thread; no two workers
//! ever touch a digest bucket.
//!
//! # Example
//!
//! ```no_run
//! use dupescan::duplicates::{DuplicateFinder, FinderConfig};
//! use std::path::Path;
//!
//! let finder = DuplicateFinder::new(FinderConfig::default());
//! let (result, summary) = finder.scan(Path::new("/data")).unwrap();
//! println!(
//!     "{} groups in {:.1?}",
//!     result.groups.len(),
//!     summary.scan_duration
//! );
//! ```

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use rayon::prelude::*;

use crate::progress::ProgressCallback;
use crate::scanner::{FileEntry, Hash, HashError, Hasher, ScanConfig, Walker};

use super::{group_by_digest, ScanResult};

/// Default hashing parallelism. Kept modest to avoid thrashing spinning
/// disks; SSD users can raise it via `--io-threads`.
pub const DEFAULT_IO_THREADS: usize = 4;

/// A fatal pipeline error. Everything file-level is recovered and counted
/// in [`ScanSummary`] instead.
#[derive(thiserror::Error, Debug)]
pub enum FinderError {
    /// The root path cannot be enumerated at all.
    #[error("root path unavailable: {path}: {source}")]
    PathUnavailable {
        /// The root that was rejected
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Cancelled before any file was hashed; there is no result to report.
    #[error("scan interrupted")]
    Interrupted,
}

/// Configuration for the duplicate finder.
#[derive(Clone)]
pub struct FinderConfig {
    /// Filtering and traversal options for this scan.
    pub scan: ScanConfig,
    /// Number of hashing worker threads.
    pub io_threads: usize,
    /// Optional shutdown flag for cancellation.
    pub shutdown_flag: Option<Arc<AtomicBool>>,
    /// Optional progress callback (advisory, never blocks workers).
    pub progress: Option<Arc<dyn ProgressCallback>>,
}

impl std::fmt::Debug for FinderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FinderConfig")
            .field("scan", &self.scan)
            .field("io_threads", &self.io_threads)
            .field("shutdown_flag", &self.shutdown_flag)
            .field("progress", &self.progress.as_ref().map(|_| "<callback>"))
            .finish()
    }
}

impl Default for FinderConfig {
    fn default() -> Self {
        Self {
            scan: ScanConfig::default(),
            io_threads: DEFAULT_IO_THREADS,
            shutdown_flag: None,
            progress: None,
        }
    }
}

impl FinderConfig {
    /// Set the scan configuration.
    #[must_use]
    pub fn with_scan_config(mut self, scan: ScanConfig) -> Self {
        self.scan = scan;
        self
    }

    /// Set the hashing worker count (clamped to at least 1).
    #[must_use]
    pub fn with_io_threads(mut self, threads: usize) -> Self {
        self.io_threads = threads.max(1);
        self
    }

    /// Set the shutdown flag for cancellation.
    #[must_use]
    pub fn with_shutdown_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.shutdown_flag = Some(flag);
        self
    }

    /// Set the progress callback.
    #[must_use]
    pub fn with_progress(mut self, callback: Arc<dyn ProgressCallback>) -> Self {
        self.progress = Some(callback);
        self
    }

    fn is_shutdown_requested(&self) -> bool {
        self.shutdown_flag
            .as_ref()
            .is_some_and(|f| f.load(Ordering::SeqCst))
    }
}

/// Side statistics from one pipeline run.
///
/// The recovered-error counters exist so callers can report a non-zero
/// "files skipped" figure without per-file detail.
#[derive(Debug, Clone, Default)]
pub struct ScanSummary {
    /// Candidates yielded by the enumerator
    pub candidates: usize,
    /// Entries/subtrees skipped because they could not be read
    pub unreadable_skipped: usize,
    /// Candidates whose content could not be hashed
    pub hash_failures: usize,
    /// Total bytes hashed
    pub bytes_hashed: u64,
    /// Wall-clock duration of the whole pipeline
    pub scan_duration: Duration,
    /// Whether the scan was cancelled partway through
    pub interrupted: bool,
}

impl ScanSummary {
    /// Files that were seen but never made it into grouping.
    #[must_use]
    pub fn files_skipped(&self) -> usize {
        self.unreadable_skipped + self.hash_failures
    }
}

/// The walk → hash → group pipeline.
pub struct DuplicateFinder {
    config: FinderConfig,
}

impl DuplicateFinder {
    /// Create a finder with the given configuration.
    #[must_use]
    pub fn new(config: FinderConfig) -> Self {
        Self { config }
    }

    /// Create a finder with default configuration.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(FinderConfig::default())
    }

    /// Run the full pipeline over `root`.
    ///
    /// Returns the grouped result plus run statistics. File-level problems
    /// (unreadable subtrees, per-file read failures) are recovered and
    /// counted; only an unusable root or an early cancellation is an error.
    ///
    /// # Errors
    ///
    /// - [`FinderError::PathUnavailable`] if `root` is missing, not a
    ///   directory, or unreadable.
    /// - [`FinderError::Interrupted`] if cancellation hit before hashing
    ///   started. Cancellation during hashing instead yields the result
    ///   grouped from the files hashed so far, with
    ///   [`ScanSummary::interrupted`] set.
    pub fn scan(&self, root: &Path) -> Result<(ScanResult, ScanSummary), FinderError> {
        let started = Instant::now();
        let mut summary = ScanSummary::default();

        validate_root(root)?;

        // Stage 1: enumerate candidates.
        let candidates = self.collect_candidates(root, &mut summary);

        if self.config.is_shutdown_requested() {
            log::info!("scan interrupted during enumeration");
            return Err(FinderError::Interrupted);
        }

        summary.candidates = candidates.len();
        log::info!(
            "enumeration complete: {} candidates, {} unreadable entries skipped",
            summary.candidates,
            summary.unreadable_skipped
        );

        // Stage 2: hash on the bounded worker pool.
        let hashed = self.hash_candidates(candidates, &mut summary);

        // Stage 3: single-consumer grouping fold.
        let result = group_by_digest(hashed);

        summary.interrupted = self.config.is_shutdown_requested();
        summary.scan_duration = started.elapsed();
        log::info!(
            "scan complete: {} groups from {} files in {:.1?}",
            result.groups.len(),
            result.total_files_considered,
            summary.scan_duration
        );

        Ok((result, summary))
    }

    /// Walk the tree and gather candidates, counting recovered errors.
    fn collect_candidates(&self, root: &Path, summary: &mut ScanSummary) -> Vec<FileEntry> {
        if let Some(ref cb) = self.config.progress {
            cb.on_phase_start("walking", 0);
        }

        let mut walker = Walker::new(root, self.config.scan.clone());
        if let Some(ref flag) = self.config.shutdown_flag {
            walker = walker.with_shutdown_flag(Arc::clone(flag));
        }

        let mut candidates = Vec::new();
        for item in walker.walk() {
            match item {
                Ok(file) => {
                    candidates.push(file);
                    if let Some(ref cb) = self.config.progress {
                        cb.on_progress(candidates.len(), 0);
                    }
                }
                Err(e) => {
                    // Already logged by the walker; just count it.
                    log::debug!("recovered enumeration error: {e}");
                    summary.unreadable_skipped += 1;
                }
            }
        }

        if let Some(ref cb) = self.config.progress {
            cb.on_phase_end("walking");
        }

        candidates
    }

    /// Hash all candidates, preserving enumeration order in the output.
    fn hash_candidates(
        &self,
        candidates: Vec<FileEntry>,
        summary: &mut ScanSummary,
    ) -> Vec<(FileEntry, Hash)> {
        if candidates.is_empty() {
            return Vec::new();
        }

        let total = candidates.len();
        if let Some(ref cb) = self.config.progress {
            cb.on_phase_start("hashing", total);
        }
        log::info!(
            "hashing {} candidates on {} threads",
            total,
            self.config.io_threads
        );

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.config.io_threads)
            .build()
            .unwrap_or_else(|e| {
                log::warn!("failed to build hashing pool ({e}), using fallback");
                rayon::ThreadPoolBuilder::new().build().unwrap()
            });

        let hasher = Hasher::new();
        let processed = AtomicUsize::new(0);

        // Indexed collect keeps enumeration order regardless of which
        // worker finishes first: the stable merge grouping depends on.
        let outcomes: Vec<(FileEntry, Option<Result<Hash, HashError>>)> = pool.install(|| {
            candidates
                .into_par_iter()
                .map(|file| {
                    if self.config.is_shutdown_requested() {
                        return (file, None);
                    }

                    let outcome = hasher.full_hash(&file.path);
                    let done = processed.fetch_add(1, Ordering::Relaxed) + 1;
                    if let Some(ref cb) = self.config.progress {
                        cb.on_progress(done, total);
                    }
                    (file, Some(outcome))
                })
                .collect()
        });

        let mut hashed = Vec::with_capacity(outcomes.len());
        for (file, outcome) in outcomes {
            match outcome {
                Some(Ok(digest)) => {
                    summary.bytes_hashed += file.size;
                    hashed.push((file, digest));
                }
                Some(Err(e)) => {
                    log::warn!("failed to hash {}: {}", file.path.display(), e);
                    summary.hash_failures += 1;
                }
                // Skipped after cancellation; not a failure.
                None => {}
            }
        }

        if let Some(ref cb) = self.config.progress {
            cb.on_phase_end("hashing");
        }

        hashed
    }
}

/// Reject a root the enumerator cannot work with.
fn validate_root(root: &Path) -> Result<(), FinderError> {
    let metadata = std::fs::metadata(root).map_err(|source| FinderError::PathUnavailable {
        path: root.to_path_buf(),
        source,
    })?;

    if !metadata.is_dir() {
        return Err(FinderError::PathUnavailable {
            path: root.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::NotADirectory, "not a directory"),
        });
    }

    // Probe readability up front so the failure is attributed to the root
    // rather than surfacing as a skipped subtree.
    std::fs::read_dir(root)
        .map(|_| ())
        .map_err(|source| FinderError::PathUnavailable {
            path: root.to_path_buf(),
            source,
        })
}
