//! BLAKE3 file hasher.
//!
//! Computes a 32-byte content digest over the full bytes of a file. Two
//! files with equal digest are treated as byte-identical; collision
//! probability is negligible and no byte-by-byte confirmation pass is
//! performed.
//!
//! Small files are hashed with buffered streaming reads. Files at or above
//! [`MMAP_THRESHOLD`] are memory-mapped and hashed with BLAKE3's
//! multi-threaded update, which is substantially faster on large inputs.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use memmap2::Mmap;

use super::HashError;

/// Content digest: a raw BLAKE3 output.
pub type Hash = [u8; 32];

/// Files at or above this size are memory-mapped for hashing.
pub const MMAP_THRESHOLD: u64 = 128 * 1024;

/// Buffer size for streaming reads of small files.
const READ_BUF_SIZE: usize = 64 * 1024;

/// BLAKE3 content hasher.
///
/// Stateless and cheap to construct; share one instance across workers
/// behind an `Arc` if convenient.
#[derive(Debug, Default, Clone)]
pub struct Hasher;

impl Hasher {
    /// Create a new hasher.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Compute the digest of the full content of the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`HashError`] if the file cannot be opened or read. The
    /// caller is expected to exclude the file from grouping and carry on.
    pub fn full_hash(&self, path: &Path) -> Result<Hash, HashError> {
        let file = File::open(path).map_err(|e| HashError::from_io(path, e))?;
        let len = file
            .metadata()
            .map_err(|e| HashError::from_io(path, e))?
            .len();

        if len >= MMAP_THRESHOLD {
            self.hash_mmap(path, &file)
        } else {
            self.hash_streaming(path, file)
        }
    }

    /// Hash via buffered sequential reads.
    fn hash_streaming(&self, path: &Path, mut file: File) -> Result<Hash, HashError> {
        let mut hasher = blake3::Hasher::new();
        let mut buf = vec![0u8; READ_BUF_SIZE];

        loop {
            let n = file
                .read(&mut buf)
                .map_err(|e| HashError::from_io(path, e))?;
            if n == 0 {
                break;
            }
            hasher.update(&buf[..n]);
        }

        Ok(*hasher.finalize().as_bytes())
    }

    /// Hash via a memory map and BLAKE3's rayon-parallel update.
    fn hash_mmap(&self, path: &Path, file: &File) -> Result<Hash, HashError> {
        // Safety: the map is read-only and dropped before returning. A file
        // truncated concurrently can fault; scans do not run against trees
        // that are being rewritten (single-writer discipline).
        let map = unsafe { Mmap::map(file) }.map_err(|e| HashError::from_io(path, e))?;

        let mut hasher = blake3::Hasher::new();
        hasher.update_rayon(&map);
        Ok(*hasher.finalize().as_bytes())
    }
}

/// Render a digest as a lowercase hex string.
///
/// # Example
///
/// ```
/// use dupescan::scanner::hash_to_hex;
///
/// let hex = hash_to_hex(&[0u8; 32]);
/// assert_eq!(hex.len(), 64);
/// assert!(hex.chars().all(|c| c == '0'));
/// ```
#[must_use]
pub fn hash_to_hex(hash: &Hash) -> String {
    use std::fmt::Write;

    let mut out = String::with_capacity(64);
    for byte in hash {
        let _ = write!(out, "{byte:02x}");
    }
    out
}
