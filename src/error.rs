//! Process exit codes and structured error output.

use serde::Serialize;

/// Exit codes for the dupescan binary.
///
/// - 0: scan completed, duplicates found
/// - 1: general error (including an unreadable root path)
/// - 2: scan completed clean, no duplicates
/// - 3: scan completed but some files were skipped
/// - 130: interrupted by the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ExitCode {
    /// Scan completed and duplicates were found.
    Success = 0,
    /// An unexpected or fatal error occurred.
    GeneralError = 1,
    /// Scan completed but found no duplicates.
    NoDuplicates = 2,
    /// Scan completed with non-fatal skips (unreadable entries or files).
    PartialSuccess = 3,
    /// Interrupted by Ctrl+C.
    Interrupted = 130,
}

impl ExitCode {
    /// The numeric process exit code.
    #[must_use]
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Machine-readable code prefix for error reporting.
    #[must_use]
    pub fn code_prefix(self) -> &'static str {
        match self {
            Self::Success => "DS000",
            Self::GeneralError => "DS001",
            Self::NoDuplicates => "DS002",
            Self::PartialSuccess => "DS003",
            Self::Interrupted => "DS130",
        }
    }
}

/// Structured error payload for `--json-errors`.
#[derive(Debug, Serialize)]
pub struct StructuredError {
    /// Machine-readable code (e.g. "DS001")
    pub code: String,
    /// Numeric exit code
    pub exit_code: i32,
    /// Human-readable message
    pub message: String,
    /// Whether the run was interrupted
    pub interrupted: bool,
}

impl StructuredError {
    /// Build the payload from an error and the exit code it maps to.
    #[must_use]
    pub fn new(err: &anyhow::Error, exit_code: ExitCode) -> Self {
        Self {
            code: exit_code.code_prefix().to_string(),
            exit_code: exit_code.as_i32(),
            message: err.to_string(),
            interrupted: exit_code == ExitCode::Interrupted,
        }
    }
}
