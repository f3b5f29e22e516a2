//! Ctrl+C handling for graceful cancellation.
//!
//! A single shared `AtomicBool` is flipped when SIGINT/SIGTERM arrives.
//! The walker and the hashing workers poll it and wind down; the pipeline
//! then reports whatever was fully hashed before the flag was observed.
//! A second Ctrl+C while winding down kills the process the hard way.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Exit code for an interrupted run: 128 + SIGINT(2), Unix convention.
pub const EXIT_CODE_INTERRUPTED: i32 = 130;

/// Shared cancellation state.
#[derive(Debug, Clone, Default)]
pub struct ShutdownHandler {
    flag: Arc<AtomicBool>,
}

impl ShutdownHandler {
    /// Create a handler with no shutdown requested.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether shutdown has been requested.
    #[must_use]
    pub fn is_shutdown_requested(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }

    /// Request a shutdown programmatically.
    pub fn request_shutdown(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    /// The flag to hand to the walker and hashing workers.
    #[must_use]
    pub fn flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.flag)
    }
}

/// Install the process signal handler and return the shared state.
///
/// # Errors
///
/// Returns the underlying error if the handler cannot be installed
/// (for example, if one was installed already).
pub fn install_handler() -> Result<ShutdownHandler, ctrlc::Error> {
    let handler = ShutdownHandler::new();
    let flag = handler.flag();

    ctrlc::set_handler(move || {
        if flag.swap(true, Ordering::SeqCst) {
            // Second signal: the user means it.
            eprintln!("Killed.");
            std::process::exit(EXIT_CODE_INTERRUPTED);
        }
        eprintln!("Interrupted, finishing in-flight work...");
    })?;

    Ok(handler)
}
