//! Progress reporting using indicatif.
//!
//! Progress is advisory: the pipeline ticks `(processed, total)` through
//! the [`ProgressCallback`] trait and never waits on the consumer. The
//! bundled [`Progress`] implementation renders a spinner while walking and
//! a bar with ETA while hashing, both on stderr.

use std::sync::Mutex;
use std::time::Duration;

use indicatif::{MultiProgress, ProgressBar, ProgressStyle};

/// Callback for scan-pipeline progress.
///
/// Implementations must be cheap and non-blocking; they are invoked from
/// hashing workers.
pub trait ProgressCallback: Send + Sync {
    /// A phase is starting. `total` is the number of items the phase will
    /// process, or 0 when unknown (the walking phase discovers its total).
    fn on_phase_start(&self, phase: &str, total: usize);

    /// An item finished. `processed` counts completed items so far;
    /// `total` repeats the phase total (0 when unknown).
    fn on_progress(&self, processed: usize, total: usize);

    /// The phase finished (successfully or not).
    fn on_phase_end(&self, phase: &str);
}

/// Terminal progress renderer.
pub struct Progress {
    multi: MultiProgress,
    walking: Mutex<Option<ProgressBar>>,
    hashing: Mutex<Option<ProgressBar>>,
    quiet: bool,
}

impl Progress {
    /// Create a renderer. When `quiet` is set nothing is drawn.
    #[must_use]
    pub fn new(quiet: bool) -> Self {
        Self {
            multi: MultiProgress::new(),
            walking: Mutex::new(None),
            hashing: Mutex::new(None),
            quiet,
        }
    }

    fn walking_style() -> ProgressStyle {
        ProgressStyle::with_template("{spinner:.green} {msg} [{elapsed_precise}] {pos} files")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn hashing_style() -> ProgressStyle {
        ProgressStyle::with_template(
            "[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) (ETA: {eta})",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█>-")
    }
}

impl ProgressCallback for Progress {
    fn on_phase_start(&self, phase: &str, total: usize) {
        if self.quiet {
            return;
        }

        match phase {
            "walking" => {
                let pb = self.multi.add(ProgressBar::new_spinner());
                pb.set_style(Self::walking_style());
                pb.set_message("Scanning directories");
                pb.enable_steady_tick(Duration::from_millis(100));
                *self.walking.lock().unwrap() = Some(pb);
            }
            "hashing" => {
                let pb = self.multi.add(ProgressBar::new(total as u64));
                pb.set_style(Self::hashing_style());
                *self.hashing.lock().unwrap() = Some(pb);
            }
            _ => {}
        }
    }

    fn on_progress(&self, processed: usize, _total: usize) {
        if self.quiet {
            return;
        }

        if let Some(ref pb) = *self.hashing.lock().unwrap() {
            pb.set_position(processed as u64);
        } else if let Some(ref pb) = *self.walking.lock().unwrap() {
            pb.set_position(processed as u64);
        }
    }

    fn on_phase_end(&self, phase: &str) {
        if self.quiet {
            return;
        }

        match phase {
            "walking" => {
                if let Some(pb) = self.walking.lock().unwrap().take() {
                    pb.finish_and_clear();
                }
            }
            "hashing" => {
                if let Some(pb) = self.hashing.lock().unwrap().take() {
                    pb.finish_and_clear();
                }
            }
            _ => {}
        }
    }
}
