//! Logging setup on the `log` facade with an `env_logger` backend.
//!
//! Level resolution, in priority order:
//! 1. `RUST_LOG`, when set, wins outright.
//! 2. `--quiet` limits output to errors.
//! 3. `-v` raises to debug, `-vv` and beyond to trace.
//! 4. Otherwise warn: a clean scan should print the report, not a log.

use std::env;
use std::io::Write;

use env_logger::Builder;
use log::LevelFilter;

/// Initialize logging once, before any log macro fires.
///
/// # Panics
///
/// Panics if called twice; `env_logger` installs a global logger.
pub fn init(verbose: u8, quiet: bool) {
    let mut builder = Builder::new();

    if env::var("RUST_LOG").is_ok() {
        builder.parse_default_env();
    } else {
        builder.filter_level(level_for(verbose, quiet));
    }

    builder.format(|buf, record| {
        let level = record.level();
        let style = buf.default_level_style(level);
        writeln!(
            buf,
            "{style}{level:<5}{style:#} [{}] {}",
            record.module_path().unwrap_or("?"),
            record.args()
        )
    });

    builder.init();
}

/// Map CLI flags to a level filter.
fn level_for(verbose: u8, quiet: bool) -> LevelFilter {
    if quiet {
        LevelFilter::Error
    } else {
        match verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_level_is_warn() {
        assert_eq!(level_for(0, false), LevelFilter::Warn);
    }

    #[test]
    fn test_verbose_levels() {
        assert_eq!(level_for(1, false), LevelFilter::Debug);
        assert_eq!(level_for(2, false), LevelFilter::Trace);
        assert_eq!(level_for(7, false), LevelFilter::Trace);
    }

    #[test]
    fn test_quiet_beats_verbose() {
        assert_eq!(level_for(0, true), LevelFilter::Error);
        assert_eq!(level_for(3, true), LevelFilter::Error);
    }
}
