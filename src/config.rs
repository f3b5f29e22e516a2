//! Optional configuration file.
//!
//! A small TOML file at the platform config dir supplies defaults for
//! recurring scan options; CLI flags always override it. A missing or
//! unparseable file silently falls back to defaults (with a debug log),
//! so the tool works out of the box.
//!
//! ```toml
//! # ~/.config/dupescan/config.toml
//! min_size = "1KiB"
//! types = ["images", "documents"]
//! io_threads = 8
//! ```

use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use directories::ProjectDirs;
use serde::Deserialize;

use crate::scanner::FileCategory;

/// Defaults loaded from the config file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Default minimum size, human-readable (e.g. "1KiB").
    #[serde(default)]
    pub min_size: Option<String>,

    /// Default category filter.
    #[serde(default)]
    pub types: Option<Vec<FileCategory>>,

    /// Default hashing worker count.
    #[serde(default)]
    pub io_threads: Option<usize>,
}

impl Config {
    /// Load the config file from the default platform path, or defaults.
    #[must_use]
    pub fn load() -> Self {
        match Self::load_from_default_path() {
            Ok(config) => config,
            Err(e) => {
                log::debug!("no usable config file, using defaults: {e}");
                Self::default()
            }
        }
    }

    fn load_from_default_path() -> Result<Self> {
        let path = Self::config_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::parse(&fs::read_to_string(&path)?)
    }

    /// Parse a config document.
    ///
    /// # Errors
    ///
    /// Returns an error on malformed TOML or unknown keys.
    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Platform-specific config file location.
    fn config_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "dupescan", "dupescan")
            .ok_or_else(|| anyhow::anyhow!("could not determine config directory"))?;
        Ok(dirs.config_dir().join("config.toml"))
    }
}
