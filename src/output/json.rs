//! JSON output for automation and scripting.
//!
//! Serializes a scan result plus its aggregated statistics into a single
//! document:
//!
//! ```json
//! {
//!   "generated_at": "2026-02-11T14:03:55+00:00",
//!   "stats": { "total_files": 3, "duplicate_groups": 1, ... },
//!   "groups": [
//!     {
//!       "digest": "9f86d081884c7d65...",
//!       "size": 1000,
//!       "files": [ { "path": "/a.jpg", "name": "a.jpg", ... } ]
//!     }
//!   ]
//! }
//! ```

use std::io;

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

use crate::duplicates::{aggregate, ScanResult, ScanStats};

/// Errors that can occur while producing JSON output.
#[derive(Debug, Error)]
pub enum JsonOutputError {
    /// I/O error during writing.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Serialization failure.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// One file row in the JSON document.
#[derive(Debug, Serialize)]
struct JsonFile {
    path: String,
    name: String,
    size: u64,
    /// Last modified time, RFC 3339
    modified: String,
}

/// One duplicate group in the JSON document.
#[derive(Debug, Serialize)]
struct JsonGroup {
    digest: String,
    size: u64,
    files: Vec<JsonFile>,
}

/// The full JSON document.
#[derive(Debug, Serialize)]
struct JsonDocument {
    generated_at: String,
    stats: ScanStats,
    total_files_considered: usize,
    groups: Vec<JsonGroup>,
}

/// JSON output formatter.
pub struct JsonOutput<'a> {
    result: &'a ScanResult,
}

impl<'a> JsonOutput<'a> {
    /// Create a JSON formatter over a scan result.
    #[must_use]
    pub fn new(result: &'a ScanResult) -> Self {
        Self { result }
    }

    fn document(&self) -> JsonDocument {
        let groups = self
            .result
            .groups
            .iter()
            .map(|group| JsonGroup {
                digest: group.digest_hex(),
                size: group.size,
                files: group
                    .files
                    .iter()
                    .map(|f| JsonFile {
                        path: f.path.to_string_lossy().into_owned(),
                        name: f.name.clone(),
                        size: f.size,
                        modified: DateTime::<Utc>::from(f.modified).to_rfc3339(),
                    })
                    .collect(),
            })
            .collect();

        JsonDocument {
            generated_at: Utc::now().to_rfc3339(),
            stats: aggregate(self.result),
            total_files_considered: self.result.total_files_considered,
            groups,
        }
    }

    /// Produce pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`JsonOutputError::Json`] on serialization failure.
    pub fn to_json_pretty(&self) -> Result<String, JsonOutputError> {
        Ok(serde_json::to_string_pretty(&self.document())?)
    }

    /// Write pretty-printed JSON to the given writer.
    ///
    /// # Errors
    ///
    /// Returns [`JsonOutputError`] on serialization or write failure.
    pub fn write_to<W: io::Write>(&self, mut writer: W) -> Result<(), JsonOutputError> {
        let json = self.to_json_pretty()?;
        writer.write_all(json.as_bytes())?;
        writer.write_all(b"\n")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::duplicates::DuplicateGroup;
    use crate::scanner::FileEntry;
    use std::path::PathBuf;
    use std::time::SystemTime;

    fn sample_result() -> ScanResult {
        let entry = |p: &str| FileEntry::new(PathBuf::from(p), 1000, SystemTime::UNIX_EPOCH);
        ScanResult {
            groups: vec![DuplicateGroup::new(
                [3u8; 32],
                1000,
                vec![entry("/x/a.jpg"), entry("/y/a.jpg")],
            )],
            total_files_considered: 3,
        }
    }

    #[test]
    fn test_json_is_valid_and_complete() {
        let result = sample_result();
        let json = JsonOutput::new(&result).to_json_pretty().unwrap();

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(value["generated_at"].is_string());
        assert_eq!(value["total_files_considered"], 3);
        assert_eq!(value["stats"]["duplicate_groups"], 1);
        assert_eq!(value["stats"]["duplicate_files"], 1);
        assert_eq!(value["stats"]["wasted_bytes"], 1000);

        let groups = value["groups"].as_array().unwrap();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0]["size"], 1000);
        assert_eq!(groups[0]["digest"].as_str().unwrap().len(), 64);

        let files = groups[0]["files"].as_array().unwrap();
        assert_eq!(files.len(), 2);
        assert_eq!(files[0]["path"], "/x/a.jpg");
        assert_eq!(files[0]["name"], "a.jpg");
        // UNIX_EPOCH renders as the RFC 3339 epoch.
        assert!(files[0]["modified"]
            .as_str()
            .unwrap()
            .starts_with("1970-01-01"));
    }

    #[test]
    fn test_empty_result_serializes() {
        let result = ScanResult::default();
        let json = JsonOutput::new(&result).to_json_pretty().unwrap();

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["groups"].as_array().unwrap().len(), 0);
        assert_eq!(value["stats"]["duplicate_groups"], 0);
    }

    #[test]
    fn test_write_to_appends_newline() {
        let result = sample_result();
        let mut buf = Vec::new();
        JsonOutput::new(&result).write_to(&mut buf).unwrap();

        assert_eq!(buf.last(), Some(&b'\n'));
    }
}
