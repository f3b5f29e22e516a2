//! Plain-text report writer.
//!
//! Layout: a title, the generation timestamp, group/file totals, then one
//! block per duplicate group with an indented line per member path.
//!
//! ```text
//! Duplicate Files Report
//!
//! Generated: 2026-02-11 14:03:55
//!
//! Total Groups: 2
//! Total Files: 5
//!
//! Group 1 (3 files, 2.3 MB each):
//!   - /photos/vacation.jpg
//!   - /backup/vacation.jpg
//!   - /desktop/vacation.jpg
//! ```

use std::io::{self, Write};

use chrono::Local;

use crate::duplicates::ScanResult;

use super::human_size;

/// Plain-text report over a scan result.
pub struct TextReport<'a> {
    result: &'a ScanResult,
}

impl<'a> TextReport<'a> {
    /// Create a report over the given result.
    #[must_use]
    pub fn new(result: &'a ScanResult) -> Self {
        Self { result }
    }

    /// Write the report to the given writer.
    ///
    /// # Errors
    ///
    /// Returns any I/O error from the underlying writer.
    pub fn write_to<W: Write>(&self, mut writer: W) -> io::Result<()> {
        let total_files: usize = self.result.groups.iter().map(|g| g.files.len()).sum();

        writeln!(writer, "Duplicate Files Report")?;
        writeln!(writer)?;
        writeln!(
            writer,
            "Generated: {}",
            Local::now().format("%Y-%m-%d %H:%M:%S")
        )?;
        writeln!(writer)?;
        writeln!(writer, "Total Groups: {}", self.result.groups.len())?;
        writeln!(writer, "Total Files: {total_files}")?;
        writeln!(writer)?;

        for (index, group) in self.result.groups.iter().enumerate() {
            writeln!(
                writer,
                "Group {} ({} files, {} each):",
                index + 1,
                group.files.len(),
                human_size(group.size)
            )?;
            for file in &group.files {
                writeln!(writer, "  - {}", file.path.display())?;
            }
            writeln!(writer)?;
        }

        Ok(())
    }

    /// Render the report as a string.
    #[must_use]
    pub fn render(&self) -> String {
        let mut buf = Vec::new();
        // Writing into a Vec cannot fail.
        self.write_to(&mut buf).expect("in-memory write");
        String::from_utf8_lossy(&buf).into_owned()
    }
}
