//! Paginated report writer.
//!
//! Same content as the plain-text report, split into pages with a fixed
//! line capacity. A page break happens whenever the remaining capacity
//! cannot fit one more line, so a group's member list may continue onto
//! the next page. Pages are joined with a form-feed separator, which
//! printers and pagers treat as a physical page break.

use std::io::{self, Write};

use chrono::Local;

use crate::duplicates::ScanResult;

use super::human_size;

/// Default number of content lines per page.
///
/// Matches the layout this report descends from: an 800-unit page minus
/// margins at roughly 15 units per line.
pub const DEFAULT_LINES_PER_PAGE: usize = 50;

/// Paginated report over a scan result.
pub struct PagedReport<'a> {
    result: &'a ScanResult,
    lines_per_page: usize,
}

impl<'a> PagedReport<'a> {
    /// Create a report with the default page capacity.
    #[must_use]
    pub fn new(result: &'a ScanResult) -> Self {
        Self {
            result,
            lines_per_page: DEFAULT_LINES_PER_PAGE,
        }
    }

    /// Override the page capacity (clamped to at least 1 line).
    #[must_use]
    pub fn with_lines_per_page(mut self, lines: usize) -> Self {
        self.lines_per_page = lines.max(1);
        self
    }

    /// Flatten the report into its content lines.
    fn lines(&self) -> Vec<String> {
        let total_files: usize = self.result.groups.iter().map(|g| g.files.len()).sum();

        let mut lines = vec![
            "Duplicate Files Report".to_string(),
            String::new(),
            format!("Generated: {}", Local::now().format("%Y-%m-%d %H:%M:%S")),
            format!("Total Groups: {}", self.result.groups.len()),
            format!("Total Files: {total_files}"),
            String::new(),
        ];

        for (index, group) in self.result.groups.iter().enumerate() {
            lines.push(format!(
                "Group {} ({} files, {} each):",
                index + 1,
                group.files.len(),
                human_size(group.size)
            ));
            for file in &group.files {
                lines.push(format!("  - {}", file.path.display()));
            }
            lines.push(String::new());
        }

        lines
    }

    /// Build the report as a list of pages.
    ///
    /// A new page begins exactly when the current one has no capacity left
    /// for the next line.
    #[must_use]
    pub fn pages(&self) -> Vec<String> {
        let mut pages = Vec::new();
        let mut current = String::new();
        let mut used = 0usize;

        for line in self.lines() {
            if used == self.lines_per_page {
                pages.push(std::mem::take(&mut current));
                used = 0;
            }
            current.push_str(&line);
            current.push('\n');
            used += 1;
        }

        if !current.is_empty() {
            pages.push(current);
        }
        pages
    }

    /// Render all pages into one string, separated by form feeds.
    #[must_use]
    pub fn render(&self) -> String {
        self.pages().join("\u{0C}\n")
    }

    /// Write the rendered report to the given writer.
    ///
    /// # Errors
    ///
    /// Returns any I/O error from the underlying writer.
    pub fn write_to<W: Write>(&self, mut writer: W) -> io::Result<()> {
        writer.write_all(self.render().as_bytes())
    }
}
