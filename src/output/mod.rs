//! Report exporters for scan results.
//!
//! Three one-way serializations of a [`crate::duplicates::ScanResult`]:
//! - [`text`]: a plain-text report for humans
//! - [`paged`]: the same content split into fixed-capacity pages
//! - [`json`]: a machine-readable document for automation
//!
//! None of these mutate the result and none round-trip back in.

pub mod json;
pub mod paged;
pub mod text;

pub use json::JsonOutput;
pub use paged::PagedReport;
pub use text::TextReport;

use bytesize::ByteSize;

/// Human-readable size used in the report bodies.
pub(crate) fn human_size(bytes: u64) -> String {
    ByteSize::b(bytes).to_string()
}
