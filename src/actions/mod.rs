//! Mutating actions on scan results.
//!
//! Currently just the deletion manager: removing a single member of a
//! duplicate group from storage and keeping the in-memory result
//! consistent with what happened on disk.

pub mod delete;

pub use delete::{delete_member, DeleteError, DeleteResult};
