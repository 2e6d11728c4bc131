//! Queries over a scanned directory's children.
//!
//! Each query walks a children map in its iteration order, so results come
//! back in the order the entries were scanned. Deep variants emit paths or
//! namespaces relative to the queried directory; entry names containing a
//! separator character pass through verbatim.

mod classes;
mod files;

pub use classes::{classes, classes_deep};
pub use files::{files, files_deep};

/// Joins `name` under an optional prefix with `separator`.
pub(crate) fn join(prefix: Option<&str>, name: &str, separator: char) -> String {
    match prefix {
        Some(prefix) => format!("{prefix}{separator}{name}"),
        None => name.to_string(),
    }
}
