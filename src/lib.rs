#![allow(clippy::enum_variant_names)]

//! Filesystem tree cache and query layer.
//!
//! A [`Finder`] inventories a directory tree once (entry sizes, aggregate
//! directory sizes, children in enumeration order), memoizes the result per
//! canonical root path and answers queries against the cached tree. Lookups
//! nested under an already-cached root are satisfied by descending the cached
//! subtree instead of touching the filesystem again.
//!
//! - **filesystem**: the capability trait the core calls into, plus its
//!   `std::fs` implementation
//! - **tree**: the immutable [`TreeNode`] a scan produces
//! - **scanner**: the recursive walk that builds a [`TreeNode`]
//! - **cache**: canonical-path keyed memoization with ancestor reuse
//! - **search**: extension-filtered file search and class name derivation
//! - **finder**: the public facade tying the layers together

mod cache;
mod filesystem;
mod finder;
pub mod scanner;
pub mod search;
mod tree;

pub use cache::TreeCache;
pub use filesystem::{Filesystem, RealFilesystem};
pub use finder::{Finder, FinderConfig};
pub use scanner::ScanError;
pub use tree::TreeNode;
