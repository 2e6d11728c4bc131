//! Immutable tree representation of scanned filesystem entries.
//!
//! Nodes are either files (byte size) or directories (aggregate size plus
//! children in enumeration order). They are built once by the scanner and
//! shared through the cache afterwards.

mod node;

pub use node::TreeNode;
