//! Canonical-path keyed memoization of scan results.

mod tree_cache;

pub use tree_cache::TreeCache;
