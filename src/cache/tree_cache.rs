use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use tracing::{debug, info, warn};

use crate::filesystem::Filesystem;
use crate::scanner::{self, ScanError};
use crate::tree::TreeNode;

/// Memoized scan results keyed by canonical path.
///
/// Resolution prefers the cache over the filesystem: an exact hit is shared
/// as is, a path nested under an already-cached root is satisfied by
/// descending the cached subtree, and only a path with no cached ancestor
/// triggers a scan. The lookup-or-scan-and-insert sequence runs under one
/// lock, so every canonical path is scanned at most once per cache. Entries
/// are never invalidated; changes to a directory after its first scan stay
/// invisible.
#[derive(Debug, Default)]
pub struct TreeCache {
    roots: Mutex<HashMap<PathBuf, Arc<TreeNode>>>,
}

impl TreeCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves `path` to its tree, scanning it on first sight.
    ///
    /// Returns `None` when the path does not canonicalize, and also when a
    /// cached ancestor no longer contains the remaining segments because the
    /// filesystem changed after that ancestor was scanned; no re-scan happens
    /// in either case.
    pub fn resolve<F: Filesystem>(
        &self,
        fs: &F,
        path: &Path,
    ) -> Result<Option<Arc<TreeNode>>, ScanError> {
        let canonical = match fs.canonicalize(path) {
            Ok(canonical) => canonical,
            Err(error) => {
                debug!("Cannot canonicalize {}: {}", path.display(), error);
                return Ok(None);
            }
        };

        let mut roots = self.roots.lock().unwrap_or_else(PoisonError::into_inner);

        if let Some(node) = roots.get(&canonical) {
            debug!("Cache hit for {}", canonical.display());
            return Ok(Some(Arc::clone(node)));
        }

        for (root, node) in roots.iter() {
            let Ok(relative) = canonical.strip_prefix(root) else {
                continue;
            };
            debug!(
                "Resolving {} inside the cached root {}",
                canonical.display(),
                root.display()
            );
            return Ok(match descend(node, relative) {
                Some(subtree) => Some(Arc::new(subtree.clone())),
                None => {
                    warn!(
                        "Cached root {} no longer contains {}; the filesystem changed after it was scanned",
                        root.display(),
                        canonical.display()
                    );
                    None
                }
            });
        }

        info!("Scanning {}", canonical.display());
        let node = Arc::new(scanner::analyse(fs, &canonical)?);
        debug!(
            "Scanned {}: {} bytes total",
            canonical.display(),
            node.size()
        );
        roots.insert(canonical, Arc::clone(&node));
        Ok(Some(node))
    }

    /// Canonical paths cached as scan roots so far.
    pub fn roots(&self) -> Vec<PathBuf> {
        let roots = self.roots.lock().unwrap_or_else(PoisonError::into_inner);
        roots.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        let roots = self.roots.lock().unwrap_or_else(PoisonError::into_inner);
        roots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Walks the components of `relative` through cached children.
///
/// Returns `None` when a segment is missing or a non-final segment names a
/// file.
fn descend<'a>(node: &'a TreeNode, relative: &Path) -> Option<&'a TreeNode> {
    let mut current = node;
    for component in relative.components() {
        let name = component.as_os_str().to_string_lossy();
        current = current.children()?.get(name.as_ref())?;
    }
    Some(current)
}
