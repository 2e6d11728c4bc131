//! Recursive directory analysis.

use std::path::{Path, PathBuf};

use hashlink::LinkedHashMap;
use snafu::{ResultExt, Snafu};
use tracing::debug;

use crate::filesystem::Filesystem;
use crate::tree::TreeNode;

/// Builds the [`TreeNode`] describing `path` by walking it depth first.
///
/// Entries are visited in the order the filesystem yields them and a
/// directory's size accumulates everything beneath it. The walk carries no
/// memoization; reuse across calls is the cache's concern. An entry that
/// cannot be read mid-walk fails the whole scan.
pub fn analyse<F: Filesystem>(fs: &F, path: &Path) -> Result<TreeNode, ScanError> {
    if fs.is_dir(path) {
        let names = fs.read_dir_names(path).context(ReadDirSnafu { path })?;
        debug!("Entering {} ({} entries)", path.display(), names.len());

        let mut size = 0;
        let mut children = LinkedHashMap::new();
        for name in names {
            let child = analyse(fs, &path.join(&name))?;
            size += child.size();
            children.insert(name, child);
        }

        Ok(TreeNode::Directory { size, children })
    } else {
        let size = fs.file_size(path).context(FileSizeSnafu { path })?;
        Ok(TreeNode::File { size })
    }
}

#[derive(Debug, Snafu)]
pub enum ScanError {
    #[snafu(display("Failed to list directory {}", path.display()))]
    ReadDirError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[snafu(display("Failed to read the size of {}", path.display()))]
    FileSizeError {
        path: PathBuf,
        source: std::io::Error,
    },
}
