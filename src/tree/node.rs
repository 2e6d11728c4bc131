use derive_more::IsVariant;
use hashlink::LinkedHashMap;

/// One scanned filesystem entry.
///
/// A directory keeps its children keyed by entry name, in the order the
/// filesystem enumerated them, and its `size` is the sum of all descendant
/// file sizes.
#[derive(Debug, Clone, PartialEq, Eq, IsVariant)]
pub enum TreeNode {
    File {
        size: u64,
    },
    Directory {
        size: u64,
        children: LinkedHashMap<String, TreeNode>,
    },
}

impl TreeNode {
    pub fn size(&self) -> u64 {
        match self {
            TreeNode::File { size } | TreeNode::Directory { size, .. } => *size,
        }
    }

    /// Children of a directory node; `None` for files.
    pub fn children(&self) -> Option<&LinkedHashMap<String, TreeNode>> {
        match self {
            TreeNode::Directory { children, .. } => Some(children),
            TreeNode::File { .. } => None,
        }
    }
}
