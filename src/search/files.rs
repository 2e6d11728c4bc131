use std::path::MAIN_SEPARATOR;

use hashlink::LinkedHashMap;

use crate::tree::TreeNode;

/// File names directly inside `children` that end with `ext`.
///
/// The match is an exact, case-sensitive suffix comparison.
pub fn files(children: &LinkedHashMap<String, TreeNode>, ext: &str) -> Vec<String> {
    children
        .iter()
        .filter(|(name, node)| node.is_file() && name.ends_with(ext))
        .map(|(name, _)| name.clone())
        .collect()
}

/// Relative paths of all files below `children` that end with `ext`.
///
/// Nested matches are prefixed with the directory names leading to them,
/// joined by the platform path separator.
pub fn files_deep(children: &LinkedHashMap<String, TreeNode>, ext: &str) -> Vec<String> {
    let mut paths = Vec::new();
    for (name, node) in children {
        match node.children() {
            Some(nested) => {
                for path in files_deep(nested, ext) {
                    paths.push(super::join(Some(name.as_str()), &path, MAIN_SEPARATOR));
                }
            }
            None if name.ends_with(ext) => paths.push(name.clone()),
            None => {}
        }
    }
    paths
}
