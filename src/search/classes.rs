use hashlink::LinkedHashMap;

use crate::tree::TreeNode;

/// Class names derived from the file entries directly inside `children`.
///
/// A file qualifies when its name ends with `ext`; the emitted name is the
/// file name with that suffix stripped.
pub fn classes(children: &LinkedHashMap<String, TreeNode>, ext: &str) -> Vec<String> {
    children
        .iter()
        .filter(|(_, node)| node.is_file())
        .filter_map(|(name, _)| name.strip_suffix(ext))
        .map(str::to_string)
        .collect()
}

/// Class names derived from all files below `children`, namespaced by the
/// directory names leading to them joined with `separator`.
pub fn classes_deep(
    children: &LinkedHashMap<String, TreeNode>,
    ext: &str,
    separator: char,
) -> Vec<String> {
    let mut names = Vec::new();
    for (name, node) in children {
        match node.children() {
            Some(nested) => {
                for class in classes_deep(nested, ext, separator) {
                    names.push(super::join(Some(name.as_str()), &class, separator));
                }
            }
            None => {
                if let Some(stripped) = name.strip_suffix(ext) {
                    names.push(stripped.to_string());
                }
            }
        }
    }
    names
}
