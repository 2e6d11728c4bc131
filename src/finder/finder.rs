use std::path::{Path, PathBuf};
use std::sync::Arc;

use hashlink::LinkedHashMap;
use tracing::debug;

use crate::cache::TreeCache;
use crate::filesystem::{Filesystem, RealFilesystem};
use crate::scanner::ScanError;
use crate::search;
use crate::tree::TreeNode;

use super::FinderConfig;

/// Facade over the scan cache and the tree queries.
///
/// All operations resolve through one shared cache, so any directory is
/// scanned at most once per `Finder` and every result reflects the
/// filesystem as it was at that first scan.
#[derive(Debug)]
pub struct Finder<F: Filesystem = RealFilesystem> {
    fs: F,
    cache: TreeCache,
    config: FinderConfig,
}

impl Finder {
    /// A finder over the real filesystem with default configuration.
    pub fn new() -> Self {
        Self::with_config(FinderConfig::default())
    }

    pub fn with_config(config: FinderConfig) -> Self {
        Self::with_filesystem(RealFilesystem, config)
    }
}

impl Default for Finder {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Filesystem> Finder<F> {
    /// A finder calling into a custom [`Filesystem`] implementation.
    pub fn with_filesystem(fs: F, config: FinderConfig) -> Self {
        Self {
            fs,
            cache: TreeCache::new(),
            config,
        }
    }

    /// The tree describing `path`, or `None` when it does not resolve.
    pub fn list(&self, path: impl AsRef<Path>) -> Result<Option<Arc<TreeNode>>, ScanError> {
        self.cache.resolve(&self.fs, path.as_ref())
    }

    /// Files under `dir` whose names end with `ext` (the configured
    /// extension when `None`), as paths relative to `dir`.
    ///
    /// With `deep` the search descends into nested directories, otherwise it
    /// stops at the immediate children. `None` when `dir` does not resolve
    /// to a directory.
    pub fn scan(
        &self,
        dir: impl AsRef<Path>,
        ext: Option<&str>,
        deep: bool,
    ) -> Result<Option<Vec<String>>, ScanError> {
        let ext = ext.unwrap_or(self.config.extension.as_str());
        self.query_directory(dir.as_ref(), |children| {
            if deep {
                search::files_deep(children, ext)
            } else {
                search::files(children, ext)
            }
        })
    }

    /// Class names derived from the class files under `dir`, optionally
    /// rooted under `namespace`.
    ///
    /// `None` when `dir` does not resolve to a directory.
    pub fn classes(
        &self,
        dir: impl AsRef<Path>,
        namespace: Option<&str>,
        deep: bool,
    ) -> Result<Option<Vec<String>>, ScanError> {
        let separator = self.config.namespace_separator;
        let names = self.query_directory(dir.as_ref(), |children| {
            if deep {
                search::classes_deep(children, self.config.extension.as_str(), separator)
            } else {
                search::classes(children, self.config.extension.as_str())
            }
        })?;

        Ok(names.map(|names| {
            names
                .into_iter()
                .map(|name| search::join(namespace, &name, separator))
                .collect()
        }))
    }

    /// Canonical paths cached as scan roots so far.
    pub fn cached_roots(&self) -> Vec<PathBuf> {
        self.cache.roots()
    }

    /// Resolves `dir` and applies `query` to its children.
    ///
    /// The `is_dir` check runs before resolution, so querying a file path
    /// leaves the cache untouched.
    fn query_directory(
        &self,
        dir: &Path,
        query: impl FnOnce(&LinkedHashMap<String, TreeNode>) -> Vec<String>,
    ) -> Result<Option<Vec<String>>, ScanError> {
        if !self.fs.is_dir(dir) {
            debug!("{} is not a directory", dir.display());
            return Ok(None);
        }

        let Some(node) = self.cache.resolve(&self.fs, dir)? else {
            return Ok(None);
        };

        Ok(node.children().map(query))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::MAIN_SEPARATOR;
    use tempfile::TempDir;

    const PHP_SRC: &str = "<?php\n";
    const README_SRC: &str = "readme\n";

    fn init_logging() {
        let _ = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .without_time()
            .compact()
            .try_init();
    }

    fn write_file(path: &Path, contents: &str) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("failed to create parent directories");
        }
        fs::write(path, contents).expect("failed to write file");
    }

    fn sample_project() -> TempDir {
        let dir = TempDir::new().expect("failed to create temp directory");
        write_file(&dir.path().join("App.php"), PHP_SRC);
        write_file(&dir.path().join("ns/Foo.php"), PHP_SRC);
        write_file(&dir.path().join("ns/sub/Bar.php"), PHP_SRC);
        write_file(&dir.path().join("readme.md"), README_SRC);
        dir
    }

    fn project_size() -> u64 {
        (3 * PHP_SRC.len() + README_SRC.len()) as u64
    }

    fn sorted(mut values: Vec<String>) -> Vec<String> {
        values.sort();
        values
    }

    #[test]
    fn missing_paths_resolve_to_none() {
        let finder = Finder::new();

        assert!(
            finder
                .list("/does/not/exist")
                .expect("list failed")
                .is_none()
        );
        assert!(
            finder
                .scan("/does/not/exist", None, true)
                .expect("scan failed")
                .is_none()
        );
        assert!(
            finder
                .classes("/does/not/exist", None, true)
                .expect("classes failed")
                .is_none()
        );
    }

    #[test]
    fn list_reports_file_sizes() {
        let project = sample_project();
        let finder = Finder::new();

        let node = finder
            .list(project.path().join("readme.md"))
            .expect("list failed")
            .expect("file should resolve");

        assert_eq!(
            *node,
            TreeNode::File {
                size: README_SRC.len() as u64
            }
        );
    }

    #[test]
    fn list_aggregates_directory_sizes() {
        init_logging();
        let project = sample_project();
        let finder = Finder::new();

        let node = finder
            .list(project.path())
            .expect("list failed")
            .expect("root should resolve");

        assert!(node.is_directory());
        assert_eq!(node.size(), project_size());
    }

    #[test]
    fn scanning_a_file_returns_none_and_caches_nothing() {
        let project = sample_project();
        let finder = Finder::new();
        let file = project.path().join("readme.md");

        assert!(finder.scan(&file, None, true).expect("scan failed").is_none());
        assert!(
            finder
                .classes(&file, None, true)
                .expect("classes failed")
                .is_none()
        );
        assert!(finder.cached_roots().is_empty());
    }

    #[test]
    fn deep_scans_descend_shallow_scans_do_not() {
        let project = sample_project();
        let finder = Finder::new();

        let shallow = finder
            .scan(project.path(), None, false)
            .expect("scan failed")
            .expect("root should resolve");
        assert_eq!(shallow, ["App.php"]);

        let deep = finder
            .scan(project.path(), None, true)
            .expect("scan failed")
            .expect("root should resolve");
        assert_eq!(
            sorted(deep),
            [
                "App.php".to_string(),
                format!("ns{MAIN_SEPARATOR}Foo.php"),
                format!("ns{MAIN_SEPARATOR}sub{MAIN_SEPARATOR}Bar.php"),
            ]
        );
    }

    #[test]
    fn scan_accepts_another_extension() {
        let project = sample_project();
        let finder = Finder::new();

        let markdown = finder
            .scan(project.path(), Some(".md"), true)
            .expect("scan failed")
            .expect("root should resolve");

        assert_eq!(markdown, ["readme.md"]);
    }

    #[test]
    fn classes_compose_namespaces_from_directories() {
        let project = sample_project();
        let finder = Finder::new();

        let plain = finder
            .classes(project.path(), None, true)
            .expect("classes failed")
            .expect("root should resolve");
        assert_eq!(sorted(plain), ["App", "ns\\Foo", "ns\\sub\\Bar"]);

        let prefixed = finder
            .classes(project.path(), Some("App"), true)
            .expect("classes failed")
            .expect("root should resolve");
        assert_eq!(
            sorted(prefixed),
            ["App\\App", "App\\ns\\Foo", "App\\ns\\sub\\Bar"]
        );
    }

    #[test]
    fn shallow_classes_only_see_direct_children() {
        let project = sample_project();
        let finder = Finder::new();

        let shallow = finder
            .classes(project.path(), None, false)
            .expect("classes failed")
            .expect("root should resolve");

        assert_eq!(shallow, ["App"]);
    }

    #[test]
    fn nested_queries_reuse_the_cached_root() {
        let project = sample_project();
        let finder = Finder::new();

        finder
            .list(project.path())
            .expect("list failed")
            .expect("root should resolve");
        let nested = finder
            .scan(project.path().join("ns"), None, true)
            .expect("scan failed")
            .expect("nested directory should resolve");

        assert_eq!(
            sorted(nested),
            ["Foo.php".to_string(), format!("sub{MAIN_SEPARATOR}Bar.php")]
        );
        assert_eq!(finder.cached_roots().len(), 1);
    }

    #[test]
    fn files_created_after_caching_stay_invisible() {
        init_logging();
        let project = sample_project();
        let finder = Finder::new();

        finder
            .list(project.path())
            .expect("list failed")
            .expect("root should resolve");
        write_file(&project.path().join("late.php"), PHP_SRC);

        assert!(
            finder
                .list(project.path().join("late.php"))
                .expect("list failed")
                .is_none()
        );
        let deep = finder
            .scan(project.path(), None, true)
            .expect("scan failed")
            .expect("root should resolve");
        assert!(!deep.contains(&"late.php".to_string()));
    }

    #[test]
    fn custom_configuration_changes_extension_and_separator() {
        let dir = TempDir::new().expect("failed to create temp directory");
        write_file(&dir.path().join("widgets/button.rs"), "struct Button;\n");
        let finder = Finder::with_config(FinderConfig {
            extension: ".rs".to_string(),
            namespace_separator: ':',
        });

        let classes = finder
            .classes(dir.path(), None, true)
            .expect("classes failed")
            .expect("root should resolve");

        assert_eq!(classes, ["widgets:button"]);
    }

    #[test]
    fn finders_are_shareable_across_threads() {
        let project = sample_project();
        let finder = Finder::new();

        std::thread::scope(|scope| {
            for _ in 0..2 {
                scope.spawn(|| {
                    let node = finder
                        .list(project.path())
                        .expect("list failed")
                        .expect("root should resolve");
                    assert_eq!(node.size(), project_size());
                });
            }
        });

        assert_eq!(finder.cached_roots().len(), 1);
    }
}
