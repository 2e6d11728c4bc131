//! Synthetic [`Filesystem`] for tests: an in-memory entry tree plus
//! per-operation call counters.

use std::cell::{Cell, RefCell};
use std::io;
use std::path::{Component, Path, PathBuf};

use hashlink::LinkedHashMap;

use super::Filesystem;

#[derive(Debug, Clone)]
pub(crate) enum FakeEntry {
    File {
        size: u64,
    },
    Dir {
        entries: LinkedHashMap<String, FakeEntry>,
    },
}

impl FakeEntry {
    pub(crate) fn file(size: u64) -> Self {
        FakeEntry::File { size }
    }

    pub(crate) fn dir(entries: Vec<(&str, FakeEntry)>) -> Self {
        let mut map = LinkedHashMap::new();
        for (name, entry) in entries {
            map.insert(name.to_string(), entry);
        }
        FakeEntry::Dir { entries: map }
    }
}

/// An in-memory filesystem rooted at `/`.
///
/// `canonicalize` succeeds for exactly the paths present in the tree and
/// returns them unchanged. Directory listings and size reads count towards
/// `scan_ops`, canonicalization is counted separately because every
/// resolution performs one.
#[derive(Debug)]
pub(crate) struct FakeFilesystem {
    root: RefCell<FakeEntry>,
    broken_files: RefCell<Vec<PathBuf>>,
    canonicalize_calls: Cell<usize>,
    read_dir_calls: Cell<usize>,
    file_size_calls: Cell<usize>,
}

impl FakeFilesystem {
    pub(crate) fn new(root: FakeEntry) -> Self {
        Self {
            root: RefCell::new(root),
            broken_files: RefCell::new(Vec::new()),
            canonicalize_calls: Cell::new(0),
            read_dir_calls: Cell::new(0),
            file_size_calls: Cell::new(0),
        }
    }

    /// Filesystem reads performed by scans so far (directory listings plus
    /// size stats).
    pub(crate) fn scan_ops(&self) -> usize {
        self.read_dir_calls.get() + self.file_size_calls.get()
    }

    pub(crate) fn canonicalize_calls(&self) -> usize {
        self.canonicalize_calls.get()
    }

    /// Makes `file_size` fail for `path`, as if the file vanished mid-scan.
    pub(crate) fn break_file(&self, path: impl Into<PathBuf>) {
        self.broken_files.borrow_mut().push(path.into());
    }

    /// Adds a file after construction, simulating a filesystem change.
    pub(crate) fn add_file(&self, path: impl AsRef<Path>, size: u64) {
        let path = path.as_ref();
        let parent = path.parent().expect("path needs a parent");
        let name = path
            .file_name()
            .expect("path needs a file name")
            .to_string_lossy()
            .into_owned();

        let mut root = self.root.borrow_mut();
        match lookup_mut(&mut root, parent).expect("parent directory not present") {
            FakeEntry::Dir { entries } => {
                entries.insert(name, FakeEntry::file(size));
            }
            FakeEntry::File { .. } => panic!("parent is a file"),
        }
    }
}

impl Filesystem for FakeFilesystem {
    fn canonicalize(&self, path: &Path) -> io::Result<PathBuf> {
        self.canonicalize_calls.set(self.canonicalize_calls.get() + 1);
        let root = self.root.borrow();
        match lookup(&root, path) {
            Some(_) => Ok(path.to_path_buf()),
            None => Err(not_found(path)),
        }
    }

    fn is_dir(&self, path: &Path) -> bool {
        let root = self.root.borrow();
        matches!(lookup(&root, path), Some(FakeEntry::Dir { .. }))
    }

    fn read_dir_names(&self, path: &Path) -> io::Result<Vec<String>> {
        self.read_dir_calls.set(self.read_dir_calls.get() + 1);
        let root = self.root.borrow();
        match lookup(&root, path) {
            Some(FakeEntry::Dir { entries }) => Ok(entries.keys().cloned().collect()),
            Some(FakeEntry::File { .. }) => {
                Err(io::Error::other(format!("not a directory: {}", path.display())))
            }
            None => Err(not_found(path)),
        }
    }

    fn file_size(&self, path: &Path) -> io::Result<u64> {
        self.file_size_calls.set(self.file_size_calls.get() + 1);
        if self.broken_files.borrow().iter().any(|broken| broken == path) {
            return Err(not_found(path));
        }

        let root = self.root.borrow();
        match lookup(&root, path) {
            Some(FakeEntry::File { size }) => Ok(*size),
            Some(FakeEntry::Dir { .. }) => {
                Err(io::Error::other(format!("is a directory: {}", path.display())))
            }
            None => Err(not_found(path)),
        }
    }
}

fn lookup<'a>(root: &'a FakeEntry, path: &Path) -> Option<&'a FakeEntry> {
    let mut current = root;
    for component in path.components() {
        let name = match component {
            Component::RootDir | Component::Prefix(_) | Component::CurDir => continue,
            Component::ParentDir => return None,
            Component::Normal(name) => name,
        };
        current = match current {
            FakeEntry::Dir { entries } => entries.get(name.to_string_lossy().as_ref())?,
            FakeEntry::File { .. } => return None,
        };
    }
    Some(current)
}

fn lookup_mut<'a>(root: &'a mut FakeEntry, path: &Path) -> Option<&'a mut FakeEntry> {
    let mut current = root;
    for component in path.components() {
        let name = match component {
            Component::RootDir | Component::Prefix(_) | Component::CurDir => continue,
            Component::ParentDir => return None,
            Component::Normal(name) => name,
        };
        current = match current {
            FakeEntry::Dir { entries } => entries.get_mut(name.to_string_lossy().as_ref())?,
            FakeEntry::File { .. } => return None,
        };
    }
    Some(current)
}

fn not_found(path: &Path) -> io::Error {
    io::Error::new(
        io::ErrorKind::NotFound,
        format!("no such entry: {}", path.display()),
    )
}
