//! Testing utilities for tagedit
//!
//! Only available when compiled with `cfg(test)`.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::FileRecord;
use crate::store::{TagStore, snapshot};
use crate::walker::{WalkOptions, enumerate};

/// A temporary directory populated with files, removed on drop
///
/// Entries containing `/` create their parent directories; entries ending in
/// `/` create a directory only.
pub struct TempTree {
    dir: TempDir,
}

impl TempTree {
    /// # Panics
    /// Panics if the directory or any entry cannot be created.
    pub fn new(entries: &[&str]) -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        for entry in entries {
            let path = dir.path().join(entry);
            if entry.ends_with('/') {
                fs::create_dir_all(&path).expect("Failed to create dir");
                continue;
            }
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).expect("Failed to create parent dir");
            }
            fs::write(&path, b"test content").expect("Failed to create file");
        }
        Self { dir }
    }

    /// Path as created
    #[must_use]
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Canonical path, the form enumerated paths are rooted at
    ///
    /// # Panics
    /// Panics if the directory cannot be canonicalized.
    #[must_use]
    pub fn root(&self) -> PathBuf {
        self.dir.path().canonicalize().expect("Failed to canonicalize temp dir")
    }
}

/// Enumerate the tree's children and read them from `store`
///
/// # Panics
/// Panics if enumeration or any read fails.
pub fn snapshot_of(tree: &TempTree, store: &dyn TagStore) -> Vec<FileRecord> {
    let paths = enumerate(tree.path(), &WalkOptions::default()).expect("Failed to enumerate");
    snapshot(store, &paths).expect("Failed to read tags")
}

#[test]
fn test_temp_tree_creates_entries() {
    let tree = TempTree::new(&["a.txt", "sub/b.txt", "empty/"]);
    assert!(tree.path().join("a.txt").is_file());
    assert!(tree.path().join("sub/b.txt").is_file());
    assert!(tree.path().join("empty").is_dir());
}

#[test]
fn test_temp_tree_removed_on_drop() {
    let tree = TempTree::new(&["a.txt"]);
    let path = tree.path().to_path_buf();
    drop(tree);
    assert!(!path.exists());
}
