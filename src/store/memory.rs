//! In-memory tag store
//!
//! Holds tags in a map keyed by path. Reads and writes can be made to fail
//! for chosen paths, which lets tests exercise the per-file error handling of
//! the reconciler.

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use super::{StoreError, TagStore};
use crate::tags::TagList;

#[derive(Debug, Default)]
pub struct MemoryTagStore {
    tags: RefCell<HashMap<PathBuf, TagList>>,
    failing_reads: RefCell<HashSet<PathBuf>>,
    failing_writes: RefCell<HashSet<PathBuf>>,
    writes: Cell<usize>,
}

impl MemoryTagStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the tags of `path` from raw tokens, bypassing the write counter.
    ///
    /// Tokens that are empty after trimming are ignored.
    pub fn set(&self, path: impl AsRef<Path>, raw: &[&str]) {
        let tags = raw
            .iter()
            .filter_map(|t| crate::tags::Tag::classify(t).ok())
            .collect();
        self.tags
            .borrow_mut()
            .insert(path.as_ref().to_path_buf(), tags);
    }

    /// Current tags without going through [`TagStore::read_tags`]
    #[must_use]
    pub fn get(&self, path: impl AsRef<Path>) -> Option<TagList> {
        self.tags.borrow().get(path.as_ref()).cloned()
    }

    pub fn fail_reads_for(&self, path: impl AsRef<Path>) {
        self.failing_reads
            .borrow_mut()
            .insert(path.as_ref().to_path_buf());
    }

    pub fn fail_writes_for(&self, path: impl AsRef<Path>) {
        self.failing_writes
            .borrow_mut()
            .insert(path.as_ref().to_path_buf());
    }

    /// Number of successful `write_tags` calls
    #[must_use]
    pub fn write_count(&self) -> usize {
        self.writes.get()
    }
}

impl TagStore for MemoryTagStore {
    fn read_tags(&self, path: &Path) -> Result<TagList, StoreError> {
        if self.failing_reads.borrow().contains(path) {
            return Err(StoreError::Read {
                path: path.to_path_buf(),
                reason: "simulated read failure".into(),
            });
        }
        Ok(self.get(path).unwrap_or_default())
    }

    fn write_tags(&self, path: &Path, tags: &TagList) -> Result<(), StoreError> {
        if self.failing_writes.borrow().contains(path) {
            return Err(StoreError::Write {
                path: path.to_path_buf(),
                reason: "simulated write failure".into(),
            });
        }
        let mut map = self.tags.borrow_mut();
        if tags.is_empty() {
            map.remove(path);
        } else {
            map.insert(path.to_path_buf(), tags.normalized());
        }
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }
}
