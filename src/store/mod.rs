//! Tag storage
//!
//! The engine never touches file metadata directly; every read and write goes
//! through a [`TagStore`]. Two backends ship with the crate:
//!
//! - [`SledTagStore`]: persistent, backed by a sled database with two trees
//!   (`labels` and `colors`) so the single-valued color label is stored apart
//!   from the free-text labels
//! - [`MemoryTagStore`]: in-memory, for tests and embedding
//!
//! Reads during the initial snapshot are fatal on failure; writes during
//! reconciliation are recoverable per path.

use std::path::{Path, PathBuf};

use crate::FileRecord;
use crate::tags::TagList;

pub mod error;
pub mod memory;
pub mod sled_store;

pub use error::StoreError;
pub use memory::MemoryTagStore;
pub use sled_store::SledTagStore;

/// Read and replace the tags of a single path
pub trait TagStore {
    /// Current tags of `path`; a path the store knows nothing about has none.
    ///
    /// # Errors
    /// Returns `StoreError::Read` when the underlying attributes cannot be read.
    fn read_tags(&self, path: &Path) -> Result<TagList, StoreError>;

    /// Replace every tag of `path`, including its color label.
    ///
    /// An empty list clears all tags. A color in `tags` replaces the previous
    /// color outright.
    ///
    /// # Errors
    /// Returns `StoreError::Write` when the new tags cannot be stored.
    fn write_tags(&self, path: &Path, tags: &TagList) -> Result<(), StoreError>;

    /// Whether `path` is still present at reconciliation time
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}

/// Read every path once, in order, into `FileRecord`s.
///
/// # Errors
/// Stops at the first read failure; an incomplete snapshot is never returned.
pub fn snapshot(store: &dyn TagStore, paths: &[PathBuf]) -> Result<Vec<FileRecord>, StoreError> {
    paths
        .iter()
        .map(|path| {
            let tags = store.read_tags(path)?;
            tracing::debug!(path = %path.display(), tags = %tags, "read tags");
            Ok(FileRecord::new(path.clone(), tags))
        })
        .collect()
}
