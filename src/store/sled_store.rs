//! Sled-backed tag store
//!
//! Uses two sled trees keyed by the bincode-encoded absolute path:
//! - `labels`: path -> `Vec<String>` of free-text labels, in order
//! - `colors`: path -> single color code
//!
//! Keeping the color in its own tree mirrors how platforms hold the color
//! label apart from the tag list: a write replaces it wholesale and there is
//! never more than one. Reads return the color (if any) first, then the labels.
//! Writing [`Color::Clear`] removes the color entry. Both trees are updated
//! in one transaction.

use sled::transaction::{ConflictableTransactionResult, TransactionError, Transactional};
use sled::{Db, Tree};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use super::{StoreError, TagStore};
use crate::FileRecord;
use crate::tags::{Color, Tag, TagList};

/// Tag store persisted in a sled database
pub struct SledTagStore {
    db: Db,
    labels: Tree,
    colors: Tree,
}

impl SledTagStore {
    /// Opens or creates a store at the specified directory
    ///
    /// # Examples
    /// ```no_run
    /// use tagedit::store::SledTagStore;
    /// let store = SledTagStore::open("my_tags_db").unwrap();
    /// ```
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the database or its trees cannot be opened.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let db = sled::open(path)?;
        let labels = db.open_tree("labels")?;
        let colors = db.open_tree("colors")?;
        Ok(Self { db, labels, colors })
    }

    fn key(path: &Path) -> Result<Vec<u8>, StoreError> {
        Ok(bincode::encode_to_vec(
            path.to_path_buf(),
            bincode::config::standard(),
        )?)
    }

    fn load(&self, path: &Path) -> Result<TagList, StoreError> {
        let key = Self::key(path)?;
        let mut tags = Vec::new();

        if let Some(value) = self.colors.get(key.as_slice())? {
            if let Some(color) = value.first().copied().and_then(Color::from_code) {
                tags.push(Tag::Color(color));
            }
        }
        if let Some(value) = self.labels.get(key.as_slice())? {
            let (labels, _): (Vec<String>, usize) =
                bincode::decode_from_slice(&value, bincode::config::standard())?;
            tags.extend(labels.into_iter().map(Tag::Label));
        }
        Ok(TagList::new(tags))
    }

    fn store(&self, path: &Path, tags: &TagList) -> Result<(), StoreError> {
        let key = Self::key(path)?;
        let tags = tags.normalized();

        let color = match tags.color() {
            Some(color) if color != Color::Clear => Some(vec![color.code()]),
            _ => None,
        };
        let labels: Vec<&str> = tags.labels().collect();
        let labels = if labels.is_empty() {
            None
        } else {
            Some(bincode::encode_to_vec(&labels, bincode::config::standard())?)
        };

        (&self.colors, &self.labels)
            .transaction(|(colors, labels_tree)| -> ConflictableTransactionResult<()> {
                match &color {
                    Some(value) => colors.insert(key.as_slice(), value.clone())?,
                    None => colors.remove(key.as_slice())?,
                };
                match &labels {
                    Some(value) => labels_tree.insert(key.as_slice(), value.clone())?,
                    None => labels_tree.remove(key.as_slice())?,
                };
                Ok(())
            })
            .map_err(|e| transaction_error(path, e))?;
        self.db.flush()?;
        Ok(())
    }

    /// Remove every stored tag of `path`
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the key cannot be encoded or the removal fails.
    pub fn remove(&self, path: &Path) -> Result<(), StoreError> {
        let key = Self::key(path)?;
        (&self.colors, &self.labels)
            .transaction(|(colors, labels)| -> ConflictableTransactionResult<()> {
                colors.remove(key.as_slice())?;
                labels.remove(key.as_slice())?;
                Ok(())
            })
            .map_err(|e| transaction_error(path, e))?;
        self.db.flush()?;
        Ok(())
    }

    /// Every path with at least one stored tag
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if iteration or decoding fails.
    pub fn list_all(&self) -> Result<Vec<FileRecord>, StoreError> {
        let mut paths = BTreeSet::new();
        for tree in [&self.colors, &self.labels] {
            for result in tree {
                let (key, _) = result?;
                let (path, _): (PathBuf, usize) =
                    bincode::decode_from_slice(&key, bincode::config::standard())?;
                paths.insert(path);
            }
        }
        paths
            .into_iter()
            .map(|path| {
                let tags = self.load(&path)?;
                Ok(FileRecord::new(path, tags))
            })
            .collect()
    }

    /// Remove every stored tag
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if clearing either tree fails.
    pub fn clear(&self) -> Result<(), StoreError> {
        self.labels.clear()?;
        self.colors.clear()?;
        Ok(())
    }
}

fn transaction_error(path: &Path, error: TransactionError<()>) -> StoreError {
    match error {
        TransactionError::Storage(e) => StoreError::Sled(e),
        TransactionError::Abort(()) => StoreError::Write {
            path: path.to_path_buf(),
            reason: "transaction aborted".to_string(),
        },
    }
}

impl TagStore for SledTagStore {
    fn read_tags(&self, path: &Path) -> Result<TagList, StoreError> {
        self.load(path).map_err(|e| StoreError::Read {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    fn write_tags(&self, path: &Path, tags: &TagList) -> Result<(), StoreError> {
        self.store(path, tags).map_err(|e| StoreError::Write {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }
}
