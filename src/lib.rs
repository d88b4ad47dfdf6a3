//! Tagedit - bulk-edit file tags in a text editor
//!
//! This library snapshots the tags of a set of files, renders them as an
//! editable text document, parses the edited document back and writes only
//! the tags that actually changed.
//!
//! The pieces, leaves first:
//! - [`tags`]: the tag model (labels and color labels)
//! - [`store`]: where tags live ([`store::TagStore`] and its backends)
//! - [`walker`]: which paths to edit
//! - [`document`]: the `PATH [TAG, TAG]` text format
//! - [`aliases`]: shorthand tokens expanded while parsing
//! - [`reconcile`]: diffing edits against the snapshot and writing changes

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

pub mod aliases;
pub mod cli;
pub mod config;
pub mod document;
pub mod editor;
pub mod logging;
pub mod output;
pub mod reconcile;
pub mod store;
pub mod tags;
pub mod walker;

#[cfg(test)]
pub mod testing;

use tags::TagList;

/// Error enum, contains all failure states of the program
#[derive(Debug, Error)]
pub enum TagEditError {
    /// Tag store error
    #[error("Tag store error: {0}")]
    Store(#[from] store::StoreError),
    /// Directory walk error
    #[error("{0}")]
    Walk(#[from] walker::WalkError),
    /// Editor error
    #[error("{0}")]
    Editor(#[from] editor::EditorError),
    /// Represents a configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ::config::ConfigError),
    /// Invalid tag text
    #[error("{0}")]
    InvalidTag(#[from] tags::InvalidTagError),
    /// Represents an I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Invalid input error
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl TagEditError {
    /// Process exit code for this error
    ///
    /// | code | meaning                                   |
    /// |------|-------------------------------------------|
    /// | 1    | editor exited non-zero (user cancelled)   |
    /// | 2    | usage error (bad root, no editor, config) |
    /// | 3    | tag store could not be opened or read     |
    /// | 130  | interrupted while editing                 |
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Editor(editor::EditorError::Interrupted) => 130,
            Self::Editor(editor::EditorError::Cancelled(_)) => 1,
            Self::Store(_) | Self::Io(_) => 3,
            Self::Walk(_)
            | Self::Editor(_)
            | Self::Config(_)
            | Self::InvalidTag(_)
            | Self::InvalidInput(_) => 2,
        }
    }
}

/// A path paired with its current tags
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct FileRecord {
    pub path: PathBuf,
    pub tags: TagList,
}

impl FileRecord {
    /// Create a new `FileRecord`
    #[must_use]
    pub const fn new(path: PathBuf, tags: TagList) -> Self {
        Self { path, tags }
    }
}
