//! Tag store error types
//!
//! `Read` and `Write` carry the path they concern so callers can report
//! per-file failures. The remaining variants wrap backend failures and are
//! folded into `Read`/`Write` by the sled backend at its public surface.

use std::path::PathBuf;
use thiserror::Error;

/// Tag store errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// Tags of a path could not be read
    #[error("Failed to read tags of {}: {reason}", .path.display())]
    Read { path: PathBuf, reason: String },

    /// Tags of a path could not be written
    #[error("Failed to write tags of {}: {reason}", .path.display())]
    Write { path: PathBuf, reason: String },

    /// Represents a sled database error
    #[error("Database error: {0}")]
    Sled(#[from] sled::Error),

    /// Represents a bincode decoding error
    #[error("Error while decoding data: {0}")]
    Decode(#[from] bincode::error::DecodeError),

    /// Represents a bincode encoding error
    #[error("Error while encoding data: {0}")]
    Encode(#[from] bincode::error::EncodeError),
}

impl StoreError {
    /// Path the error concerns, if any
    #[must_use]
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            Self::Read { path, .. } | Self::Write { path, .. } => Some(path),
            Self::Sled(_) | Self::Decode(_) | Self::Encode(_) => None,
        }
    }
}
