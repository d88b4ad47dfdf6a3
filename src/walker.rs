//! Directory enumeration
//!
//! Produces the ordered list of paths whose tags will be edited. Both files
//! and directories qualify. Depth 0 means the root's immediate children only.

use glob::{MatchOptions, Pattern};
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::{DirEntry, WalkDir};

#[derive(Debug, Error)]
pub enum WalkError {
    /// Root is missing or not a directory
    #[error("Invalid root path '{}': {reason}", .path.display())]
    InvalidRoot { path: PathBuf, reason: String },

    /// Glob filter does not parse
    #[error("Invalid glob '{pattern}': {reason}")]
    InvalidGlob { pattern: String, reason: String },
}

/// How far and what to enumerate
#[derive(Debug, Clone, Default)]
pub struct WalkOptions {
    /// Extra directory levels below the root's children
    pub depth: usize,
    /// Glob matched against each entry's file name
    pub glob: Option<String>,
    pub case_insensitive: bool,
    /// Include entries whose name starts with `.`
    pub include_hidden: bool,
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.file_name().to_str().is_some_and(|s| s.starts_with('.'))
}

/// Canonicalize `root` and check that it is a directory.
///
/// # Errors
/// Returns `WalkError::InvalidRoot` if the path cannot be resolved or is not a directory.
pub fn resolve_root(root: &Path) -> Result<PathBuf, WalkError> {
    let canonical = root.canonicalize().map_err(|e| WalkError::InvalidRoot {
        path: root.to_path_buf(),
        reason: e.to_string(),
    })?;
    if !canonical.is_dir() {
        return Err(WalkError::InvalidRoot {
            path: root.to_path_buf(),
            reason: "not a directory".into(),
        });
    }
    Ok(canonical)
}

/// List the paths under `root`, sorted by name within each directory.
///
/// Returned paths are absolute, rooted at the canonical form of `root`.
/// Entries that cannot be read are skipped with a warning.
///
/// # Errors
/// Returns `WalkError` if the root is invalid or the glob does not parse.
pub fn enumerate(root: &Path, options: &WalkOptions) -> Result<Vec<PathBuf>, WalkError> {
    let root = resolve_root(root)?;
    let pattern = options
        .glob
        .as_deref()
        .map(|g| {
            Pattern::new(g).map_err(|e| WalkError::InvalidGlob {
                pattern: g.to_string(),
                reason: e.to_string(),
            })
        })
        .transpose()?;
    let match_options = MatchOptions {
        case_sensitive: !options.case_insensitive,
        ..MatchOptions::new()
    };

    let walker = WalkDir::new(&root)
        .min_depth(1)
        .max_depth(options.depth.saturating_add(1))
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| options.include_hidden || !is_hidden(e));

    let mut paths = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!(error = %e, "skipping unreadable entry");
                continue;
            }
        };
        if let Some(pattern) = &pattern {
            let name = entry.file_name().to_string_lossy();
            if !pattern.matches_with(&name, match_options) {
                continue;
            }
        }
        paths.push(entry.into_path());
    }
    tracing::debug!(root = %root.display(), count = paths.len(), "enumerated paths");
    Ok(paths)
}
