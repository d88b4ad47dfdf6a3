use std::fmt::Write;
use std::path::Path;

use crate::FileRecord;

/// Render `path` relative to `base` when `base` is a prefix of it, otherwise
/// absolute. The base itself renders as `.`.
#[must_use]
pub fn display_path(path: &Path, base: &Path) -> String {
    match path.strip_prefix(base) {
        Ok(rel) if rel.as_os_str().is_empty() => ".".to_string(),
        Ok(rel) => rel.display().to_string(),
        Err(_) => path.display().to_string(),
    }
}

/// Render records as the editable document, one line each, in input order
#[must_use]
pub fn serialize(records: &[FileRecord], base: &Path) -> String {
    let mut out = String::new();
    for record in records {
        let _ = writeln!(out, "{} [{}]", display_path(&record.path, base), record.tags);
    }
    out
}
