//! Reconciliation of the edited document against the snapshot
//!
//! Each [`EditLine`] is matched back to the [`FileRecord`] it names, compared
//! with that record's current tags, and written through the [`TagStore`] only
//! when the set of tags actually changed (or `force_update` is set).
//!
//! Lines are matched exactly, either on the path as the serializer rendered it
//! or on the absolute path. A line that matches nothing, or whose file has
//! disappeared since the snapshot, is skipped silently. A failed write is
//! logged and counted; the remaining lines are still processed.

use colored::Colorize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::FileRecord;
use crate::document::{EditLine, display_path};
use crate::store::{StoreError, TagStore};
use crate::tags::{Tag, TagList};

/// Knobs for a reconciliation run
#[derive(Debug, Clone, Copy, Default)]
pub struct ReconcileOptions {
    /// Write every matched line even when its tags did not change
    pub force_update: bool,
    /// Decide as usual but write nothing
    pub dry_run: bool,
}

/// What happened to one edit line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineOutcome {
    Unchanged,
    Written,
    /// No record has this path
    SkippedUnmatched,
    /// The record's file no longer exists
    SkippedMissing,
    Failed,
}

/// A write that was performed (or, in a dry run, would be)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeRecord {
    pub path: PathBuf,
    pub display_path: String,
    pub old_tags: TagList,
    pub new_tags: TagList,
    /// Decided in a dry run, so never written
    pub planned: bool,
}

impl ChangeRecord {
    /// `Modified <path> [<tags>]`, or `Would modify ...` for a dry run
    #[must_use]
    pub fn describe(&self) -> String {
        let verb = if self.planned { "Would modify" } else { "Modified" };
        format!("{verb} {} [{}]", self.display_path, self.new_tags)
    }
}

/// Counts per outcome
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ReconcileSummary {
    pub modified: usize,
    pub unchanged: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl ReconcileSummary {
    const fn record(&mut self, outcome: LineOutcome) {
        match outcome {
            LineOutcome::Written => self.modified += 1,
            LineOutcome::Unchanged => self.unchanged += 1,
            LineOutcome::SkippedUnmatched | LineOutcome::SkippedMissing => self.skipped += 1,
            LineOutcome::Failed => self.failed += 1,
        }
    }

    pub fn print(&self, operation: &str) {
        println!("\n{}", format!("=== {operation} Summary ===").bold());
        println!("  {} {}", "✓ Modified:".green(), self.modified);
        println!("  {} {}", "= Unchanged:".dimmed(), self.unchanged);
        if self.skipped > 0 {
            println!("  {} {}", "⊘ Skipped:".yellow(), self.skipped);
        }
        if self.failed > 0 {
            println!("  {} {}", "✗ Errors:".red(), self.failed);
        }
    }
}

/// Result of a reconciliation run
#[derive(Debug, Default)]
pub struct Outcome {
    /// Writes performed, in document order
    pub changes: Vec<ChangeRecord>,
    pub summary: ReconcileSummary,
    /// Per-file write failures
    pub failures: Vec<StoreError>,
}

impl Outcome {
    /// One human-readable line per change
    #[must_use]
    pub fn report(&self) -> Vec<String> {
        self.changes.iter().map(ChangeRecord::describe).collect()
    }

    #[must_use]
    pub const fn has_changes(&self) -> bool {
        !self.changes.is_empty()
    }
}

/// Matches edit lines to records and applies the changes
pub struct Reconciler<'a> {
    records: &'a mut [FileRecord],
    base: PathBuf,
    index: HashMap<String, usize>,
}

impl<'a> Reconciler<'a> {
    /// Index `records` by their rendered and absolute paths.
    ///
    /// When two records render the same way the first one wins.
    pub fn new(records: &'a mut [FileRecord], base: &Path) -> Self {
        let mut index = HashMap::new();
        for (i, record) in records.iter().enumerate() {
            index.entry(display_path(&record.path, base)).or_insert(i);
            index.entry(record.path.display().to_string()).or_insert(i);
        }
        Self {
            records,
            base: base.to_path_buf(),
            index,
        }
    }

    fn resolve(&self, display: &str) -> Option<usize> {
        self.index.get(display).copied()
    }

    /// Apply `edits` in document order.
    pub fn reconcile(
        &mut self,
        edits: &[EditLine],
        store: &dyn TagStore,
        options: ReconcileOptions,
    ) -> Outcome {
        let mut outcome = Outcome::default();
        for edit in edits {
            let result = self.apply(edit, store, options, &mut outcome);
            tracing::debug!(line_no = edit.line_no, path = %edit.display_path, ?result, "reconciled line");
            outcome.summary.record(result);
        }
        outcome
    }

    fn apply(
        &mut self,
        edit: &EditLine,
        store: &dyn TagStore,
        options: ReconcileOptions,
        outcome: &mut Outcome,
    ) -> LineOutcome {
        let Some(idx) = self.resolve(&edit.display_path) else {
            return LineOutcome::SkippedUnmatched;
        };
        let record = &mut self.records[idx];
        if !store.exists(&record.path) {
            return LineOutcome::SkippedMissing;
        }

        let new_tags = classify_tokens(&edit.raw_tags);
        if !options.force_update && record.tags.same_tags(&new_tags) {
            return LineOutcome::Unchanged;
        }
        let new_tags = new_tags.normalized();

        let change = ChangeRecord {
            path: record.path.clone(),
            display_path: display_path(&record.path, &self.base),
            old_tags: record.tags.clone(),
            new_tags: new_tags.clone(),
            planned: options.dry_run,
        };

        if options.dry_run {
            outcome.changes.push(change);
            return LineOutcome::Written;
        }

        match store.write_tags(&record.path, &new_tags) {
            Ok(()) => {
                record.tags = new_tags;
                outcome.changes.push(change);
                LineOutcome::Written
            }
            Err(e) => {
                tracing::warn!(path = %record.path.display(), error = %e, "failed to write tags");
                outcome.failures.push(e);
                LineOutcome::Failed
            }
        }
    }
}

/// Classify tokens, dropping any that are empty after trimming
fn classify_tokens(tokens: &[String]) -> TagList {
    tokens
        .iter()
        .filter_map(|t| Tag::classify(t).ok())
        .collect()
}

/// Reconcile `edits` against `records` in one call.
///
/// `base` must be the base path the document was serialized with.
pub fn reconcile(
    records: &mut [FileRecord],
    base: &Path,
    edits: &[EditLine],
    store: &dyn TagStore,
    options: ReconcileOptions,
) -> Outcome {
    Reconciler::new(records, base).reconcile(edits, store, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aliases::AliasMap;
    use crate::document::{parse, serialize};
    use crate::store::MemoryTagStore;
    use crate::tags::Color;
    use crate::testing::{TempTree, snapshot_of};

    fn edit(path: &str, tags: &[&str]) -> EditLine {
        EditLine {
            display_path: path.to_string(),
            raw_tags: tags.iter().map(ToString::to_string).collect(),
            line_no: 1,
        }
    }

    #[test]
    fn test_unedited_document_is_noop() {
        let tree = TempTree::new(&["a.txt", "b.txt"]);
        let store = MemoryTagStore::new();
        store.set(tree.root().join("a.txt"), &["Red", "work"]);
        let mut records = snapshot_of(&tree, &store);

        let text = serialize(&records, &tree.root());
        let edits = parse(&text, &AliasMap::new());
        let outcome = reconcile(&mut records, &tree.root(), &edits, &store, ReconcileOptions::default());

        assert!(!outcome.has_changes());
        assert_eq!(outcome.summary.unchanged, 2);
        assert_eq!(store.write_count(), 0);
    }

    #[test]
    fn test_reordered_tags_are_unchanged() {
        let tree = TempTree::new(&["a.txt"]);
        let store = MemoryTagStore::new();
        store.set(tree.root().join("a.txt"), &["Red", "work"]);
        let mut records = snapshot_of(&tree, &store);

        let edits = vec![edit("a.txt", &["work", "red"])];
        let outcome = reconcile(&mut records, &tree.root(), &edits, &store, ReconcileOptions::default());
        assert!(!outcome.has_changes());
    }

    #[test]
    fn test_changed_tags_are_written_and_reported() {
        let tree = TempTree::new(&["a.txt"]);
        let store = MemoryTagStore::new();
        store.set(tree.root().join("a.txt"), &["old"]);
        let mut records = snapshot_of(&tree, &store);

        let edits = vec![edit("a.txt", &["new", "green"])];
        let outcome = reconcile(&mut records, &tree.root(), &edits, &store, ReconcileOptions::default());

        assert_eq!(outcome.report(), vec!["Modified a.txt [new, Green]"]);
        assert_eq!(outcome.changes[0].old_tags.rendered(), vec!["old"]);
        assert_eq!(records[0].tags.rendered(), vec!["new", "Green"]);
        assert_eq!(
            store.get(tree.root().join("a.txt")).unwrap().color(),
            Some(Color::Green)
        );
    }

    #[test]
    fn test_color_supersedes_previous() {
        let tree = TempTree::new(&["a.txt"]);
        let store = MemoryTagStore::new();
        store.set(tree.root().join("a.txt"), &["Blue"]);
        let mut records = snapshot_of(&tree, &store);

        let edits = vec![edit("a.txt", &["Red"])];
        let outcome = reconcile(&mut records, &tree.root(), &edits, &store, ReconcileOptions::default());

        let written = &outcome.changes[0].new_tags;
        assert_eq!(written.as_slice(), &[Tag::Color(Color::Red)]);
    }

    #[test]
    fn test_multiple_colors_last_wins() {
        let tree = TempTree::new(&["a.txt"]);
        let store = MemoryTagStore::new();
        let mut records = snapshot_of(&tree, &store);

        let edits = vec![edit("a.txt", &["blue", "x", "orange"])];
        let outcome = reconcile(&mut records, &tree.root(), &edits, &store, ReconcileOptions::default());
        assert_eq!(outcome.changes[0].new_tags.rendered(), vec!["x", "Orange"]);
    }

    #[test]
    fn test_force_update_writes_everything() {
        let tree = TempTree::new(&["a.txt", "b.txt"]);
        let store = MemoryTagStore::new();
        let mut records = snapshot_of(&tree, &store);

        let text = serialize(&records, &tree.root());
        let edits = parse(&text, &AliasMap::new());
        let options = ReconcileOptions {
            force_update: true,
            ..ReconcileOptions::default()
        };
        let outcome = reconcile(&mut records, &tree.root(), &edits, &store, options);

        assert_eq!(outcome.changes.len(), 2);
        assert_eq!(store.write_count(), 2);
    }

    #[test]
    fn test_unmatched_and_missing_are_skipped() {
        let tree = TempTree::new(&["a.txt", "gone.txt"]);
        let store = MemoryTagStore::new();
        let mut records = snapshot_of(&tree, &store);
        std::fs::remove_file(tree.root().join("gone.txt")).unwrap();

        let edits = vec![edit("nowhere.txt", &["x"]), edit("gone.txt", &["x"])];
        let outcome = reconcile(&mut records, &tree.root(), &edits, &store, ReconcileOptions::default());

        assert!(!outcome.has_changes());
        assert!(outcome.failures.is_empty());
        assert_eq!(outcome.summary.skipped, 2);
        assert_eq!(store.write_count(), 0);
    }

    #[test]
    fn test_substring_paths_do_not_match() {
        let tree = TempTree::new(&["report.txt", "report.txt.bak"]);
        let store = MemoryTagStore::new();
        let mut records = snapshot_of(&tree, &store);

        let edits = vec![edit("report.txt.bak", &["old"]), edit("port.txt", &["x"])];
        let outcome = reconcile(&mut records, &tree.root(), &edits, &store, ReconcileOptions::default());

        assert_eq!(outcome.changes.len(), 1);
        assert_eq!(outcome.changes[0].path, tree.root().join("report.txt.bak"));
        assert!(records[0].tags.is_empty());
    }

    #[test]
    fn test_absolute_path_lines_match() {
        let tree = TempTree::new(&["a.txt"]);
        let store = MemoryTagStore::new();
        let mut records = snapshot_of(&tree, &store);

        let absolute = tree.root().join("a.txt").display().to_string();
        let edits = vec![edit(&absolute, &["x"])];
        let outcome = reconcile(&mut records, &tree.root(), &edits, &store, ReconcileOptions::default());
        assert_eq!(outcome.report(), vec!["Modified a.txt [x]"]);
    }

    #[test]
    fn test_write_failure_is_recoverable() {
        let tree = TempTree::new(&["a.txt", "b.txt"]);
        let store = MemoryTagStore::new();
        store.fail_writes_for(tree.root().join("a.txt"));
        let mut records = snapshot_of(&tree, &store);

        let edits = vec![edit("a.txt", &["x"]), edit("b.txt", &["y"])];
        let outcome = reconcile(&mut records, &tree.root(), &edits, &store, ReconcileOptions::default());

        assert_eq!(outcome.report(), vec!["Modified b.txt [y]"]);
        assert_eq!(outcome.failures.len(), 1);
        assert_eq!(outcome.summary.failed, 1);
        assert!(records[0].tags.is_empty());
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        let tree = TempTree::new(&["a.txt"]);
        let store = MemoryTagStore::new();
        let mut records = snapshot_of(&tree, &store);

        let edits = vec![edit("a.txt", &["x"])];
        let options = ReconcileOptions {
            dry_run: true,
            ..ReconcileOptions::default()
        };
        let outcome = reconcile(&mut records, &tree.root(), &edits, &store, options);

        assert_eq!(outcome.report(), vec!["Would modify a.txt [x]"]);
        assert_eq!(store.write_count(), 0);
        assert!(records[0].tags.is_empty());
    }

    #[test]
    fn test_clearing_all_tags() {
        let tree = TempTree::new(&["a.txt"]);
        let store = MemoryTagStore::new();
        store.set(tree.root().join("a.txt"), &["Purple", "x"]);
        let mut records = snapshot_of(&tree, &store);

        let edits = vec![edit("a.txt", &[])];
        let outcome = reconcile(&mut records, &tree.root(), &edits, &store, ReconcileOptions::default());

        assert_eq!(outcome.report(), vec!["Modified a.txt []"]);
        assert!(store.get(tree.root().join("a.txt")).is_none());
    }
}
