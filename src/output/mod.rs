//! Output formatting for CLI display
//!
//! Change reports go to stdout, failures to stderr. Nothing here decides
//! anything; it only renders what the reconciler produced.

use colored::Colorize;

use crate::reconcile::{ChangeRecord, Outcome};
use crate::store::StoreError;

/// Format a change with its previous tags, for confirmation prompts
#[must_use]
pub fn change_with_old_tags(change: &ChangeRecord) -> String {
    format!(
        "  {} [{}] {} [{}]",
        change.display_path,
        change.old_tags,
        "→".dimmed(),
        change.new_tags
    )
}

/// Format one change line as printed after a run
#[must_use]
pub fn change_line(change: &ChangeRecord, quiet: bool) -> String {
    if quiet {
        change.describe()
    } else if change.planned {
        format!("{} {}", "⊘".yellow(), change.describe())
    } else {
        format!("{} {}", "✓".green(), change.describe())
    }
}

/// Print every change, then every failure
pub fn print_outcome(outcome: &Outcome, quiet: bool) {
    for change in &outcome.changes {
        println!("{}", change_line(change, quiet));
    }
    print_failures(&outcome.failures);
}

/// Print per-file write failures to stderr
pub fn print_failures(failures: &[StoreError]) {
    for failure in failures {
        eprintln!("{} {}", "✗".red(), failure);
    }
}
