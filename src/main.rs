//! Tagedit CLI application entry point
//!
//! Snapshots the tags of a directory's entries, opens them in `$EDITOR` as
//! one `PATH [TAG, TAG]` line per entry, and writes back only what changed.
//!
//! # Usage
//!
//! ```bash
//! tagedit                      # edit entries of the current directory
//! tagedit ~/Documents -d 2     # descend two extra levels
//! tagedit -g '*.pdf' -i        # only PDFs, any case
//! tagedit -n                   # dry run
//! tagedit -p                   # print the document and exit
//! ```
//!
//! # Exit codes
//!
//! `0` success, `1` editor exited non-zero, `2` usage error, `3` tag store
//! failure, `130` interrupted while editing.

use colored::Colorize;
use dialoguer::Confirm;
use std::path::Path;
use std::process::ExitCode;

use tagedit::{
    FileRecord, TagEditError,
    cli::Cli,
    config::TagEditConfig,
    document,
    editor::{self, EditSession},
    logging::{self, Verbosity},
    output,
    reconcile::{ReconcileOptions, Reconciler},
    store::{self, SledTagStore, TagStore},
    walker,
};

type Result<T> = std::result::Result<T, TagEditError>;

/// Load the config named on the command line, or the default one
///
/// # Errors
///
/// Returns `TagEditError::Config` if the file exists but cannot be parsed.
fn load_config(cli: &Cli) -> Result<TagEditConfig> {
    let config = match &cli.config {
        Some(path) => TagEditConfig::load_from(path)?,
        None => TagEditConfig::load()?,
    };
    Ok(config)
}

/// Ask whether to apply the changes a dry run found
///
/// # Errors
///
/// Returns `TagEditError::InvalidInput` if the prompt cannot be shown.
fn confirm_changes(
    records: &[FileRecord],
    base: &Path,
    edits: &[document::EditLine],
    store: &dyn TagStore,
    options: ReconcileOptions,
) -> Result<bool> {
    let mut preview = records.to_vec();
    let planned = Reconciler::new(&mut preview, base).reconcile(
        edits,
        store,
        ReconcileOptions {
            dry_run: true,
            ..options
        },
    );
    if !planned.has_changes() {
        return Ok(true);
    }

    println!("{}", "Pending changes:".bold());
    for change in &planned.changes {
        println!("{}", output::change_with_old_tags(change));
    }
    Confirm::new()
        .with_prompt(format!("Apply {} change(s)?", planned.changes.len()))
        .interact()
        .map_err(|e| TagEditError::InvalidInput(format!("Failed to get confirmation: {e}")))
}

/// Snapshot, edit, reconcile
///
/// # Errors
///
/// Returns `TagEditError` for usage errors, store failures and editor
/// cancellation. Per-file write failures are reported but not returned.
fn run(cli: &Cli) -> Result<()> {
    let config = load_config(cli)?;
    let quiet = cli.quiet || config.quiet;

    let base = walker::resolve_root(&cli.root)?;
    let paths = walker::enumerate(&base, &cli.walk_options(&config))?;

    let editor_cmd = if cli.print {
        None
    } else {
        Some(editor::resolve_editor(cli.editor.as_deref(), config.editor.as_deref())?)
    };

    let db_path = match &cli.db {
        Some(path) => path.clone(),
        None => config.database_path()?,
    };
    let store = SledTagStore::open(&db_path)?;
    let mut records = store::snapshot(&store, &paths)?;
    let text = document::serialize(&records, &base);

    let Some(editor_cmd) = editor_cmd else {
        print!("{text}");
        return Ok(());
    };

    if records.is_empty() {
        if !quiet {
            println!("Nothing to edit in {}", base.display());
        }
        return Ok(());
    }

    let edited = {
        let session = EditSession::new(&text)?;
        session.run(&editor_cmd)?
    };

    let edits = document::parse(&edited, &config.alias_map());
    let options = cli.reconcile_options();

    if cli.confirm && !options.dry_run && !confirm_changes(&records, &base, &edits, &store, options)? {
        println!("Operation cancelled.");
        return Ok(());
    }

    let outcome = Reconciler::new(&mut records, &base).reconcile(&edits, &store, options);

    output::print_outcome(&outcome, quiet);
    if !quiet {
        if outcome.has_changes() || !outcome.failures.is_empty() {
            let title = if options.dry_run { "Dry Run" } else { "Tag Edit" };
            outcome.summary.print(title);
        } else {
            println!("No changes.");
        }
    }
    Ok(())
}

/// Main entry point for the tagedit application
fn main() -> ExitCode {
    let cli = Cli::parse_args();
    logging::init(Verbosity::from_flags(cli.verbose, cli.quiet), cli.no_color);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {e}", "Error:".red().bold());
            ExitCode::from(e.exit_code())
        }
    }
}
