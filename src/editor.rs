//! Editing the document in an external editor
//!
//! The document is written to a temporary file owned by an [`EditSession`];
//! the file is removed when the session is dropped, whichever way the run
//! ends. While the editor runs, SIGINT and SIGTERM are caught rather than
//! killing this process, so an interrupt surfaces as
//! [`EditorError::Interrupted`] and nothing is reconciled. Once the editor
//! exits both signals terminate the process again.

use signal_hook::consts::{SIGINT, SIGTERM};
use std::io::Write;
use std::path::Path;
use std::process::{Command, ExitStatus};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EditorError {
    #[error("No editor found. Set $VISUAL or $EDITOR, or pass --editor")]
    NotFound,

    #[error("Failed to launch editor '{editor}': {source}")]
    Launch {
        editor: String,
        #[source]
        source: std::io::Error,
    },

    /// The editor exited non-zero; treated as the user backing out
    #[error("Editor exited with status: {0}")]
    Cancelled(ExitStatus),

    #[error("Interrupted while editing, no changes applied")]
    Interrupted,

    #[error("Edit document I/O error: {0}")]
    Io(#[from] std::io::Error),
}

const TERM_SIGNALS: [i32; 2] = [SIGINT, SIGTERM];

/// Flag that, while set, makes SIGINT and SIGTERM take their default action.
///
/// Installed once per process. It is cleared for the duration of an editor
/// run and set again afterwards.
fn default_action_flag() -> Result<Arc<AtomicBool>, EditorError> {
    static FLAG: Mutex<Option<Arc<AtomicBool>>> = Mutex::new(None);

    let mut guard = FLAG.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(flag) = guard.as_ref() {
        return Ok(Arc::clone(flag));
    }
    let flag = Arc::new(AtomicBool::new(true));
    for signal in TERM_SIGNALS {
        signal_hook::flag::register_conditional_default(signal, Arc::clone(&flag))?;
    }
    *guard = Some(Arc::clone(&flag));
    Ok(flag)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Pick the editor command: `flag`, then `configured`, then `$VISUAL`, then `$EDITOR`.
///
/// # Errors
/// Returns `EditorError::NotFound` when none of them is set.
pub fn resolve_editor(flag: Option<&str>, configured: Option<&str>) -> Result<String, EditorError> {
    resolve_editor_from(
        flag,
        configured,
        std::env::var("VISUAL").ok(),
        std::env::var("EDITOR").ok(),
    )
}

fn resolve_editor_from(
    flag: Option<&str>,
    configured: Option<&str>,
    visual: Option<String>,
    editor: Option<String>,
) -> Result<String, EditorError> {
    non_empty(flag.map(str::to_string))
        .or_else(|| non_empty(configured.map(str::to_string)))
        .or_else(|| non_empty(visual))
        .or_else(|| non_empty(editor))
        .ok_or(EditorError::NotFound)
}

/// Temporary document plus the editor run over it
pub struct EditSession {
    file: NamedTempFile,
}

impl EditSession {
    /// Write `contents` to a fresh temporary file.
    ///
    /// # Errors
    /// Returns `EditorError::Io` if the file cannot be created or written.
    pub fn new(contents: &str) -> Result<Self, EditorError> {
        let mut file = tempfile::Builder::new()
            .prefix("tagedit_")
            .suffix(".txt")
            .tempfile()?;
        file.write_all(contents.as_bytes())?;
        file.flush()?;
        Ok(Self { file })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Run `editor` on the document and return the saved contents.
    ///
    /// `editor` may carry arguments (`code --wait`); the document path is
    /// appended last. Blocks until the editor exits.
    ///
    /// # Errors
    /// - `Interrupted` if SIGINT or SIGTERM arrived while the editor ran
    /// - `Cancelled` if the editor exited non-zero
    /// - `Launch` / `NotFound` if the editor could not be started
    pub fn run(&self, editor: &str) -> Result<String, EditorError> {
        let default_action = default_action_flag()?;
        let interrupted = Arc::new(AtomicBool::new(false));
        default_action.store(false, Ordering::SeqCst);
        let mut handlers = Vec::new();
        for signal in TERM_SIGNALS {
            match signal_hook::flag::register(signal, Arc::clone(&interrupted)) {
                Ok(id) => handlers.push(id),
                Err(e) => {
                    restore_signals(handlers, &default_action);
                    return Err(e.into());
                }
            }
        }

        tracing::debug!(editor, path = %self.path().display(), "launching editor");
        let status = spawn_editor(editor, self.path());
        restore_signals(handlers, &default_action);

        if interrupted.load(Ordering::SeqCst) {
            return Err(EditorError::Interrupted);
        }
        let status = status?;
        if !status.success() {
            return Err(EditorError::Cancelled(status));
        }
        Ok(std::fs::read_to_string(self.path())?)
    }
}

fn restore_signals(handlers: Vec<signal_hook::SigId>, default_action: &AtomicBool) {
    for id in handlers {
        signal_hook::low_level::unregister(id);
    }
    default_action.store(true, Ordering::SeqCst);
}

fn spawn_editor(editor: &str, path: &Path) -> Result<ExitStatus, EditorError> {
    let mut parts = editor.split_whitespace();
    let program = parts.next().ok_or(EditorError::NotFound)?;
    Command::new(program)
        .args(parts)
        .arg(path)
        .status()
        .map_err(|source| EditorError::Launch {
            editor: editor.to_string(),
            source,
        })
}
