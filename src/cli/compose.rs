//! Message composition
//!
//! Text comes either from the positional words or from `$EDITOR` run on a
//! temporary `.txt` file. The temp file is removed when the composer returns,
//! whether or not the editor succeeded.

use std::fs;
use std::io;
use std::path::PathBuf;
use std::process::Command;

use tempfile::Builder;
use thiserror::Error;
use tracing::debug;

use crate::env::Environment;

pub const DEFAULT_EDITOR: &str = "vim";

#[derive(Debug, Error)]
pub enum ComposeError {
    #[error("Editor not found: {0}")]
    EditorNotFound(String),

    #[error("Invalid EDITOR value {editor:?}: {source}")]
    InvalidEditor {
        editor: String,
        source: shell_words::ParseError,
    },

    #[error("Failed to run editor {program}: {source}")]
    EditorFailed { program: String, source: io::Error },

    #[error("Unable to prepare message file: {0}")]
    TempFile(io::Error),

    #[error("No content; cancelled.")]
    Cancelled,
}

/// Joins command-line words with single spaces and trims the result
pub fn join_words(words: &[String]) -> String {
    words.join(" ").trim().to_string()
}

/// Opens an editor on a temp file and returns what the user wrote
#[derive(Debug, Clone)]
pub struct Composer {
    editor: Vec<String>,
    temp_dir: PathBuf,
}

impl Composer {
    pub fn new(editor: Vec<String>, temp_dir: impl Into<PathBuf>) -> Self {
        let editor = if editor.is_empty() {
            vec![DEFAULT_EDITOR.to_string()]
        } else {
            editor
        };
        Self {
            editor,
            temp_dir: temp_dir.into(),
        }
    }

    /// Editor from `$EDITOR` (default `vim`), temp files in `$TMPDIR`
    ///
    /// `$EDITOR` is split with POSIX shell quoting rules.
    pub fn from_env(env: &dyn Environment) -> Result<Self, ComposeError> {
        let editor = match env.var("EDITOR") {
            Some(raw) => shell_words::split(raw.trim())
                .map_err(|source| ComposeError::InvalidEditor { editor: raw, source })?,
            None => Vec::new(),
        };
        let temp_dir = env
            .var("TMPDIR")
            .map(PathBuf::from)
            .unwrap_or_else(std::env::temp_dir);
        Ok(Self::new(editor, temp_dir))
    }

    pub fn editor(&self) -> &[String] {
        &self.editor
    }

    pub fn compose(&self) -> Result<String, ComposeError> {
        let file = Builder::new()
            .prefix("slack-")
            .suffix(".txt")
            .tempfile_in(&self.temp_dir)
            .map_err(ComposeError::TempFile)?;

        let (program, args) = match self.editor.split_first() {
            Some(split) => split,
            None => return Err(ComposeError::EditorNotFound(DEFAULT_EDITOR.to_string())),
        };
        debug!(editor = %program, path = %file.path().display(), "opening editor");

        match Command::new(program).args(args).arg(file.path()).status() {
            Ok(status) if !status.success() => debug!(?status, "editor exited unsuccessfully"),
            Ok(_) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(ComposeError::EditorNotFound(program.clone()));
            }
            Err(source) => {
                return Err(ComposeError::EditorFailed {
                    program: program.clone(),
                    source,
                });
            }
        }

        let text = fs::read_to_string(file.path()).map_err(ComposeError::TempFile)?;
        let text = text.trim();
        if text.is_empty() {
            return Err(ComposeError::Cancelled);
        }
        Ok(text.to_string())
    }
}
