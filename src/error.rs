//! Error types shared across the crate.
//!
//! Classification problems (duplicate rename targets, unreadable files) are not
//! errors: they become `ActionDecision::Error` entries in a plan. The variants
//! here are the fatal ones that abort a run.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a rename run.
#[derive(Debug, Error)]
pub enum RenameError {
    /// The starting directory is missing or is not a directory.
    #[error("Invalid start path {}: {reason}", path.display())]
    InvalidStartPath { path: PathBuf, reason: String },

    /// A directory could not be listed.
    #[error("Failed to read directory {}", path.display())]
    ReadDir {
        path: PathBuf,
        source: std::io::Error,
    },

    /// An approved delete failed.
    #[error("Failed to delete {}", path.display())]
    Delete {
        path: PathBuf,
        source: std::io::Error,
    },

    /// An approved rename failed.
    #[error("Failed to rename {} to {}", from.display(), to.display())]
    Rename {
        from: PathBuf,
        to: PathBuf,
        source: std::io::Error,
    },

    /// An approved rename would overwrite an existing file.
    #[error("Refusing to rename {} to {}: target exists", from.display(), to.display())]
    TargetExists { from: PathBuf, to: PathBuf },

    /// The CSV action log could not be created.
    #[error("Failed to open action log {}", path.display())]
    LogOpen {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A row could not be written to the CSV action log.
    #[error("Failed to write action log {}", path.display())]
    LogWrite { path: PathBuf, source: csv::Error },

    /// Reading from or writing to the terminal failed.
    #[error("Terminal I/O failed")]
    Terminal(#[from] std::io::Error),
}

/// Result type for rename operations.
pub type RenameResult<T> = Result<T, RenameError>;
