//! folder-rename - clean up and rename media folders
//!
//! This library walks a directory tree, deletes junk files (by extension,
//! file name prefix or content hash), renames images and videos after their
//! folder and content hash, and logs every applied action to a CSV file.
//! Nothing is changed without interactive confirmation.

pub mod action_log;
pub mod applier;
pub mod classifier;
pub mod cli;
pub mod config;
pub mod error;
pub mod file_category;
pub mod fs;
pub mod namer;
pub mod output;
pub mod planner;
pub mod walker;

pub use action_log::{ActionLog, LogRecord};
pub use applier::ActionApplier;
pub use classifier::{ActionDecision, ActionKind, Classifier};
pub use config::{RunConfig, UnwantedRules};
pub use error::{RenameError, RenameResult};
pub use file_category::{Category, ExtensionMapper};
pub use fs::{FileSystem, OsFileSystem};
pub use output::{ConsoleTerminal, Terminal};
pub use planner::{ActionPlan, Planner};
pub use walker::{WalkOutcome, Walker};

pub use cli::{Cli, run_cli, run_with};
