//! Command-line interface for folder-rename.
//!
//! This module handles:
//! - Argument parsing
//! - Building the run configuration
//! - Wiring the real filesystem and terminal into the walker
//! - Reporting where the action log was written

use crate::action_log::ActionLog;
use crate::config::{RunConfig, UnwantedRules};
use crate::error::RenameResult;
use crate::file_category::ExtensionMapper;
use crate::fs::{FileSystem, OsFileSystem};
use crate::output::{ConsoleTerminal, Style, Terminal, banner};
use crate::walker::{WalkOutcome, Walker};
use clap::{ArgAction, Parser};
use log::info;
use std::path::PathBuf;

/// Rename media files after their folder and content hash, deleting junk files.
///
/// Every folder below START_PATH is shown with its planned actions and only
/// changed after confirmation. Applied actions are logged to
/// START_PATH/renamed-<timestamp>.csv.
#[derive(Debug, Parser)]
#[command(name = "folder-rename", version)]
pub struct Cli {
    /// Directory to start from
    pub start_path: PathBuf,

    /// Increase diagnostic logging (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Default `env_logger` filter for the requested verbosity.
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

/// Summary of a finished run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub outcome: WalkOutcome,
    /// The CSV log, if at least one action was applied.
    pub log_file: Option<PathBuf>,
}

/// Runs an interactive walk on the real filesystem and terminal.
///
/// # Examples
///
/// ```no_run
/// use clap::Parser;
/// use folder_rename::cli::{Cli, run_cli};
///
/// let cli = Cli::parse_from(["folder-rename", "/path/to/photos"]);
/// if let Err(e) = run_cli(&cli) {
///     eprintln!("Error: {}", e);
/// }
/// ```
pub fn run_cli(cli: &Cli) -> RenameResult<RunReport> {
    let config = RunConfig::new(&cli.start_path, &chrono::Local::now())?;
    let mut terminal = ConsoleTerminal::new();
    run_with(&config, &OsFileSystem, &mut terminal)
}

/// Runs a walk with the standard rule tables and the given collaborators.
///
/// The log file is closed on every exit path: explicitly on success, by drop
/// when the walk fails.
pub fn run_with<F: FileSystem, T: Terminal>(
    config: &RunConfig,
    fs: &F,
    terminal: &mut T,
) -> RenameResult<RunReport> {
    let mapper = ExtensionMapper::default();
    let rules = UnwantedRules::default();
    let mut log = ActionLog::new(config.log_path.clone());

    info!("Starting walk at {}", config.start_path.display());
    let outcome = Walker::new(config, fs, &mapper, &rules, terminal, &mut log).run()?;
    info!("Walk finished: {:?}, {} actions logged", outcome, log.rows());

    let log_file = log.finish()?;
    let (summary, _) = match &log_file {
        Some(path) => banner(&format!("Log File: {}", path.display())),
        None => banner("Log File: Not created, no actions applied."),
    };
    terminal.print_styled(&summary, Style::Info);

    Ok(RunReport { outcome, log_file })
}
