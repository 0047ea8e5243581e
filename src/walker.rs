//! Interactive, depth-first walk over the directory tree.
//!
//! Each directory goes through the same phases before any of its
//! subdirectories is visited:
//!
//! 1. explore: list and classify its files
//! 2. display: print the plan bucket by bucket
//! 3. confirm: only if deletes or renames are planned
//! 4. apply: execute and log the approved actions
//! 5. continue prompt: recurse into the subdirectories, or stop the walk

use crate::action_log::{ActionLog, LogRecord};
use crate::applier::ActionApplier;
use crate::classifier::{ActionKind, Classifier};
use crate::config::{RunConfig, UnwantedRules};
use crate::error::RenameResult;
use crate::file_category::ExtensionMapper;
use crate::fs::FileSystem;
use crate::output::{Style, Terminal, banner, section};
use crate::planner::{ActionPlan, Planner};
use log::debug;
use std::path::Path;

/// Question asked before serious actions are applied.
pub const APPLY_QUESTION: &str = "Do you want to apply these actions?";

/// How a walk ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkOutcome {
    /// Every reachable directory was visited.
    Completed,
    /// The user stopped at a continue prompt.
    Cancelled,
}

pub struct Walker<'a, F: FileSystem, T: Terminal> {
    config: &'a RunConfig,
    planner: Planner<'a, F>,
    applier: ActionApplier<'a, F>,
    terminal: &'a mut T,
    log: &'a mut ActionLog,
}

impl<'a, F: FileSystem, T: Terminal> Walker<'a, F, T> {
    pub fn new(
        config: &'a RunConfig,
        fs: &'a F,
        mapper: &'a ExtensionMapper,
        rules: &'a UnwantedRules,
        terminal: &'a mut T,
        log: &'a mut ActionLog,
    ) -> Self {
        Self {
            config,
            planner: Planner::new(fs, Classifier::new(fs, mapper, rules)),
            applier: ActionApplier::new(fs),
            terminal,
            log,
        }
    }

    /// Walks the tree from the configured start directory.
    ///
    /// # Errors
    ///
    /// Listing failures, failed deletes/renames and log write failures abort
    /// the walk. Actions applied before the failure are kept.
    pub fn run(&mut self) -> RenameResult<WalkOutcome> {
        let config = self.config;
        self.visit(&config.start_path)
    }

    fn visit(&mut self, dir: &Path) -> RenameResult<WalkOutcome> {
        self.terminal.clear_screen();
        let (title, width) = banner(&format!("Exploring {}", dir.display()));
        self.terminal.print_styled(&title, Style::Heading);

        let relative_path = self.config.relative_path(dir);
        let progress = self.terminal.progress_bar(0);
        let listing = self
            .planner
            .plan_with_progress(dir, &relative_path, &progress)?;
        debug!(
            "{}: {} planned actions, {} subdirectories",
            relative_path,
            listing.actions.len(),
            listing.subdirectories.len()
        );

        self.display(&listing.actions, width);

        if listing.actions.has_serious_actions() {
            self.terminal
                .print_styled(&section("CONFIRM", width), Style::Heading);
            if self.terminal.prompt_yes_no(APPLY_QUESTION, false)? {
                self.terminal
                    .print_styled(&section("LOG", width), Style::Heading);
                let terminal = &mut *self.terminal;
                self.applier.apply_with(
                    &listing.actions,
                    dir,
                    &relative_path,
                    &mut *self.log,
                    |record| terminal.print(&format_record(record)),
                )?;
            } else {
                self.terminal.print_styled(
                    &format!("Skipping all actions in: {}", dir.display()),
                    Style::Warning,
                );
            }
        } else if listing.actions.is_empty() {
            self.terminal.print("Nothing to do...");
        }

        self.terminal.print("");
        if !self.terminal.prompt_continue()? {
            return Ok(WalkOutcome::Cancelled);
        }

        for subdirectory in &listing.subdirectories {
            if self.visit(subdirectory)? == WalkOutcome::Cancelled {
                return Ok(WalkOutcome::Cancelled);
            }
        }
        Ok(WalkOutcome::Completed)
    }

    fn display(&mut self, plan: &ActionPlan, width: usize) {
        for kind in ActionKind::DISPLAY_ORDER {
            let bucket = plan.bucket(kind);
            if bucket.is_empty() {
                continue;
            }
            self.terminal.print_styled(
                &section(&kind.label().to_uppercase(), width),
                Style::Heading,
            );
            for action in bucket {
                let separator = if kind == ActionKind::Rename {
                    " ---> "
                } else {
                    " , because "
                };
                self.terminal.print_styled(
                    &format!(
                        "{}: {}{}{}",
                        kind,
                        action.file_name,
                        separator,
                        action.decision.detail()
                    ),
                    kind_style(kind),
                );
            }
        }
    }
}

fn kind_style(kind: ActionKind) -> Style {
    match kind {
        ActionKind::Rename => Style::Success,
        ActionKind::Delete | ActionKind::Error => Style::Danger,
        ActionKind::Skip => Style::Warning,
    }
}

/// One applied action as echoed to the terminal.
fn format_record(record: &LogRecord) -> String {
    format!(
        "{},{},{},{}",
        record.action, record.relative_folder, record.file_name, record.new_name
    )
}
