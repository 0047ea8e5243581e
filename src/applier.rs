/// Executes approved plans.
///
/// Only the delete and rename buckets touch the filesystem. Buckets are
/// processed in [`ActionKind::APPLY_ORDER`], each in listing order, and every
/// executed action is appended to the [`ActionLog`] right after it succeeds.
///
/// A failing delete or rename aborts the run: actions applied before it stay
/// applied and logged, nothing is rolled back.
use crate::action_log::{ActionLog, LogRecord};
use crate::classifier::{ActionDecision, ActionKind};
use crate::error::{RenameError, RenameResult};
use crate::fs::FileSystem;
use crate::planner::ActionPlan;
use log::info;
use std::path::Path;

pub struct ActionApplier<'a, F: FileSystem> {
    fs: &'a F,
}

impl<'a, F: FileSystem> ActionApplier<'a, F> {
    pub fn new(fs: &'a F) -> Self {
        Self { fs }
    }

    /// Applies `plan` inside `dir` and returns the records that were logged.
    pub fn apply(
        &self,
        plan: &ActionPlan,
        dir: &Path,
        relative_path: &str,
        log: &mut ActionLog,
    ) -> RenameResult<Vec<LogRecord>> {
        self.apply_with(plan, dir, relative_path, log, |_| {})
    }

    /// Like [`ActionApplier::apply`], calling `on_applied` with each record
    /// as soon as it is logged.
    ///
    /// # Errors
    ///
    /// Returns `RenameError::Delete` / `RenameError::Rename` on the first
    /// filesystem failure, `RenameError::TargetExists` if a rename target
    /// appeared since planning, or a log error if the row cannot be written.
    pub fn apply_with(
        &self,
        plan: &ActionPlan,
        dir: &Path,
        relative_path: &str,
        log: &mut ActionLog,
        mut on_applied: impl FnMut(&LogRecord),
    ) -> RenameResult<Vec<LogRecord>> {
        let mut applied = Vec::new();

        for kind in ActionKind::APPLY_ORDER {
            for action in plan.bucket(kind) {
                let record = match &action.decision {
                    ActionDecision::Delete { .. } => {
                        let path = dir.join(&action.file_name);
                        self.fs
                            .remove_file(&path)
                            .map_err(|e| RenameError::Delete {
                                path: path.clone(),
                                source: e,
                            })?;
                        info!("Deleted {}", path.display());
                        LogRecord::delete(relative_path, &action.file_name)
                    }
                    ActionDecision::Rename { new_name } => {
                        let from = dir.join(&action.file_name);
                        let to = dir.join(new_name);
                        if self.fs.path_exists(&to) {
                            return Err(RenameError::TargetExists { from, to });
                        }
                        self.fs
                            .rename_file(&from, &to)
                            .map_err(|e| RenameError::Rename {
                                from: from.clone(),
                                to: to.clone(),
                                source: e,
                            })?;
                        info!("Renamed {} to {}", from.display(), to.display());
                        LogRecord::rename(relative_path, &action.file_name, new_name)
                    }
                    ActionDecision::Error { .. } | ActionDecision::Skip { .. } => continue,
                };

                log.record(&record)?;
                on_applied(&record);
                applied.push(record);
            }
        }

        Ok(applied)
    }
}
