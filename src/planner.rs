//! Builds the advisory action plan for a single directory.

use crate::classifier::{ActionDecision, ActionKind, Classifier};
use crate::error::{RenameError, RenameResult};
use crate::fs::FileSystem;
use indicatif::ProgressBar;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// A file name paired with its decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedAction {
    pub file_name: String,
    pub decision: ActionDecision,
}

/// Decisions for one directory, grouped by kind in listing order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionPlan {
    rename: Vec<PlannedAction>,
    delete: Vec<PlannedAction>,
    error: Vec<PlannedAction>,
    skip: Vec<PlannedAction>,
}

impl ActionPlan {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a decision to the bucket matching its kind.
    pub fn push(&mut self, file_name: impl Into<String>, decision: ActionDecision) {
        let action = PlannedAction {
            file_name: file_name.into(),
            decision,
        };
        match action.decision.kind() {
            ActionKind::Rename => self.rename.push(action),
            ActionKind::Delete => self.delete.push(action),
            ActionKind::Error => self.error.push(action),
            ActionKind::Skip => self.skip.push(action),
        }
    }

    pub fn bucket(&self, kind: ActionKind) -> &[PlannedAction] {
        match kind {
            ActionKind::Rename => &self.rename,
            ActionKind::Delete => &self.delete,
            ActionKind::Error => &self.error,
            ActionKind::Skip => &self.skip,
        }
    }

    /// True if any delete or rename is planned.
    pub fn has_serious_actions(&self) -> bool {
        !self.rename.is_empty() || !self.delete.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        ActionKind::DISPLAY_ORDER
            .iter()
            .all(|kind| self.bucket(*kind).is_empty())
    }

    pub fn len(&self) -> usize {
        ActionKind::DISPLAY_ORDER
            .iter()
            .map(|kind| self.bucket(*kind).len())
            .sum()
    }
}

/// The plan for a directory plus the subdirectories to visit afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryPlan {
    pub actions: ActionPlan,
    pub subdirectories: Vec<PathBuf>,
}

/// Lists a directory and classifies its files. Never mutates anything.
pub struct Planner<'a, F: FileSystem> {
    fs: &'a F,
    classifier: Classifier<'a, F>,
}

impl<'a, F: FileSystem> Planner<'a, F> {
    pub fn new(fs: &'a F, classifier: Classifier<'a, F>) -> Self {
        Self { fs, classifier }
    }

    pub fn plan(&self, dir: &Path, relative_path: &str) -> RenameResult<DirectoryPlan> {
        self.plan_with_progress(dir, relative_path, &ProgressBar::hidden())
    }

    /// Like [`Planner::plan`], advancing `progress` once per classified file.
    ///
    /// Entries that are neither files nor directories are ignored. A rename
    /// target already claimed by an earlier file in the same directory turns
    /// the later file into an error.
    pub fn plan_with_progress(
        &self,
        dir: &Path,
        relative_path: &str,
        progress: &ProgressBar,
    ) -> RenameResult<DirectoryPlan> {
        let entries = self
            .fs
            .list_entries(dir)
            .map_err(|e| RenameError::ReadDir {
                path: dir.to_path_buf(),
                source: e,
            })?;

        let mut files = Vec::new();
        let mut subdirectories = Vec::new();
        for name in entries {
            let path = dir.join(&name);
            if self.fs.is_file(&path) {
                files.push(name);
            } else if self.fs.is_dir(&path) {
                subdirectories.push(path);
            }
        }

        progress.set_length(files.len() as u64);
        let mut actions = ActionPlan::new();
        let mut claimed = HashSet::new();
        for file_name in files {
            progress.set_message(file_name.clone());
            let decision = match self.classifier.classify(dir, &file_name, relative_path) {
                ActionDecision::Rename { new_name } if !claimed.insert(new_name.clone()) => {
                    ActionDecision::Error {
                        reason: format!("New name {new_name} already exists!"),
                    }
                }
                decision => decision,
            };
            actions.push(file_name, decision);
            progress.inc(1);
        }
        progress.finish_and_clear();

        Ok(DirectoryPlan {
            actions,
            subdirectories,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::UnwantedRules;
    use crate::file_category::ExtensionMapper;
    use crate::fs::OsFileSystem;
    use std::fs;
    use tempfile::TempDir;

    fn skip(reason: &str) -> ActionDecision {
        ActionDecision::Skip {
            reason: reason.to_string(),
        }
    }

    #[test]
    fn test_push_routes_by_kind() {
        let mut plan = ActionPlan::new();
        assert!(plan.is_empty());
        plan.push("a.txt", skip("Ignored filetype: .txt"));
        plan.push(
            "b.jpg",
            ActionDecision::Rename {
                new_name: "R.123456.jpg".to_string(),
            },
        );
        plan.push("c.txt", skip("Ignored filetype: .txt"));

        assert_eq!(plan.len(), 3);
        assert!(plan.has_serious_actions());
        let skipped: Vec<_> = plan
            .bucket(ActionKind::Skip)
            .iter()
            .map(|a| a.file_name.as_str())
            .collect();
        assert_eq!(skipped, vec!["a.txt", "c.txt"]);
        assert_eq!(plan.bucket(ActionKind::Rename).len(), 1);
        assert!(plan.bucket(ActionKind::Delete).is_empty());
    }

    #[test]
    fn test_skip_and_error_are_not_serious() {
        let mut plan = ActionPlan::new();
        plan.push("a.txt", skip("x"));
        plan.push(
            "b.jpg",
            ActionDecision::Error {
                reason: "y".to_string(),
            },
        );
        assert!(!plan.is_empty());
        assert!(!plan.has_serious_actions());
    }

    #[test]
    fn test_plan_directory() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let dir = temp_dir.path();
        fs::write(dir.join("b.jpeg"), "abc").expect("write");
        fs::write(dir.join("a.txt"), "notes").expect("write");
        fs::write(dir.join(".DS_Store"), "junk").expect("write");
        fs::write(dir.join("z.png"), "").expect("write");
        fs::create_dir(dir.join("Sub")).expect("mkdir");
        fs::write(dir.join("Sub").join("inner.jpg"), "inner").expect("write");

        let mapper = ExtensionMapper::default();
        let rules = UnwantedRules::default();
        let planner = Planner::new(
            &OsFileSystem,
            Classifier::new(&OsFileSystem, &mapper, &rules),
        );
        let result = planner.plan(dir, "Root").expect("plan");

        assert_eq!(result.subdirectories, vec![dir.join("Sub")]);
        assert_eq!(result.actions.len(), 4);

        let deleted: Vec<_> = result
            .actions
            .bucket(ActionKind::Delete)
            .iter()
            .map(|a| a.file_name.as_str())
            .collect();
        assert_eq!(deleted, vec![".DS_Store", "z.png"]);

        let renamed = &result.actions.bucket(ActionKind::Rename)[0];
        assert_eq!(renamed.file_name, "b.jpeg");
        assert_eq!(renamed.decision.detail(), "Root.900150.jpg");
        assert_eq!(result.actions.bucket(ActionKind::Skip)[0].file_name, "a.txt");

        // Planning is advisory only.
        assert!(dir.join(".DS_Store").exists());
        assert!(dir.join("b.jpeg").exists());
    }

    #[test]
    fn test_second_file_claiming_same_name_is_an_error() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let dir = temp_dir.path();
        fs::write(dir.join("a.jpg"), "abc").expect("write");
        fs::write(dir.join("b.jpeg"), "abc").expect("write");

        let mapper = ExtensionMapper::default();
        let rules = UnwantedRules::default();
        let planner = Planner::new(
            &OsFileSystem,
            Classifier::new(&OsFileSystem, &mapper, &rules),
        );
        let result = planner.plan(dir, "Root").expect("plan");

        let renamed = result.actions.bucket(ActionKind::Rename);
        assert_eq!(renamed.len(), 1);
        assert_eq!(renamed[0].file_name, "a.jpg");
        assert_eq!(
            result.actions.bucket(ActionKind::Error),
            &[PlannedAction {
                file_name: "b.jpeg".to_string(),
                decision: ActionDecision::Error {
                    reason: "New name Root.900150.jpg already exists!".to_string(),
                },
            }]
        );
    }

    #[test]
    fn test_plan_missing_directory_fails() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let mapper = ExtensionMapper::default();
        let rules = UnwantedRules::default();
        let planner = Planner::new(
            &OsFileSystem,
            Classifier::new(&OsFileSystem, &mapper, &rules),
        );
        let result = planner.plan(&temp_dir.path().join("gone"), "Root");
        assert!(matches!(result, Err(RenameError::ReadDir { .. })));
    }
}
