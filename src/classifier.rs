//! Per-file classification into delete / rename / skip / error.
//!
//! Checks run in a fixed order and stop at the first decision:
//!
//! 1. unwanted extension (after normalization)
//! 2. unwanted file name prefix
//! 3. unrecognized media type, skipped
//! 4. unwanted content hash (the file is read only at this point)
//! 5. rename, unless the derived name already exists

use crate::config::UnwantedRules;
use crate::file_category::{ExtensionMapper, split_extension};
use crate::fs::FileSystem;
use crate::namer::derive_name;
use log::debug;
use md5::{Digest, Md5};
use std::fmt;
use std::path::Path;

/// The four decision kinds, also used as plan buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    Rename,
    Delete,
    Error,
    Skip,
}

impl ActionKind {
    /// Order in which buckets are displayed.
    pub const DISPLAY_ORDER: [ActionKind; 4] = [
        ActionKind::Rename,
        ActionKind::Delete,
        ActionKind::Error,
        ActionKind::Skip,
    ];

    /// Order in which buckets are applied.
    pub const APPLY_ORDER: [ActionKind; 4] = [
        ActionKind::Delete,
        ActionKind::Rename,
        ActionKind::Error,
        ActionKind::Skip,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ActionKind::Rename => "rename",
            ActionKind::Delete => "delete",
            ActionKind::Error => "error",
            ActionKind::Skip => "skip",
        }
    }

    /// Serious actions mutate the filesystem and need confirmation.
    pub fn is_serious(&self) -> bool {
        matches!(self, ActionKind::Rename | ActionKind::Delete)
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// What to do with a single file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionDecision {
    Delete { reason: String },
    Rename { new_name: String },
    Skip { reason: String },
    Error { reason: String },
}

impl ActionDecision {
    pub fn kind(&self) -> ActionKind {
        match self {
            ActionDecision::Delete { .. } => ActionKind::Delete,
            ActionDecision::Rename { .. } => ActionKind::Rename,
            ActionDecision::Skip { .. } => ActionKind::Skip,
            ActionDecision::Error { .. } => ActionKind::Error,
        }
    }

    /// The new name for renames, the reason otherwise.
    pub fn detail(&self) -> &str {
        match self {
            ActionDecision::Rename { new_name } => new_name,
            ActionDecision::Delete { reason }
            | ActionDecision::Skip { reason }
            | ActionDecision::Error { reason } => reason,
        }
    }
}

/// Lowercase hex MD5 digest of `bytes`.
///
/// ```
/// use folder_rename::classifier::content_hash;
///
/// assert_eq!(content_hash(b""), "d41d8cd98f00b204e9800998ecf8427e");
/// ```
pub fn content_hash(bytes: &[u8]) -> String {
    let mut hasher = Md5::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}

/// Classifies files using the extension table and unwanted rules.
pub struct Classifier<'a, F: FileSystem> {
    fs: &'a F,
    mapper: &'a ExtensionMapper,
    rules: &'a UnwantedRules,
}

impl<'a, F: FileSystem> Classifier<'a, F> {
    pub fn new(fs: &'a F, mapper: &'a ExtensionMapper, rules: &'a UnwantedRules) -> Self {
        Self { fs, mapper, rules }
    }

    /// Decides what to do with `dir/file_name`.
    ///
    /// `relative_path` is the folder's path below the run root, prefixed with
    /// the root directory name; it feeds the derived name. A file that cannot
    /// be read yields an `Error` decision instead of aborting.
    pub fn classify(&self, dir: &Path, file_name: &str, relative_path: &str) -> ActionDecision {
        let decision = self.decide(dir, file_name, relative_path);
        debug!(
            "{}/{}: {} ({})",
            relative_path,
            file_name,
            decision.kind(),
            decision.detail()
        );
        decision
    }

    fn decide(&self, dir: &Path, file_name: &str, relative_path: &str) -> ActionDecision {
        let (_, raw_ext) = split_extension(file_name);
        let extension = self.mapper.normalize(raw_ext.unwrap_or_default());

        if let Some(rule) = self.rules.match_extension(&extension) {
            return ActionDecision::Delete {
                reason: rule.to_string(),
            };
        }

        if let Some(rule) = self.rules.match_prefix(file_name) {
            return ActionDecision::Delete {
                reason: rule.to_string(),
            };
        }

        if !self.mapper.is_recognized(&extension) {
            let shown = raw_ext.map(|e| format!(".{e}")).unwrap_or_default();
            return ActionDecision::Skip {
                reason: format!("Ignored filetype: {shown}"),
            };
        }

        let file_path = dir.join(file_name);
        let hash = match self.fs.read_all_bytes(&file_path) {
            Ok(bytes) => content_hash(&bytes),
            Err(e) => {
                return ActionDecision::Error {
                    reason: format!("Could not read file: {e}"),
                };
            }
        };

        if let Some(rule) = self.rules.match_hash(&hash) {
            return ActionDecision::Delete {
                reason: rule.to_string(),
            };
        }

        let new_name = derive_name(&hash, &extension, relative_path);
        if self.fs.path_exists(&dir.join(&new_name)) {
            ActionDecision::Error {
                reason: format!("New name {new_name} already exists!"),
            }
        } else {
            ActionDecision::Rename { new_name }
        }
    }
}
