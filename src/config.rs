//! Run configuration and unwanted-file rules.
//!
//! There is no configuration file. A [`RunConfig`] is built once from the
//! starting directory and the run timestamp, then passed by reference to every
//! component. [`UnwantedRules`] holds the literal rule tables used to mark
//! junk files for deletion:
//!
//! - `extension`: normalized extensions (e.g. `tmp`)
//! - `startswith`: file name prefixes (e.g. `._`, `.DS_Store`)
//! - `md5`: content hashes (e.g. the hash of an empty file)

use crate::error::{RenameError, RenameResult};
use chrono::{DateTime, TimeZone};
use std::fmt;
use std::path::{Component, Path, PathBuf};

/// MD5 of zero bytes.
pub const EMPTY_FILE_MD5: &str = "d41d8cd98f00b204e9800998ecf8427e";

/// The criterion an unwanted rule matches on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Criterion {
    /// Normalized file extension equality.
    Extension,
    /// File name prefix.
    StartsWith,
    /// Full content hash equality.
    Md5,
}

impl Criterion {
    pub fn label(&self) -> &'static str {
        match self {
            Criterion::Extension => "extension",
            Criterion::StartsWith => "startswith",
            Criterion::Md5 => "md5",
        }
    }
}

/// A matched unwanted rule. Displays as `<criterion> = <value>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnwantedMatch {
    pub criterion: Criterion,
    pub value: String,
}

impl fmt::Display for UnwantedMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.criterion.label(), self.value)
    }
}

/// Literal rule tables marking files for deletion.
///
/// Within a criterion, rules are checked in table order and the first match wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnwantedRules {
    pub extensions: Vec<String>,
    pub prefixes: Vec<String>,
    pub hashes: Vec<String>,
}

impl UnwantedRules {
    /// Rules that never match anything.
    pub fn none() -> Self {
        Self {
            extensions: Vec::new(),
            prefixes: Vec::new(),
            hashes: Vec::new(),
        }
    }

    /// Checks a normalized extension (without dot).
    pub fn match_extension(&self, normalized_ext: &str) -> Option<UnwantedMatch> {
        self.extensions
            .iter()
            .find(|rule| rule.as_str() == normalized_ext)
            .map(|rule| UnwantedMatch {
                criterion: Criterion::Extension,
                value: rule.clone(),
            })
    }

    /// Checks whether the file name starts with any unwanted prefix.
    pub fn match_prefix(&self, file_name: &str) -> Option<UnwantedMatch> {
        self.prefixes
            .iter()
            .find(|rule| file_name.starts_with(rule.as_str()))
            .map(|rule| UnwantedMatch {
                criterion: Criterion::StartsWith,
                value: rule.clone(),
            })
    }

    /// Checks a lowercase hex content hash.
    pub fn match_hash(&self, hash: &str) -> Option<UnwantedMatch> {
        self.hashes
            .iter()
            .find(|rule| rule.as_str() == hash)
            .map(|rule| UnwantedMatch {
                criterion: Criterion::Md5,
                value: rule.clone(),
            })
    }
}

impl Default for UnwantedRules {
    fn default() -> Self {
        Self {
            extensions: vec!["tmp".to_string()],
            prefixes: vec![
                "._".to_string(),
                "__MACOSX".to_string(),
                ".DS_Store".to_string(),
                "Thumbs.db".to_string(),
            ],
            hashes: vec![EMPTY_FILE_MD5.to_string()],
        }
    }
}

/// Immutable per-run settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// Absolute starting directory.
    pub start_path: PathBuf,
    /// Final component of `start_path`, prefixed to every relative path.
    pub root_dir_name: String,
    /// Where the CSV action log is written if any action is applied.
    pub log_path: PathBuf,
}

impl RunConfig {
    /// Builds the configuration for a run starting at `start_path`.
    ///
    /// The path is made absolute (without resolving symlinks) and must be an
    /// existing directory.
    pub fn new<Tz>(start_path: &Path, started_at: &DateTime<Tz>) -> RenameResult<Self>
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        let absolute =
            std::path::absolute(start_path).map_err(|e| RenameError::InvalidStartPath {
                path: start_path.to_path_buf(),
                reason: e.to_string(),
            })?;
        let start_path = lexically_normalize(&absolute);

        if !start_path.is_dir() {
            return Err(RenameError::InvalidStartPath {
                path: start_path,
                reason: "not an existing directory".to_string(),
            });
        }

        let root_dir_name = start_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let log_path = start_path.join(log_file_name(started_at));

        Ok(Self {
            start_path,
            root_dir_name,
            log_path,
        })
    }

    /// Returns the display path of `dir` relative to the run root.
    ///
    /// The result always starts with the root directory name and uses `/`
    /// separators: the start directory maps to `Root`, a child to `Root/Sub`.
    pub fn relative_path(&self, dir: &Path) -> String {
        let mut rel = self.root_dir_name.clone();
        if let Ok(below) = dir.strip_prefix(&self.start_path) {
            for component in below.components() {
                rel.push('/');
                rel.push_str(&component.as_os_str().to_string_lossy());
            }
        }
        rel
    }
}

/// Log file name for a run started at `started_at`.
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use folder_rename::config::log_file_name;
///
/// let at = Utc.with_ymd_and_hms(2024, 3, 9, 7, 5, 1).unwrap();
/// assert_eq!(log_file_name(&at), "renamed-20240309_070501.csv");
/// ```
pub fn log_file_name<Tz>(started_at: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    format!("renamed-{}.csv", started_at.format("%Y%m%d_%H%M%S"))
}

/// Drops `.` components and folds `..` so the root name is a real directory name.
fn lexically_normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}
