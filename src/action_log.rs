/// Append-only CSV record of applied actions.
///
/// The log file is created lazily: nothing touches the disk until the first
/// record of the run. Every row is flushed immediately so that a run aborted
/// by a filesystem error or an interrupt keeps the rows for all actions that
/// were already applied.
use crate::error::{RenameError, RenameResult};
use log::info;
use serde::Serialize;
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

/// One applied action.
///
/// Serializes with the header `Action,Folder,FileName,NewName`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogRecord {
    #[serde(rename = "Action")]
    pub action: String,
    #[serde(rename = "Folder")]
    pub relative_folder: String,
    #[serde(rename = "FileName")]
    pub file_name: String,
    #[serde(rename = "NewName")]
    pub new_name: String,
}

impl LogRecord {
    pub fn delete(relative_folder: &str, file_name: &str) -> Self {
        Self {
            action: "delete".to_string(),
            relative_folder: relative_folder.to_string(),
            file_name: file_name.to_string(),
            new_name: String::new(),
        }
    }

    pub fn rename(relative_folder: &str, file_name: &str, new_name: &str) -> Self {
        Self {
            action: "rename".to_string(),
            relative_folder: relative_folder.to_string(),
            file_name: file_name.to_string(),
            new_name: new_name.to_string(),
        }
    }
}

/// Lazily opened CSV log, kept open for the whole run.
pub struct ActionLog {
    path: PathBuf,
    writer: Option<csv::Writer<File>>,
    rows: usize,
}

impl ActionLog {
    /// Creates a log that will be written to `path` on first use.
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            writer: None,
            rows: 0,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// True once the log file has been created in this run.
    pub fn is_open(&self) -> bool {
        self.writer.is_some()
    }

    /// Number of data rows written in this run.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Appends one row, creating the file and header on the first call.
    pub fn record(&mut self, record: &LogRecord) -> RenameResult<()> {
        if self.writer.is_none() {
            self.writer = Some(self.open()?);
        }

        if let Some(writer) = self.writer.as_mut() {
            writer
                .serialize(record)
                .map_err(|e| RenameError::LogWrite {
                    path: self.path.clone(),
                    source: e,
                })?;
            writer.flush().map_err(|e| RenameError::LogWrite {
                path: self.path.clone(),
                source: e.into(),
            })?;
            self.rows += 1;
        }
        Ok(())
    }

    fn open(&self) -> RenameResult<csv::Writer<File>> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| RenameError::LogOpen {
                path: self.path.clone(),
                source: e,
            })?;
        info!("Created action log {}", self.path.display());
        Ok(csv::Writer::from_writer(file))
    }

    /// Closes the log. Returns its path if it was created during this run.
    pub fn finish(mut self) -> RenameResult<Option<PathBuf>> {
        match self.writer.take() {
            Some(mut writer) => {
                writer.flush().map_err(|e| RenameError::LogWrite {
                    path: self.path.clone(),
                    source: e.into(),
                })?;
                Ok(Some(self.path.clone()))
            }
            None => Ok(None),
        }
    }
}
