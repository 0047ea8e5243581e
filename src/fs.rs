//! Filesystem capability used by the planner, classifier and applier.
//!
//! The core never touches `std::fs` directly so that tests can observe or
//! intercept every mutation.

use log::warn;
use std::fs;
use std::io;
use std::path::Path;

/// The filesystem operations the rename pipeline needs.
pub trait FileSystem {
    /// Names of the immediate entries of `dir`, in a stable order.
    fn list_entries(&self, dir: &Path) -> io::Result<Vec<String>>;
    fn is_file(&self, path: &Path) -> bool;
    /// True for real directories. Symlinks to directories are not followed.
    fn is_dir(&self, path: &Path) -> bool;
    fn read_all_bytes(&self, path: &Path) -> io::Result<Vec<u8>>;
    fn path_exists(&self, path: &Path) -> bool;
    fn remove_file(&self, path: &Path) -> io::Result<()>;
    fn rename_file(&self, from: &Path, to: &Path) -> io::Result<()>;
}

/// [`FileSystem`] backed by the operating system.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsFileSystem;

impl FileSystem for OsFileSystem {
    /// Lists entries sorted by name. Names that are not valid UTF-8 are
    /// skipped with a warning since they cannot be renamed from a string.
    fn list_entries(&self, dir: &Path) -> io::Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            match entry.file_name().into_string() {
                Ok(name) => names.push(name),
                Err(raw) => warn!(
                    "Skipping non UTF-8 entry {:?} in {}",
                    raw,
                    dir.display()
                ),
            }
        }
        names.sort();
        Ok(names)
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn is_dir(&self, path: &Path) -> bool {
        fs::symlink_metadata(path)
            .map(|meta| meta.is_dir())
            .unwrap_or(false)
    }

    fn read_all_bytes(&self, path: &Path) -> io::Result<Vec<u8>> {
        fs::read(path)
    }

    fn path_exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        fs::remove_file(path)
    }

    fn rename_file(&self, from: &Path, to: &Path) -> io::Result<()> {
        fs::rename(from, to)
    }
}
