//! Filesystem utilities.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Outcome of an idempotent delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deletion {
    Removed,
    AlreadyAbsent,
}

/// Delete a file, treating a missing file as success.
pub fn delete_if_exists(path: &Path) -> io::Result<Deletion> {
    match fs::remove_file(path) {
        Ok(()) => Ok(Deletion::Removed),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Deletion::AlreadyAbsent),
        Err(e) => Err(e),
    }
}

/// Canonical target of a symbolic link.
///
/// Returns `None` when `path` is missing, is not a symlink, or points at
/// something that cannot be canonicalized (a dangling link, for instance).
pub fn symlink_target(path: &Path) -> Option<PathBuf> {
    let meta = fs::symlink_metadata(path).ok()?;
    if !meta.file_type().is_symlink() {
        return None;
    }

    match fs::canonicalize(path) {
        Ok(target) => Some(target),
        Err(e) => {
            tracing::debug!("cannot resolve link {}: {}", path.display(), e);
            None
        }
    }
}
