//! Install directory resolution.
//!
//! When no directory is given, the shims are assumed to live next to the
//! `pmshim` entry point. The running executable has usually been resolved
//! through symlinks by the time we start, so its own reported location is
//! not where it was invoked from. The directory is rediscovered by searching
//! PATH the same way the shell did.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::ops::errors::ShimError;

/// Name the tool is invoked as.
pub const ENTRY_POINT: &str = "pmshim";

/// Looks up executables on a search path.
pub trait ExecutableLocator {
    fn locate(&self, name: &str) -> Result<PathBuf, which::Error>;
}

/// Locator backed by the process search path.
#[derive(Debug, Clone, Default)]
pub struct PathLocator {
    search_path: Option<OsString>,
}

impl PathLocator {
    /// Search the process `PATH`.
    pub fn new() -> Self {
        PathLocator::default()
    }

    /// Search an explicit list of directories instead of `PATH`.
    pub fn with_search_path(paths: impl Into<OsString>) -> Self {
        PathLocator {
            search_path: Some(paths.into()),
        }
    }
}

impl ExecutableLocator for PathLocator {
    fn locate(&self, name: &str) -> Result<PathBuf, which::Error> {
        match &self.search_path {
            Some(paths) => {
                let cwd = std::env::current_dir().unwrap_or_default();
                which::which_in(name, Some(paths), cwd)
            }
            None => which::which(name),
        }
    }
}

/// Resolve the directory holding the shims.
///
/// An explicit directory is returned as-is; a missing or invalid path shows up
/// later as filesystem errors (or as nothing to remove).
pub fn resolve_install_directory(
    explicit: Option<&Path>,
    locator: &dyn ExecutableLocator,
) -> Result<PathBuf, ShimError> {
    if let Some(dir) = explicit {
        return Ok(dir.to_path_buf());
    }

    let entry = locator
        .locate(ENTRY_POINT)
        .map_err(|source| ShimError::Resolution {
            entry_point: ENTRY_POINT.to_string(),
            source,
        })?;

    tracing::debug!("located {} at {}", ENTRY_POINT, entry.display());

    match entry.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => Ok(parent.to_path_buf()),
        _ => Err(ShimError::OrphanEntryPoint { path: entry }),
    }
}
