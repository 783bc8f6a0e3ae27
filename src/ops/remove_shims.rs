//! Shim removal.
//!
//! Each binary name is removed independently and in parallel. Every failure
//! is collected, so one stubborn file never hides the state of the others.
//!
//! - POSIX installs a single file per binary. Yarn-family names are first
//!   checked for a link into a Yarn Switch install, which is left alone.
//! - Windows installs up to three files per binary (`yarn`, `yarn.ps1`,
//!   `yarn.cmd`); each one is attempted regardless of the others.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use serde::Serialize;

use crate::core::yarn_switch::{is_yarn_family, looks_like_yarn_switch_target};
use crate::ops::errors::{RemovalFailure, ShimError};
use crate::util::fs::{delete_if_exists, symlink_target, Deletion};

/// Suffixes of the files a Windows shim is made of.
pub const WINDOWS_SUFFIXES: [&str; 3] = ["", ".ps1", ".cmd"];

/// Removal procedure family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Posix,
    Windows,
}

impl Platform {
    /// The platform this binary was built for.
    pub fn current() -> Self {
        if cfg!(windows) {
            Platform::Windows
        } else {
            Platform::Posix
        }
    }

    /// Paths that may hold the shim for `bin_name`.
    pub fn shim_candidates(self, dir: &Path, bin_name: &str) -> Vec<PathBuf> {
        match self {
            Platform::Posix => vec![dir.join(bin_name)],
            Platform::Windows => WINDOWS_SUFFIXES
                .iter()
                .map(|suffix| dir.join(format!("{}{}", bin_name, suffix)))
                .collect(),
        }
    }

    /// Remove every file making up the shim for `bin_name`.
    ///
    /// Returns one entry per candidate path.
    pub fn remove_shim(self, dir: &Path, bin_name: &str) -> Vec<Result<ShimRecord, RemovalFailure>> {
        match self {
            Platform::Posix => vec![remove_posix_shim(dir, bin_name)],
            Platform::Windows => self
                .shim_candidates(dir, bin_name)
                .into_iter()
                .map(|path| delete_candidate(bin_name, path))
                .collect(),
        }
    }
}

/// What happened to one shim file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "kebab-case")]
pub enum ShimAction {
    Removed,
    AlreadyAbsent,
    /// Left in place because it links into a Yarn Switch install.
    Preserved { target: PathBuf },
}

/// Outcome of a single shim file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShimRecord {
    pub bin_name: String,
    pub path: PathBuf,
    #[serde(flatten)]
    pub action: ShimAction,
}

impl ShimRecord {
    pub fn is_removed(&self) -> bool {
        self.action == ShimAction::Removed
    }

    pub fn is_preserved(&self) -> bool {
        matches!(self.action, ShimAction::Preserved { .. })
    }
}

/// Successful outcome of a removal batch.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RemovalReport {
    pub records: Vec<ShimRecord>,
}

impl RemovalReport {
    pub fn removed(&self) -> impl Iterator<Item = &ShimRecord> {
        self.records.iter().filter(|r| r.is_removed())
    }

    pub fn preserved(&self) -> impl Iterator<Item = &ShimRecord> {
        self.records.iter().filter(|r| r.is_preserved())
    }
}

/// Removes shims from an install directory.
#[derive(Debug, Clone)]
pub struct ShimRemover {
    platform: Platform,
    jobs: Option<usize>,
}

impl ShimRemover {
    pub fn new(platform: Platform) -> Self {
        ShimRemover {
            platform,
            jobs: None,
        }
    }

    /// Limit the number of worker threads.
    pub fn with_jobs(mut self, jobs: Option<usize>) -> Self {
        self.jobs = jobs;
        self
    }

    /// Remove the shims of every binary name in `dir`.
    ///
    /// Waits for all removals to complete. Failures are aggregated into
    /// [`ShimError::Removal`], which still carries the records of every file
    /// that was handled.
    pub fn remove_all(&self, dir: &Path, bin_names: &BTreeSet<String>) -> Result<RemovalReport, ShimError> {
        tracing::info!(
            "removing {} shim(s) from {}",
            bin_names.len(),
            dir.display()
        );

        let results = match self.jobs {
            Some(j) => match rayon::ThreadPoolBuilder::new().num_threads(j).build() {
                Ok(pool) => pool.install(|| self.fan_out(dir, bin_names)),
                Err(e) => {
                    tracing::warn!("failed to start {} removal workers: {}", j, e);
                    self.fan_out(dir, bin_names)
                }
            },
            None => self.fan_out(dir, bin_names),
        };

        let mut report = RemovalReport::default();
        let mut failures = Vec::new();

        for result in results {
            match result {
                Ok(record) => report.records.push(record),
                Err(failure) => failures.push(failure),
            }
        }

        if failures.is_empty() {
            Ok(report)
        } else {
            Err(ShimError::Removal { report, failures })
        }
    }

    fn fan_out(&self, dir: &Path, bin_names: &BTreeSet<String>) -> Vec<Result<ShimRecord, RemovalFailure>> {
        let platform = self.platform;
        bin_names
            .par_iter()
            .flat_map_iter(|name| platform.remove_shim(dir, name))
            .collect()
    }
}

fn remove_posix_shim(dir: &Path, bin_name: &str) -> Result<ShimRecord, RemovalFailure> {
    let path = dir.join(bin_name);

    if is_yarn_family(bin_name) {
        if let Some(target) = symlink_target(&path) {
            if looks_like_yarn_switch_target(&target) {
                tracing::warn!(
                    "{} is already installed in {} and points to a Yarn Switch install - skipping",
                    bin_name,
                    path.display()
                );
                return Ok(ShimRecord {
                    bin_name: bin_name.to_string(),
                    path,
                    action: ShimAction::Preserved { target },
                });
            }
        }
    }

    delete_candidate(bin_name, path)
}

fn delete_candidate(bin_name: &str, path: PathBuf) -> Result<ShimRecord, RemovalFailure> {
    match delete_if_exists(&path) {
        Ok(deletion) => {
            let action = match deletion {
                Deletion::Removed => ShimAction::Removed,
                Deletion::AlreadyAbsent => ShimAction::AlreadyAbsent,
            };
            tracing::debug!("{}: {:?}", path.display(), action);
            Ok(ShimRecord {
                bin_name: bin_name.to_string(),
                path,
                action,
            })
        }
        Err(source) => Err(RemovalFailure {
            bin_name: bin_name.to_string(),
            path,
            source,
        }),
    }
}
