//! Implementation of `pmshim disable`.

use std::collections::BTreeSet;
use std::path::PathBuf;

use crate::core::package_manager::{binary_names, default_package_managers, PackageManager};
use crate::ops::errors::ShimError;
use crate::ops::remove_shims::{Platform, RemovalReport, ShimRemover};
use crate::ops::resolve_dir::{resolve_install_directory, ExecutableLocator};

/// Options for disabling shims.
#[derive(Debug, Clone, Default)]
pub struct DisableOptions {
    /// Where the shims live; found through PATH when unset.
    pub install_directory: Option<PathBuf>,
    /// Package manager names; empty means the default set.
    pub names: Vec<String>,
    /// Worker threads for the removal fan-out.
    pub jobs: Option<usize>,
}

/// Result of a successful `disable`.
#[derive(Debug, Clone)]
pub struct DisableResult {
    pub install_directory: PathBuf,
    pub package_managers: BTreeSet<PackageManager>,
    pub report: RemovalReport,
}

/// Parse and validate package manager names.
///
/// Any unknown name rejects the whole request. An empty list selects the
/// default set.
pub fn parse_package_managers(names: &[String]) -> Result<BTreeSet<PackageManager>, ShimError> {
    if names.is_empty() {
        return Ok(default_package_managers());
    }

    names.iter().map(|name| name.parse::<PackageManager>()).collect()
}

/// Remove the shims for the requested package managers.
///
/// Names are validated and the directory resolved before anything is
/// touched on disk.
pub fn disable(
    opts: &DisableOptions,
    locator: &dyn ExecutableLocator,
    platform: Platform,
) -> Result<DisableResult, ShimError> {
    let package_managers = parse_package_managers(&opts.names)?;
    let bin_names = binary_names(&package_managers);

    let install_directory = resolve_install_directory(opts.install_directory.as_deref(), locator)?;

    let report = ShimRemover::new(platform)
        .with_jobs(opts.jobs)
        .remove_all(&install_directory, &bin_names)?;

    Ok(DisableResult {
        install_directory,
        package_managers,
        report,
    })
}
