//! pmshim - manage package-manager shims
//!
//! This crate provides the library behind the `pmshim` binary: the registry
//! of shimmed package managers, install directory resolution, and the
//! cross-platform shim remover.

pub mod core;
pub mod ops;
pub mod util;

pub use crate::core::package_manager::PackageManager;
pub use crate::ops::errors::{RemovalFailure, ShimError};
pub use crate::ops::remove_shims::{Platform, ShimRemover};
