//! Supported package managers and the shim binaries they expose.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ops::errors::ShimError;

/// A package manager whose commands can be shimmed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageManager {
    Npm,
    Pnpm,
    Yarn,
}

impl PackageManager {
    /// Every supported package manager, in display order.
    pub const ALL: [PackageManager; 3] = [PackageManager::Npm, PackageManager::Pnpm, PackageManager::Yarn];

    /// The identifier users type on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            PackageManager::Npm => "npm",
            PackageManager::Pnpm => "pnpm",
            PackageManager::Yarn => "yarn",
        }
    }

    /// Command names installed as shims for this package manager.
    pub fn binaries(&self) -> &'static [&'static str] {
        match self {
            PackageManager::Npm => &["npm", "npx"],
            PackageManager::Pnpm => &["pnpm", "pnpx"],
            PackageManager::Yarn => &["yarn", "yarnpkg"],
        }
    }

    /// Whether this manager is part of the default set.
    ///
    /// npm ships with the runtime itself and is never shimmed unless asked for.
    pub fn is_shimmed_by_default(&self) -> bool {
        !matches!(self, PackageManager::Npm)
    }

    /// Comma-separated list of every supported identifier.
    pub fn supported_list() -> String {
        Self::ALL
            .iter()
            .map(|pm| pm.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PackageManager {
    type Err = ShimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PackageManager::ALL
            .into_iter()
            .find(|pm| pm.as_str() == s)
            .ok_or_else(|| ShimError::InvalidIdentifier {
                name: s.to_string(),
                supported: PackageManager::supported_list(),
            })
    }
}

/// Check whether `name` identifies a supported package manager.
pub fn is_supported_package_manager(name: &str) -> bool {
    name.parse::<PackageManager>().is_ok()
}

/// The managers targeted when the caller names none.
pub fn default_package_managers() -> BTreeSet<PackageManager> {
    PackageManager::ALL
        .into_iter()
        .filter(PackageManager::is_shimmed_by_default)
        .collect()
}

/// Deduplicated binary names for a set of package managers.
pub fn binary_names<'a, I>(managers: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = &'a PackageManager>,
{
    managers
        .into_iter()
        .flat_map(|pm| pm.binaries().iter().map(|b| b.to_string()))
        .collect()
}
