//! Detection of Yarn Switch installs.
//!
//! Yarn Switch manages its own `yarn` launcher and links it into a
//! directory on the user's PATH. That link can land on the same name as one
//! of our shims, and it must survive a `disable`.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

/// Layout signatures of a Yarn Switch install: `.../switch/bin/...` for the
/// launcher under `~/.yarn`, `.../yarn-switch/...` for system-wide installs.
///
/// The `switch/bin` branch is not anchored to `.yarn`, so an unrelated
/// `/usr/local/switch/bin/yarn` also matches and its link is kept.
static YARN_SWITCH_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[/\\](?:switch[/\\]bin|yarn-switch)[/\\]").unwrap());

/// Whether a binary name belongs to the Yarn family of shims.
///
/// This is a naming heuristic. A future binary that contains `yarn` without
/// being a Yarn launcher would also be checked against the install signature.
pub fn is_yarn_family(bin_name: &str) -> bool {
    bin_name.contains("yarn")
}

/// Whether a canonical link target lives inside a Yarn Switch install.
pub fn looks_like_yarn_switch_target(path: &Path) -> bool {
    YARN_SWITCH_PATTERN.is_match(&path.to_string_lossy())
}
