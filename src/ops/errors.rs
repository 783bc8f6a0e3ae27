//! Error types for shim operations.

use std::io;
use std::path::PathBuf;

use miette::Diagnostic as MietteDiagnostic;
use thiserror::Error;

use crate::ops::remove_shims::RemovalReport;
use crate::util::diagnostic::Diagnostic;

/// Error while disabling shims.
#[derive(Debug, Error, MietteDiagnostic)]
pub enum ShimError {
    #[error("invalid package manager name '{name}'")]
    #[diagnostic(
        code(pmshim::disable::invalid_identifier),
        help("supported package managers: {supported}")
    )]
    InvalidIdentifier { name: String, supported: String },

    #[error("could not find `{entry_point}` on PATH")]
    #[diagnostic(
        code(pmshim::disable::resolution),
        help("pass the shim directory explicitly with `--install-directory`")
    )]
    Resolution {
        entry_point: String,
        #[source]
        source: which::Error,
    },

    #[error("`{}` has no parent directory", .path.display())]
    #[diagnostic(
        code(pmshim::disable::resolution),
        help("pass the shim directory explicitly with `--install-directory`")
    )]
    OrphanEntryPoint { path: PathBuf },

    #[error("failed to remove {} shim file(s)", .failures.len())]
    #[diagnostic(code(pmshim::disable::removal))]
    Removal {
        /// Files that were handled before the batch completed.
        report: RemovalReport,
        #[related]
        failures: Vec<RemovalFailure>,
    },
}

/// A shim file that exists but could not be deleted.
#[derive(Debug, Error, MietteDiagnostic)]
#[error("failed to remove `{bin_name}` shim at {}", .path.display())]
#[diagnostic(code(pmshim::disable::removal_failure))]
pub struct RemovalFailure {
    pub bin_name: String,
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}

impl ShimError {
    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        let mut diag = Diagnostic::error(self.to_string());

        match self {
            ShimError::Resolution { source, .. } => {
                diag = diag.with_context(source.to_string());
            }
            ShimError::OrphanEntryPoint { path } => {
                diag = diag.with_location(path);
            }
            ShimError::Removal { failures, .. } => {
                for failure in failures {
                    diag = diag.with_context(format!("{}: {}", failure, failure.source));
                }
                diag = diag.with_suggestion(
                    "Check the permissions of the install directory and try again",
                );
            }
            ShimError::InvalidIdentifier { .. } => {}
        }

        if let Some(help) = MietteDiagnostic::help(self) {
            diag = diag.with_suggestion(help.to_string());
        }

        diag
    }
}
