//! User-facing output.
//!
//! Commands never print directly. Everything goes through [`Shell`], which
//! writes right-aligned status lines to stderr in human mode, or one JSON
//! object per line to stdout under `--message-format json`. The two modes
//! never mix.

use std::fmt::Display;
use std::io::{self, IsTerminal, Write};

use serde::{Deserialize, Serialize};

use crate::ops::errors::RemovalFailure;
use crate::ops::remove_shims::{ShimAction, ShimRecord};

/// Status labels are right-aligned to this width.
const STATUS_WIDTH: usize = 12;

/// How the shell talks to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellMode {
    Human {
        verbosity: Verbosity,
        color: ColorChoice,
    },
    Json,
}

/// Amount of human output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    /// --quiet: errors only
    Quiet,
    Normal,
    /// --verbose: also report files that were already absent
    Verbose,
}

/// `--color` and `[output] color` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorChoice {
    /// Color only when stderr is a terminal.
    #[default]
    Auto,
    Always,
    Never,
}

impl std::str::FromStr for ColorChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(ColorChoice::Auto),
            "always" => Ok(ColorChoice::Always),
            "never" => Ok(ColorChoice::Never),
            other => Err(format!(
                "invalid color choice '{}'; expected one of: auto, always, never",
                other
            )),
        }
    }
}

/// Label printed in front of a human status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Removed,
    Skipped,
    Finished,
    Info,
    Error,
}

impl Status {
    fn label(self) -> &'static str {
        match self {
            Status::Removed => "Removed",
            Status::Skipped => "Skipped",
            Status::Finished => "Finished",
            Status::Info => "Info",
            Status::Error => "error",
        }
    }

    fn ansi(self) -> &'static str {
        match self {
            Status::Removed | Status::Finished => "\x1b[1;32m",
            Status::Skipped => "\x1b[1;33m",
            Status::Info => "\x1b[1;34m",
            Status::Error => "\x1b[1;31m",
        }
    }
}

/// Output sink shared by every command.
#[derive(Debug)]
pub struct Shell {
    mode: ShellMode,
    use_color: bool,
}

impl Shell {
    pub fn new(mode: ShellMode) -> Self {
        let use_color = match &mode {
            ShellMode::Json => false,
            ShellMode::Human { color, .. } => match color {
                ColorChoice::Auto => io::stderr().is_terminal(),
                ColorChoice::Always => true,
                ColorChoice::Never => false,
            },
        };

        Shell { mode, use_color }
    }

    /// Build the shell from the global flags. `json` wins over quiet and verbose.
    pub fn from_flags(quiet: bool, verbose: bool, color: ColorChoice, json: bool) -> Self {
        if json {
            return Shell::new(ShellMode::Json);
        }

        let verbosity = match (quiet, verbose) {
            (true, _) => Verbosity::Quiet,
            (false, true) => Verbosity::Verbose,
            (false, false) => Verbosity::Normal,
        };
        Shell::new(ShellMode::Human { verbosity, color })
    }

    fn verbosity(&self) -> Option<Verbosity> {
        match self.mode {
            ShellMode::Human { verbosity, .. } => Some(verbosity),
            ShellMode::Json => None,
        }
    }

    pub fn is_quiet(&self) -> bool {
        self.verbosity() == Some(Verbosity::Quiet)
    }

    pub fn is_verbose(&self) -> bool {
        self.verbosity() == Some(Verbosity::Verbose)
    }

    pub fn is_json(&self) -> bool {
        self.mode == ShellMode::Json
    }

    pub fn use_color(&self) -> bool {
        self.use_color
    }

    /// Print `{status:>12} {msg}` to stderr.
    ///
    /// Nothing is printed in JSON mode, and only errors are printed when quiet.
    pub fn status(&self, status: Status, msg: impl Display) {
        if self.is_json() || (self.is_quiet() && status != Status::Error) {
            return;
        }

        eprintln!("{} {}", self.format_status(status), msg);
    }

    /// Print an error line, or an `error` event in JSON mode.
    pub fn error(&self, msg: impl Display) {
        if self.is_json() {
            self.json_event(&serde_json::json!({
                "reason": "error",
                "message": msg.to_string(),
            }));
        } else {
            self.status(Status::Error, msg);
        }
    }

    /// Report what happened to one shim file.
    pub fn shim_record(&self, record: &ShimRecord) {
        if self.is_json() {
            if let Some(event) = tagged_event("shim", record) {
                self.json_event(&event);
            }
            return;
        }

        if let Some((status, line)) = self.record_line(record) {
            self.status(status, line);
        }
    }

    /// Report a shim file that could not be removed.
    ///
    /// Only JSON mode prints anything here; human output lists failures in
    /// the error diagnostic.
    pub fn shim_failure(&self, failure: &RemovalFailure) {
        if self.is_json() {
            self.json_event(&failure_event(failure));
        }
    }

    /// Write one event line to stdout. Ignored outside JSON mode.
    pub fn json_event(&self, event: &serde_json::Value) {
        if !self.is_json() {
            return;
        }

        let mut stdout = io::stdout().lock();
        let _ = writeln!(stdout, "{}", event);
        let _ = stdout.flush();
    }

    fn record_line(&self, record: &ShimRecord) -> Option<(Status, String)> {
        let path = record.path.display();
        match &record.action {
            ShimAction::Removed => Some((Status::Removed, path.to_string())),
            ShimAction::AlreadyAbsent if self.is_verbose() => {
                Some((Status::Info, format!("{} is not present", path)))
            }
            ShimAction::AlreadyAbsent => None,
            ShimAction::Preserved { target } => Some((
                Status::Skipped,
                format!("{} (Yarn Switch install at {})", path, target.display()),
            )),
        }
    }

    fn format_status(&self, status: Status) -> String {
        if self.use_color {
            format!(
                "{}{:>width$}\x1b[0m",
                status.ansi(),
                status.label(),
                width = STATUS_WIDTH
            )
        } else {
            format!("{:>width$}", status.label(), width = STATUS_WIDTH)
        }
    }
}

/// Serialize `payload` as an object and stamp it with `reason`.
fn tagged_event(reason: &str, payload: &impl Serialize) -> Option<serde_json::Value> {
    let mut event = match serde_json::to_value(payload) {
        Ok(event) => event,
        Err(e) => {
            tracing::debug!("cannot serialize {} event: {}", reason, e);
            return None;
        }
    };
    event
        .as_object_mut()?
        .insert("reason".to_string(), reason.into());
    Some(event)
}

fn failure_event(failure: &RemovalFailure) -> serde_json::Value {
    serde_json::json!({
        "reason": "shim-failed",
        "bin_name": failure.bin_name,
        "path": failure.path,
        "message": failure.source.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn human(verbosity: Verbosity) -> Shell {
        Shell::new(ShellMode::Human {
            verbosity,
            color: ColorChoice::Never,
        })
    }

    fn record(action: ShimAction) -> ShimRecord {
        ShimRecord {
            bin_name: "yarn".to_string(),
            path: PathBuf::from("/usr/local/bin/yarn"),
            action,
        }
    }

    #[test]
    fn test_from_flags() {
        let shell = Shell::from_flags(false, false, ColorChoice::Never, false);
        assert!(!shell.is_quiet());
        assert!(!shell.is_verbose());
        assert!(!shell.is_json());
        assert!(!shell.use_color());

        assert!(Shell::from_flags(true, false, ColorChoice::Never, false).is_quiet());
        assert!(Shell::from_flags(false, true, ColorChoice::Never, false).is_verbose());

        let json = Shell::from_flags(true, true, ColorChoice::Always, true);
        assert!(json.is_json());
        assert!(!json.is_quiet());
        assert!(!json.use_color());
    }

    #[test]
    fn test_color_choice_parse() {
        assert_eq!("auto".parse::<ColorChoice>().unwrap(), ColorChoice::Auto);
        assert_eq!("ALWAYS".parse::<ColorChoice>().unwrap(), ColorChoice::Always);
        assert_eq!("never".parse::<ColorChoice>().unwrap(), ColorChoice::Never);
        assert!("sometimes".parse::<ColorChoice>().is_err());
    }

    #[test]
    fn test_status_is_right_aligned() {
        let formatted = human(Verbosity::Normal).format_status(Status::Skipped);
        assert_eq!(formatted, "     Skipped");
    }

    #[test]
    fn test_preserved_record_line() {
        let line = human(Verbosity::Normal).record_line(&record(ShimAction::Preserved {
            target: PathBuf::from("/opt/yarn-switch/current/yarn"),
        }));

        assert_eq!(
            line,
            Some((
                Status::Skipped,
                "/usr/local/bin/yarn (Yarn Switch install at /opt/yarn-switch/current/yarn)"
                    .to_string()
            ))
        );
    }

    #[test]
    fn test_absent_record_only_when_verbose() {
        let absent = record(ShimAction::AlreadyAbsent);
        assert_eq!(human(Verbosity::Normal).record_line(&absent), None);
        assert_eq!(
            human(Verbosity::Verbose).record_line(&absent),
            Some((Status::Info, "/usr/local/bin/yarn is not present".to_string()))
        );
    }

    #[test]
    fn test_shim_event_carries_reason_and_action() {
        let event = tagged_event("shim", &record(ShimAction::Removed)).unwrap();
        assert_eq!(event["reason"], "shim");
        assert_eq!(event["action"], "removed");
        assert_eq!(event["bin_name"], "yarn");
        assert_eq!(event["path"], "/usr/local/bin/yarn");
    }

    #[test]
    fn test_failure_event() {
        let event = failure_event(&RemovalFailure {
            bin_name: "pnpx".to_string(),
            path: PathBuf::from("/usr/local/bin/pnpx"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "permission denied"),
        });

        assert_eq!(event["reason"], "shim-failed");
        assert_eq!(event["bin_name"], "pnpx");
        assert_eq!(event["path"], "/usr/local/bin/pnpx");
        assert_eq!(event["message"], "permission denied");
    }
}
