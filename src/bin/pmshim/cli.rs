//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell as CompletionShell;

use pmshim::util::shell::ColorChoice;

/// pmshim - Manage package-manager shims
#[derive(Parser)]
#[command(name = "pmshim")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only print errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Coloring: auto, always, never
    #[arg(long, global = true, value_name = "WHEN")]
    pub color: Option<ColorChoice>,

    /// Output format for messages
    #[arg(long, global = true, value_enum, default_value_t = MessageFormat::Human)]
    pub message_format: MessageFormat,

    /// Path to the configuration file
    #[arg(long, global = true, env = "PMSHIM_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MessageFormat {
    Human,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Remove the shims from the install directory
    #[command(long_about = "Remove the shims for the specified package managers from the install \
        directory, or the shims of every default package manager (all but npm) if none are given.\n\n\
        By default the install directory is the one holding `pmshim` itself, found by searching \
        PATH. Pass --install-directory to target another one.")]
    Disable(DisableArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args)]
pub struct DisableArgs {
    /// Where the shims are located
    #[arg(long, value_name = "DIR")]
    pub install_directory: Option<PathBuf>,

    /// Number of parallel removal jobs
    #[arg(short, long)]
    pub jobs: Option<usize>,

    /// Package managers whose shims to remove (npm, pnpm, yarn)
    pub names: Vec<String>,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: CompletionShell,
}
