//! pmshim CLI - manage package-manager shims

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands, MessageFormat};
use pmshim::ops::errors::ShimError;
use pmshim::util::diagnostic;
use pmshim::util::{Config, Shell};

/// Options shared by every command.
pub struct GlobalOptions {
    pub shell: Shell,
    pub config: Config,
}

fn main() {
    let cli = Cli::parse();

    // Set up logging
    let default_filter = if cli.verbose {
        "pmshim=debug"
    } else if cli.quiet {
        "pmshim=error"
    } else {
        "pmshim=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    let config = Config::discover(cli.config.as_deref());
    let color = cli.color.or(config.output.color).unwrap_or_default();
    let shell = Shell::from_flags(
        cli.quiet,
        cli.verbose,
        color,
        cli.message_format == MessageFormat::Json,
    );
    let global_opts = GlobalOptions { shell, config };

    if let Err(e) = run(cli.command, &global_opts) {
        report_error(&e, &global_opts.shell);
        std::process::exit(1);
    }
}

fn run(command: Commands, global_opts: &GlobalOptions) -> Result<()> {
    match command {
        Commands::Disable(args) => commands::disable::execute(args, global_opts),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}

fn report_error(err: &anyhow::Error, shell: &Shell) {
    if shell.is_json() {
        shell.error(format!("{:#}", err));
        return;
    }

    match err.downcast_ref::<ShimError>() {
        Some(shim_err) => diagnostic::emit(&shim_err.to_diagnostic(), shell.use_color()),
        None => eprintln!("error: {:#}", err),
    }
}
