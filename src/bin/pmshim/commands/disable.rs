//! `pmshim disable` command

use anyhow::Result;

use crate::cli::DisableArgs;
use crate::GlobalOptions;
use pmshim::ops::disable::{disable, DisableOptions, DisableResult};
use pmshim::ops::errors::ShimError;
use pmshim::ops::remove_shims::{Platform, RemovalReport};
use pmshim::ops::resolve_dir::PathLocator;
use pmshim::util::{Shell, Status};

pub fn execute(args: DisableArgs, global_opts: &GlobalOptions) -> Result<()> {
    let shell = &global_opts.shell;

    let opts = DisableOptions {
        install_directory: args.install_directory,
        names: args.names,
        jobs: args.jobs.or(global_opts.config.disable.jobs),
    };

    let result = match disable(&opts, &PathLocator::new(), Platform::current()) {
        Ok(result) => result,
        Err(err) => {
            // Files handled before the failure are still worth reporting.
            if let ShimError::Removal { report, failures } = &err {
                report_records(shell, report);
                for failure in failures {
                    shell.shim_failure(failure);
                }
            }
            return Err(err.into());
        }
    };

    report_records(shell, &result.report);
    report_summary(shell, &result);

    Ok(())
}

fn report_records(shell: &Shell, report: &RemovalReport) {
    for record in &report.records {
        shell.shim_record(record);
    }
}

fn report_summary(shell: &Shell, result: &DisableResult) {
    let removed = result.report.removed().count();
    let preserved = result.report.preserved().count();

    if shell.is_json() {
        shell.json_event(&serde_json::json!({
            "reason": "disable-finished",
            "install_directory": result.install_directory,
            "package_managers": result.package_managers,
            "removed": removed,
            "preserved": preserved,
        }));
        return;
    }

    let managers = result
        .package_managers
        .iter()
        .map(|pm| pm.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    shell.status(
        Status::Finished,
        format!(
            "disabled {} in {} ({} removed, {} skipped)",
            managers,
            result.install_directory.display(),
            removed,
            preserved
        ),
    );
}
