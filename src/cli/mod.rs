use std::process::ExitCode;

use anyhow::Result;
use tracing_subscriber::EnvFilter;

mod args;
mod commands;
mod exit_status;
mod json_writer;
mod report;
mod run;

pub use args::{Arguments, Command, CommonArgs, OutputFormat, SourceArgs};
pub use exit_status::ExitStatus;
pub use json_writer::{REPORT_FILE_NAME, write_report};

/// Environment variable holding a `tracing` filter directive.
pub const LOG_ENV: &str = "GLOSSA_LOG";

pub fn run_cli(args: Arguments) -> Result<ExitCode> {
    let verbose = args.verbose();
    init_logging(verbose);

    let Some(args) = args.with_command_or_help() else {
        return Ok(ExitStatus::Success.into());
    };

    let result = run::run(args)?;
    tracing::debug!(command = ?result.kind, status = ?result.exit_status, "command finished");
    report::print(&result, verbose);

    Ok(result.exit_status.into())
}

/// Log to stderr. `GLOSSA_LOG` wins; otherwise `warn`, or `debug` with `-v`.
fn init_logging(verbose: bool) {
    let default = if verbose { "warn,glossa=debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}
