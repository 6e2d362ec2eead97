use anyhow::{Result, bail};

use super::{
    args::{Arguments, Command},
    commands::{CommandResult, check::check, init::init, locales::locales, scan::scan},
};

/// Dispatch to the command handler for the parsed arguments.
///
/// # Returns
/// - `Ok(CommandResult)` with the analysis outcome and exit status
/// - `Err` if the command fails (missing directory, invalid config, ...)
pub fn run(Arguments { command }: Arguments) -> Result<CommandResult> {
    match command {
        Some(Command::Scan(cmd)) => scan(cmd),
        Some(Command::Locales(cmd)) => locales(cmd),
        Some(Command::Check(cmd)) => check(cmd),
        Some(Command::Init) => init(),
        None => bail!("No command provided. Use --help to see available commands."),
    }
}
