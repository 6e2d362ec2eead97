use anyhow::Result;

use super::{CommandKind, CommandResult, helper::run_analysis};
use crate::cli::args::LocalesCommand;
use crate::core::project::AnalysisScope;

pub fn locales(cmd: LocalesCommand) -> Result<CommandResult> {
    run_analysis(CommandKind::Locales, &cmd.common, None, AnalysisScope::Locales)
}
