use anyhow::Result;

use super::{CommandKind, CommandResult, helper::run_analysis};
use crate::cli::args::CheckCommand;
use crate::core::project::AnalysisScope;

pub fn check(cmd: CheckCommand) -> Result<CommandResult> {
    run_analysis(
        CommandKind::Check,
        &cmd.common,
        Some(&cmd.source),
        AnalysisScope::All,
    )
}
