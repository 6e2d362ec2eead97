use anyhow::Result;

use super::{CommandKind, CommandResult, helper::run_analysis};
use crate::cli::args::ScanCommand;
use crate::core::project::AnalysisScope;

pub fn scan(cmd: ScanCommand) -> Result<CommandResult> {
    run_analysis(
        CommandKind::Scan,
        &cmd.common,
        Some(&cmd.source),
        AnalysisScope::Source,
    )
}
