use std::path::PathBuf;

use crate::cli::{args::OutputFormat, exit_status::ExitStatus};
use crate::core::project::AnalysisResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    Scan,
    Locales,
    Check,
    Init,
}

#[derive(Debug)]
pub enum CommandSummary {
    Analysis(AnalysisSummary),
    Init(InitSummary),
}

#[derive(Debug)]
pub struct AnalysisSummary {
    pub result: AnalysisResult,
    pub format: OutputFormat,
    /// Where `report.json` was written, if requested.
    pub report_path: Option<PathBuf>,
}

#[derive(Debug)]
pub struct InitSummary {
    pub created: bool,
    pub path: PathBuf,
}

/// Result of running glossa commands
#[derive(Debug)]
pub struct CommandResult {
    pub kind: CommandKind,
    pub summary: CommandSummary,
    pub exit_status: ExitStatus,
}
