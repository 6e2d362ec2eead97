use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};

use crate::core::project::AnalysisResult;

pub const REPORT_FILE_NAME: &str = "report.json";

/// Write `result` as pretty-printed JSON to `<dir>/report.json`, creating
/// `dir` when needed. Returns the written path.
pub fn write_report(dir: &Path, result: &AnalysisResult) -> Result<PathBuf> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory: {}", dir.display()))?;

    let path = dir.join(REPORT_FILE_NAME);
    let json = serde_json::to_string_pretty(result).context("Failed to serialize report")?;
    fs::write(&path, json + "\n")
        .with_context(|| format!("Failed to write report: {}", path.display()))?;

    tracing::debug!(path = %path.display(), "wrote report");
    Ok(path)
}
