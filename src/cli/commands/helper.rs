use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use super::{AnalysisSummary, CommandKind, CommandResult, CommandSummary};
use crate::cli::{
    args::{CommonArgs, SourceArgs},
    exit_status::ExitStatus,
    json_writer::write_report,
};
use crate::config::{Config, load_config, resolve_path};
use crate::core::project::{AnalysisScope, analyze_project};

/// Configuration with CLI overrides applied.
pub struct ProjectSetup {
    pub config: Config,
    /// Directory relative config paths resolve against.
    pub base_dir: PathBuf,
}

/// Load the config file and apply CLI overrides (CLI > config file > defaults).
///
/// The config file is searched for upward from `--source-root`, or from the
/// current directory when it is not given.
pub fn setup(common: &CommonArgs, source: Option<&SourceArgs>) -> Result<ProjectSetup> {
    let start_dir = common
        .source_root
        .clone()
        .unwrap_or_else(|| PathBuf::from("."));

    let config_result = load_config(&start_dir)?;
    if common.verbose && !config_result.from_file {
        tracing::info!("no config file found, using defaults");
    }

    let mut config = config_result.config;
    let base_dir = config_result.base_dir;

    if let Some(source_root) = &common.source_root {
        config.source_root = absolute_string(source_root)?;
    }
    if let Some(locales_root) = &common.locales_root {
        config.locales_root = absolute_string(locales_root)?;
    }
    if let Some(language) = &common.source_language {
        config.source_language = language.clone();
    }
    if let Some(framework) = common.framework {
        config.framework = framework;
    }
    if let Some(source) = source {
        if source.include_tests {
            config.include_tests = true;
        }
        if let Some(min) = source.min_length {
            config.min_length = min;
        }
        if let Some(max) = source.max_length {
            config.max_length = max;
        }
    }

    config.validate()?;

    Ok(ProjectSetup { config, base_dir })
}

/// CLI paths are relative to the working directory, not the config file.
fn absolute_string(path: &Path) -> Result<String> {
    let absolute = std::path::absolute(path)
        .with_context(|| format!("Invalid path: {}", path.display()))?;
    Ok(absolute.to_string_lossy().into_owned())
}

pub fn run_analysis(
    kind: CommandKind,
    common: &CommonArgs,
    source: Option<&SourceArgs>,
    scope: AnalysisScope,
) -> Result<CommandResult> {
    let ProjectSetup { config, base_dir } = setup(common, source)?;

    let result = analyze_project(&config, &base_dir, scope)?;

    let report_path = match &common.output {
        Some(dir) => {
            let dir = match dir {
                Some(dir) => dir.clone(),
                None => resolve_path(&base_dir, &config.output_dir),
            };
            Some(write_report(&dir, &result)?)
        }
        None => None,
    };

    let exit_status = ExitStatus::from_analysis(&result);

    Ok(CommandResult {
        kind,
        summary: CommandSummary::Analysis(AnalysisSummary {
            result,
            format: common.format,
            report_path,
        }),
        exit_status,
    })
}
