//! Whole-project analysis: a source scan and a locale consistency check driven
//! by one configuration.

use std::path::{Path, PathBuf};

use serde::Serialize;

use super::{
    consistency::{ConsistencyReport, analyze},
    error::ScanError,
    patterns::PatternCatalog,
    scanner::{ScanOptions, ScanResult, scan_directory},
};
use crate::config::{Config, resolve_path};

/// Which halves of the analysis to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisScope {
    Source,
    Locales,
    /// Source scan, plus consistency when the locales root exists.
    All,
}

impl AnalysisScope {
    fn includes_source(self) -> bool {
        matches!(self, AnalysisScope::Source | AnalysisScope::All)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalysisResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scan: Option<ScanResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consistency: Option<ConsistencyReport>,
}

impl AnalysisResult {
    /// True when any hardcoded text or locale inconsistency was found.
    pub fn has_issues(&self) -> bool {
        let source = self.scan.as_ref().is_some_and(|s| s.total_matches > 0);
        let locales = self
            .consistency
            .as_ref()
            .is_some_and(|c| !c.is_consistent());
        source || locales
    }
}

impl ScanOptions {
    /// Scan options for the configured source root, resolved against `base_dir`.
    pub fn from_config(config: &Config, base_dir: &Path) -> Self {
        Self {
            root: resolve_path(base_dir, &config.source_root),
            framework: config.framework,
            includes: config.includes.clone(),
            ignores: config.ignores.clone(),
            ignore_texts: config.ignore_texts.iter().cloned().collect(),
            bounds: config.bounds(),
            include_tests: config.include_tests,
            cancel: None,
        }
    }
}

pub fn locales_root(config: &Config, base_dir: &Path) -> PathBuf {
    resolve_path(base_dir, &config.locales_root)
}

/// Run the analyses selected by `scope`.
pub fn analyze_project(
    config: &Config,
    base_dir: &Path,
    scope: AnalysisScope,
) -> Result<AnalysisResult, ScanError> {
    analyze_project_with(ScanOptions::from_config(config, base_dir), config, base_dir, scope)
}

/// Like [`analyze_project`] with caller-supplied scan options (for example with
/// a cancellation flag attached).
pub fn analyze_project_with(
    options: ScanOptions,
    config: &Config,
    base_dir: &Path,
    scope: AnalysisScope,
) -> Result<AnalysisResult, ScanError> {
    let scan = if scope.includes_source() {
        let catalog = PatternCatalog::new(options.bounds);
        Some(scan_directory(&options, &catalog)?)
    } else {
        None
    };

    let locale_root = locales_root(config, base_dir);
    let consistency = match scope {
        AnalysisScope::Source => None,
        AnalysisScope::Locales => Some(analyze(&locale_root, &config.source_language)?),
        AnalysisScope::All if locale_root.is_dir() => {
            Some(analyze(&locale_root, &config.source_language)?)
        }
        AnalysisScope::All => {
            tracing::debug!(
                root = %locale_root.display(),
                "locales root not found, skipping consistency check"
            );
            None
        }
    };

    Ok(AnalysisResult { scan, consistency })
}
