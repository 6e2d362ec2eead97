//! Report formatting and printing utilities.
//!
//! Displays hardcoded text and locale inconsistencies in cargo-style format.
//! Separate from core logic so glossa can be used as a library.

use std::io::{self, Write};

use colored::Colorize;
use unicode_width::UnicodeWidthStr;

use super::{
    args::OutputFormat,
    commands::{AnalysisSummary, CommandResult, CommandSummary, InitSummary},
};
use crate::config::CONFIG_FILE_NAME;
use crate::core::{
    consistency::{ConsistencyRecord, ConsistencyReport, RecordKind},
    error::ScanWarning,
    extractor::TextMatch,
    project::AnalysisResult,
    scanner::ScanResult,
};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Maximum number of keys listed per whole-file record.
const MAX_KEYS_DISPLAY: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Severity {
    Error,
    Warning,
}

impl Severity {
    fn label(self) -> colored::ColoredString {
        match self {
            Severity::Error => "error".bold().red(),
            Severity::Warning => "warning".bold().yellow(),
        }
    }
}

#[derive(Debug, Default)]
struct Tally {
    errors: usize,
    warnings: usize,
}

impl Tally {
    fn add(&mut self, severity: Severity) {
        match severity {
            Severity::Error => self.errors += 1,
            Severity::Warning => self.warnings += 1,
        }
    }
}

pub fn print(result: &CommandResult, verbose: bool) {
    match &result.summary {
        CommandSummary::Analysis(summary) => print_analysis(summary, verbose),
        CommandSummary::Init(summary) => print_init(summary),
    }
}

fn print_analysis(summary: &AnalysisSummary, verbose: bool) {
    match summary.format {
        OutputFormat::Json => {
            let mut out = io::stdout().lock();
            match serde_json::to_string_pretty(&summary.result) {
                Ok(json) => {
                    let _ = writeln!(out, "{}", json);
                }
                Err(e) => eprintln!("{} failed to serialize report: {}", "error:".bold().red(), e),
            }
        }
        OutputFormat::Text => {
            report_to(&summary.result, &mut io::stdout().lock());
            print_warnings_to(&summary.result, verbose, &mut io::stderr().lock());
        }
    }

    if let Some(path) = &summary.report_path {
        eprintln!("{} {}", "Report written to".dimmed(), path.display());
    }
}

fn print_init(summary: &InitSummary) {
    if summary.created {
        println!(
            "{} {}",
            SUCCESS_MARK.green(),
            format!("Created {}", CONFIG_FILE_NAME).green()
        );
    } else {
        eprintln!("Error: {} already exists", summary.path.display());
    }
}

/// Print the full analysis to a custom writer.
///
/// Useful for testing or redirecting output.
pub fn report_to<W: Write>(result: &AnalysisResult, writer: &mut W) {
    let mut tally = Tally::default();

    if let Some(scan) = &result.scan {
        report_scan(scan, writer, &mut tally);
    }
    if let Some(consistency) = &result.consistency {
        report_consistency(consistency, writer, &mut tally);
        print_coverage(consistency, writer);
    }

    if tally.errors + tally.warnings == 0 {
        print_success_to(result, writer);
    } else {
        print_summary(&tally, writer);
    }
}

fn report_scan<W: Write>(scan: &ScanResult, writer: &mut W, tally: &mut Tally) {
    let max_line_width = scan
        .matched_files()
        .flat_map(|f| f.matches.iter())
        .map(|m| m.line)
        .max()
        .map(|n| n.to_string().len())
        .unwrap_or(1);

    for file in scan.matched_files() {
        for m in &file.matches {
            print_match(&file.path, m, writer, max_line_width);
            tally.add(Severity::Error);
        }
    }
}

fn print_match<W: Write>(path: &str, m: &TextMatch, writer: &mut W, max_line_width: usize) {
    let _ = writeln!(
        writer,
        "{}: \"{}\"  {}",
        Severity::Error.label(),
        m.text,
        format!("hardcoded ({})", m.rule_id).dimmed().cyan()
    );

    // Clickable location: --> path:line:col (col is 1-based here)
    let _ = writeln!(
        writer,
        "  {} {}:{}:{}",
        "-->".blue(),
        path,
        m.line,
        m.column + 1
    );

    let _ = writeln!(writer, "{:>width$} {}", "", "|".blue(), width = max_line_width);
    let _ = writeln!(
        writer,
        "{:>width$} {} {}",
        m.line.to_string().blue(),
        "|".blue(),
        m.source_line,
        width = max_line_width
    );

    let prefix: String = m.source_line.chars().take(m.column).collect();
    let caret_padding = UnicodeWidthStr::width(prefix.as_str());
    let carets = "^".repeat(UnicodeWidthStr::width(m.text.as_str()).max(1));
    let _ = writeln!(
        writer,
        "{:>width$} {} {:>padding$}{}",
        "",
        "|".blue(),
        "",
        carets.red(),
        width = max_line_width,
        padding = caret_padding
    );

    let _ = writeln!(
        writer,
        "{:>width$} {} {} {}",
        "",
        "=".blue(),
        "hint:".bold().cyan(),
        format!("use key `{}`: {}", m.suggestion.key, m.suggestion.preferred_snippet()),
        width = max_line_width
    );
    let _ = writeln!(writer);
}

fn report_consistency<W: Write>(report: &ConsistencyReport, writer: &mut W, tally: &mut Tally) {
    for record in report.issues() {
        print_record(report, record, writer, tally);
    }
}

fn print_record<W: Write>(
    report: &ConsistencyReport,
    record: &ConsistencyRecord,
    writer: &mut W,
    tally: &mut Tally,
) {
    let location = record.path.as_str();

    match record.kind {
        RecordKind::Compared => {
            for key in &record.missing_keys {
                print_key_issue(writer, Severity::Error, key, "missing-key", location, || {
                    format!("defined in \"{}\"", report.reference)
                });
                tally.add(Severity::Error);
            }
            for key in &record.extra_keys {
                print_key_issue(writer, Severity::Warning, key, "extra-key", location, || {
                    format!("not defined in \"{}\"", report.reference)
                });
                tally.add(Severity::Warning);
            }
            for key in &record.untranslated_keys {
                print_key_issue(writer, Severity::Warning, key, "untranslated", location, || {
                    "value is empty or marked as not translated".to_string()
                });
                tally.add(Severity::Warning);
            }
        }
        RecordKind::MissingFile => {
            let _ = writeln!(
                writer,
                "{}: \"{}\" has no \"{}\"  {}",
                Severity::Error.label(),
                record.language,
                record.file,
                record.kind.to_string().dimmed().cyan()
            );
            let _ = writeln!(writer, "  {} {}", "-->".blue(), location);
            print_key_list(writer, "missing:", &record.missing_keys);
            let _ = writeln!(writer);
            tally.add(Severity::Error);
        }
        RecordKind::ExtraFile => {
            let _ = writeln!(
                writer,
                "{}: \"{}\" not present in \"{}\"  {}",
                Severity::Warning.label(),
                record.file,
                report.reference,
                record.kind.to_string().dimmed().cyan()
            );
            let _ = writeln!(writer, "  {} {}", "-->".blue(), location);
            print_key_list(writer, "extra:", &record.extra_keys);
            let _ = writeln!(writer);
            tally.add(Severity::Warning);
        }
        RecordKind::MalformedFile => {
            let _ = writeln!(
                writer,
                "{}: \"{}\" could not be parsed  {}",
                Severity::Error.label(),
                record.file,
                record.kind.to_string().dimmed().cyan()
            );
            let _ = writeln!(writer, "  {} {}", "-->".blue(), location);
            if let Some(error) = &record.error {
                let _ = writeln!(writer, "  {} {} {}", "=".blue(), "note:".bold(), error);
            }
            let _ = writeln!(writer);
            tally.add(Severity::Error);
        }
    }
}

fn print_key_issue<W: Write>(
    writer: &mut W,
    severity: Severity,
    key: &str,
    rule: &str,
    location: &str,
    note: impl FnOnce() -> String,
) {
    let _ = writeln!(
        writer,
        "{}: \"{}\"  {}",
        severity.label(),
        key,
        rule.dimmed().cyan()
    );
    let _ = writeln!(writer, "  {} {}", "-->".blue(), location);
    let _ = writeln!(writer, "  {} {} {}", "=".blue(), "note:".bold(), note());
    let _ = writeln!(writer);
}

fn print_key_list<'a, W: Write>(
    writer: &mut W,
    label: &str,
    keys: impl IntoIterator<Item = &'a String>,
) {
    let keys: Vec<&String> = keys.into_iter().collect();
    if keys.is_empty() {
        return;
    }

    let shown: Vec<&str> = keys.iter().take(MAX_KEYS_DISPLAY).map(|k| k.as_str()).collect();
    let remaining = keys.len().saturating_sub(MAX_KEYS_DISPLAY);
    let suffix = if remaining > 0 {
        format!(" (and {} more)", remaining)
    } else {
        String::new()
    };

    let _ = writeln!(
        writer,
        "  {} {} {}{}",
        "=".blue(),
        label.bold(),
        shown.join(", "),
        suffix
    );
}

fn print_coverage<W: Write>(report: &ConsistencyReport, writer: &mut W) {
    if report.summaries.is_empty() {
        return;
    }

    let _ = writeln!(
        writer,
        "{} (reference: {})",
        "Locale coverage".bold(),
        report.reference
    );

    let name_width = report
        .summaries
        .iter()
        .map(|s| UnicodeWidthStr::width(s.language.as_str()))
        .max()
        .unwrap_or(0);

    for s in &report.summaries {
        let coverage = format!("{:>5.1}%", s.coverage);
        let coverage = if s.missing == 0 {
            coverage.green()
        } else {
            coverage.yellow()
        };
        let _ = writeln!(
            writer,
            "  {:<width$}  {}  {}/{} keys, {} missing, {} extra, {} untranslated",
            s.language,
            coverage,
            s.reference_keys - s.missing,
            s.reference_keys,
            s.missing,
            s.extra,
            s.untranslated,
            width = name_width
        );
    }
    let _ = writeln!(writer);
}

fn print_summary<W: Write>(tally: &Tally, writer: &mut W) {
    let total = tally.errors + tally.warnings;
    let _ = writeln!(
        writer,
        "{} {} problems ({} {}, {} {})",
        FAILURE_MARK.red(),
        total,
        tally.errors,
        if tally.errors == 1 { "error" } else { "errors" }.red(),
        tally.warnings,
        if tally.warnings == 1 {
            "warning"
        } else {
            "warnings"
        }
        .yellow()
    );
}

fn plural(count: usize, word: &str) -> String {
    if count == 1 {
        format!("{} {}", count, word)
    } else {
        format!("{} {}s", count, word)
    }
}

/// Print a success message when no issues are found.
pub fn print_success_to<W: Write>(result: &AnalysisResult, writer: &mut W) {
    let mut parts = Vec::new();
    if let Some(scan) = &result.scan {
        parts.push(plural(scan.files_scanned, "source file"));
    }
    if let Some(consistency) = &result.consistency {
        parts.push(plural(consistency.files_checked, "locale file"));
    }

    let msg = format!("Checked {} - no issues found", parts.join(", "));
    let _ = writeln!(writer, "{} {}", SUCCESS_MARK.green(), msg.green());
}

/// Print scan and catalog warnings.
///
/// Without `verbose`, only a count is shown.
pub fn print_warnings_to<W: Write>(result: &AnalysisResult, verbose: bool, writer: &mut W) {
    let warnings: Vec<&ScanWarning> = result
        .scan
        .iter()
        .flat_map(|s| s.warnings.iter())
        .chain(result.consistency.iter().flat_map(|c| c.warnings.iter()))
        .collect();

    if warnings.is_empty() {
        return;
    }

    if verbose {
        for warning in &warnings {
            let _ = writeln!(writer, "{} {}", "warning:".bold().yellow(), warning);
        }
    } else {
        let _ = writeln!(
            writer,
            "{} {} could not be processed (use {} for details)",
            "warning:".bold().yellow(),
            plural(warnings.len(), "file or rule"),
            "-v".cyan()
        );
    }

    if result.scan.as_ref().is_some_and(|s| s.cancelled) {
        let _ = writeln!(writer, "{} scan was cancelled, results are partial", "warning:".bold().yellow());
    }
}

// ============================================================
// Tests
// ============================================================
