//! Core analysis engine. Performs no terminal output and writes no files.
//!
//! ## Modules
//!
//! - `framework`: framework tags and project auto-detection
//! - `patterns`: the pattern catalog of compiled extraction rules
//! - `classifier`: decides whether a candidate string is human-readable text
//! - `extractor`: applies rules to file content, with the translation-call look-behind
//! - `suggestion`: translation key and replacement snippet generation
//! - `locale`: locale tree model and catalog discovery
//! - `consistency`: cross-language catalog comparison
//! - `scanner`: directory walk and parallel per-file extraction
//! - `project`: combined source scan and consistency check

pub mod classifier;
pub mod consistency;
pub mod error;
pub mod extractor;
pub mod framework;
pub mod locale;
pub mod patterns;
pub mod project;
pub mod scanner;
pub mod suggestion;

pub use classifier::is_translatable;
pub use consistency::{ConsistencyRecord, ConsistencyReport, LanguageSummary, RecordKind, analyze};
pub use error::{ScanError, ScanWarning, WarningKind};
pub use extractor::{TextMatch, is_inside_translation_call, scan_content, scan_file};
pub use framework::{Framework, FrameworkSetting, detect_framework};
pub use patterns::{PatternCatalog, PatternRule, TextBounds};
pub use project::{AnalysisResult, AnalysisScope, analyze_project};
pub use scanner::{FileMatches, ScanOptions, ScanResult, scan_directory};
pub use suggestion::{Suggestion, generate_suggestion};
