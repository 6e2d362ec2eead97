//! Consistency analysis across locale catalogs.
//!
//! Every non-reference language is compared file by file against the reference
//! language. Besides key-level mismatches, three whole-file conditions are
//! reported on their own: a reference file absent from a language, a file only
//! present in a non-reference language, and a file that failed to parse.

use std::{
    collections::BTreeSet,
    fmt,
    path::{Path, PathBuf},
};

use serde::Serialize;
use serde_json::{Map, Value};

use super::error::{ScanError, ScanWarning, WarningKind};
use super::locale::{
    CatalogFile, CatalogTree, LanguageCatalogs, LocaleSet, deep_merge, diff_keys, flatten, load_locale_set,
    tree::untranslated_keys,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RecordKind {
    /// Both sides parsed; key sets were diffed.
    Compared,
    /// The reference has this file, the language does not.
    MissingFile,
    /// The language has this file, the reference does not.
    ExtraFile,
    /// The file could not be parsed and was treated as empty.
    MalformedFile,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordKind::Compared => write!(f, "compared"),
            RecordKind::MissingFile => write!(f, "missing-file"),
            RecordKind::ExtraFile => write!(f, "extra-file"),
            RecordKind::MalformedFile => write!(f, "malformed-file"),
        }
    }
}

/// Result of comparing one (language, file) pair with the reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConsistencyRecord {
    pub language: String,
    pub file: String,
    /// Path relative to the locale root; for missing files, where the file is expected.
    pub path: String,
    pub kind: RecordKind,
    pub missing_keys: BTreeSet<String>,
    pub extra_keys: BTreeSet<String>,
    pub untranslated_keys: BTreeSet<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ConsistencyRecord {
    fn new(language: &str, file: &CatalogFile, kind: RecordKind) -> Self {
        Self {
            language: language.to_string(),
            file: file.label().to_string(),
            path: file.display.clone(),
            kind,
            missing_keys: BTreeSet::new(),
            extra_keys: BTreeSet::new(),
            untranslated_keys: BTreeSet::new(),
            error: None,
        }
    }

    pub fn has_issues(&self) -> bool {
        self.kind != RecordKind::Compared
            || !self.missing_keys.is_empty()
            || !self.extra_keys.is_empty()
            || !self.untranslated_keys.is_empty()
    }
}

/// Per-language totals computed from all of a language's files merged together.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LanguageSummary {
    pub language: String,
    pub files: usize,
    pub reference_keys: usize,
    pub missing: usize,
    pub extra: usize,
    pub untranslated: usize,
    /// Share of reference keys present in this language, in percent.
    pub coverage: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ConsistencyReport {
    pub locale_root: PathBuf,
    pub reference: String,
    pub languages: Vec<String>,
    /// Catalog files seen across all languages, malformed ones included.
    pub files_checked: usize,
    pub records: Vec<ConsistencyRecord>,
    pub summaries: Vec<LanguageSummary>,
    pub warnings: Vec<ScanWarning>,
}

impl ConsistencyReport {
    /// Records that describe a problem.
    pub fn issues(&self) -> impl Iterator<Item = &ConsistencyRecord> {
        self.records.iter().filter(|r| r.has_issues())
    }

    pub fn is_consistent(&self) -> bool {
        self.issues().next().is_none()
    }

    /// Locate a record by language and file label.
    pub fn record(&self, language: &str, file: &str) -> Option<&ConsistencyRecord> {
        self.records
            .iter()
            .find(|r| r.language == language && r.file == file)
    }
}

/// Compare every language under `locale_root` against `reference`.
pub fn analyze(locale_root: &Path, reference: &str) -> Result<ConsistencyReport, ScanError> {
    let set = load_locale_set(locale_root)?;
    analyze_locale_set(&set, reference)
}

/// Like [`analyze`], falling back to the first language in sorted order when
/// no reference is given.
pub fn analyze_with_default(
    locale_root: &Path,
    reference: Option<&str>,
) -> Result<ConsistencyReport, ScanError> {
    let set = load_locale_set(locale_root)?;
    let reference = match reference {
        Some(reference) => reference.to_string(),
        None => set
            .languages
            .keys()
            .next()
            .cloned()
            .ok_or_else(|| ScanError::NoLanguages(locale_root.to_path_buf()))?,
    };
    analyze_locale_set(&set, &reference)
}

/// Compare an already loaded locale set against `reference`.
pub fn analyze_locale_set(set: &LocaleSet, reference: &str) -> Result<ConsistencyReport, ScanError> {
    let Some(reference_catalogs) = set.languages.get(reference) else {
        return Err(ScanError::ReferenceNotFound {
            language: reference.to_string(),
            root: set.root.clone(),
            available: set.language_names().join(", "),
        });
    };

    let mut records = Vec::new();
    let mut summaries = Vec::new();
    let mut warnings = set.warnings.clone();
    warnings.extend(malformed_warnings(set));

    for file in reference_catalogs.files.values() {
        if let CatalogTree::Malformed { error } = &file.tree {
            let mut record = ConsistencyRecord::new(reference, file, RecordKind::MalformedFile);
            record.error = Some(error.clone());
            records.push(record);
        }
    }

    for (language, catalogs) in &set.languages {
        if language == reference {
            continue;
        }
        records.extend(compare_language(reference_catalogs, catalogs));
        summaries.push(summarize_language(reference_catalogs, catalogs));
    }

    tracing::debug!(
        reference,
        languages = set.languages.len(),
        records = records.len(),
        "locale consistency analyzed"
    );

    Ok(ConsistencyReport {
        locale_root: set.root.clone(),
        reference: reference.to_string(),
        languages: set.languages.keys().cloned().collect(),
        files_checked: set.languages.values().map(|c| c.files.len()).sum(),
        records,
        summaries,
        warnings,
    })
}

fn malformed_warnings(set: &LocaleSet) -> Vec<ScanWarning> {
    set.languages
        .values()
        .flat_map(|catalogs| catalogs.files.values())
        .filter_map(|file| match &file.tree {
            CatalogTree::Malformed { error } => Some(ScanWarning::new(
                WarningKind::MalformedCatalog,
                file.display.clone(),
                error.clone(),
            )),
            CatalogTree::Parsed(_) => None,
        })
        .collect()
}

fn compare_language(reference: &LanguageCatalogs, other: &LanguageCatalogs) -> Vec<ConsistencyRecord> {
    let language = other.language.as_str();
    let mut records = Vec::new();

    for (id, ref_file) in &reference.files {
        // Nothing meaningful to compare against; reported once for the reference.
        let CatalogTree::Parsed(ref_tree) = &ref_file.tree else {
            continue;
        };
        let ref_flat = flatten(ref_tree, "");

        let record = match other.files.get(id) {
            None => {
                let mut record = ConsistencyRecord::new(language, ref_file, RecordKind::MissingFile);
                record.path = expected_path(language, ref_file);
                record.missing_keys = ref_flat.keys().cloned().collect();
                record
            }
            Some(file) => match &file.tree {
                CatalogTree::Malformed { error } => {
                    let mut record = ConsistencyRecord::new(language, file, RecordKind::MalformedFile);
                    record.missing_keys = ref_flat.keys().cloned().collect();
                    record.error = Some(error.clone());
                    record
                }
                CatalogTree::Parsed(tree) => {
                    let flat = flatten(tree, "");
                    let diff = diff_keys(&ref_flat, &flat);
                    let mut record = ConsistencyRecord::new(language, file, RecordKind::Compared);
                    record.missing_keys = diff.missing;
                    record.extra_keys = diff.extra;
                    record.untranslated_keys = untranslated_keys(&flat);
                    record
                }
            },
        };
        records.push(record);
    }

    for (id, file) in &other.files {
        if reference.files.contains_key(id) {
            continue;
        }
        let mut record = ConsistencyRecord::new(language, file, RecordKind::ExtraFile);
        record.extra_keys = flatten(&file.tree.tree(), "").keys().cloned().collect();
        if let CatalogTree::Malformed { error } = &file.tree {
            record.error = Some(error.clone());
        }
        records.push(record);
    }

    records
}

/// Where `language` would keep its counterpart of the reference file `file`.
fn expected_path(language: &str, file: &CatalogFile) -> String {
    if file.id.is_empty() {
        match file.path.extension().and_then(|e| e.to_str()) {
            Some(ext) => format!("{}.{}", language, ext),
            None => language.to_string(),
        }
    } else {
        format!("{}/{}", language, file.id)
    }
}

fn merged_tree(catalogs: &LanguageCatalogs) -> Value {
    catalogs
        .files
        .values()
        .filter_map(|file| match &file.tree {
            CatalogTree::Parsed(tree) => Some(tree.clone()),
            CatalogTree::Malformed { .. } => None,
        })
        .fold(Value::Object(Map::new()), deep_merge)
}

fn summarize_language(reference: &LanguageCatalogs, other: &LanguageCatalogs) -> LanguageSummary {
    let ref_flat = flatten(&merged_tree(reference), "");
    let flat = flatten(&merged_tree(other), "");
    let diff = diff_keys(&ref_flat, &flat);

    let reference_keys = ref_flat.len();
    let coverage = if reference_keys == 0 {
        100.0
    } else {
        (reference_keys - diff.missing.len()) as f64 * 100.0 / reference_keys as f64
    };

    LanguageSummary {
        language: other.language.clone(),
        files: other.files.len(),
        reference_keys,
        missing: diff.missing.len(),
        extra: diff.extra.len(),
        untranslated: untranslated_keys(&flat).len(),
        coverage,
    }
}
