//! Discovery and parsing of locale catalog files.
//!
//! Two layouts are recognized directly under the locale root, and may be mixed:
//! - one directory per language holding any number of catalog files
//!   (`locales/en/common.json`, `locales/en/errors/form.yaml`);
//! - one file per language (`messages/en.json`, `config/locales/de.yml`).
//!
//! A file that cannot be read or parsed is kept as [`CatalogTree::Malformed`]
//! so callers can report it separately from a missing file.

use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use serde_json::{Map, Value};
use walkdir::WalkDir;

use crate::core::error::{ScanError, ScanWarning, WarningKind};
use crate::utils::display_path;

/// Supported catalog encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogFormat {
    Json,
    Yaml,
}

impl CatalogFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()?.to_ascii_lowercase().as_str() {
            "json" => Some(CatalogFormat::Json),
            "yaml" | "yml" => Some(CatalogFormat::Yaml),
            _ => None,
        }
    }
}

/// Parsed contents of one catalog file.
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogTree {
    Parsed(Value),
    Malformed { error: String },
}

impl CatalogTree {
    /// The tree, or an empty object for malformed files.
    pub fn tree(&self) -> Value {
        match self {
            CatalogTree::Parsed(value) => value.clone(),
            CatalogTree::Malformed { .. } => Value::Object(Map::new()),
        }
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self, CatalogTree::Malformed { .. })
    }
}

#[derive(Debug, Clone)]
pub struct CatalogFile {
    /// Path relative to the language directory (`common.json`); empty for
    /// single-file languages (`en.json`), which all share the same slot.
    pub id: String,
    pub path: PathBuf,
    /// Path relative to the locale root.
    pub display: String,
    pub tree: CatalogTree,
}

impl CatalogFile {
    /// Name used in reports.
    pub fn label(&self) -> &str {
        if self.id.is_empty() {
            &self.display
        } else {
            &self.id
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct LanguageCatalogs {
    pub language: String,
    /// Files keyed by id, in sorted order.
    pub files: BTreeMap<String, CatalogFile>,
}

/// Every language found under a locale root.
#[derive(Debug, Clone)]
pub struct LocaleSet {
    pub root: PathBuf,
    pub languages: BTreeMap<String, LanguageCatalogs>,
    /// Catalog files that were discovered but not loaded.
    pub warnings: Vec<ScanWarning>,
}

impl LocaleSet {
    pub fn language_names(&self) -> Vec<&str> {
        self.languages.keys().map(String::as_str).collect()
    }
}

/// Discover and parse all catalogs under `root`.
pub fn load_locale_set(root: &Path) -> Result<LocaleSet, ScanError> {
    if !root.exists() {
        return Err(ScanError::LocaleRootMissing(root.to_path_buf()));
    }
    if !root.is_dir() {
        return Err(ScanError::NotADirectory(root.to_path_buf()));
    }

    let mut languages: BTreeMap<String, LanguageCatalogs> = BTreeMap::new();
    let mut warnings = Vec::new();

    let mut entries = fs::read_dir(root)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<Result<Vec<_>, _>>()?;
    entries.sort();

    for path in entries {
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if name.starts_with('.') {
            continue;
        }

        if path.is_dir() {
            // Every directory is a language, even before it holds any catalog.
            let language = name.to_string();
            let files = collect_language_dir(root, &path, &language);
            languages
                .entry(language.clone())
                .or_insert_with(|| empty_language(&language))
                .files
                .extend(files);
        } else if let Some(format) = CatalogFormat::from_path(&path)
            && let Some(language) = path.file_stem().and_then(|s| s.to_str())
        {
            let catalogs = languages
                .entry(language.to_string())
                .or_insert_with(|| empty_language(language));

            if let Some(kept) = catalogs.files.get("") {
                let skipped = display_path(&path, root);
                tracing::warn!(path = %skipped, kept = %kept.display, "duplicate locale catalog");
                warnings.push(ScanWarning::new(
                    WarningKind::DuplicateCatalog,
                    skipped,
                    format!("'{}' already defines language '{}'", kept.display, language),
                ));
                continue;
            }

            let file = load_catalog_file(root, &path, String::new(), format, language);
            catalogs.files.insert(file.id.clone(), file);
        }
    }

    tracing::debug!(
        root = %root.display(),
        languages = languages.len(),
        "discovered locale catalogs"
    );

    Ok(LocaleSet {
        root: root.to_path_buf(),
        languages,
        warnings,
    })
}

fn empty_language(language: &str) -> LanguageCatalogs {
    LanguageCatalogs {
        language: language.to_string(),
        files: BTreeMap::new(),
    }
}

fn collect_language_dir(root: &Path, dir: &Path, language: &str) -> BTreeMap<String, CatalogFile> {
    WalkDir::new(dir)
        .sort_by_file_name()
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| !entry.file_name().to_string_lossy().starts_with('.'))
        .filter_map(|entry| {
            let path = entry.path();
            let format = CatalogFormat::from_path(path)?;
            let id = display_path(path, dir);
            Some(load_catalog_file(root, path, id, format, language))
        })
        .map(|file| (file.id.clone(), file))
        .collect()
}

fn load_catalog_file(
    root: &Path,
    path: &Path,
    id: String,
    format: CatalogFormat,
    language: &str,
) -> CatalogFile {
    let tree = match parse_catalog(path, format) {
        Ok(value) => CatalogTree::Parsed(strip_language_root(value, language)),
        Err(error) => {
            tracing::warn!(path = %path.display(), %error, "malformed locale catalog");
            CatalogTree::Malformed { error }
        }
    };

    CatalogFile {
        id,
        path: path.to_path_buf(),
        display: display_path(path, root),
        tree,
    }
}

/// Read and parse a catalog file into a tree whose root is an object.
pub fn parse_catalog(path: &Path, format: CatalogFormat) -> Result<Value, String> {
    let content = fs::read_to_string(path).map_err(|e| format!("failed to read: {}", e))?;
    parse_catalog_str(&content, format)
}

pub fn parse_catalog_str(content: &str, format: CatalogFormat) -> Result<Value, String> {
    let value: Value = match format {
        CatalogFormat::Json => serde_json::from_str(content).map_err(|e| e.to_string())?,
        CatalogFormat::Yaml => {
            if content.trim().is_empty() {
                Value::Object(Map::new())
            } else {
                serde_yaml::from_str(content).map_err(|e| e.to_string())?
            }
        }
    };

    if value.is_object() {
        Ok(value)
    } else {
        Err("catalog root must be an object".to_string())
    }
}

/// Unwrap `{"en": {...}}` in the `en` catalog (Rails-style files).
fn strip_language_root(value: Value, language: &str) -> Value {
    match value {
        Value::Object(mut map) if map.len() == 1 && map.get(language).is_some_and(Value::is_object) => {
            map.remove(language).unwrap_or_default()
        }
        other => other,
    }
}
