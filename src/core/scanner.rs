//! Source tree scanning: file discovery and per-file extraction.
//!
//! Files are discovered with `walkdir`, filtered by include/ignore globs and
//! test-file patterns, then scanned in parallel. A file that cannot be read
//! becomes a warning; it never aborts the scan.

use std::{
    collections::HashSet,
    path::{Path, PathBuf},
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
};

use glob::Pattern;
use rayon::prelude::*;
use serde::Serialize;
use walkdir::{DirEntry, WalkDir};

use super::{
    error::{ScanError, ScanWarning, WarningKind},
    extractor::{ExtractOptions, TextMatch, scan_file},
    framework::{Framework, FrameworkSetting},
    patterns::{PatternCatalog, TextBounds},
};
use crate::utils::display_path;

/// Extensions of files that may contain user-facing text.
pub const SOURCE_EXTENSIONS: &[&str] = &[
    "js", "jsx", "ts", "tsx", "mjs", "cjs", "vue", "svelte", "html", "htm", "erb", "haml", "slim",
    "py", "rb", "php", "jinja", "jinja2", "j2", "twig", "hbs", "handlebars", "mustache",
];

/// Directory names never descended into.
pub const SKIPPED_DIRS: &[&str] = &[
    "node_modules",
    "target",
    "dist",
    "build",
    "out",
    "coverage",
    "vendor",
    "venv",
    "__pycache__",
    "site-packages",
];

/// Globs skipped unless test files are explicitly included.
pub const TEST_FILE_PATTERNS: &[&str] = &[
    "**/*.test.tsx",
    "**/*.test.ts",
    "**/*.test.jsx",
    "**/*.test.js",
    "**/*.spec.tsx",
    "**/*.spec.ts",
    "**/*.spec.jsx",
    "**/*.spec.js",
    "**/__tests__/**",
    "**/test_*.py",
    "**/*_test.py",
    "**/*_spec.rb",
    "**/*_test.rb",
    "spec/**",
    "test/**",
    "tests/**",
];

/// Inputs for a source scan.
#[derive(Debug, Clone)]
pub struct ScanOptions {
    pub root: PathBuf,
    pub framework: FrameworkSetting,
    /// Globs or literal directory prefixes, relative to `root`. Empty means everything.
    pub includes: Vec<String>,
    /// Globs or literal path prefixes, relative to `root`.
    pub ignores: Vec<String>,
    pub ignore_texts: HashSet<String>,
    pub bounds: TextBounds,
    pub include_tests: bool,
    /// Checked between files; once set, remaining files are skipped.
    pub cancel: Option<Arc<AtomicBool>>,
}

impl ScanOptions {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            framework: FrameworkSetting::Auto,
            includes: Vec::new(),
            ignores: Vec::new(),
            ignore_texts: HashSet::new(),
            bounds: TextBounds::default(),
            include_tests: false,
            cancel: None,
        }
    }

    fn is_cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
    }
}

/// Matches found in one file.
#[derive(Debug, Clone, Serialize)]
pub struct FileMatches {
    /// Path relative to the scan root.
    pub path: String,
    pub matches: Vec<TextMatch>,
}

/// Aggregate outcome of a source scan.
#[derive(Debug, Clone, Serialize)]
pub struct ScanResult {
    pub root: PathBuf,
    pub framework: Framework,
    /// One entry per successfully scanned file, sorted by path.
    pub files: Vec<FileMatches>,
    pub files_scanned: usize,
    pub total_matches: usize,
    pub files_with_matches: usize,
    pub warnings: Vec<ScanWarning>,
    /// True when the scan stopped early on request.
    pub cancelled: bool,
}

impl ScanResult {
    /// Files that produced at least one match.
    pub fn matched_files(&self) -> impl Iterator<Item = &FileMatches> {
        self.files.iter().filter(|f| !f.matches.is_empty())
    }
}

/// Files selected for scanning plus walk problems.
#[derive(Debug, Default)]
pub struct CollectedFiles {
    pub files: Vec<PathBuf>,
    pub warnings: Vec<ScanWarning>,
}

/// Split patterns into glob matchers and literal path prefixes.
struct PathFilter {
    globs: Vec<Pattern>,
    literals: Vec<PathBuf>,
}

impl PathFilter {
    fn new(patterns: &[String]) -> Self {
        let mut globs = Vec::new();
        let mut literals = Vec::new();

        for p in patterns {
            if is_glob_pattern(p) {
                match Pattern::new(p) {
                    Ok(pattern) => globs.push(pattern),
                    Err(e) => tracing::warn!(pattern = %p, error = %e, "ignoring invalid glob pattern"),
                }
            } else {
                let literal = p.trim_start_matches("./").trim_end_matches('/');
                if !literal.is_empty() {
                    literals.push(PathBuf::from(literal));
                }
            }
        }

        Self { globs, literals }
    }

    fn is_empty(&self) -> bool {
        self.globs.is_empty() && self.literals.is_empty()
    }

    fn matches(&self, relative: &Path, relative_str: &str) -> bool {
        self.literals.iter().any(|lit| relative.starts_with(lit))
            || self.globs.iter().any(|g| g.matches(relative_str))
    }
}

/// Check if a pattern contains glob wildcards (* or ?).
/// Patterns without wildcards are treated as literal paths.
fn is_glob_pattern(pattern: &str) -> bool {
    pattern.contains('*') || pattern.contains('?')
}

fn is_skipped_dir(entry: &DirEntry) -> bool {
    if entry.depth() == 0 || !entry.file_type().is_dir() {
        return false;
    }
    let name = entry.file_name().to_string_lossy();
    name.starts_with('.') || SKIPPED_DIRS.iter().any(|dir| *dir == name)
}

pub fn is_source_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| SOURCE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
}

/// Walk `options.root` and select source files to scan, sorted by path.
pub fn collect_source_files(options: &ScanOptions) -> CollectedFiles {
    let root = options.root.as_path();
    let includes = PathFilter::new(&options.includes);
    let mut ignore_patterns = options.ignores.clone();
    if !options.include_tests {
        ignore_patterns.extend(TEST_FILE_PATTERNS.iter().map(|p| p.to_string()));
    }
    let ignores = PathFilter::new(&ignore_patterns);

    let mut collected = CollectedFiles::default();

    for entry in WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !is_skipped_dir(e))
    {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                let subject = e
                    .path()
                    .map(|p| display_path(p, root))
                    .unwrap_or_else(|| root.display().to_string());
                tracing::warn!(path = %subject, error = %e, "cannot access path");
                collected.warnings.push(ScanWarning::new(
                    WarningKind::InaccessiblePath,
                    subject,
                    e.to_string(),
                ));
                continue;
            }
        };

        let path = entry.path();
        if !entry.file_type().is_file() || !is_source_file(path) {
            continue;
        }

        let relative = path.strip_prefix(root).unwrap_or(path);
        let relative_str = display_path(path, root);

        if !includes.is_empty() && !includes.matches(relative, &relative_str) {
            continue;
        }
        if ignores.matches(relative, &relative_str) {
            continue;
        }

        collected.files.push(path.to_path_buf());
    }

    collected
}

/// Scan every selected file under `options.root` with rules from `catalog`.
///
/// Fails only when the root itself is missing or not a directory.
pub fn scan_directory(options: &ScanOptions, catalog: &PatternCatalog) -> Result<ScanResult, ScanError> {
    let root = options.root.as_path();
    if !root.exists() {
        return Err(ScanError::SourceRootMissing(root.to_path_buf()));
    }
    if !root.is_dir() {
        return Err(ScanError::NotADirectory(root.to_path_buf()));
    }

    let framework = options.framework.resolve(root);
    let rules = catalog.patterns(framework);
    let extract_options = ExtractOptions {
        bounds: options.bounds,
        framework,
        ignore_texts: options.ignore_texts.clone(),
        skip_identifiers: true,
    };

    let CollectedFiles {
        files: paths,
        mut warnings,
    } = collect_source_files(options);
    warnings.extend(catalog.invalid_rules().iter().cloned());

    tracing::debug!(
        root = %root.display(),
        %framework,
        files = paths.len(),
        rules = rules.len(),
        "scanning source files"
    );

    let outcomes: Vec<_> = paths
        .par_iter()
        .map(|path| {
            if options.is_cancelled() {
                return None;
            }
            Some((path, scan_file(path, &rules, &extract_options)))
        })
        .collect();

    let cancelled = outcomes.iter().any(Option::is_none);
    let mut files = Vec::new();

    for (path, outcome) in outcomes.into_iter().flatten() {
        let relative = display_path(path, root);
        match outcome {
            Ok(matches) => {
                tracing::debug!(path = %relative, matches = matches.len(), "scanned file");
                files.push(FileMatches {
                    path: relative,
                    matches,
                });
            }
            Err(e) => {
                tracing::warn!(path = %relative, error = %e, "skipping unreadable file");
                warnings.push(ScanWarning::new(WarningKind::UnreadableFile, relative, e.to_string()));
            }
        }
    }

    let total_matches = files.iter().map(|f| f.matches.len()).sum();
    let files_with_matches = files.iter().filter(|f| !f.matches.is_empty()).count();

    Ok(ScanResult {
        root: root.to_path_buf(),
        framework,
        files_scanned: files.len(),
        total_matches,
        files_with_matches,
        files,
        warnings,
        cancelled,
    })
}

#[cfg(test)]
mod tests {
    use crate::core::scanner::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::{TempDir, tempdir};

    fn project(files: &[(&str, &str)]) -> TempDir {
        let dir = tempdir().unwrap();
        for (rel, content) in files {
            let path = dir.path().join(rel);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, content).unwrap();
        }
        dir
    }

    fn collected_names(options: &ScanOptions) -> Vec<String> {
        collect_source_files(options)
            .files
            .iter()
            .map(|p| display_path(p, &options.root))
            .collect()
    }

    #[test]
    fn test_test_file_patterns_are_valid_globs() {
        for pattern in TEST_FILE_PATTERNS {
            assert!(Pattern::new(pattern).is_ok(), "invalid glob: {pattern}");
        }
    }

    #[test]
    fn test_collect_filters_extensions_and_dirs() {
        let dir = project(&[
            ("src/app.js", ""),
            ("src/styles.css", ""),
            ("templates/index.html", ""),
            ("node_modules/lib/index.js", ""),
            (".git/hooks/pre-commit.py", ""),
        ]);

        let options = ScanOptions::new(dir.path());
        assert_eq!(
            collected_names(&options),
            vec!["src/app.js", "templates/index.html"]
        );
    }

    #[test]
    fn test_collect_skips_tests_by_default() {
        let dir = project(&[
            ("src/app.ts", ""),
            ("src/app.test.ts", ""),
            ("src/__tests__/util.js", ""),
            ("tests/test_views.py", ""),
        ]);

        let mut options = ScanOptions::new(dir.path());
        assert_eq!(collected_names(&options), vec!["src/app.ts"]);

        options.include_tests = true;
        assert_eq!(collected_names(&options).len(), 4);
    }

    #[test]
    fn test_collect_includes_and_ignores() {
        let dir = project(&[
            ("src/components/Button.jsx", ""),
            ("src/generated/api.js", ""),
            ("scripts/build.js", ""),
        ]);

        let mut options = ScanOptions::new(dir.path());
        options.includes = vec!["src".to_string()];
        options.ignores = vec!["**/generated/**".to_string()];

        assert_eq!(collected_names(&options), vec!["src/components/Button.jsx"]);
    }

    #[test]
    fn test_collect_glob_include() {
        let dir = project(&[("app/views/home.html.erb", ""), ("app/models/user.rb", "")]);

        let mut options = ScanOptions::new(dir.path());
        options.includes = vec!["app/views/**".to_string()];

        assert_eq!(collected_names(&options), vec!["app/views/home.html.erb"]);
    }

    #[test]
    fn test_scan_directory_counts() {
        let dir = project(&[
            ("src/a.js", "console.log('Hello World')"),
            ("src/b.js", "const x = t('menu.title');"),
            ("src/c.html", "<p>Welcome</p>\n<p>Goodbye friend</p>"),
        ]);

        let mut options = ScanOptions::new(dir.path());
        options.framework = FrameworkSetting::Fixed(Framework::Generic);
        let result = scan_directory(&options, &PatternCatalog::default()).unwrap();

        assert_eq!(result.files_scanned, 3);
        assert_eq!(result.files_with_matches, 2);
        assert_eq!(result.total_matches, 3);
        assert!(result.warnings.is_empty());
        assert!(!result.cancelled);

        let paths: Vec<&str> = result.files.iter().map(|f| f.path.as_str()).collect();
        assert_eq!(paths, vec!["src/a.js", "src/b.js", "src/c.html"]);
        assert_eq!(result.files[0].matches[0].suggestion.key, "ui.hello_world");
    }

    #[test]
    fn test_unreadable_file_becomes_warning() {
        let mut files: Vec<(String, String)> = (0..99)
            .map(|i| (format!("src/file{:03}.js", i), "alert('Hello there')".to_string()))
            .collect();
        files.push(("src/file050_bad.js".to_string(), String::new()));
        let refs: Vec<(&str, &str)> = files
            .iter()
            .map(|(p, c)| (p.as_str(), c.as_str()))
            .collect();
        let dir = project(&refs);
        // Invalid UTF-8 makes read_to_string fail regardless of permissions.
        fs::write(dir.path().join("src/file050_bad.js"), [0xff, 0xfe, 0xfd]).unwrap();

        let mut options = ScanOptions::new(dir.path());
        options.framework = FrameworkSetting::Fixed(Framework::Generic);
        let result = scan_directory(&options, &PatternCatalog::default()).unwrap();

        assert_eq!(result.files_scanned, 99);
        assert_eq!(result.total_matches, 99);
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(result.warnings[0].kind, WarningKind::UnreadableFile);
        assert_eq!(result.warnings[0].subject, "src/file050_bad.js");
    }

    #[test]
    fn test_missing_root_is_fatal() {
        let options = ScanOptions::new("/nonexistent/project");
        let result = scan_directory(&options, &PatternCatalog::default());
        assert!(matches!(result, Err(ScanError::SourceRootMissing(_))));
    }

    #[test]
    fn test_cancelled_scan() {
        let dir = project(&[("a.js", "alert('Hello there')"), ("b.js", "alert('Hi again')")]);

        let mut options = ScanOptions::new(dir.path());
        options.cancel = Some(Arc::new(AtomicBool::new(true)));
        let result = scan_directory(&options, &PatternCatalog::default()).unwrap();

        assert!(result.cancelled);
        assert_eq!(result.files_scanned, 0);
    }

    #[test]
    fn test_auto_framework_detection() {
        let dir = project(&[
            ("package.json", r#"{"dependencies": {"vue": "3"}}"#),
            ("src/App.vue", r#"<input :title="'Search here'" />"#),
        ]);

        let options = ScanOptions::new(dir.path());
        let result = scan_directory(&options, &PatternCatalog::default()).unwrap();

        assert_eq!(result.framework, Framework::Vue);
        assert!(
            result.files[0]
                .matches
                .iter()
                .any(|m| m.rule_id == "vue-bound-literal")
        );
    }
}
