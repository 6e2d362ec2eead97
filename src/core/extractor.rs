//! Extraction of untranslated text candidates from source content.
//!
//! Rules run over the full file content (not line by line) so multi-line
//! template literals and markup blocks match. Each hit is filtered by:
//! 1. the translation-call look-behind ([`is_inside_translation_call`]),
//! 2. the text classifier,
//! 3. the configured length bounds and ignore list.
//!
//! Matches are not de-duplicated across rules: the same text hit by two rule
//! categories yields two records.

use std::{collections::HashSet, fs, path::Path, sync::LazyLock};

use regex::Regex;
use serde::Serialize;

use super::{
    classifier::{is_translatable, looks_like_identifier},
    error::ScanError,
    framework::Framework,
    patterns::{PatternRule, TextBounds},
    suggestion::{Suggestion, generate_suggestion},
};
use crate::utils::LineIndex;

/// How many characters before a match are inspected for a translation call.
pub const LOOK_BEHIND_CHARS: usize = 20;

static TRANSLATION_CALL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?x)
        (?:
            (?:^|[^A-Za-z0-9_$])
            (?:\$t|\$_|\$tc|t|tc|_|__|_t|gettext|ngettext|pgettext|ugettext|gettext_lazy|translate|trans|formatMessage|i18n\.t|I18n\.t|I18n\.translate|intl\.formatMessage)
            \s*\(\s*(?:\{\s*(?:id|defaultMessage)\s*:\s*)?["'`]?$
        )
        |
        (?:\{%-?\s*(?:trans|blocktrans|blocktranslate|translate)\b[^%]*(?:%\})?\s*$)
        |
        (?:v-t\s*=\s*"?'?$)
        "#,
    )
    .expect("translation call pattern is valid")
});

/// Heuristic: is the text at byte `match_index` an argument of a translation call?
///
/// Looks at the preceding [`LOOK_BEHIND_CHARS`] characters for a known
/// translation identifier followed by an opening parenthesis (`t('`, `_("`,
/// `i18n.t(`), or an open template translation block (`{% trans "`,
/// `{% blocktrans %}`). This is textual, not syntactic: a call split across
/// more than the window, or an alias with an unknown name, is not recognized.
pub fn is_inside_translation_call(content: &str, match_index: usize) -> bool {
    if match_index > content.len() || !content.is_char_boundary(match_index) {
        return false;
    }
    let before = &content[..match_index];
    let start = before
        .char_indices()
        .rev()
        .nth(LOOK_BEHIND_CHARS - 1)
        .map(|(i, _)| i)
        .unwrap_or(0);
    TRANSLATION_CALL.is_match(&before[start..])
}

/// Per-scan extraction settings.
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    pub bounds: TextBounds,
    pub framework: Framework,
    /// Exact texts (trimmed) that are never reported.
    pub ignore_texts: HashSet<String>,
    /// Drop single tokens that read like identifiers, paths or URLs.
    pub skip_identifiers: bool,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            bounds: TextBounds::default(),
            framework: Framework::Generic,
            ignore_texts: HashSet::new(),
            skip_identifiers: true,
        }
    }
}

impl ExtractOptions {
    pub fn for_framework(framework: Framework) -> Self {
        Self {
            framework,
            ..Default::default()
        }
    }
}

/// A candidate untranslated text found in a source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextMatch {
    pub text: String,
    /// 1-based line of the first character of `text`.
    pub line: usize,
    /// 0-based column (in chars) within `line`.
    pub column: usize,
    pub source_line: String,
    pub rule_id: String,
    pub suggestion: Suggestion,
}

/// Read and scan a single file.
pub fn scan_file(
    path: &Path,
    rules: &[&PatternRule],
    options: &ExtractOptions,
) -> Result<Vec<TextMatch>, ScanError> {
    let content = fs::read_to_string(path).map_err(|source| ScanError::Unreadable {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(scan_content(&content, rules, options))
}

/// Apply `rules` in order to `content` and collect accepted matches.
pub fn scan_content(content: &str, rules: &[&PatternRule], options: &ExtractOptions) -> Vec<TextMatch> {
    let line_index = LineIndex::new(content);
    let mut matches = Vec::new();

    for rule in rules {
        for captures in rule.regex.captures_iter(content) {
            let Some(whole) = captures.get(0) else {
                continue;
            };
            let Some(candidate) = captures.get(rule.capture) else {
                continue;
            };

            if is_inside_translation_call(content, whole.start()) {
                continue;
            }

            let raw = candidate.as_str();
            let text = raw.trim();
            if !accepts(text, options) {
                continue;
            }

            let offset = candidate.start() + (raw.len() - raw.trim_start().len());
            let (line, column) = line_index.position(content, offset);

            matches.push(TextMatch {
                text: text.to_string(),
                line,
                column,
                source_line: line_index.line_text(content, line).to_string(),
                rule_id: rule.id.clone(),
                suggestion: generate_suggestion(text, options.framework),
            });
        }
    }

    matches
}

fn accepts(text: &str, options: &ExtractOptions) -> bool {
    if !options.bounds.contains(text) {
        return false;
    }
    if options.ignore_texts.contains(text) {
        return false;
    }
    if options.skip_identifiers && looks_like_identifier(text) {
        return false;
    }
    is_translatable(text)
}
