//! Suggestion generation: proposed translation keys and replacement snippets.
//!
//! Key normalization is lossy (stripping + truncation), so two distinct texts
//! can map to the same key. Suggestions are advisory; callers that need unique
//! keys should run [`disambiguate_keys`] over the collected suggestions.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use super::framework::Framework;

/// Namespace prefix for generated keys.
pub const KEY_PREFIX: &str = "ui.";

/// Maximum length of the normalized key body (without prefix).
pub const MAX_KEY_LENGTH: usize = 50;

/// Key body used when normalization strips every character.
const FALLBACK_KEY: &str = "text";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Suggestion {
    pub key: String,
    pub original_text: String,
    /// Framework the scan ran with; selects [`Suggestion::preferred_snippet`].
    pub framework: Framework,
    pub snippets: BTreeMap<Framework, String>,
}

impl Suggestion {
    /// Replacement snippet for the framework resolved at scan time.
    pub fn preferred_snippet(&self) -> &str {
        self.snippets
            .get(&self.framework)
            .map(String::as_str)
            .unwrap_or_default()
    }
}

/// Build a suggestion for `text` found in a project using `framework`.
pub fn generate_suggestion(text: &str, framework: Framework) -> Suggestion {
    let key = normalize_key(text);
    let snippets = Framework::ALL
        .iter()
        .map(|&fw| (fw, snippet_for(fw, &key, text)))
        .collect();

    Suggestion {
        key,
        original_text: text.to_string(),
        framework,
        snippets,
    }
}

/// Normalize text into a dotted translation key.
///
/// ```
/// use glossa::core::suggestion::normalize_key;
///
/// assert_eq!(normalize_key("Hello World"), "ui.hello_world");
/// assert_eq!(normalize_key("  Save   changes! "), "ui.save_changes");
/// ```
pub fn normalize_key(text: &str) -> String {
    let lowered = text.to_lowercase();
    let kept: String = lowered
        .chars()
        .filter_map(|c| {
            if c.is_ascii_lowercase() || c.is_ascii_digit() {
                Some(c)
            } else if c.is_whitespace() {
                Some(' ')
            } else {
                None
            }
        })
        .collect();

    let body: String = kept
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .chars()
        .take(MAX_KEY_LENGTH)
        .collect();
    let body = body.trim_end_matches('_');

    if body.is_empty() {
        format!("{}{}", KEY_PREFIX, FALLBACK_KEY)
    } else {
        format!("{}{}", KEY_PREFIX, body)
    }
}

fn snippet_for(framework: Framework, key: &str, text: &str) -> String {
    let escaped = text.replace('"', "\\\"");
    match framework {
        Framework::Generic => format!("t('{}')", key),
        Framework::React => format!("{{t('{}')}}", key),
        Framework::NextJs => {
            format!("const t = useTranslations();\n{{t('{}')}}", key)
        }
        Framework::Vue => format!("{{{{ $t('{}') }}}}", key),
        Framework::Angular => format!("{{{{ '{}' | translate }}}}", key),
        Framework::Svelte => format!("{{$_('{}')}}", key),
        Framework::Django => format!("{{% trans \"{}\" %}}", escaped),
        Framework::Flask => format!("{{{{ _(\"{}\") }}}}", escaped),
        Framework::Rails => format!("<%= t('{}') %>", key),
    }
}

/// Append `_2`, `_3`, ... to keys that collide with an earlier key for a
/// different original text. Identical texts share a key.
pub fn disambiguate_keys<'a>(suggestions: impl IntoIterator<Item = &'a Suggestion>) -> Vec<String> {
    let mut owners: HashMap<String, &str> = HashMap::new();
    let mut counters: HashMap<String, usize> = HashMap::new();
    let mut assigned: HashMap<&str, String> = HashMap::new();
    let mut keys = Vec::new();

    for suggestion in suggestions {
        if let Some(key) = assigned.get(suggestion.original_text.as_str()) {
            keys.push(key.clone());
            continue;
        }

        let key = match owners.get(&suggestion.key) {
            None => {
                owners.insert(suggestion.key.clone(), &suggestion.original_text);
                suggestion.key.clone()
            }
            Some(_) => {
                let counter = counters.entry(suggestion.key.clone()).or_insert(1);
                loop {
                    *counter += 1;
                    let candidate = format!("{}_{}", suggestion.key, counter);
                    if !owners.contains_key(&candidate) {
                        owners.insert(candidate.clone(), &suggestion.original_text);
                        break candidate;
                    }
                }
            }
        };

        assigned.insert(&suggestion.original_text, key.clone());
        keys.push(key);
    }

    keys
}
