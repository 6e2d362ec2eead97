//! Text classification: is a candidate snippet human-readable text?
//!
//! Two-part rule: a validity ratio (letters, digits, whitespace and a small
//! punctuation whitelist must make up at least half of the text) plus the
//! presence of at least one letter from a supported script. Numeric content is
//! never translatable, even when it contains punctuation ("3.14").

/// Minimum trimmed length (in chars) of translatable text.
pub const MIN_TRANSLATABLE_CHARS: usize = 3;

/// Minimum share of valid characters.
pub const MIN_VALID_RATIO: f64 = 0.5;

const WHITELISTED_PUNCTUATION: &[char] = &[
    '.', ',', '!', '?', '\'', '"', '-', ':', ';', '(', ')', '…', '¡', '¿', '。', '、', '！', '？',
    '，',
];

const NUMERIC_PUNCTUATION: &[char] = &['.', ',', '-', '+', '%', ':', '/', ' '];

/// Decide whether `candidate` is worth flagging as untranslated text.
///
/// ```
/// use glossa::core::classifier::is_translatable;
///
/// assert!(is_translatable("Hello World"));
/// assert!(is_translatable("Привет мир"));
/// assert!(is_translatable("你好世界"));
/// assert!(!is_translatable("123"));
/// assert!(!is_translatable("3.14"));
/// assert!(!is_translatable("---"));
/// assert!(!is_translatable("ab"));
/// ```
pub fn is_translatable(candidate: &str) -> bool {
    let text = candidate.trim();
    let total = text.chars().count();

    if total < MIN_TRANSLATABLE_CHARS {
        return false;
    }
    if is_numeric(text) {
        return false;
    }
    if !text.chars().any(char::is_alphanumeric) {
        return false;
    }

    let valid = text.chars().filter(|&c| is_valid_char(c)).count();
    if (valid as f64) / (total as f64) < MIN_VALID_RATIO {
        return false;
    }

    text.chars().any(is_supported_letter)
}

/// Digits with optional numeric punctuation and nothing else.
pub fn is_numeric(text: &str) -> bool {
    let mut has_digit = false;
    for c in text.chars() {
        if c.is_ascii_digit() {
            has_digit = true;
        } else if !NUMERIC_PUNCTUATION.contains(&c) {
            return false;
        }
    }
    has_digit
}

fn is_valid_char(c: char) -> bool {
    c.is_alphanumeric() || c.is_whitespace() || WHITELISTED_PUNCTUATION.contains(&c)
}

/// Latin (incl. Latin-1 and Extended-A/B), Cyrillic, CJK ideographs, kana or Hangul.
pub fn is_supported_letter(c: char) -> bool {
    matches!(c,
        'a'..='z'
        | 'A'..='Z'
        | '\u{00C0}'..='\u{00D6}'
        | '\u{00D8}'..='\u{00F6}'
        | '\u{00F8}'..='\u{024F}'
        | '\u{0400}'..='\u{04FF}'
        | '\u{0500}'..='\u{052F}'
        | '\u{3040}'..='\u{30FF}'
        | '\u{3400}'..='\u{4DBF}'
        | '\u{4E00}'..='\u{9FFF}'
        | '\u{1100}'..='\u{11FF}'
        | '\u{3130}'..='\u{318F}'
        | '\u{AC00}'..='\u{D7AF}'
    )
}

/// Single tokens that read like identifiers, paths, URLs or CSS classes.
///
/// Used by the extractor as an extra filter on top of [`is_translatable`];
/// anything containing whitespace is never considered code-like here.
pub fn looks_like_identifier(text: &str) -> bool {
    let text = text.trim();
    if text.is_empty() || text.chars().any(char::is_whitespace) {
        return false;
    }

    if text.contains("://") || text.starts_with("./") || text.starts_with("../") {
        return true;
    }
    if text.starts_with('#') || text.starts_with('@') || text.starts_with('/') {
        return true;
    }

    let inner = text.trim_end_matches(['.', '!', '?', ':']);
    if inner.chars().any(|c| {
        matches!(
            c,
            '_' | '.' | '/' | '\\' | '=' | '<' | '>' | '{' | '}' | '[' | ']' | '$'
        )
    }) {
        return true;
    }

    // kebab-case class names and ids: "btn-primary", "nav-item-2"
    if inner.contains('-')
        && inner
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return true;
    }

    // camelCase / PascalCase identifiers with an inner capital: "onClick", "UserProfile"
    inner.chars().all(|c| c.is_ascii_alphanumeric())
        && inner
            .chars()
            .zip(inner.chars().skip(1))
            .any(|(a, b)| a.is_ascii_lowercase() && b.is_ascii_uppercase())
}
