//! Pattern catalog: text-matching rules grouped by framework.
//!
//! The catalog is an immutable value built once and passed into the extractor.
//! Every framework sees the base rules first, followed by its own additions in
//! declaration order, so results are reproducible across runs.
//!
//! Rule patterns may contain `{min}`/`{max}` placeholders which are substituted
//! with the configured [`TextBounds`] before compilation.

use std::{collections::BTreeMap, fmt};

use regex::Regex;
use serde::Serialize;

use super::error::{ScanWarning, WarningKind};
use super::framework::Framework;

pub const DEFAULT_MIN_LENGTH: usize = 2;
pub const DEFAULT_MAX_LENGTH: usize = 99;

/// Length bounds applied both inside rule patterns and after extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TextBounds {
    pub min: usize,
    pub max: usize,
}

impl Default for TextBounds {
    fn default() -> Self {
        Self {
            min: DEFAULT_MIN_LENGTH,
            max: DEFAULT_MAX_LENGTH,
        }
    }
}

impl TextBounds {
    pub fn new(min: usize, max: usize) -> Self {
        Self { min, max }
    }

    /// Check the length (in chars) of `text`.
    pub fn contains(&self, text: &str) -> bool {
        let len = text.chars().count();
        len >= self.min && len <= self.max
    }
}

/// What kind of source construct a rule targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RuleCategory {
    StringLiteral,
    TemplateLiteral,
    MarkupText,
    Attribute,
    Directive,
    TemplateBlock,
    ServerCall,
}

impl fmt::Display for RuleCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RuleCategory::StringLiteral => "string-literal",
            RuleCategory::TemplateLiteral => "template-literal",
            RuleCategory::MarkupText => "markup-text",
            RuleCategory::Attribute => "attribute",
            RuleCategory::Directive => "directive",
            RuleCategory::TemplateBlock => "template-block",
            RuleCategory::ServerCall => "server-call",
        };
        f.write_str(name)
    }
}

/// Uncompiled rule definition.
#[derive(Debug, Clone)]
pub struct RuleSpec {
    pub id: String,
    pub category: RuleCategory,
    pub pattern: String,
    /// Capture group holding the candidate text; 0 means the whole match.
    pub capture: usize,
}

impl RuleSpec {
    pub fn new(
        id: impl Into<String>,
        category: RuleCategory,
        pattern: impl Into<String>,
        capture: usize,
    ) -> Self {
        Self {
            id: id.into(),
            category,
            pattern: pattern.into(),
            capture,
        }
    }

    fn compile(&self, bounds: TextBounds) -> Result<PatternRule, regex::Error> {
        let source = self
            .pattern
            .replace("{min}", &bounds.min.to_string())
            .replace("{max}", &bounds.max.to_string());
        Ok(PatternRule {
            id: self.id.clone(),
            category: self.category,
            regex: Regex::new(&source)?,
            capture: self.capture,
        })
    }
}

/// A compiled rule ready for matching.
#[derive(Debug, Clone)]
pub struct PatternRule {
    pub id: String,
    pub category: RuleCategory,
    pub regex: Regex,
    pub capture: usize,
}

/// Immutable set of compiled rules keyed by framework.
#[derive(Debug, Clone)]
pub struct PatternCatalog {
    bounds: TextBounds,
    base: Vec<PatternRule>,
    frameworks: BTreeMap<Framework, Vec<PatternRule>>,
    invalid: Vec<ScanWarning>,
}

impl Default for PatternCatalog {
    fn default() -> Self {
        Self::new(TextBounds::default())
    }
}

impl PatternCatalog {
    /// Build the built-in catalog with the given length bounds.
    pub fn new(bounds: TextBounds) -> Self {
        let framework_specs = Framework::ALL
            .iter()
            .map(|&framework| (framework, framework_specs(framework)))
            .collect();
        Self::from_specs(&base_specs(), framework_specs, bounds)
    }

    /// Build a catalog from custom rule definitions.
    ///
    /// Rules that fail to compile are dropped and reported through
    /// [`PatternCatalog::invalid_rules`]; they never abort construction.
    pub fn from_specs(
        base: &[RuleSpec],
        framework_specs: BTreeMap<Framework, Vec<RuleSpec>>,
        bounds: TextBounds,
    ) -> Self {
        let mut invalid = Vec::new();
        let base = compile_all(base, bounds, &mut invalid);
        let frameworks = framework_specs
            .into_iter()
            .map(|(framework, specs)| (framework, compile_all(&specs, bounds, &mut invalid)))
            .collect();

        Self {
            bounds,
            base,
            frameworks,
            invalid,
        }
    }

    /// Ordered rules for a framework: base rules, then framework additions.
    pub fn patterns(&self, framework: Framework) -> Vec<&PatternRule> {
        let extra = self
            .frameworks
            .get(&framework)
            .map(|rules| rules.as_slice())
            .unwrap_or_default();
        self.base.iter().chain(extra).collect()
    }

    /// Ordered rules for a free-form tag; unknown tags get the base rules only.
    pub fn patterns_for_tag(&self, tag: &str) -> Vec<&PatternRule> {
        self.patterns(Framework::from_tag_lossy(tag))
    }

    pub fn bounds(&self) -> TextBounds {
        self.bounds
    }

    /// Warnings for rules that failed to compile.
    pub fn invalid_rules(&self) -> &[ScanWarning] {
        &self.invalid
    }
}

fn compile_all(specs: &[RuleSpec], bounds: TextBounds, invalid: &mut Vec<ScanWarning>) -> Vec<PatternRule> {
    specs
        .iter()
        .filter_map(|spec| match spec.compile(bounds) {
            Ok(rule) => Some(rule),
            Err(e) => {
                tracing::warn!(rule = %spec.id, error = %e, "skipping invalid pattern rule");
                invalid.push(ScanWarning::new(
                    WarningKind::InvalidRule,
                    spec.id.clone(),
                    e.to_string(),
                ));
                None
            }
        })
        .collect()
}

/// Rules applied to every framework.
pub fn base_specs() -> Vec<RuleSpec> {
    use RuleCategory::*;
    vec![
        // Literals are matched whole so a short or escaped one never pairs its
        // closing quote with the next literal's opening quote. Length bounds
        // are enforced after extraction.
        RuleSpec::new("double-quoted", StringLiteral, r#""((?:[^"\\\r\n]|\\.)*)""#, 1),
        RuleSpec::new("single-quoted", StringLiteral, r#"'((?:[^'\\\r\n]|\\.)*)'"#, 1),
        // Interpolated templates are consumed without a capture.
        RuleSpec::new(
            "template-literal",
            TemplateLiteral,
            r"`(?:((?:[^`$\\]|\\.)*)`|(?:[^`\\]|\\.)*`)",
            1,
        ),
        RuleSpec::new("tag-text", MarkupText, r">([^<>{}]{{min},{max}})<", 1),
        RuleSpec::new(
            "attribute",
            Attribute,
            r#"\b(?:title|alt|placeholder|aria-label)\s*=\s*["']([^"'{}]{{min},{max}})["']"#,
            1,
        ),
    ]
}

/// Additions for a single framework, in catalog order.
pub fn framework_specs(framework: Framework) -> Vec<RuleSpec> {
    use RuleCategory::*;
    match framework {
        Framework::Generic => Vec::new(),
        Framework::React | Framework::NextJs => vec![
            RuleSpec::new(
                "jsx-expression-literal",
                Directive,
                r#"\{\s*["'`]([^"'`{}\r\n]{{min},{max}})["'`]\s*\}"#,
                1,
            ),
            RuleSpec::new(
                "jsx-text-prop",
                Attribute,
                r#"\b(?:label|helperText|tooltip|description|aria-description|emptyText)\s*=\s*["']([^"'{}]{{min},{max}})["']"#,
                1,
            ),
        ],
        Framework::Vue => vec![
            RuleSpec::new(
                "vue-bound-literal",
                Directive,
                r#"(?::|v-bind:)(?:title|label|placeholder|alt)\s*=\s*"'([^"'\r\n]{{min},{max}})'""#,
                1,
            ),
            RuleSpec::new(
                "vue-mustache-literal",
                Directive,
                r#"\{\{\s*["']([^"'{}\r\n]{{min},{max}})["']\s*\}\}"#,
                1,
            ),
            RuleSpec::new(
                "vue-v-text",
                Directive,
                r#"v-(?:text|html)\s*=\s*"'([^"'\r\n]{{min},{max}})'""#,
                1,
            ),
        ],
        Framework::Angular => vec![
            RuleSpec::new(
                "angular-interpolation-literal",
                Directive,
                r#"\{\{\s*'([^'{}|\r\n]{{min},{max}})'\s*\}\}"#,
                1,
            ),
            RuleSpec::new(
                "angular-bound-literal",
                Directive,
                r#"\[(?:title|placeholder|alt|label)\]\s*=\s*"'([^"'\r\n]{{min},{max}})'""#,
                1,
            ),
        ],
        Framework::Svelte => vec![RuleSpec::new(
            "svelte-expression-literal",
            Directive,
            r#"\{\s*["']([^"'{}\r\n]{{min},{max}})["']\s*\}"#,
            1,
        )],
        Framework::Django => vec![
            RuleSpec::new(
                "template-block-text",
                TemplateBlock,
                r"%\}([^<>{}%]{{min},{max}})\{%",
                1,
            ),
            RuleSpec::new(
                "django-model-text",
                ServerCall,
                r#"\b(?:verbose_name(?:_plural)?|help_text|label)\s*=\s*["']([^"'\r\n]{{min},{max}})["']"#,
                1,
            ),
            RuleSpec::new(
                "django-message",
                ServerCall,
                r#"messages\.(?:success|info|warning|error|debug)\(\s*\w+\s*,\s*["']([^"'\r\n]{{min},{max}})["']"#,
                1,
            ),
        ],
        Framework::Flask => vec![
            RuleSpec::new(
                "template-block-text",
                TemplateBlock,
                r"%\}([^<>{}%]{{min},{max}})\{%",
                1,
            ),
            RuleSpec::new(
                "jinja-output-literal",
                Directive,
                r#"\{\{\s*["']([^"'{}\r\n]{{min},{max}})["']\s*\}\}"#,
                1,
            ),
            RuleSpec::new(
                "flask-flash",
                ServerCall,
                r#"\bflash\(\s*["']([^"'\r\n]{{min},{max}})["']"#,
                1,
            ),
        ],
        Framework::Rails => vec![
            RuleSpec::new(
                "erb-output-literal",
                Directive,
                r#"<%=\s*["']([^"'\r\n]{{min},{max}})["']\s*-?%>"#,
                1,
            ),
            RuleSpec::new(
                "erb-block-text",
                TemplateBlock,
                r"%>([^<>%]{{min},{max}})<%",
                1,
            ),
            RuleSpec::new(
                "rails-link-to",
                ServerCall,
                r#"\b(?:link_to|button_to|submit)\s*\(?\s*["']([^"'\r\n]{{min},{max}})["']"#,
                1,
            ),
            RuleSpec::new(
                "rails-flash",
                ServerCall,
                r#"(?:flash(?:\.now)?\[:\w+\]\s*=|\b(?:notice|alert):)\s*["']([^"'\r\n]{{min},{max}})["']"#,
                1,
            ),
        ],
    }
}

#[cfg(test)]
mod tests {
    use crate::core::patterns::*;

    fn ids(rules: &[&PatternRule]) -> Vec<String> {
        rules.iter().map(|r| r.id.clone()).collect()
    }

    #[test]
    fn test_builtin_catalog_compiles() {
        let catalog = PatternCatalog::default();
        assert!(catalog.invalid_rules().is_empty());
        for framework in Framework::ALL {
            assert!(!catalog.patterns(framework).is_empty());
        }
    }

    #[test]
    fn test_base_rules_come_first() {
        let catalog = PatternCatalog::default();
        let base = ids(&catalog.patterns(Framework::Generic));
        let vue = ids(&catalog.patterns(Framework::Vue));

        assert_eq!(&vue[..base.len()], base.as_slice());
        assert!(vue.len() > base.len());
        assert_eq!(vue[base.len()], "vue-bound-literal");
    }

    #[test]
    fn test_unknown_tag_gets_base_rules() {
        let catalog = PatternCatalog::default();
        assert_eq!(
            ids(&catalog.patterns_for_tag("cobol")),
            ids(&catalog.patterns(Framework::Generic))
        );
    }

    #[test]
    fn test_bounds_substituted() {
        let catalog = PatternCatalog::new(TextBounds::new(5, 10));
        let rules = catalog.patterns(Framework::Generic);
        let tag = rules.iter().find(|r| r.id == "tag-text").unwrap();

        assert!(tag.regex.is_match("<b>Hello</b>"));
        assert!(!tag.regex.is_match("<b>Hi</b>"));
        assert!(!tag.regex.is_match("<b>Hello there world</b>"));
    }

    #[test]
    fn test_quoted_rules_match_whole_literals() {
        let catalog = PatternCatalog::default();
        let rules = catalog.patterns(Framework::Generic);
        let double = rules.iter().find(|r| r.id == "double-quoted").unwrap();

        let captured: Vec<&str> = double
            .regex
            .captures_iter(r#"a = ""; b = "x"; c = "say \"hi\" now";"#)
            .filter_map(|c| c.get(1))
            .map(|m| m.as_str())
            .collect();
        assert_eq!(captured, vec!["", "x", r#"say \"hi\" now"#]);
    }

    #[test]
    fn test_interpolated_template_has_no_capture() {
        let catalog = PatternCatalog::default();
        let rules = catalog.patterns(Framework::Generic);
        let template = rules.iter().find(|r| r.id == "template-literal").unwrap();

        let captured: Vec<Option<&str>> = template
            .regex
            .captures_iter("`${count} items` + `Plain text`")
            .map(|c| c.get(1).map(|m| m.as_str()))
            .collect();
        assert_eq!(captured, vec![None, Some("Plain text")]);
    }

    #[test]
    fn test_invalid_rule_is_skipped() {
        let base = vec![
            RuleSpec::new("broken", RuleCategory::StringLiteral, r"(unclosed", 1),
            RuleSpec::new("ok", RuleCategory::StringLiteral, r#""([^"]{{min},{max}})""#, 1),
        ];
        let catalog = PatternCatalog::from_specs(&base, BTreeMap::new(), TextBounds::default());

        assert_eq!(ids(&catalog.patterns(Framework::React)), vec!["ok"]);
        assert_eq!(catalog.invalid_rules().len(), 1);
        assert_eq!(catalog.invalid_rules()[0].subject, "broken");
        assert_eq!(catalog.invalid_rules()[0].kind, WarningKind::InvalidRule);
    }

    #[test]
    fn test_text_bounds_counts_chars() {
        let bounds = TextBounds::new(2, 4);
        assert!(bounds.contains("你好"));
        assert!(!bounds.contains("a"));
        assert!(!bounds.contains("hello"));
    }
}
