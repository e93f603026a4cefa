//! Escaping of Markdown-significant characters in plain text.

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::Regex;

/// Pattern/replacement pairs applied, in order, to every text node.
///
/// Replacements use `regex` syntax, so `${1}` refers to the first group.
const DEFAULT_RULES: &[(&str, &str)] = &[
    (r"^(\+ )", r"\${1}"),
    (r"^(- )", r"\${1}"),
    (r"(_[^\w])", r"\${1}"),
    (r" _", r" \_"),
    (r"(^_)", r"\${1}"),
    (r"__", r"\_\_"),
    (r"(\\\\)", r"\\${1}"),
    (r"(\\\$)", r"\${1}"),
    (r"(\\%)", r"\${1}"),
    (r"(\\&)", r"\${1}"),
    (r"(\\\.)", r"\${1}"),
    (r"(\\\[)", r"\${1}"),
    (r"(\\\{)", r"\${1}"),
    (r"(\*)", r"\${1}"),
];

static DEFAULT_ESCAPE_RULES: Lazy<Vec<EscapeRule>> = Lazy::new(|| {
    DEFAULT_RULES
        .iter()
        .map(|(pattern, replacement)| {
            EscapeRule::new(pattern, replacement).expect("built-in escape rule is valid")
        })
        .collect()
});

/// A single regex substitution.
#[derive(Debug, Clone)]
pub struct EscapeRule {
    pattern: Regex,
    replacement: String,
}

impl EscapeRule {
    pub fn new(pattern: &str, replacement: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
            replacement: replacement.to_string(),
        })
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    pub fn replacement(&self) -> &str {
        &self.replacement
    }

    pub fn apply<'t>(&self, text: &'t str) -> Cow<'t, str> {
        self.pattern.replace_all(text, self.replacement.as_str())
    }
}

/// The built-in escape rules.
pub fn default_escape_rules() -> Vec<EscapeRule> {
    DEFAULT_ESCAPE_RULES.clone()
}

/// Apply `rules` to `text` in order.
pub fn escape(text: &str, rules: &[EscapeRule]) -> String {
    let mut escaped = text.to_string();
    for rule in rules {
        if let Cow::Owned(replaced) = rule.apply(&escaped) {
            escaped = replaced;
        }
    }
    escaped
}
