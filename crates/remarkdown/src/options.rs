//! Conversion options.

use indexmap::IndexMap;
use remarkdown_core::{default_escape_rules, EscapeRule};

/// Default maximum nesting depth of input trees
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// What to do with tags no rule is registered for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownTags {
    /// Emit the element's original markup unchanged
    #[default]
    PassThrough,
    /// Emit nothing; children are not visited
    Drop,
    /// Ignore the tag itself but convert its children
    Bypass,
    /// Fail with [`RemarkdownError::UnknownTag`](crate::RemarkdownError::UnknownTag)
    Raise,
}

/// How tables without any `<th>` cell get their header row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TableHeaderHandling {
    /// Use the first row as the header row
    #[default]
    FirstRow,
    /// Insert an empty header row above the first row
    EmptyRow,
}

/// Options for RemarkdownService
#[derive(Debug, Clone)]
pub struct Options {
    /// Fallback for unregistered tags
    pub unknown_tags: UnknownTags,

    /// GitHub-flavored output: backslash line breaks, fenced code blocks and
    /// `~~` strikethrough
    pub github_flavored: bool,

    /// Bullet list marker
    pub bullet_list_marker: char,

    /// Emphasis delimiter; strong emphasis uses it twice
    pub em_delimiter: char,

    /// Horizontal rule string
    pub hr: String,

    /// Fence language when a code block carries no language hint
    pub default_code_block_language: Option<String>,

    /// Class attribute language name to Markdown language name.
    ///
    /// Keys are matched case-insensitively; unmapped names are used as is.
    pub code_block_languages: IndexMap<String, String>,

    /// Allowed URI schemes for links and images. Empty allows everything;
    /// include `""` to allow relative URIs.
    pub allowed_uri_schemes: Vec<String>,

    /// Render links whose text is their own target without link syntax
    pub smart_href_handling: bool,

    pub table_without_header_row: TableHeaderHandling,

    /// Tags always emitted as original markup, whatever rule they have
    pub pass_through_tags: Vec<String>,

    /// Rewrites applied in order to every text node
    pub escape_rules: Vec<EscapeRule>,

    /// Collapse runs of blank lines in the final output
    pub remove_multiple_blank_lines: bool,

    /// Drop comments instead of passing them through
    pub remove_comments: bool,

    /// Keep Hugo shortcodes (`{{< ... >}}`) intact when wrapping
    pub hugo_shortcodes: bool,

    /// Maximum element nesting depth accepted
    pub max_depth: usize,
}

impl Options {
    /// Check a URI scheme against the allow-list
    pub fn is_scheme_allowed(&self, scheme: &str) -> bool {
        self.allowed_uri_schemes.is_empty()
            || self
                .allowed_uri_schemes
                .iter()
                .any(|s| s.eq_ignore_ascii_case(scheme))
    }

    /// Map a class attribute language name to its Markdown name
    pub fn code_block_language<'a>(&'a self, class_language: &'a str) -> &'a str {
        self.code_block_languages
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(class_language))
            .map(|(_, v)| v.as_str())
            .unwrap_or(class_language)
    }

    pub fn is_pass_through(&self, tag: &str) -> bool {
        self.pass_through_tags
            .iter()
            .any(|t| t.eq_ignore_ascii_case(tag))
    }
}

impl Default for Options {
    fn default() -> Self {
        Self {
            unknown_tags: UnknownTags::PassThrough,
            github_flavored: false,
            bullet_list_marker: '-',
            em_delimiter: '*',
            hr: "* * *".to_string(),
            default_code_block_language: None,
            code_block_languages: IndexMap::new(),
            allowed_uri_schemes: Vec::new(),
            smart_href_handling: false,
            table_without_header_row: TableHeaderHandling::FirstRow,
            pass_through_tags: Vec::new(),
            escape_rules: default_escape_rules(),
            remove_multiple_blank_lines: true,
            remove_comments: false,
            hugo_shortcodes: false,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}
