//! Rule and Fragment types for HTML conversion.

use std::fmt;

use super::{block, inline, table, Context};
use crate::node::NodeRef;
use crate::Result;

/// How an element family converts to Markdown.
///
/// The set is closed: every tag the registry knows maps to one of these, and
/// tags it does not know resolve to [`Rule::PassThrough`], [`Rule::Drop`] or
/// [`Rule::Bypass`] through the unknown-tag policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// `#text`
    Text,
    /// `#comment`
    Comment,
    /// `p`
    Paragraph,
    /// `div`
    Div,
    /// `aside`
    Aside,
    /// `blockquote`
    Blockquote,
    /// `ol`, `ul`
    List,
    /// `li`
    ListItem,
    /// `table`
    Table,
    /// `tr`
    Row,
    /// `td`, `th`
    Cell,
    /// `pre`
    CodeBlock,
    /// `code` outside `pre`
    Code,
    /// `em`, `i`
    Emphasis,
    /// `strong`, `b`
    Strong,
    /// `del`, `s`, `strike`
    Strikethrough,
    /// `a`
    Link,
    /// `img`
    Image,
    /// `br`
    LineBreak,
    /// `hr`
    HorizontalRule,
    /// `h1` to `h6`
    Heading,
    /// Emit the original markup
    PassThrough,
    /// Emit nothing
    Drop,
    /// Emit the children only
    Bypass,
}

impl Rule {
    /// Rules that render a block of their own, already wrapped as the
    /// element's formatting rules allow
    pub fn is_block(self) -> bool {
        matches!(
            self,
            Rule::Paragraph
                | Rule::Div
                | Rule::Aside
                | Rule::Blockquote
                | Rule::List
                | Rule::ListItem
                | Rule::Table
                | Rule::CodeBlock
                | Rule::HorizontalRule
                | Rule::Heading
        )
    }

    pub(crate) fn convert(self, cx: &Context, node: &NodeRef) -> Result<Fragment> {
        match self {
            Rule::Text => inline::text(cx, node),
            Rule::Comment => inline::comment(cx, node),
            Rule::Paragraph => block::paragraph(cx, node),
            Rule::Div => block::div(cx, node),
            Rule::Aside => block::aside(cx, node),
            Rule::Blockquote => block::blockquote(cx, node),
            Rule::List => block::list(cx, node),
            Rule::ListItem => block::list_item(cx, node),
            Rule::Table => table::table(cx, node),
            Rule::Row => table::row(cx, node),
            Rule::Cell => table::cell(cx, node),
            Rule::CodeBlock => block::code_block(cx, node),
            Rule::Code => inline::code(cx, node),
            Rule::Emphasis => inline::emphasis(cx, node),
            Rule::Strong => inline::strong(cx, node),
            Rule::Strikethrough => inline::strikethrough(cx, node),
            Rule::Link => inline::link(cx, node),
            Rule::Image => inline::image(cx, node),
            Rule::LineBreak => inline::line_break(cx, node),
            Rule::HorizontalRule => block::horizontal_rule(cx, node),
            Rule::Heading => block::heading(cx, node),
            Rule::PassThrough => Ok(Fragment::content(node.outer_html())),
            Rule::Drop => Ok(Fragment::default()),
            Rule::Bypass => Ok(Fragment::content(cx.convert_children(node)?)),
        }
    }
}

/// What a rule produces for one node: `prefix + content + suffix`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fragment {
    pub prefix: String,
    pub content: String,
    pub suffix: String,
}

impl Fragment {
    pub fn new(prefix: impl Into<String>, content: impl Into<String>, suffix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            content: content.into(),
            suffix: suffix.into(),
        }
    }

    /// A fragment with no prefix or suffix
    pub fn content(content: impl Into<String>) -> Self {
        Self::new(String::new(), content, String::new())
    }

    pub fn into_string(self) -> String {
        let mut out = self.prefix;
        out.push_str(&self.content);
        out.push_str(&self.suffix);
        out
    }
}

impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.prefix, self.content, self.suffix)
    }
}
