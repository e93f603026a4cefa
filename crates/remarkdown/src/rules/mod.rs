//! Rule system for HTML to Markdown conversion.

mod block;
mod inline;
mod rule;
mod table;

pub use rule::{Fragment, Rule};

use indexmap::IndexMap;
use remarkdown_core::{Chunker, FormattingRules};

use crate::formatting;
use crate::node::NodeRef;
use crate::options::{Options, UnknownTags};
use crate::{RemarkdownError, Result};

/// Built-in tag registrations, in lookup order
const DEFAULT_RULES: &[(&str, Rule)] = &[
    ("#text", Rule::Text),
    ("#comment", Rule::Comment),
    ("#document", Rule::Bypass),
    ("#document-fragment", Rule::Bypass),
    ("html", Rule::Bypass),
    ("body", Rule::Bypass),
    ("p", Rule::Paragraph),
    ("div", Rule::Div),
    ("aside", Rule::Aside),
    ("blockquote", Rule::Blockquote),
    ("ol", Rule::List),
    ("ul", Rule::List),
    ("li", Rule::ListItem),
    ("table", Rule::Table),
    ("thead", Rule::Bypass),
    ("tbody", Rule::Bypass),
    ("tfoot", Rule::Bypass),
    ("colgroup", Rule::Drop),
    ("col", Rule::Drop),
    ("tr", Rule::Row),
    ("td", Rule::Cell),
    ("th", Rule::Cell),
    ("pre", Rule::CodeBlock),
    ("code", Rule::Code),
    ("em", Rule::Emphasis),
    ("i", Rule::Emphasis),
    ("strong", Rule::Strong),
    ("b", Rule::Strong),
    ("del", Rule::Strikethrough),
    ("s", Rule::Strikethrough),
    ("strike", Rule::Strikethrough),
    ("a", Rule::Link),
    ("img", Rule::Image),
    ("br", Rule::LineBreak),
    ("hr", Rule::HorizontalRule),
    ("h1", Rule::Heading),
    ("h2", Rule::Heading),
    ("h3", Rule::Heading),
    ("h4", Rule::Heading),
    ("h5", Rule::Heading),
    ("h6", Rule::Heading),
    ("span", Rule::Bypass),
];

/// Tag name to rule registry
#[derive(Debug, Clone)]
pub struct Rules {
    rules: IndexMap<String, Rule>,
}

impl Rules {
    /// Create a registry with the built-in rules
    pub fn new() -> Self {
        Self {
            rules: DEFAULT_RULES
                .iter()
                .map(|(tag, rule)| (tag.to_string(), *rule))
                .collect(),
        }
    }

    /// Bind a tag to a rule, replacing any existing binding
    pub fn register(&mut self, tag: &str, rule: Rule) {
        self.rules.insert(tag.to_lowercase(), rule);
    }

    /// Keep elements with these tags as HTML
    pub fn keep(&mut self, tags: &[&str]) {
        for tag in tags {
            self.register(tag, Rule::PassThrough);
        }
    }

    /// Remove elements with these tags entirely
    pub fn remove(&mut self, tags: &[&str]) {
        for tag in tags {
            self.register(tag, Rule::Drop);
        }
    }

    pub fn get(&self, tag: &str) -> Option<Rule> {
        self.rules.get(tag).copied()
    }

    /// Registered tags in registration order
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.rules.keys().map(String::as_str)
    }
}

impl Default for Rules {
    fn default() -> Self {
        Self::new()
    }
}

/// State shared by every converter during one conversion. Read-only.
pub(crate) struct Context<'s> {
    pub options: &'s Options,
    rules: &'s Rules,
}

impl<'s> Context<'s> {
    pub fn new(options: &'s Options, rules: &'s Rules) -> Self {
        Self { options, rules }
    }

    /// Convert a node and everything below it
    pub fn convert(&self, node: &NodeRef) -> Result<String> {
        let rule = self.rule_for(node)?;
        Ok(rule.convert(self, node)?.into_string())
    }

    /// Concatenate the conversions of all children in order
    pub fn convert_children(&self, node: &NodeRef) -> Result<String> {
        let mut content = String::new();
        for child in node.children() {
            content.push_str(&self.convert(&child)?);
        }
        Ok(content)
    }

    /// Convert the children of `node`, trimming and wrapping as the
    /// formatting rules for `node` allow
    pub fn format_children(&self, node: &NodeRef) -> Result<String> {
        let rules = formatting::resolve(node, self.options);
        self.format_children_with(node, rules, &self.chunker_for(node))
    }

    /// Convert the children of `node` under the given rules.
    ///
    /// Only runs of inline output are wrapped. Block children have already
    /// been wrapped to their own narrower width and are taken as they are.
    pub fn format_children_with(
        &self,
        node: &NodeRef,
        rules: FormattingRules,
        chunker: &Chunker,
    ) -> Result<String> {
        let mut content = String::new();
        let mut run = String::new();

        for child in node.children() {
            let rule = self.rule_for(&child)?;
            let converted = rule.convert(self, &child)?.into_string();
            if rule.is_block() && !formatting::defers_to_container(&child) {
                flush_run(&mut content, &mut run, rules, chunker)?;
                content.push_str(&converted);
            } else {
                run.push_str(&converted);
            }
        }
        flush_run(&mut content, &mut run, rules, chunker)?;

        if rules.can_trim {
            Ok(content.trim().to_string())
        } else {
            Ok(content)
        }
    }

    pub fn chunker_for(&self, node: &NodeRef) -> Chunker {
        formatting::chunker_for(node, self.options)
    }

    fn rule_for(&self, node: &NodeRef) -> Result<Rule> {
        let tag = node.tag_name();

        if node.is_element() && self.options.is_pass_through(tag) {
            tracing::debug!(tag, "passing tag through as configured");
            return Ok(Rule::PassThrough);
        }

        if let Some(rule) = self.rules.get(tag) {
            return Ok(rule);
        }

        tracing::debug!(tag, policy = ?self.options.unknown_tags, "no rule for tag");

        match self.options.unknown_tags {
            UnknownTags::PassThrough => Ok(Rule::PassThrough),
            UnknownTags::Drop => Ok(Rule::Drop),
            UnknownTags::Bypass => Ok(Rule::Bypass),
            UnknownTags::Raise => Err(RemarkdownError::UnknownTag(tag.to_string())),
        }
    }
}

/// Wrap the pending inline run onto `content`
fn flush_run(
    content: &mut String,
    run: &mut String,
    rules: FormattingRules,
    chunker: &Chunker,
) -> Result<()> {
    if run.is_empty() {
        return Ok(());
    }
    // Leading whitespace would otherwise become the indent of every line.
    let text = if rules.can_trim && content.trim().is_empty() {
        run.trim_start()
    } else {
        run.as_str()
    };
    content.push_str(&rules.wrap(text, chunker)?);
    run.clear();
    Ok(())
}
