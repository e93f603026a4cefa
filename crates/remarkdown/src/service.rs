//! RemarkdownService - the main entry point for HTML to Markdown conversion.

use remarkdown_core::collapse_blank_lines;

use crate::node::{Node, NodeRef};
use crate::options::Options;
use crate::rules::{Context, Rule, Rules};
use crate::whitespace;
use crate::{RemarkdownError, Result};

/// The main service for converting HTML to Markdown
#[derive(Debug, Clone)]
pub struct RemarkdownService {
    options: Options,
    rules: Rules,
}

impl RemarkdownService {
    /// Create a new RemarkdownService with default options
    pub fn new() -> Self {
        Self::with_options(Options::default())
    }

    /// Create a RemarkdownService with custom options
    pub fn with_options(options: Options) -> Self {
        Self {
            options,
            rules: Rules::new(),
        }
    }

    /// Convert a Node tree to Markdown.
    ///
    /// The tree is copied before whitespace normalization; use
    /// [`convert_owned`](Self::convert_owned) to avoid the copy.
    pub fn convert(&self, node: &Node) -> Result<String> {
        self.check_depth(node)?;
        self.render(node.clone())
    }

    /// Convert a Node tree to Markdown, consuming it
    pub fn convert_owned(&self, node: Node) -> Result<String> {
        self.check_depth(&node)?;
        self.render(node)
    }

    /// Convert an HTML string to Markdown
    #[cfg(feature = "html")]
    pub fn convert_html(&self, html: &str) -> Result<String> {
        let node = crate::html::parse_html_with_limit(html, self.options.max_depth)?;
        self.render(node)
    }

    /// Bind a tag to a rule
    pub fn register(&mut self, tag: &str, rule: Rule) -> &mut Self {
        self.rules.register(tag, rule);
        self
    }

    /// Keep elements with these tags as HTML
    pub fn keep(&mut self, tags: &[&str]) -> &mut Self {
        self.rules.keep(tags);
        self
    }

    /// Remove elements with these tags
    pub fn remove(&mut self, tags: &[&str]) -> &mut Self {
        self.rules.remove(tags);
        self
    }

    /// Apply a plugin
    pub fn use_plugin<F>(&mut self, plugin: F) -> &mut Self
    where
        F: FnOnce(&mut Self),
    {
        plugin(self);
        self
    }

    /// Escape markdown special characters in a string with the configured rules
    pub fn escape(&self, text: &str) -> String {
        remarkdown_core::escape(text, &self.options.escape_rules)
    }

    /// Get the current options
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Get mutable access to options
    pub fn options_mut(&mut self) -> &mut Options {
        &mut self.options
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    fn check_depth(&self, node: &Node) -> Result<()> {
        let depth = node.max_depth();
        let max = self.options.max_depth;
        if depth > max {
            tracing::debug!(depth, max, "rejecting document nested too deeply");
            return Err(RemarkdownError::DepthLimitExceeded { depth, max });
        }
        Ok(())
    }

    fn render(&self, mut node: Node) -> Result<String> {
        whitespace::normalize(&mut node);

        let cx = Context::new(&self.options, &self.rules);
        let markdown = cx.convert(&NodeRef::root(&node))?;

        if self.options.remove_multiple_blank_lines {
            Ok(collapse_blank_lines(&markdown).into_owned())
        } else {
            Ok(markdown)
        }
    }
}

impl Default for RemarkdownService {
    fn default() -> Self {
        Self::new()
    }
}
