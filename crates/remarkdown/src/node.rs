//! Document node structure for HTML to Markdown conversion.
//!
//! Any parser can build this tree; the `html` feature provides one on top of
//! scraper. Text and comment nodes keep their content exactly as it appears in
//! HTML source, so `&lt;` stays `&lt;` until a converter decides how to decode
//! it, and [`Node::outer_html`] reproduces markup faithfully for pass-through.

/// Node types matching DOM nodeType values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeType {
    /// Element node (nodeType = 1)
    Element = 1,
    /// Text node (nodeType = 3)
    Text = 3,
    /// Comment node (nodeType = 8)
    Comment = 8,
    /// Document node (nodeType = 9)
    Document = 9,
    /// Document fragment node (nodeType = 11)
    DocumentFragment = 11,
}

/// A DOM node.
#[derive(Debug, Clone)]
pub struct Node {
    pub node_type: NodeType,

    /// Lowercase tag name for elements, `#text`, `#comment`, `#document` or
    /// `#document-fragment` otherwise.
    pub node_name: String,

    /// Raw (entity-encoded) content of text and comment nodes
    pub node_value: Option<String>,

    /// Attributes in document order
    pub attributes: Vec<(String, String)>,

    pub children: Vec<Node>,
}

impl Node {
    /// Create a new element node
    pub fn element(tag_name: &str) -> Self {
        Self {
            node_type: NodeType::Element,
            node_name: tag_name.to_lowercase(),
            node_value: None,
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Create a new element node with attributes
    pub fn element_with_attrs(tag_name: &str, attrs: Vec<(&str, &str)>) -> Self {
        let mut node = Self::element(tag_name);
        node.attributes = attrs
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        node
    }

    /// Create a new text node.
    ///
    /// `content` is HTML source text: write `&lt;` for a literal `<`.
    pub fn text(content: &str) -> Self {
        Self {
            node_type: NodeType::Text,
            node_name: "#text".to_string(),
            node_value: Some(content.to_string()),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Create a new comment node
    pub fn comment(content: &str) -> Self {
        Self {
            node_type: NodeType::Comment,
            node_name: "#comment".to_string(),
            node_value: Some(content.to_string()),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn is_element(&self) -> bool {
        self.node_type == NodeType::Element
    }

    pub fn is_text(&self) -> bool {
        self.node_type == NodeType::Text
    }

    pub fn is_comment(&self) -> bool {
        self.node_type == NodeType::Comment
    }

    /// Check if this is an element with the given tag name
    pub fn is(&self, tag: &str) -> bool {
        self.is_element() && self.node_name == tag
    }

    /// Tag name for elements, node name (`#text`, ...) otherwise
    pub fn tag_name(&self) -> &str {
        &self.node_name
    }

    /// Raw value of a text or comment node
    pub fn value(&self) -> &str {
        self.node_value.as_deref().unwrap_or_default()
    }

    /// Text node consisting only of ASCII whitespace (or nothing).
    ///
    /// Non-breaking spaces are content, not whitespace.
    pub fn is_blank_text(&self) -> bool {
        self.is_text() && self.value().bytes().all(|b| b.is_ascii_whitespace())
    }

    /// Get an attribute value by name (case-insensitive)
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attr(name).is_some()
    }

    /// Set an attribute, replacing an existing value
    pub fn set_attr(&mut self, name: &str, value: &str) {
        if let Some(slot) = self
            .attributes
            .iter_mut()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
        {
            slot.1 = value.to_string();
        } else {
            self.attributes.push((name.to_string(), value.to_string()));
        }
    }

    pub fn children(&self) -> impl Iterator<Item = &Node> {
        self.children.iter()
    }

    /// Get only element children
    pub fn element_children(&self) -> impl Iterator<Item = &Node> {
        self.children().filter(|n| n.is_element())
    }

    /// Children that render something: everything except blank text.
    pub fn content_children(&self) -> impl Iterator<Item = &Node> {
        self.children().filter(|n| !n.is_blank_text())
    }

    pub fn add_child(&mut self, child: Node) {
        self.children.push(child);
    }

    /// Pre-order search over all descendants (excluding `self`).
    pub fn find_descendant(&self, mut predicate: impl FnMut(&Node) -> bool) -> Option<&Node> {
        let mut stack: Vec<&Node> = self.children.iter().rev().collect();
        while let Some(node) = stack.pop() {
            if predicate(node) {
                return Some(node);
            }
            stack.extend(node.children.iter().rev());
        }
        None
    }

    /// Check for a descendant element with the given tag
    pub fn has_descendant(&self, tag: &str) -> bool {
        self.find_descendant(|n| n.is(tag)).is_some()
    }

    /// Raw text of this node and all descendants
    pub fn text_content(&self) -> String {
        let mut text = String::new();
        self.collect_text(&mut text);
        text
    }

    fn collect_text(&self, out: &mut String) {
        match self.node_type {
            NodeType::Text => out.push_str(self.value()),
            NodeType::Comment => {}
            _ => {
                for child in &self.children {
                    child.collect_text(out);
                }
            }
        }
    }

    /// Text of this node and all descendants with entities decoded
    pub fn inner_text(&self) -> String {
        html_escape::decode_html_entities(&self.text_content()).into_owned()
    }

    /// Depth of the deepest node below (and including) this one.
    ///
    /// Iterative, so it is safe to call on trees too deep to recurse over.
    pub fn max_depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack = vec![(self, 1usize)];
        while let Some((node, depth)) = stack.pop() {
            deepest = deepest.max(depth);
            stack.extend(node.children.iter().map(|c| (c, depth + 1)));
        }
        deepest
    }

    /// Reconstruct outer HTML (for pass-through)
    pub fn outer_html(&self) -> String {
        match self.node_type {
            NodeType::Text => self.value().to_string(),
            NodeType::Comment => format!("<!--{}-->", self.value()),
            NodeType::Element => {
                let tag = self.tag_name();
                let attrs = self.attributes_string();

                if is_void_element(tag) {
                    format!("<{tag}{attrs}>")
                } else {
                    format!("<{tag}{attrs}>{}</{tag}>", self.inner_html())
                }
            }
            _ => self.inner_html(),
        }
    }

    /// Reconstruct inner HTML
    pub fn inner_html(&self) -> String {
        self.children().map(Node::outer_html).collect()
    }

    /// Attributes with a leading space, ready to splice into a start tag
    fn attributes_string(&self) -> String {
        let mut result = String::new();
        for (name, value) in &self.attributes {
            result.push(' ');
            result.push_str(name);
            if !value.is_empty() {
                result.push_str("=\"");
                result.push_str(&html_escape::encode_double_quoted_attribute(value));
                result.push('"');
            }
        }
        result
    }
}

fn is_void_element(tag: &str) -> bool {
    const VOID_ELEMENTS: &[&str] = &[
        "area", "base", "br", "col", "command", "embed", "hr", "img", "input", "keygen",
        "link", "meta", "param", "source", "track", "wbr",
    ];
    VOID_ELEMENTS.contains(&tag)
}

/// A reference to a node with parent context.
///
/// The owned [`Node`] tree has no parent pointers; a `NodeRef` is created for
/// each node during traversal and borrows its parent's `NodeRef`, so parent,
/// sibling and ancestor queries are plain walks up this chain.
#[derive(Debug, Clone, Copy)]
pub struct NodeRef<'a> {
    pub node: &'a Node,
    parent: Option<&'a NodeRef<'a>>,
    /// Position among the parent's children
    index: usize,
}

impl<'a> NodeRef<'a> {
    /// Create a NodeRef for the root of a tree
    pub fn root(node: &'a Node) -> Self {
        Self {
            node,
            parent: None,
            index: 0,
        }
    }

    pub fn parent(&self) -> Option<&'a NodeRef<'a>> {
        self.parent
    }

    pub fn child<'b>(&'b self, index: usize) -> Option<NodeRef<'b>> {
        self.node.children.get(index).map(|node| NodeRef {
            node,
            parent: Some(self),
            index,
        })
    }

    pub fn children<'b>(&'b self) -> impl Iterator<Item = NodeRef<'b>> + 'b {
        let parent: &'b NodeRef<'b> = self;
        let nodes: &'b [Node] = &self.node.children;
        nodes.iter().enumerate().map(move |(index, node)| NodeRef {
            node,
            parent: Some(parent),
            index,
        })
    }

    /// Parent, grandparent, ... up to the root
    pub fn ancestors(&self) -> impl Iterator<Item = &'a NodeRef<'a>> {
        std::iter::successors(self.parent, |p| p.parent)
    }

    /// Closest ancestor element with the given tag
    pub fn ancestor(&self, tag: &str) -> Option<&'a NodeRef<'a>> {
        self.ancestors().find(|a| a.node.is(tag))
    }

    pub fn has_ancestor(&self, tag: &str) -> bool {
        self.ancestor(tag).is_some()
    }

    pub fn count_ancestors(&self, tag: &str) -> usize {
        self.ancestors().filter(|a| a.node.is(tag)).count()
    }

    pub fn parent_tag(&self) -> Option<&'a str> {
        self.parent.map(|p| p.node.tag_name())
    }

    fn siblings(&self) -> &'a [Node] {
        self.parent
            .map(|p| p.node.children.as_slice())
            .unwrap_or_default()
    }

    pub fn previous_sibling(&self) -> Option<&'a Node> {
        let index = self.index.checked_sub(1)?;
        self.siblings().get(index)
    }

    pub fn next_sibling(&self) -> Option<&'a Node> {
        self.siblings().get(self.index + 1)
    }

    /// Siblings after this node, nearest first
    pub fn following_siblings(&self) -> impl Iterator<Item = &'a Node> {
        self.siblings().iter().skip(self.index + 1)
    }

    /// Siblings before this node, in document order
    pub fn preceding_siblings(&self) -> impl Iterator<Item = &'a Node> {
        self.siblings().iter().take(self.index)
    }

    /// No rendered content precedes this node within its parent
    pub fn is_first_content_child(&self) -> bool {
        self.preceding_siblings().all(Node::is_blank_text)
    }

    /// No rendered content follows this node within its parent
    pub fn is_last_content_child(&self) -> bool {
        self.following_siblings().all(Node::is_blank_text)
    }

    pub fn is_element(&self) -> bool {
        self.node.is_element()
    }

    pub fn is_text(&self) -> bool {
        self.node.is_text()
    }

    pub fn is(&self, tag: &str) -> bool {
        self.node.is(tag)
    }

    pub fn tag_name(&self) -> &'a str {
        self.node.tag_name()
    }

    pub fn attr(&self, name: &str) -> Option<&'a str> {
        self.node.attr(name)
    }

    pub fn has_descendant(&self, tag: &str) -> bool {
        self.node.has_descendant(tag)
    }

    pub fn inner_text(&self) -> String {
        self.node.inner_text()
    }

    pub fn outer_html(&self) -> String {
        self.node.outer_html()
    }
}
