//! HTML parsing support.
//!
//! Parses HTML strings with scraper and converts the result to the [`Node`]
//! structure used by remarkdown. scraper hands out decoded text, which loses
//! the difference between an escaped `&lt;` and a literal `<` (as in a Hugo
//! `{{< shortcode >}}`). Escaped angle brackets are therefore swapped for
//! placeholders before parsing and restored as entities afterwards, so text
//! nodes keep `&lt;`/`&gt;` while literal brackets stay literal.

use scraper::{ElementRef, Html, Node as ScraperNode};

use crate::node::Node;
use crate::options::DEFAULT_MAX_DEPTH;
use crate::utilities::{GT_PLACEHOLDER, LT_PLACEHOLDER};
use crate::{RemarkdownError, Result};

const LT_ENTITIES: &[&str] = &["&lt;", "&LT;", "&#60;", "&#x3c;", "&#x3C;"];
const GT_ENTITIES: &[&str] = &["&gt;", "&GT;", "&#62;", "&#x3e;", "&#x3E;"];

/// Parse an HTML string into a Node tree.
///
/// Full documents (anything with a `<body` tag) are rooted at their `body`
/// element; fragments are rooted at the `html` element the parser wraps them
/// in.
///
/// # Example
///
/// ```rust
/// use remarkdown::{parse_html, RemarkdownService};
///
/// let node = parse_html("<h1>Hello <em>World</em></h1>").unwrap();
///
/// let service = RemarkdownService::new();
/// let markdown = service.convert(&node).unwrap();
/// assert_eq!(markdown, "\n# Hello *World*\n");
/// ```
pub fn parse_html(html: &str) -> Result<Node> {
    parse_html_with_limit(html, DEFAULT_MAX_DEPTH)
}

/// Parse an HTML string, failing if the tree nests deeper than `max_depth`
pub fn parse_html_with_limit(html: &str, max_depth: usize) -> Result<Node> {
    let html = shield_angle_brackets(html);

    if html.to_ascii_lowercase().contains("<body") {
        let document = Html::parse_document(&html);
        let root = document.root_element();
        let body = root
            .children()
            .filter_map(ElementRef::wrap)
            .find(|e| e.value().name() == "body")
            .unwrap_or(root);
        scraper_to_node(body, 1, max_depth)
    } else {
        let document = Html::parse_fragment(&html);
        scraper_to_node(document.root_element(), 1, max_depth)
    }
}

fn shield_angle_brackets(html: &str) -> String {
    let mut shielded = html.to_string();
    for entity in LT_ENTITIES {
        shielded = shielded.replace(entity, &LT_PLACEHOLDER.to_string());
    }
    for entity in GT_ENTITIES {
        shielded = shielded.replace(entity, &GT_PLACEHOLDER.to_string());
    }
    shielded
}

/// Raw text for scraper's decoded `text`: `&` re-encoded, shielded brackets
/// back as entities
fn raw_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace(LT_PLACEHOLDER, "&lt;")
        .replace(GT_PLACEHOLDER, "&gt;")
}

/// Comments are not entity-decoded by the parser; shielded brackets go back
/// to the entities they came from
fn comment_text(comment: &str) -> String {
    comment
        .replace(LT_PLACEHOLDER, "&lt;")
        .replace(GT_PLACEHOLDER, "&gt;")
}

/// Decoded attribute value with shielded brackets restored
fn attribute_value(value: &str) -> String {
    value
        .replace(LT_PLACEHOLDER, "<")
        .replace(GT_PLACEHOLDER, ">")
}

fn check_depth(depth: usize, max: usize) -> Result<()> {
    if depth > max {
        tracing::debug!(depth, max, "rejecting HTML nested too deeply");
        return Err(RemarkdownError::DepthLimitExceeded { depth, max });
    }
    Ok(())
}

/// Convert a scraper ElementRef at `depth` to our Node structure
fn scraper_to_node(element: ElementRef, depth: usize, max_depth: usize) -> Result<Node> {
    check_depth(depth, max_depth)?;

    let tag = element.value().name();
    let attrs: Vec<(&str, String)> = element
        .value()
        .attrs()
        .map(|(name, value)| (name, attribute_value(value)))
        .collect();

    let mut node = if attrs.is_empty() {
        Node::element(tag)
    } else {
        Node::element_with_attrs(
            tag,
            attrs.iter().map(|(name, value)| (*name, value.as_str())).collect(),
        )
    };

    for child in element.children() {
        match child.value() {
            ScraperNode::Text(text) => {
                check_depth(depth + 1, max_depth)?;
                node.add_child(Node::text(&raw_text(&*text.text)));
            }
            ScraperNode::Comment(comment) => {
                check_depth(depth + 1, max_depth)?;
                node.add_child(Node::comment(&comment_text(&*comment.comment)));
            }
            ScraperNode::Element(_) => {
                if let Some(child_element) = ElementRef::wrap(child) {
                    node.add_child(scraper_to_node(child_element, depth + 1, max_depth)?);
                }
            }
            _ => {}
        }
    }

    Ok(node)
}
