//! Block-level converters.

use once_cell::sync::Lazy;
use regex::Regex;
use remarkdown_core::{indent, Chunker, FormattingRules};

use super::{Context, Fragment};
use crate::formatting::{list_item_marker, marker_width, resolve};
use crate::node::{Node, NodeRef};
use crate::{RemarkdownError, Result};

const INDENTED_CODE: &str = "    ";

/// Language hints used by common highlighters, e.g. GitHub's
/// `highlight-source-json`, highlight.js' `language-json` or
/// SyntaxHighlighter's `brush: json`.
static CLASS_LANGUAGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(highlight-source-|language-|highlight-|brush:\s)([a-zA-Z0-9]+)")
        .expect("class language pattern is valid")
});

fn is_cell(tag: Option<&str>) -> bool {
    matches!(tag, Some("td" | "th"))
}

/// `"\n"`, or nothing when `node` opens a table cell
fn cell_prefix(node: &NodeRef) -> &'static str {
    if is_cell(node.parent_tag()) && node.is_first_content_child() {
        ""
    } else {
        "\n"
    }
}

/// `"\n"`, or nothing when `node` closes a table cell
fn cell_suffix(node: &NodeRef) -> &'static str {
    if is_cell(node.parent_tag()) && node.is_last_content_child() {
        ""
    } else {
        "\n"
    }
}

/// Trim `content` fully when the rules allow it, otherwise only strip the
/// surrounding line breaks so indented code keeps its indentation.
fn trim_block<'c>(node: &NodeRef, cx: &Context, content: &'c str) -> &'c str {
    if resolve(node, cx.options).can_trim {
        content.trim()
    } else {
        content.trim_matches(|c| c == '\n' || c == '\r')
    }
}

pub fn paragraph(cx: &Context, node: &NodeRef) -> Result<Fragment> {
    if let Some(tag @ ("ol" | "ul")) = node.parent_tag() {
        return Err(RemarkdownError::MalformedList {
            tag: tag.to_string(),
        });
    }

    let content = cx.format_children(node)?;

    Ok(Fragment::new(cell_prefix(node), content, cell_suffix(node)))
}

pub fn div(cx: &Context, node: &NodeRef) -> Result<Fragment> {
    let rules = resolve(node, cx.options);
    let content = div_content(cx, node, rules, &cx.chunker_for(node))?;

    let mut children = node.node.content_children();
    if let (Some(only), None) = (children.next(), children.next()) {
        if ["p", "pre", "ol", "table"].iter().any(|tag| only.is(tag)) {
            return Ok(Fragment::content(content));
        }
    }

    Ok(Fragment::new(cell_prefix(node), content, cell_suffix(node)))
}

/// Children of the innermost div in a chain of single-child divs, formatted
/// under the outermost div's rules
fn div_content(
    cx: &Context,
    node: &NodeRef,
    rules: FormattingRules,
    chunker: &Chunker,
) -> Result<String> {
    let mut children = node.children().filter(|c| !c.node.is_blank_text());
    if let (Some(only), None) = (children.next(), children.next()) {
        if only.is("div") {
            return div_content(cx, &only, rules, chunker);
        }
    }
    cx.format_children_with(node, rules, chunker)
}

pub fn aside(cx: &Context, node: &NodeRef) -> Result<Fragment> {
    let content = cx.convert_children(node)?;
    Ok(Fragment::new("\n", content.trim(), "\n"))
}

pub fn blockquote(cx: &Context, node: &NodeRef) -> Result<Fragment> {
    let children = cx.format_children(node)?;
    let content = trim_block(node, cx, &children);

    let quoted: Vec<String> = content
        .lines()
        .map(|line| {
            if line.trim().is_empty() {
                ">".to_string()
            } else {
                format!("> {line}")
            }
        })
        .collect();

    Ok(Fragment::new("\n\n", quoted.join("\n"), "\n\n"))
}

pub fn list(cx: &Context, node: &NodeRef) -> Result<Fragment> {
    // Pipe tables cannot hold block lists.
    if node.has_ancestor("table") {
        tracing::debug!(tag = node.tag_name(), "keeping list inside table as HTML");
        return Ok(Fragment::content(node.outer_html()));
    }

    let edge = match node.parent_tag() {
        Some("ol" | "ul") => "",
        _ => "\n",
    };

    Ok(Fragment::new(edge, cx.convert_children(node)?, edge))
}

pub fn list_item(cx: &Context, node: &NodeRef) -> Result<Fragment> {
    let marker = list_item_marker(node, cx.options);

    let children = cx.format_children(node)?;
    let content = trim_block(node, cx, &children);

    // Continuation lines line up under the first character after the marker.
    let indentation = " ".repeat(marker.chars().count());
    let content = match content.split_once('\n') {
        Some((first, rest)) => format!("{first}\n{}", indent(rest, &indentation, false)),
        None => content.to_string(),
    };

    Ok(Fragment::new(marker, content, "\n"))
}

pub fn code_block(cx: &Context, node: &NodeRef) -> Result<Fragment> {
    let code = node.inner_text();

    let content = if cx.options.github_flavored {
        let language = code_language(node, cx);
        format!("```{language}\n{}\n```", code.trim_end())
    } else {
        let mut indented = indent(&code, INDENTED_CODE, true);
        if indented.is_empty() {
            indented.push_str(INDENTED_CODE);
            if let Some(li) = node.ancestor("li") {
                indented.push_str(&" ".repeat(marker_width(li, cx.options)));
            }
        }
        indented.push('\n');
        indented
    };

    Ok(Fragment::new("\n\n", content, "\n"))
}

/// Fence language from class attributes on the `pre`, its parent, or a
/// `code` child, mapped through the configured language table.
fn code_language(node: &NodeRef, cx: &Context) -> String {
    let code_child = node.node.element_children().find(|c| c.is("code"));

    let hint = class_language(node.node)
        .or_else(|| node.parent().and_then(|p| class_language(p.node)))
        .or_else(|| code_child.and_then(class_language));

    match hint {
        Some(language) => cx.options.code_block_language(language).to_string(),
        None => cx
            .options
            .default_code_block_language
            .clone()
            .unwrap_or_default(),
    }
}

fn class_language(node: &Node) -> Option<&str> {
    let class = node.attr("class")?;
    CLASS_LANGUAGE
        .captures(class)
        .and_then(|caps| caps.get(2))
        .map(|m| m.as_str())
}

pub fn horizontal_rule(cx: &Context, _node: &NodeRef) -> Result<Fragment> {
    Ok(Fragment::new("\n", cx.options.hr.as_str(), "\n"))
}

pub fn heading(cx: &Context, node: &NodeRef) -> Result<Fragment> {
    let level: usize = node
        .tag_name()
        .strip_prefix('h')
        .and_then(|level| level.parse().ok())
        .unwrap_or(1)
        .clamp(1, 6);

    let content = cx.convert_children(node)?;
    let content = content.trim();
    if content.is_empty() {
        return Ok(Fragment::default());
    }

    // Headings are single-line in Markdown.
    let content = content.lines().map(str::trim).collect::<Vec<_>>().join(" ");

    Ok(Fragment::new(
        format!("\n{} ", "#".repeat(level)),
        content,
        "\n",
    ))
}
