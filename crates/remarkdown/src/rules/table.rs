//! Pipe table converters.

use super::{Context, Fragment};
use crate::node::{Node, NodeRef};
use crate::options::TableHeaderHandling;
use crate::Result;

const EMPTY_HEADER_CELL: &str = "<!---->";

fn is_cell(node: &Node) -> bool {
    node.is("td") || node.is("th")
}

/// `| a | b | c |` style line with a trailing newline
fn pipe_row(cell: &str, count: usize) -> String {
    format!("| {} |\n", vec![cell; count].join(" | "))
}

pub fn table(cx: &Context, node: &NodeRef) -> Result<Fragment> {
    let spans = node
        .node
        .find_descendant(|n| n.has_attr("colspan") || n.has_attr("rowspan"));
    if spans.is_some() {
        tracing::debug!("keeping table with spanning cells as HTML");
        return Ok(Fragment::content(node.outer_html()));
    }

    let mut prefix = String::from("\n\n");
    if cx.options.table_without_header_row == TableHeaderHandling::EmptyRow
        && !node.has_descendant("th")
    {
        if let Some(first_row) = node.node.find_descendant(|n| n.is("tr")) {
            let columns = first_row.children().filter(|n| n.is("td")).count();
            prefix.push_str(&pipe_row(EMPTY_HEADER_CELL, columns));
            prefix.push_str(&pipe_row("---", columns));
        }
    }

    Ok(Fragment::new(prefix, cx.convert_children(node)?, "\n"))
}

pub fn row(cx: &Context, node: &NodeRef) -> Result<Fragment> {
    let content = cx.convert_children(node)?;
    let content = content.trim_end();
    if content.trim().is_empty() {
        return Ok(Fragment::default());
    }

    let mut suffix = String::from("\n");
    if node.node.children().any(|n| n.is("th")) || is_implicit_header(cx, node) {
        let columns = node.node.children().filter(|n| is_cell(n)).count();
        suffix.push_str(&pipe_row("---", columns));
    }

    Ok(Fragment::new("|", content, suffix))
}

/// First row of a table without any `th`, when that row serves as header
fn is_implicit_header(cx: &Context, node: &NodeRef) -> bool {
    if cx.options.table_without_header_row != TableHeaderHandling::FirstRow {
        return false;
    }

    let Some(table) = node.ancestor("table") else {
        return false;
    };

    let first_row = table.node.find_descendant(|n| n.is("tr"));
    first_row.is_some_and(|first| std::ptr::eq(first, node.node)) && !table.has_descendant("th")
}

pub fn cell(cx: &Context, node: &NodeRef) -> Result<Fragment> {
    let content = cx.convert_children(node)?;
    let content = content
        .trim()
        .lines()
        .map(str::trim_end)
        .collect::<Vec<_>>()
        .join("<br>");

    Ok(Fragment::new(" ", content, " |"))
}
