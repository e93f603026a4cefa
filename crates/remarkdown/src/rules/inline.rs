//! Inline converters.

use remarkdown_core::escape;

use super::{Context, Fragment};
use crate::node::{Node, NodeRef};
use crate::utilities::{
    clean_attribute, decode_text, encode_url, escape_link_text, is_block, longest_run, uri_scheme,
};
use crate::Result;

pub fn text(cx: &Context, node: &NodeRef) -> Result<Fragment> {
    let raw = node.node.value();

    if node.node.is_blank_text() {
        let content = match node.parent_tag() {
            Some("ol" | "ul" | "table" | "thead" | "tbody" | "tfoot" | "tr") => "",
            _ if raw == " " => " ",
            _ => "",
        };
        return Ok(Fragment::content(content));
    }

    let decoded = decode_text(raw);
    Ok(Fragment::content(escape(&decoded, &cx.options.escape_rules)))
}

pub fn comment(cx: &Context, node: &NodeRef) -> Result<Fragment> {
    if cx.options.remove_comments {
        return Ok(Fragment::default());
    }
    Ok(Fragment::content(node.outer_html()))
}

/// Inline code: a backtick fence one longer than the longest backtick run
/// inside, padded with spaces when the code starts or ends with a backtick.
pub fn code(_cx: &Context, node: &NodeRef) -> Result<Fragment> {
    let code = node.inner_text();
    if code.is_empty() {
        return Ok(Fragment::default());
    }

    let fence = "`".repeat(longest_run(&code, '`') + 1);
    let padding = if code.starts_with('`') || code.ends_with('`') {
        " "
    } else {
        ""
    };

    Ok(Fragment::new(
        format!("{fence}{padding}"),
        code,
        format!("{padding}{fence}"),
    ))
}

pub fn emphasis(cx: &Context, node: &NodeRef) -> Result<Fragment> {
    let delimiter = cx.options.em_delimiter.to_string();
    delimited(cx, node, &["em", "i"], &delimiter)
}

pub fn strong(cx: &Context, node: &NodeRef) -> Result<Fragment> {
    let delimiter = cx.options.em_delimiter.to_string().repeat(2);
    delimited(cx, node, &["strong", "b"], &delimiter)
}

/// Shared by emphasis and strong: `kind` lists the tags of the same kind.
fn delimited(cx: &Context, node: &NodeRef, kind: &[&str], delimiter: &str) -> Result<Fragment> {
    let mut content = cx.convert_children(node)?;

    // A lone trailing backslash would escape the closing delimiter.
    if content.ends_with('\\') && !content.ends_with("\\\\") {
        content.push('\\');
    }

    let nested = node.ancestors().any(|a| kind.iter().any(|tag| a.is(tag)));
    if content.trim().is_empty() || nested {
        return Ok(Fragment::content(content));
    }

    // `**a****b**` would not parse as two strong runs.
    let separator = match node.next_sibling() {
        Some(next) if kind.iter().any(|tag| next.is(tag)) => " ",
        _ => "",
    };

    Ok(Fragment::new(
        delimiter,
        content,
        format!("{delimiter}{separator}"),
    ))
}

pub fn strikethrough(cx: &Context, node: &NodeRef) -> Result<Fragment> {
    let content = cx.convert_children(node)?;
    if !cx.options.github_flavored || content.trim().is_empty() {
        return Ok(Fragment::content(content));
    }
    Ok(Fragment::new("~~", content, "~~"))
}

fn title_suffix(node: &NodeRef) -> String {
    match clean_attribute(node.attr("title")) {
        title if title.is_empty() => String::new(),
        title => format!(" \"{}\"", title.replace('"', "\\\"")),
    }
}

pub fn link(cx: &Context, node: &NodeRef) -> Result<Fragment> {
    let name = cx.convert_children(node)?;
    let name = name.trim();
    let href = clean_attribute(node.attr("href"));

    if href.is_empty() || name.is_empty() || !cx.options.is_scheme_allowed(&uri_scheme(&href)) {
        return Ok(Fragment::content(name));
    }

    if cx.options.smart_href_handling {
        if name == href {
            return Ok(Fragment::content(href));
        }
        let is_own_target = ["http://", "https://", "mailto:", "tel:"]
            .iter()
            .any(|scheme| href.strip_prefix(scheme) == Some(name));
        if is_own_target {
            return Ok(Fragment::content(name));
        }
    }

    Ok(Fragment::new(
        "[",
        name,
        format!("]({}{})", encode_url(&href), title_suffix(node)),
    ))
}

/// Inline image. `src` is emitted as written: unlike link hrefs it does not go
/// through [`encode_url`], so spaces or parentheses in it are not escaped.
pub fn image(cx: &Context, node: &NodeRef) -> Result<Fragment> {
    let src = clean_attribute(node.attr("src"));
    if !cx.options.is_scheme_allowed(&uri_scheme(&src)) {
        return Ok(Fragment::default());
    }

    let alt = escape_link_text(node.attr("alt").unwrap_or_default());

    Ok(Fragment::content(format!(
        "![{alt}]({src}{})",
        title_suffix(node)
    )))
}

pub fn line_break(cx: &Context, node: &NodeRef) -> Result<Fragment> {
    if !cx.options.github_flavored {
        return Ok(Fragment::new("", "  ", "\n"));
    }

    let in_cell = node
        .ancestors()
        .any(|a| a.is("td") || a.is("th"));

    if in_cell || !has_trailing_content(node) {
        return Ok(Fragment::new("", "", "\n"));
    }

    Ok(Fragment::new("", "\\", "\n"))
}

/// Whether anything renders after this break on the same logical line.
///
/// Following breaks are skipped over, so a run of breaks all share the answer
/// of the last one.
fn has_trailing_content(node: &NodeRef) -> bool {
    for sibling in node.following_siblings() {
        match sibling {
            s if s.is_text() => {
                if !s.is_blank_text() {
                    return true;
                }
            }
            s if s.is("br") => continue,
            s if s.is_element() => {
                if is_block(s.tag_name()) {
                    return false;
                }
                if renders_inline(s) {
                    return true;
                }
            }
            _ => {}
        }
    }
    false
}

fn renders_inline(node: &Node) -> bool {
    node.is("img") || node.has_descendant("img") || !node.inner_text().trim().is_empty()
}
