//! Per-node trimming and wrapping policy.
//!
//! Whether an element's rendered content may be trimmed or wrapped depends on
//! where it sits: wrapping inside a code block or a pipe table corrupts it, and
//! the width available to a paragraph shrinks with every blockquote marker and
//! list marker that will be prepended to its lines.

use remarkdown_core::{Chunker, FormattingRules, ShortcodeMode};

use crate::node::NodeRef;
use crate::options::Options;

/// Target width of rendered Markdown lines
pub const LINE_LENGTH: usize = 80;

const SHORTCODE_OPEN: &str = "{{<";

/// Resolve the formatting rules for `node`. The first matching case wins.
pub fn resolve(node: &NodeRef, options: &Options) -> FormattingRules {
    let rules = resolve_rules(node, options);
    tracing::trace!(
        tag = node.tag_name(),
        can_trim = rules.can_trim,
        wrap = ?rules.wrap_line_length,
        "resolved formatting rules"
    );
    rules
}

fn resolve_rules(node: &NodeRef, options: &Options) -> FormattingRules {
    let tag = node.tag_name();

    if tag == "pre" || node.has_ancestor("pre") || node.has_descendant("pre") {
        return FormattingRules::PRESERVE;
    }

    if node.has_descendant("table") {
        return FormattingRules::PRESERVE;
    }

    let is_wrappable = matches!(tag, "blockquote" | "div" | "li" | "p");

    // Shortcodes are only ever wrapped by the outermost container.
    if is_wrappable && node.inner_text().contains(SHORTCODE_OPEN) {
        if node.has_descendant("blockquote") {
            return FormattingRules::PRESERVE;
        }
        if defers_shortcode(node) {
            return FormattingRules::PRESERVE;
        }
    }

    if is_wrappable {
        // Cells render on one line; content there is never wrapped.
        if node.has_ancestor("table") {
            return FormattingRules::new(tag != "div", None);
        }

        let quote_markers = 2 * (node.count_ancestors("blockquote") + usize::from(tag == "blockquote"));
        let own_marker = if tag == "li" {
            marker_width(node, options)
        } else {
            0
        };
        let list_markers = own_marker
            + node
                .ancestors()
                .filter(|n| n.is("li"))
                .map(|li| marker_width(li, options))
                .sum::<usize>();

        let width = LINE_LENGTH
            .checked_sub(quote_markers + list_markers)
            .filter(|w| *w > 0);

        return FormattingRules::new(tag != "div", width);
    }

    FormattingRules::PRESERVE
}

/// Whether `node` leaves wrapping to its container.
///
/// A paragraph or div holding a shortcode inside a blockquote or div is
/// emitted unwrapped, and the container wraps it as part of its own text.
pub fn defers_to_container(node: &NodeRef) -> bool {
    let tag = node.tag_name();
    matches!(tag, "p" | "div")
        && !node.has_ancestor("pre")
        && !node.has_descendant("pre")
        && !node.has_descendant("table")
        && !node.has_descendant("blockquote")
        && node.inner_text().contains(SHORTCODE_OPEN)
        && defers_shortcode(node)
}

fn defers_shortcode(node: &NodeRef) -> bool {
    matches!(node.tag_name(), "p" | "div")
        && (node.has_ancestor("blockquote") || node.has_ancestor("div"))
}

/// Marker that starts a list item: `"{n}. "` under `<ol>`, where `n` is the
/// 1-based position among sibling `<li>`s, else the bullet followed by a space.
pub fn list_item_marker(li: &NodeRef, options: &Options) -> String {
    if li.parent_tag() == Some("ol") {
        let position = li.preceding_siblings().filter(|n| n.is("li")).count() + 1;
        format!("{position}. ")
    } else {
        format!("{} ", options.bullet_list_marker)
    }
}

pub fn marker_width(li: &NodeRef, options: &Options) -> usize {
    list_item_marker(li, options).chars().count()
}

/// Chunker to wrap `node`'s content with.
///
/// Blockquotes keep shortcodes whole: their lines get prefixed after
/// wrapping, and a split shortcode could not be re-joined.
pub fn chunker_for(node: &NodeRef, options: &Options) -> Chunker {
    let mode = if !options.hugo_shortcodes {
        ShortcodeMode::Disabled
    } else if node.is("blockquote") {
        ShortcodeMode::Atomic
    } else {
        ShortcodeMode::Split
    };
    Chunker::with_shortcodes(mode)
}
