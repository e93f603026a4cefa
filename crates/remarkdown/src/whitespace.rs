//! Whitespace normalization ahead of conversion.
//!
//! Mirrors how a browser lays out inline content: runs of whitespace render as
//! one space, and whitespace touching a block box renders as nothing. Doing
//! this once on the tree keeps every converter free of whitespace special
//! cases. Preformatted content is never touched.

use crate::node::Node;
use crate::utilities::is_block;

/// Normalize whitespace in every text node below `root`.
pub fn normalize(root: &mut Node) {
    let in_pre = root.is("pre");
    normalize_children(root, in_pre);
}

fn normalize_children(parent: &mut Node, in_pre: bool) {
    let parent_is_block = parent.is_element() && is_block(parent.tag_name());
    let count = parent.children.len();

    for i in 0..count {
        let previous_is_block = i > 0 && is_block_element(&parent.children[i - 1]);
        let next_is_block = i + 1 < count && is_block_element(&parent.children[i + 1]);

        let child = &mut parent.children[i];

        if child.is_text() {
            if in_pre {
                continue;
            }
            if let Some(value) = child.node_value.as_mut() {
                let mut text = collapse(value);
                if previous_is_block || (parent_is_block && i == 0) {
                    text = text.trim_start_matches(' ').to_string();
                }
                if next_is_block || (parent_is_block && i + 1 == count) {
                    text = text.trim_end_matches(' ').to_string();
                }
                *value = text;
            }
        } else if child.is_element() {
            let child_in_pre = in_pre || child.is("pre");
            normalize_children(child, child_in_pre);
        }
    }
}

fn is_block_element(node: &Node) -> bool {
    node.is_element() && is_block(node.tag_name())
}

/// Replace every run of ASCII whitespace with a single space
fn collapse(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut previous_was_space = false;

    for c in text.chars() {
        if matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0c') {
            if !previous_was_space {
                result.push(' ');
                previous_was_space = true;
            }
        } else {
            result.push(c);
            previous_was_space = false;
        }
    }

    result
}
