//! Line-oriented helpers: indentation and blank line normalization.

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::Regex;

static LEADING_BLANK_LINES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:\r?\n)+").expect("leading blank line pattern is valid"));
static TRAILING_BLANK_LINES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:\r?\n)+$").expect("trailing blank line pattern is valid"));
static INNER_BLANK_LINES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:\r?\n){3,}").expect("inner blank line pattern is valid"));

/// Prefix every line of `text` with `prefix`.
///
/// Lines are split the way [`str::lines`] splits them, so a trailing newline
/// does not produce an extra line and the result never ends with a newline.
/// Empty lines are left alone unless `indent_blank_lines` is set.
pub fn indent(text: &str, prefix: &str, indent_blank_lines: bool) -> String {
    let mut result = String::with_capacity(text.len() + prefix.len() * 4);

    for (i, line) in text.lines().enumerate() {
        if i > 0 {
            result.push('\n');
        }
        if indent_blank_lines || !line.is_empty() {
            result.push_str(prefix);
        }
        result.push_str(line);
    }

    result
}

/// Collapse runs of blank lines.
///
/// At most one line feed is kept at the start and at the end of the text, and
/// three or more consecutive line breaks in the middle become exactly two.
pub fn collapse_blank_lines(text: &str) -> Cow<'_, str> {
    let mut text = Cow::Borrowed(text);

    let leading = LEADING_BLANK_LINES
        .find(&text)
        .map(|m| (m.end(), line_feeds(m.as_str())));
    if let Some((end, breaks)) = leading {
        if breaks > 1 {
            text = Cow::Owned(format!("\n{}", &text[end..]));
        }
    }

    let trailing = TRAILING_BLANK_LINES
        .find(&text)
        .map(|m| (m.start(), line_feeds(m.as_str())));
    if let Some((start, breaks)) = trailing {
        if breaks > 1 {
            text = Cow::Owned(format!("{}\n", &text[..start]));
        }
    }

    if INNER_BLANK_LINES.is_match(&text) {
        text = Cow::Owned(INNER_BLANK_LINES.replace_all(&text, "\n\n").into_owned());
    }

    text
}

fn line_feeds(s: &str) -> usize {
    s.bytes().filter(|&b| b == b'\n').count()
}
