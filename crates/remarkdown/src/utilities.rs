//! Utility functions and constants for HTML processing.

use url::Url;

/// Block-level HTML elements
pub const BLOCK_ELEMENTS: &[&str] = &[
    "address", "article", "aside", "audio", "blockquote", "body", "canvas",
    "center", "dd", "dir", "div", "dl", "dt", "fieldset", "figcaption",
    "figure", "footer", "form", "frameset", "h1", "h2", "h3", "h4", "h5",
    "h6", "header", "hgroup", "hr", "html", "isindex", "li", "main", "menu",
    "nav", "noframes", "noscript", "ol", "output", "p", "pre", "section",
    "table", "tbody", "td", "tfoot", "th", "thead", "tr", "ul", "video",
];

/// Check if a tag is a block-level element
pub fn is_block(tag: &str) -> bool {
    BLOCK_ELEMENTS.contains(&tag.to_lowercase().as_str())
}

/// Clean an attribute value (trim and handle empty)
pub fn clean_attribute(value: Option<&str>) -> String {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_default()
}

/// Scheme of an absolute URI, lowercased; `""` for relative or unparsable
/// URIs.
pub fn uri_scheme(uri: &str) -> String {
    Url::parse(uri.trim())
        .map(|url| url.scheme().to_string())
        .unwrap_or_default()
}

/// Make a URL safe to put inside `(...)`.
///
/// In-page anchors are slugged (`#a (b)` becomes `#a-b`); everything else has
/// parentheses and spaces percent-encoded.
pub fn encode_url(url: &str) -> String {
    let url = url.trim();

    if url.starts_with('#') {
        let mut slug = String::with_capacity(url.len());
        for c in url.chars() {
            let c = if matches!(c, '(' | ')' | ' ') { '-' } else { c };
            if c == '-' && slug.ends_with('-') {
                continue;
            }
            slug.push(c);
        }
        return slug.trim_end_matches('-').to_string();
    }

    url.replace('(', "%28")
        .replace(')', "%29")
        .replace(' ', "%20")
}

/// Escape brackets so text can sit inside `[...]`
pub fn escape_link_text(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '[' | ']') {
            result.push('\\');
        }
        result.push(c);
    }
    result
}

/// Stand-ins for `&lt;` and `&gt;` while other entities are decoded
pub(crate) const LT_PLACEHOLDER: char = '\u{E000}';
pub(crate) const GT_PLACEHOLDER: char = '\u{E001}';

/// Decode HTML entities in raw text, except `&lt;` and `&gt;`.
///
/// Decoding those would turn escaped markup into live HTML once the text is
/// embedded in Markdown.
pub fn decode_text(raw: &str) -> String {
    let shielded = raw
        .replace("&lt;", &LT_PLACEHOLDER.to_string())
        .replace("&gt;", &GT_PLACEHOLDER.to_string());

    html_escape::decode_html_entities(&shielded)
        .replace(LT_PLACEHOLDER, "&lt;")
        .replace(GT_PLACEHOLDER, "&gt;")
}

/// Longest run of consecutive `c` in `text`
pub fn longest_run(text: &str, c: char) -> usize {
    let mut longest = 0;
    let mut current = 0;
    for ch in text.chars() {
        if ch == c {
            current += 1;
            longest = longest.max(current);
        } else {
            current = 0;
        }
    }
    longest
}
