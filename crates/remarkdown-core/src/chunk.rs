//! Splitting a single line of Markdown into atomic wrap units.
//!
//! A chunk is the smallest piece of text the wrapper may move to another
//! line. Most chunks are plain words, but inline links, images and code spans
//! are kept whole (including any punctuation touching them), because breaking
//! them across lines changes how they render. Hugo shortcodes
//! (`{{< name params >}}`) are either kept whole or re-lexed into name and
//! parameter tokens that are safe to break between.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{Result, TextError};

const SHORTCODE_OPEN: &str = "{{<";
const SHORTCODE_CLOSE: &str = ">}}";

/// Words, links/images and inline code.
static CHUNK_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?P<link>\S*!?\[.*?\]\(.*?\)\S*)|(?P<code>\S*?`.*?`\S*)|(?P<word>[^ ]+)",
    )
    .expect("chunk pattern is valid")
});

/// Same as [`CHUNK_PATTERN`] with whole shortcodes as an extra alternative.
static SHORTCODE_CHUNK_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?P<link>\S*!?\[.*?\]\(.*?\)\S*)|(?P<code>\S*?`.*?`\S*)|(?P<shortcode>\S*\{\{< .*? >\}\}\S*)|(?P<word>[^ ]+)",
    )
    .expect("shortcode chunk pattern is valid")
});

/// Bare words, or single/double quoted strings with backslash-escaped quotes.
static SHORTCODE_TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"[^\s"']+|"(?:[^"\\]|\\.)*"|'(?:[^'\\]|\\.)*'"#)
        .expect("shortcode token pattern is valid")
});

/// Classification of a chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChunkKind {
    /// A run of non-space characters.
    Word,
    /// An inline link or image, e.g. `[text](url)` or `![alt](src)`.
    Link,
    /// An inline code span delimited by backticks.
    Code,
    /// A whole shortcode, e.g. `{{< gist spf13 7896402 >}}`.
    Shortcode,
    /// One token of a shortcode that was split into name and parameters.
    ShortcodeToken,
}

/// A contiguous span of a line that must not be broken across lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    pub kind: ChunkKind,
    pub text: String,
}

impl Chunk {
    pub fn new(kind: ChunkKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    /// Width in characters.
    pub fn width(&self) -> usize {
        self.text.chars().count()
    }
}

/// How shortcodes are treated while chunking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShortcodeMode {
    /// Shortcodes are not recognized; they split like ordinary words.
    #[default]
    Disabled,
    /// Every shortcode is a single chunk.
    ///
    /// Used inside blockquotes, where each wrapped line gets a `> ` prefix.
    Atomic,
    /// Shortcodes are split into the open marker, the name, and one chunk
    /// per parameter, with the closing marker glued to the last token.
    Split,
}

/// Splits lines into [`Chunk`]s.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Chunker {
    shortcodes: ShortcodeMode,
}

impl Chunker {
    /// Create a chunker that does not recognize shortcodes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a chunker with the given shortcode handling.
    pub fn with_shortcodes(shortcodes: ShortcodeMode) -> Self {
        Self { shortcodes }
    }

    /// Get the shortcode handling of this chunker.
    pub fn shortcodes(&self) -> ShortcodeMode {
        self.shortcodes
    }

    /// Split a single line into chunks.
    ///
    /// Matching is leftmost and non-overlapping. Runs of spaces between
    /// chunks are dropped, so joining the result with single spaces yields
    /// the line with its space runs collapsed.
    ///
    /// An empty line yields no chunks at all, not a single empty chunk.
    ///
    /// Fails if `line` contains a line feed; use [`crate::wrap_text`] for
    /// multi-line text.
    pub fn chunk(&self, line: &str) -> Result<Vec<Chunk>> {
        if line.contains('\n') {
            return Err(TextError::LineFeed {
                operation: "parse chunks from text",
            });
        }

        let pattern = match self.shortcodes {
            ShortcodeMode::Disabled => &*CHUNK_PATTERN,
            ShortcodeMode::Atomic | ShortcodeMode::Split => &*SHORTCODE_CHUNK_PATTERN,
        };

        let mut chunks = Vec::new();

        for caps in pattern.captures_iter(line) {
            if let Some(m) = caps.name("link") {
                chunks.push(Chunk::new(ChunkKind::Link, m.as_str()));
            } else if let Some(m) = caps.name("code") {
                chunks.push(Chunk::new(ChunkKind::Code, m.as_str()));
            } else if let Some(m) = caps.name("shortcode") {
                if self.shortcodes == ShortcodeMode::Split {
                    chunks.extend(split_shortcode(m.as_str())?);
                } else {
                    chunks.push(Chunk::new(ChunkKind::Shortcode, m.as_str()));
                }
            } else if let Some(m) = caps.name("word") {
                chunks.push(Chunk::new(ChunkKind::Word, m.as_str()));
            }
        }

        Ok(chunks)
    }
}

/// Split a shortcode chunk (possibly surrounded by punctuation) into tokens.
///
/// `"({{< figure src='a.png' >}})"` becomes `"({{<"`, `"figure"` and
/// `"src='a.png' >}})"`. A closing marker never stands alone on a line, since
/// a line starting with `>` would be read as a blockquote.
fn split_shortcode(span: &str) -> Result<Vec<Chunk>> {
    let atomic = || Ok(vec![Chunk::new(ChunkKind::Shortcode, span)]);

    let Some(start) = span.find(SHORTCODE_OPEN) else {
        return atomic();
    };
    let Some(close) = span[start..].find(SHORTCODE_CLOSE) else {
        return atomic();
    };
    let end = start + close + SHORTCODE_CLOSE.len();

    let prefix = &span[..start];
    let shortcode = &span[start..end];
    let suffix = &span[end..];

    let mut tokens: Vec<String> = SHORTCODE_TOKEN
        .find_iter(shortcode)
        .map(|m| m.as_str().to_string())
        .collect();

    // An unbalanced quote would be silently dropped by the lexer.
    if strip_whitespace(&tokens.concat()) != strip_whitespace(shortcode) {
        return atomic();
    }

    // Glue `name=` to the quoted value that follows it.
    let mut i = 0;
    while i < tokens.len() {
        if tokens[i].ends_with('=') && i + 2 < tokens.len() {
            let value = tokens.remove(i + 1);
            tokens[i].push_str(&value);
        }
        i += 1;
    }

    if tokens.len() < 3 {
        return Err(TextError::MalformedShortcode(shortcode.to_string()));
    }

    if let Some(close) = tokens.pop() {
        if let Some(last) = tokens.last_mut() {
            last.push(' ');
            last.push_str(&close);
        }
    }

    if let Some(first) = tokens.first_mut() {
        first.insert_str(0, prefix);
    }
    if let Some(last) = tokens.last_mut() {
        last.push_str(suffix);
    }

    Ok(tokens
        .into_iter()
        .map(|text| Chunk::new(ChunkKind::ShortcodeToken, text))
        .collect())
}

fn strip_whitespace(s: &str) -> String {
    s.chars().filter(|c| !c.is_whitespace()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn texts(chunks: &[Chunk]) -> Vec<&str> {
        chunks.iter().map(|c| c.text.as_str()).collect()
    }

    fn split(line: &str) -> Vec<Chunk> {
        Chunker::with_shortcodes(ShortcodeMode::Split)
            .chunk(line)
            .unwrap()
    }

    #[test]
    fn test_empty_line() {
        assert!(Chunker::new().chunk("").unwrap().is_empty());
        assert!(Chunker::new().chunk("   ").unwrap().is_empty());
    }

    #[test]
    fn test_line_feed_is_rejected() {
        let err = Chunker::new().chunk("foo\nbar").unwrap_err();
        assert!(matches!(err, TextError::LineFeed { .. }));
    }

    #[test]
    fn test_words() {
        let chunks = Chunker::new().chunk("foo bar foobar").unwrap();
        assert_eq!(texts(&chunks), vec!["foo", "bar", "foobar"]);
        assert!(chunks.iter().all(|c| c.kind == ChunkKind::Word));
    }

    #[test]
    fn test_tabs_are_preserved() {
        let chunks = Chunker::new().chunk("foo\tbar \tfoobar").unwrap();
        assert_eq!(texts(&chunks), vec!["foo\tbar", "\tfoobar"]);
    }

    #[test]
    fn test_inline_link() {
        let chunks = Chunker::new()
            .chunk("foo bar [Example link](http://example.com) foobar")
            .unwrap();
        assert_eq!(
            texts(&chunks),
            vec!["foo", "bar", "[Example link](http://example.com)", "foobar"]
        );
        assert_eq!(chunks[2].kind, ChunkKind::Link);
    }

    #[test]
    fn test_inline_image_with_touching_punctuation() {
        let chunks = Chunker::new()
            .chunk("foo bar <![Example image](http://example.com/img.png)>, foobar")
            .unwrap();
        assert_eq!(
            texts(&chunks),
            vec![
                "foo",
                "bar",
                "<![Example image](http://example.com/img.png)>,",
                "foobar"
            ]
        );
    }

    #[test]
    fn test_inline_code() {
        let chunks = Chunker::new().chunk("run `cargo test --all` now").unwrap();
        assert_eq!(texts(&chunks), vec!["run", "`cargo test --all`", "now"]);
        assert_eq!(chunks[1].kind, ChunkKind::Code);
    }

    #[test]
    fn test_shortcodes_disabled_split_like_words() {
        let chunks = Chunker::new().chunk("{{< gist spf13 >}}").unwrap();
        assert_eq!(texts(&chunks), vec!["{{<", "gist", "spf13", ">}}"]);
    }

    #[test]
    fn test_shortcode_split() {
        let chunks = split("foo bar {{< gist spf13 7896402 >}} foobar");
        assert_eq!(
            texts(&chunks),
            vec!["foo", "bar", "{{<", "gist", "spf13", "7896402 >}}", "foobar"]
        );
        assert_eq!(chunks[3].kind, ChunkKind::ShortcodeToken);
    }

    #[test]
    fn test_shortcode_with_quoted_parameter() {
        let chunks = split("{{< kbd \"stsadm -o enumsites\" >}}");
        assert_eq!(
            texts(&chunks),
            vec!["{{<", "kbd", "\"stsadm -o enumsites\" >}}"]
        );
    }

    #[test]
    fn test_shortcode_inside_quotes() {
        let chunks = split("\"{{< kbd \"stsadm -o enumsites\" >}}\"");
        assert_eq!(
            texts(&chunks),
            vec!["\"{{<", "kbd", "\"stsadm -o enumsites\" >}}\""]
        );
    }

    #[test]
    fn test_shortcode_named_parameter() {
        let chunks = split("{{< figure src='http://example.com/img.png' >}}");
        assert_eq!(
            texts(&chunks),
            vec!["{{<", "figure", "src='http://example.com/img.png' >}}"]
        );
    }

    #[test]
    fn test_shortcode_escaped_quote() {
        let chunks = split(r#"{{< kbd title="say \"hi\"" >}}"#);
        assert_eq!(
            texts(&chunks),
            vec!["{{<", "kbd", r#"title="say \"hi\"" >}}"#]
        );
    }

    #[test]
    fn test_shortcode_wrapped_in_punctuation() {
        let chunks = split("\"({{< gist spf13 7896402 >}})\"");
        assert_eq!(
            texts(&chunks),
            vec!["\"({{<", "gist", "spf13", "7896402 >}})\""]
        );
    }

    #[test]
    fn test_multiple_shortcodes() {
        let chunks = split(
            "foo bar {{< gist spf13 7896402 >}} {{< instagram BWNjjyYFxVx hidecaption >}}",
        );
        assert_eq!(
            texts(&chunks),
            vec![
                "foo",
                "bar",
                "{{<",
                "gist",
                "spf13",
                "7896402 >}}",
                "{{<",
                "instagram",
                "BWNjjyYFxVx",
                "hidecaption >}}"
            ]
        );
    }

    #[test]
    fn test_image_then_shortcode() {
        let chunks = split("foo ![Example image](http://example.com/img.png) {{< gist spf13 >}}");
        assert_eq!(
            texts(&chunks),
            vec![
                "foo",
                "![Example image](http://example.com/img.png)",
                "{{<",
                "gist",
                "spf13 >}}"
            ]
        );
    }

    #[test]
    fn test_atomic_shortcode() {
        let chunks = Chunker::with_shortcodes(ShortcodeMode::Atomic)
            .chunk("foo bar {{< gist spf13 7896402 >}} foobar")
            .unwrap();
        assert_eq!(
            texts(&chunks),
            vec!["foo", "bar", "{{< gist spf13 7896402 >}}", "foobar"]
        );
        assert_eq!(chunks[2].kind, ChunkKind::Shortcode);
    }

    #[test]
    fn test_empty_shortcode_is_malformed() {
        let err = Chunker::with_shortcodes(ShortcodeMode::Split)
            .chunk("{{<  >}}")
            .unwrap_err();
        assert_eq!(err, TextError::MalformedShortcode("{{<  >}}".to_string()));
    }

    #[test]
    fn test_unbalanced_quote_stays_whole() {
        let chunks = split("{{< kbd \"open >}}");
        assert_eq!(texts(&chunks), vec!["{{< kbd \"open >}}"]);
        assert_eq!(chunks[0].kind, ChunkKind::Shortcode);
    }

    proptest! {
        #[test]
        fn prop_chunks_rejoin_to_collapsed_line(
            words in prop::collection::vec("[a-zA-Z0-9.,;:!?-]{1,12}", 0..24),
            gaps in prop::collection::vec(1usize..4, 0..24),
        ) {
            let mut line = String::new();
            for (i, word) in words.iter().enumerate() {
                if i > 0 {
                    let gap = gaps.get(i).copied().unwrap_or(1);
                    line.push_str(&" ".repeat(gap));
                }
                line.push_str(word);
            }

            let chunks = Chunker::new().chunk(&line).unwrap();
            let rejoined = texts(&chunks).join(" ");
            prop_assert_eq!(rejoined, words.join(" "));
        }

        #[test]
        fn prop_links_survive_as_single_chunks(
            before in "[a-z]{1,8}",
            label in "[a-z]{1,6}( [a-z]{1,6}){0,3}",
            url in "https://[a-z]{1,10}\\.com/[a-z]{0,8}",
            after in "[a-z]{1,8}",
        ) {
            let link = format!("[{label}]({url})");
            let line = format!("{before} {link} {after}");

            let chunks = Chunker::new().chunk(&line).unwrap();
            prop_assert_eq!(texts(&chunks), vec![before.as_str(), link.as_str(), after.as_str()]);
        }
    }
}
