//! Greedy line wrapping over [`Chunk`](crate::Chunk)s.

use crate::chunk::Chunker;
use crate::error::{Result, TextError};

/// Wrap a single line so no output line exceeds `width` characters, unless a
/// single chunk is itself wider than the remaining budget.
///
/// Leading spaces are treated as indentation: they are repeated on every
/// output line and count against `width`. Trailing spaces are kept after the
/// last output line. Lines that already fit are returned unchanged.
pub fn wrap_line(line: &str, width: usize, chunker: &Chunker) -> Result<String> {
    if line.contains('\n') {
        return Err(TextError::LineFeed {
            operation: "wrap a text line",
        });
    }

    if line.chars().count() <= width {
        return Ok(line.to_string());
    }

    let body = line.trim_start_matches(' ');
    let indent = &line[..line.len() - body.len()];
    let content = body.trim_end_matches(' ');
    let trailing = &body[content.len()..];

    let available = width.saturating_sub(indent.chars().count()).max(1);

    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut current_width = 0;

    for chunk in chunker.chunk(content)? {
        let chunk_width = chunk.width();

        if current_width > 0 && current_width + 1 + chunk_width > available {
            lines.push(std::mem::take(&mut current));
            current_width = 0;
        }

        if current_width > 0 {
            current.push(' ');
            current_width += 1;
        }
        current.push_str(&chunk.text);
        current_width += chunk_width;
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }

    let mut wrapped = String::with_capacity(line.len() + lines.len() * (indent.len() + 1));
    for (i, l) in lines.iter().enumerate() {
        if i > 0 {
            wrapped.push('\n');
        }
        wrapped.push_str(indent);
        wrapped.push_str(l);
    }
    wrapped.push_str(trailing);

    Ok(wrapped)
}

/// Wrap every line of `text` independently.
///
/// Input lines are split on `\n` with a trailing `\r` removed; output lines
/// are joined with `\n`.
pub fn wrap_text(text: &str, width: usize, chunker: &Chunker) -> Result<String> {
    if text.is_empty() {
        return Ok(String::new());
    }

    let mut wrapped = String::with_capacity(text.len());
    for (i, line) in text.split('\n').enumerate() {
        if i > 0 {
            wrapped.push('\n');
        }
        let line = line.strip_suffix('\r').unwrap_or(line);
        wrapped.push_str(&wrap_line(line, width, chunker)?);
    }

    Ok(wrapped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunk::ShortcodeMode;
    use proptest::prelude::*;

    const LOREM: &str = "Lorem ipsum dolor sit amet, consectetur adipiscing elit. Nam ornare purus eu scelerisque lobortis. Integer dignissim, urna interdum auctor ultricies, justo nibh imperdiet tellus, et porta ex eros sit amet sapien.";

    #[test]
    fn test_short_line_is_unchanged() {
        assert_eq!(wrap_line("foo bar", 80, &Chunker::new()).unwrap(), "foo bar");
    }

    #[test]
    fn test_wrap_lorem() {
        let wrapped = wrap_line(LOREM, 50, &Chunker::new()).unwrap();
        let lines: Vec<&str> = wrapped.lines().collect();
        assert_eq!(
            lines,
            vec![
                "Lorem ipsum dolor sit amet, consectetur adipiscing",
                "elit. Nam ornare purus eu scelerisque lobortis.",
                "Integer dignissim, urna interdum auctor ultricies,",
                "justo nibh imperdiet tellus, et porta ex eros sit",
                "amet sapien."
            ]
        );
    }

    #[test]
    fn test_wrap_line_rejects_line_feed() {
        let err = wrap_line("foo\nbar", 10, &Chunker::new()).unwrap_err();
        assert!(matches!(err, TextError::LineFeed { .. }));
    }

    #[test]
    fn test_overlong_chunk_gets_its_own_line() {
        let wrapped = wrap_line(
            "see [a very long link label](https://example.com/some/long/path) here",
            20,
            &Chunker::new(),
        )
        .unwrap();
        assert_eq!(
            wrapped,
            "see\n[a very long link label](https://example.com/some/long/path)\nhere"
        );
    }

    #[test]
    fn test_indentation_is_kept() {
        let wrapped = wrap_line("    one two three four", 14, &Chunker::new()).unwrap();
        assert_eq!(wrapped, "    one two\n    three four");
    }

    #[test]
    fn test_trailing_spaces_are_kept() {
        let wrapped = wrap_line("one two three  ", 10, &Chunker::new()).unwrap();
        assert_eq!(wrapped, "one two\nthree  ");
    }

    #[test]
    fn test_wrap_text_handles_crlf() {
        let wrapped = wrap_text("one two three\r\nfour", 8, &Chunker::new()).unwrap();
        assert_eq!(wrapped, "one two\nthree\nfour");
    }

    #[test]
    fn test_wrap_text_keeps_blank_lines() {
        let wrapped = wrap_text("a\n\nb", 8, &Chunker::new()).unwrap();
        assert_eq!(wrapped, "a\n\nb");
    }

    #[test]
    fn test_wrap_text_empty() {
        assert_eq!(wrap_text("", 8, &Chunker::new()).unwrap(), "");
    }

    #[test]
    fn test_closing_shortcode_marker_never_starts_a_line() {
        let chunker = Chunker::with_shortcodes(ShortcodeMode::Split);
        let wrapped = wrap_line("aaaa {{< gist spf13 7896402 >}}", 12, &chunker).unwrap();
        assert!(wrapped.lines().all(|l| !l.starts_with(">}}")));
        assert_eq!(wrapped, "aaaa {{<\ngist spf13\n7896402 >}}");
    }

    proptest! {
        #[test]
        fn prop_wrapped_lines_fit(
            words in prop::collection::vec("[a-z]{1,10}", 1..40),
            width in 10usize..60,
        ) {
            let line = words.join(" ");
            let wrapped = wrap_line(&line, width, &Chunker::new()).unwrap();
            for l in wrapped.lines() {
                prop_assert!(l.chars().count() <= width);
            }
        }

        #[test]
        fn prop_wrapping_keeps_words(
            words in prop::collection::vec("[a-z]{1,10}", 1..40),
            width in 1usize..60,
        ) {
            let line = words.join(" ");
            let wrapped = wrap_line(&line, width, &Chunker::new()).unwrap();
            let rewrapped: Vec<&str> = wrapped.split_whitespace().collect();
            prop_assert_eq!(rewrapped, words.iter().map(String::as_str).collect::<Vec<_>>());
        }

        #[test]
        fn prop_wrapping_is_idempotent(
            words in prop::collection::vec("[a-z]{1,14}", 1..40),
            width in 1usize..60,
        ) {
            let chunker = Chunker::new();
            let once = wrap_text(&words.join(" "), width, &chunker).unwrap();
            let twice = wrap_text(&once, width, &chunker).unwrap();
            prop_assert_eq!(once, twice);
        }
    }
}
