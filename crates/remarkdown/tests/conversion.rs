use pretty_assertions::assert_eq;
use remarkdown::{Options, RemarkdownError, RemarkdownService, UnknownTags};

const LOREM: &str = "Lorem ipsum dolor sit amet, consectetur adipiscing elit. Nam ornare purus eu \
scelerisque lobortis. Integer dignissim, urna interdum auctor ultricies, justo nibh imperdiet \
tellus, et porta ex eros sit amet sapien.";

fn convert(html: &str) -> String {
    RemarkdownService::new().convert_html(html).unwrap()
}

fn convert_hugo(html: &str) -> String {
    RemarkdownService::with_options(Options {
        hugo_shortcodes: true,
        ..Default::default()
    })
    .convert_html(html)
    .unwrap()
}

fn convert_gfm(html: &str) -> String {
    RemarkdownService::with_options(Options {
        github_flavored: true,
        ..Default::default()
    })
    .convert_html(html)
    .unwrap()
}

#[test]
fn test_blockquote_paragraphs() {
    assert_eq!(
        convert("<blockquote><p>First</p><p>Second</p></blockquote>"),
        "\n> First\n>\n> Second\n"
    );
}

#[test]
fn test_ordered_list_ignores_start() {
    assert_eq!(
        convert(r#"<ol start="5"><li>a</li><li>b</li><li>c</li></ol>"#),
        "\n1. a\n2. b\n3. c\n"
    );
}

#[test]
fn test_nested_emphasis() {
    assert_eq!(convert("<p><em>x <em>y</em></em></p>"), "\n*x y*\n");
}

#[test]
fn test_inline_formatting() {
    assert_eq!(
        convert("<p>Some <b>bold</b> and <i>italic</i> text</p>"),
        "\nSome **bold** and *italic* text\n"
    );
}

#[test]
fn test_source_whitespace_is_ignored() {
    assert_eq!(
        convert("<ul>\n  <li>One</li>\n  <li>Two</li>\n</ul>"),
        "\n- One\n- Two\n"
    );
}

#[test]
fn test_nested_list() {
    assert_eq!(
        convert("<ul><li>a<ul><li>b</li></ul></li></ul>"),
        "\n- a\n  - b\n"
    );
}

#[test]
fn test_paragraph_is_wrapped() {
    let expected = "
Lorem ipsum dolor sit amet, consectetur adipiscing elit. Nam ornare purus eu
scelerisque lobortis. Integer dignissim, urna interdum auctor ultricies, justo
nibh imperdiet tellus, et porta ex eros sit amet sapien.
";
    assert_eq!(convert(&format!("<p>{LOREM}</p>")), expected);
}

#[test]
fn test_list_item_continuation_is_indented() {
    let expected = "
- Lorem ipsum dolor sit amet, consectetur adipiscing elit. Nam ornare purus eu
  scelerisque lobortis. Integer dignissim, urna interdum auctor ultricies, justo
  nibh imperdiet tellus, et porta ex eros sit amet sapien.
";
    assert_eq!(convert(&format!("<ul><li>{LOREM}</li></ul>")), expected);
}

#[test]
fn test_blockquote_is_wrapped_inside_markers() {
    let expected = "
> Lorem ipsum dolor sit amet, consectetur adipiscing elit. Nam ornare purus eu
> scelerisque lobortis. Integer dignissim, urna interdum auctor ultricies, justo
> nibh imperdiet tellus, et porta ex eros sit amet sapien.
";
    assert_eq!(
        convert(&format!("<blockquote><p>{LOREM}</p></blockquote>")),
        expected
    );
}

#[test]
fn test_links_are_never_split() {
    let words = vec!["Read"; 14].join(" ");
    let html = format!(r#"<p>{words} <a href="https://example.com/docs">the link text</a></p>"#);
    assert_eq!(
        convert(&html),
        format!("\n{words}\n[the link text](https://example.com/docs)\n")
    );
}

#[test]
fn test_table() {
    assert_eq!(
        convert("<table><tr><th>A</th><th>B</th></tr><tr><td>1</td><td>2</td></tr></table>"),
        "\n| A | B |\n| --- | --- |\n| 1 | 2 |\n"
    );
}

#[test]
fn test_table_content_is_not_wrapped() {
    let html = format!("<table><tr><td><p>{LOREM}</p></td></tr></table>");
    assert_eq!(
        convert(&html),
        format!("\n| {LOREM} |\n| --- |\n")
    );
}

#[test]
fn test_fenced_code_block() {
    assert_eq!(
        convert_gfm(r#"<pre><code class="language-rust">fn main() {}
</code></pre>"#),
        "\n```rust\nfn main() {}\n```\n"
    );
}

#[test]
fn test_github_flavored_line_break() {
    assert_eq!(convert_gfm("<p>one<br>two</p>"), "\none\\\ntwo\n");
    assert_eq!(convert("<p>one<br>two</p>"), "\none  \ntwo\n");
}

#[test]
fn test_unknown_tag_raises() {
    let service = RemarkdownService::with_options(Options {
        unknown_tags: UnknownTags::Raise,
        ..Default::default()
    });

    let err = service.convert_html("<custom-tag>x</custom-tag>").unwrap_err();
    assert!(matches!(err, RemarkdownError::UnknownTag(ref tag) if tag == "custom-tag"));
}

#[test]
fn test_paragraph_directly_in_list_is_rejected() {
    let err = RemarkdownService::new()
        .convert_html("<ul><p>x</p></ul>")
        .unwrap_err();
    assert!(matches!(err, RemarkdownError::MalformedList { ref tag } if tag == "ul"));
}

#[test]
fn test_deep_nesting_is_rejected() {
    let html = format!("{}x{}", "<div>".repeat(600), "</div>".repeat(600));
    let err = RemarkdownService::new().convert_html(&html).unwrap_err();
    assert!(matches!(err, RemarkdownError::DepthLimitExceeded { max: 512, .. }));
}

const FIGURE_OPEN: &str = r#"{{< figure src="/images/photo.png""#;
const FIGURE_TITLE: &str = r#"title="one two three four five six seven eight nine ten eleven twelve thirteen fourteen fifteen" >}}"#;

fn long_href() -> String {
    format!("https://example.com/{}", "a".repeat(80))
}

#[test]
fn test_shortcode_is_kept_whole() {
    assert_eq!(
        convert_hugo("<p>{{< gist spf13 7896402 >}}</p>"),
        "\n{{< gist spf13 7896402 >}}\n"
    );
}

#[test]
fn test_shortcode_in_list_paragraph_keeps_quoted_value() {
    let html = format!("<ul><li><p>{FIGURE_OPEN} {FIGURE_TITLE}</p></li></ul>");
    assert_eq!(
        convert_hugo(&html),
        format!("\n- {FIGURE_OPEN}\n  {FIGURE_TITLE}\n")
    );
}

#[test]
fn test_shortcode_in_blockquote_is_atomic() {
    let html = format!("<blockquote><p>intro words {FIGURE_OPEN} {FIGURE_TITLE}</p></blockquote>");
    assert_eq!(
        convert_hugo(&html),
        format!("\n> intro words\n> {FIGURE_OPEN} {FIGURE_TITLE}\n")
    );
}

#[test]
fn test_nested_list_with_overlong_link() {
    let href = long_href();
    let html = format!(r#"<ul><li>outer<ul><li><a href="{href}">x</a></li></ul></li></ul>"#);
    assert_eq!(convert(&html), format!("\n- outer\n  - [x]({href})\n"));
}

#[test]
fn test_nested_blockquote_with_overlong_link() {
    let href = long_href();
    let html = format!(
        r#"<blockquote><blockquote><p><a href="{href}">x</a></p></blockquote></blockquote>"#
    );
    assert_eq!(convert(&html), format!("\n> > [x]({href})\n"));
}

#[test]
fn test_literal_less_than() {
    assert_eq!(convert("<p>if a < b then</p>"), "\nif a < b then\n");
    assert_eq!(convert("<p>a &lt; b</p>"), "\na &lt; b\n");
}

#[test]
fn test_pass_through_tags() {
    let service = RemarkdownService::with_options(Options {
        pass_through_tags: vec!["b".to_string()],
        ..Default::default()
    });
    assert_eq!(
        service.convert_html("<p><b>bold</b></p>").unwrap(),
        "\n<b>bold</b>\n"
    );
}

#[test]
fn test_unknown_tag_policies() {
    let html = "<p>a<custom-tag>y</custom-tag></p>";
    let convert_with = |unknown_tags| {
        RemarkdownService::with_options(Options {
            unknown_tags,
            ..Default::default()
        })
        .convert_html(html)
        .unwrap()
    };

    assert_eq!(convert(html), "\na<custom-tag>y</custom-tag>\n");
    assert_eq!(convert_with(UnknownTags::PassThrough), "\na<custom-tag>y</custom-tag>\n");
    assert_eq!(convert_with(UnknownTags::Drop), "\na\n");
    assert_eq!(convert_with(UnknownTags::Bypass), "\nay\n");
}
