//! # remarkdown
//!
//! Convert HTML to lint-clean, stably wrapped Markdown.
//!
//! Conversion dispatches each node of a DOM-like [`Node`] tree to a
//! [`Rule`] by tag name. Block rules decide per element whether their
//! content may be trimmed and how wide it may be wrapped, based on where the
//! element sits: nothing inside a code block or a table is ever wrapped, and
//! every enclosing blockquote or list item narrows the width by the size of
//! the marker it adds. Wrapping never splits a link, an inline code span or,
//! optionally, a Hugo shortcode.
//!
//! The text primitives (wrapping, escaping, blank line handling) live in
//! [`remarkdown_core`] and are re-exported here.
//!
//! ## Example (Node-based)
//!
//! ```rust
//! use remarkdown::{Node, RemarkdownService};
//!
//! let service = RemarkdownService::new();
//!
//! let mut quote = Node::element("blockquote");
//! let mut p = Node::element("p");
//! p.add_child(Node::text("Quoted"));
//! quote.add_child(p);
//!
//! let markdown = service.convert(&quote).unwrap();
//! assert_eq!(markdown, "\n> Quoted\n");
//! ```
//!
//! ## Example (HTML string)
//!
//! ```rust
//! use remarkdown::{Options, RemarkdownService};
//!
//! let service = RemarkdownService::with_options(Options {
//!     github_flavored: true,
//!     ..Default::default()
//! });
//! let markdown = service.convert_html("<ol><li>One</li><li>Two</li></ol>").unwrap();
//! assert_eq!(markdown, "\n1. One\n2. Two\n");
//! ```

pub mod formatting;
#[cfg(feature = "html")]
pub mod html;
pub mod node;
mod options;
mod rules;
mod service;
pub mod utilities;
mod whitespace;

#[cfg(feature = "html")]
pub use html::{parse_html, parse_html_with_limit};
pub use node::{Node, NodeRef, NodeType};
pub use options::{Options, TableHeaderHandling, UnknownTags, DEFAULT_MAX_DEPTH};
pub use remarkdown_core::{
    collapse_blank_lines, default_escape_rules, escape, indent, wrap_line, wrap_text, Chunk,
    ChunkKind, Chunker, EscapeRule, FormattingRules, ShortcodeMode, TextError,
};
pub use rules::{Fragment, Rule, Rules};
pub use service::RemarkdownService;

/// Error type for remarkdown operations
#[derive(Debug, thiserror::Error)]
pub enum RemarkdownError {
    #[error("Unknown tag: {0}")]
    UnknownTag(String),

    /// A `p` directly inside a list; lists must be repaired before conversion
    #[error("Malformed list: <p> directly inside <{tag}>")]
    MalformedList { tag: String },

    #[error("HTML nesting depth {depth} exceeds maximum allowed depth {max}")]
    DepthLimitExceeded { depth: usize, max: usize },

    #[error(transparent)]
    Text(#[from] TextError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, RemarkdownError>;
