//! remarkdown-core - text primitives for Markdown rendering
//!
//! This crate holds the HTML-agnostic half of remarkdown: everything that
//! operates on already rendered Markdown text. It is used by `remarkdown`,
//! which walks an HTML tree and feeds each element's content through these
//! primitives.
//!
//! # Architecture
//!
//! ```text
//!                 ┌─────────┐    ┌──────────┐
//! line of text ──▶│ Chunker │───▶│ wrap_*() │──▶ wrapped lines
//!                 └─────────┘    └──────────┘
//!                                     ▲
//!                      FormattingRules┘ (trim + width per element)
//!
//! escape()                  plain text ──▶ Markdown-safe text
//! indent()                  block      ──▶ prefixed block
//! collapse_blank_lines()    document   ──▶ normalized document
//! ```
//!
//! # Example
//!
//! ```rust
//! use remarkdown_core::{wrap_text, Chunker, FormattingRules};
//!
//! let text = "See [the docs](https://example.com/docs) for details.";
//! let wrapped = wrap_text(text, 20, &Chunker::new()).unwrap();
//! assert_eq!(wrapped, "See\n[the docs](https://example.com/docs)\nfor details.");
//!
//! let rules = FormattingRules::new(true, Some(80));
//! assert_eq!(rules.apply("  hello  ", &Chunker::new()).unwrap(), "hello");
//! ```

mod chunk;
mod error;
mod escape;
mod format;
mod text;
mod wrap;

pub use chunk::{Chunk, ChunkKind, Chunker, ShortcodeMode};
pub use error::{Result, TextError};
pub use escape::{default_escape_rules, escape, EscapeRule};
pub use format::FormattingRules;
pub use text::{collapse_blank_lines, indent};
pub use wrap::{wrap_line, wrap_text};
