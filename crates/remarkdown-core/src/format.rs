//! Per-node formatting policy.

use crate::chunk::Chunker;
use crate::error::Result;
use crate::wrap::wrap_text;

/// How the rendered content of an element is post-processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormattingRules {
    /// Strip leading and trailing whitespace from the content.
    pub can_trim: bool,
    /// Wrap content to this many characters. `None` leaves lines unbounded.
    pub wrap_line_length: Option<usize>,
}

impl FormattingRules {
    /// Leave content exactly as rendered.
    pub const PRESERVE: Self = Self {
        can_trim: false,
        wrap_line_length: None,
    };

    pub fn new(can_trim: bool, wrap_line_length: Option<usize>) -> Self {
        Self {
            can_trim,
            wrap_line_length,
        }
    }

    /// Trim, then wrap, as configured.
    pub fn apply(&self, content: &str, chunker: &Chunker) -> Result<String> {
        let content = if self.can_trim {
            content.trim()
        } else {
            content
        };

        self.wrap(content, chunker)
    }

    /// Wrap without trimming.
    pub fn wrap(&self, content: &str, chunker: &Chunker) -> Result<String> {
        match self.wrap_line_length {
            Some(width) => wrap_text(content, width, chunker),
            None => Ok(content.to_string()),
        }
    }
}

impl Default for FormattingRules {
    fn default() -> Self {
        Self::PRESERVE
    }
}
