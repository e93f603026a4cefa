//! Error type for the text layer.

/// Errors raised by chunking and wrapping.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TextError {
    /// A single-line operation received text containing a line feed.
    #[error("Cannot {operation} because the text contains a line feed")]
    LineFeed { operation: &'static str },

    /// A shortcode did not lex into an opening marker, a name and a closing marker.
    #[error("The shortcode ({0}) is invalid")]
    MalformedShortcode(String),
}

pub type Result<T> = std::result::Result<T, TextError>;
