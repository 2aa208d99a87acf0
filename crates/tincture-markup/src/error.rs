//! Markup parse errors.

use tincture_text::StyleError;

/// Error returned when markup cannot be turned into styled text.
///
/// Positions are byte offsets into the markup source.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// The input bytes are not UTF-8.
    #[error("markup is not valid UTF-8: {0}")]
    Encoding(#[from] std::str::Utf8Error),
    /// The tokenizer rejected the input: a stray `<`, an unknown entity,
    /// a broken attribute, unterminated markup.
    #[error("malformed markup at byte {position}: {message}")]
    Syntax { position: usize, message: String },
    /// A closing tag with nothing open.
    #[error("unexpected closing tag </{tag}> at byte {position}")]
    UnexpectedClose { tag: String, position: usize },
    /// A closing tag that does not match the innermost open element.
    #[error("closing tag </{found}> at byte {position} does not match open <{expected}>")]
    MismatchedClose {
        expected: String,
        found: String,
        position: usize,
    },
    /// The input ended with elements still open.
    #[error("unbalanced markup: <{tag}> is never closed")]
    Unclosed { tag: String },
    /// Elements nest deeper than allowed.
    #[error("markup nests deeper than {max_depth} elements at byte {position}")]
    TooDeep { max_depth: usize, position: usize },
    /// A parsed run did not fit the text it was parsed from.
    #[error("invalid styled run: {0}")]
    InvalidRun(#[from] StyleError),
}

impl ParseError {
    pub(crate) fn syntax(position: usize, cause: impl std::fmt::Display) -> Self {
        ParseError::Syntax {
            position,
            message: cause.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mismatched_close_display() {
        let err = ParseError::MismatchedClose {
            expected: "b".into(),
            found: "i".into(),
            position: 7,
        };
        let msg = err.to_string();
        assert!(msg.contains("</i>"));
        assert!(msg.contains("<b>"));
        assert!(msg.contains("7"));
    }

    #[test]
    fn test_unclosed_display_mentions_unbalanced() {
        let msg = ParseError::Unclosed { tag: "b".into() }.to_string();
        assert!(msg.contains("unbalanced"));
    }
}
