//! Styling errors.

/// Error returned when a run cannot be attached to a base string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StyleError {
    /// The range ends past the end of the text.
    #[error("range {start}..{end} exceeds text length {len}")]
    OutOfBounds { start: usize, end: usize, len: usize },
    /// The range starts after it ends.
    #[error("range {start}..{end} is inverted")]
    Inverted { start: usize, end: usize },
    /// One of the range ends splits a UTF-8 sequence.
    #[error("offset {offset} is not on a character boundary")]
    NotCharBoundary { offset: usize },
}

/// Error returned when a point size is zero, negative, or not finite.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
#[error("point size must be a finite positive number, got {0}")]
pub struct InvalidPointSize(pub f32);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_bounds_display() {
        let err = StyleError::OutOfBounds {
            start: 2,
            end: 9,
            len: 5,
        };
        let msg = err.to_string();
        assert!(msg.contains("2..9"));
        assert!(msg.contains("length 5"));
    }

    #[test]
    fn test_invalid_point_size_display() {
        let msg = InvalidPointSize(-3.0).to_string();
        assert!(msg.contains("-3"));
    }
}
