//! Manual construction of styled text.
//!
//! [`StyledTextBuilder`] attaches attributes to explicit byte ranges or to the
//! first occurrence of a substring. [`build_bold_text`] is the common case of
//! bolding a handful of substrings inside a display string.

use std::ops::Range;

use crate::attribute::{Attribute, Attributes, Font, PointSize};
use crate::styled::{check_range, StyledRun, StyledText};
use crate::error::StyleError;

/// Accumulates runs over a fixed base string.
///
/// Runs are kept in the order they are added, which is the order they are
/// applied in when they overlap.
#[derive(Debug, Clone)]
pub struct StyledTextBuilder {
    text: String,
    runs: Vec<StyledRun>,
}

impl StyledTextBuilder {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            runs: Vec::new(),
        }
    }

    /// Attaches `attributes` to a byte range of the text.
    ///
    /// Empty ranges are accepted and record nothing.
    ///
    /// # Errors
    ///
    /// Returns an error if the range is inverted, extends past the end of the
    /// text, or splits a character.
    pub fn style_range(
        &mut self,
        range: Range<usize>,
        attributes: impl Into<Attributes>,
    ) -> Result<&mut Self, StyleError> {
        check_range(&self.text, range.start, range.end)?;
        if !range.is_empty() {
            self.runs
                .push(StyledRun::new(range.start, range.len(), attributes));
        }
        Ok(self)
    }

    /// Attaches `attributes` to the first occurrence of `needle`.
    ///
    /// Matching is ordinal: bytes are compared exactly, with no case folding
    /// or normalization. Returns the styled range, or `None` when `needle` is
    /// empty or does not occur, in which case nothing is recorded.
    pub fn style_first(
        &mut self,
        needle: &str,
        attributes: impl Into<Attributes>,
    ) -> Option<Range<usize>> {
        if needle.is_empty() {
            return None;
        }
        let start = self.text.find(needle)?;
        let range = start..start + needle.len();
        self.runs
            .push(StyledRun::new(range.start, range.len(), attributes));
        Some(range)
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn build(self) -> StyledText {
        StyledText::from_checked(self.text, self.runs)
    }
}

/// Renders the first occurrence of each of `bold` in a bold font of `size`.
///
/// Substrings are located in request order with ordinal matching. A substring
/// that does not occur in `full` (or is empty) is skipped without error; the
/// result simply has no run for it. Overlapping occurrences each get their
/// own run.
///
/// # Example
///
/// ```rust
/// use tincture_text::{build_bold_text, PointSize};
///
/// let size = PointSize::new(17.0).unwrap();
/// let styled = build_bold_text("Hello Ana, welcome back", ["Ana", "Bob"], size);
///
/// // "Bob" does not occur, so only one run is produced.
/// assert_eq!(styled.runs().len(), 1);
/// assert_eq!(styled.run_text(&styled.runs()[0]), Some("Ana"));
/// ```
pub fn build_bold_text<I, S>(full: &str, bold: I, size: PointSize) -> StyledText
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let attributes = Attributes::from(Attribute::Font(Font::bold(size)));
    let mut builder = StyledTextBuilder::new(full);
    for needle in bold {
        let needle = needle.as_ref();
        if builder.style_first(needle, attributes.clone()).is_none() {
            tracing::debug!(needle, "bold substring not found, skipping");
        }
    }
    builder.build()
}
