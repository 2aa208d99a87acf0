//! The styled text value and its runs.

use std::fmt;
use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::attribute::Attributes;
use crate::builder::StyledTextBuilder;
use crate::error::StyleError;

/// A range of the base string plus the attributes applied over it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyledRun {
    start: usize,
    len: usize,
    attributes: Attributes,
}

impl StyledRun {
    /// Creates a run covering `start..start + len`.
    ///
    /// The run is only checked against a base string when it is attached,
    /// through [`StyledTextBuilder`] or [`StyledText::from_parts`].
    pub fn new(start: usize, len: usize, attributes: impl Into<Attributes>) -> Self {
        Self {
            start,
            len,
            attributes: attributes.into(),
        }
    }

    /// Byte offset of the first covered character.
    pub fn start(&self) -> usize {
        self.start
    }

    /// Covered length in bytes.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Exclusive end offset, saturating at `usize::MAX`.
    pub fn end(&self) -> usize {
        self.start.saturating_add(self.len)
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end()
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    fn covers(&self, offset: usize) -> bool {
        self.start <= offset && offset < self.end()
    }
}

/// A maximal stretch of text whose resolved attributes do not change.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment<'a> {
    pub range: Range<usize>,
    pub text: &'a str,
    pub attributes: Attributes,
}

/// A base string paired with an ordered list of [`StyledRun`]s.
///
/// Every run lies within the text and starts and ends on `char` boundaries.
/// The order of runs is the order they were recorded in; where runs overlap,
/// later runs win for each attribute key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawStyledText")]
pub struct StyledText {
    text: String,
    runs: Vec<StyledRun>,
}

#[derive(Deserialize)]
struct RawStyledText {
    text: String,
    #[serde(default)]
    runs: Vec<StyledRun>,
}

impl TryFrom<RawStyledText> for StyledText {
    type Error = StyleError;

    fn try_from(raw: RawStyledText) -> Result<Self, Self::Error> {
        StyledText::from_parts(raw.text, raw.runs)
    }
}

impl StyledText {
    /// Text with no runs.
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            runs: Vec::new(),
        }
    }

    /// Starts building styled text over `text`.
    pub fn builder(text: impl Into<String>) -> StyledTextBuilder {
        StyledTextBuilder::new(text)
    }

    /// Assembles styled text from already computed runs, checking each one.
    ///
    /// Empty runs are dropped.
    pub fn from_parts(text: impl Into<String>, runs: Vec<StyledRun>) -> Result<Self, StyleError> {
        let text = text.into();
        for run in &runs {
            let end = run
                .start
                .checked_add(run.len)
                .ok_or(StyleError::OutOfBounds {
                    start: run.start,
                    end: usize::MAX,
                    len: text.len(),
                })?;
            check_range(&text, run.start, end)?;
        }
        Ok(Self {
            text,
            runs: runs.into_iter().filter(|run| !run.is_empty()).collect(),
        })
    }

    pub(crate) fn from_checked(text: String, runs: Vec<StyledRun>) -> Self {
        Self { text, runs }
    }

    /// The plain text, with all styling stripped.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn runs(&self) -> &[StyledRun] {
        &self.runs
    }

    /// Length of the plain text in bytes.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// The slice of the plain text a run covers.
    ///
    /// Returns `None` for a run that does not belong to this text.
    pub fn run_text(&self, run: &StyledRun) -> Option<&str> {
        self.text.get(run.range())
    }

    /// Attributes in effect at byte `offset`, applying runs in recorded order.
    pub fn attributes_at(&self, offset: usize) -> Attributes {
        let mut resolved = Attributes::new();
        for run in self.runs.iter().filter(|run| run.covers(offset)) {
            resolved.merge(&run.attributes);
        }
        resolved
    }

    /// True if the character at byte `offset` is bold.
    pub fn is_bold_at(&self, offset: usize) -> bool {
        self.attributes_at(offset).is_bold()
    }

    /// Splits the text into maximal segments of uniform resolved attributes.
    ///
    /// Segments are contiguous, cover the whole text, and adjacent segments
    /// never carry equal attributes.
    ///
    /// ```rust
    /// use tincture_text::{Attribute, StyledText};
    ///
    /// let mut builder = StyledText::builder("one two three");
    /// builder.style_range(0..7, Attribute::Bold).unwrap();
    /// builder.style_range(4..13, Attribute::Italic).unwrap();
    /// let styled = builder.build();
    ///
    /// let texts: Vec<&str> = styled.segments().iter().map(|s| s.text).collect();
    /// assert_eq!(texts, ["one ", "two", " three"]);
    /// ```
    pub fn segments(&self) -> Vec<Segment<'_>> {
        let mut bounds: Vec<usize> = Vec::with_capacity(self.runs.len() * 2 + 2);
        bounds.push(0);
        bounds.push(self.text.len());
        for run in &self.runs {
            bounds.push(run.start);
            bounds.push(run.end());
        }
        bounds.sort_unstable();
        bounds.dedup();

        let mut segments: Vec<Segment<'_>> = Vec::new();
        for pair in bounds.windows(2) {
            let (start, end) = (pair[0], pair[1]);
            let attributes = self.attributes_at(start);
            if let Some(last) = segments.last_mut() {
                if last.attributes == attributes {
                    last.range.end = end;
                    last.text = &self.text[last.range.clone()];
                    continue;
                }
            }
            segments.push(Segment {
                range: start..end,
                text: &self.text[start..end],
                attributes,
            });
        }
        segments
    }

    /// The range of `run` measured in UTF-16 code units.
    ///
    /// Returns `None` for a run that does not belong to this text.
    ///
    /// ```rust
    /// use tincture_text::{Attribute, StyledText};
    ///
    /// let mut builder = StyledText::builder("é😀x");
    /// builder.style_range(6..7, Attribute::Bold).unwrap();
    /// let styled = builder.build();
    ///
    /// assert_eq!(styled.utf16_range(&styled.runs()[0]), Some(3..4));
    /// ```
    pub fn utf16_range(&self, run: &StyledRun) -> Option<Range<usize>> {
        let before = self.text.get(..run.start)?;
        let covered = self.text.get(run.range())?;
        let start = before.encode_utf16().count();
        Some(start..start + covered.encode_utf16().count())
    }

    /// Splits into the plain text and the runs.
    pub fn into_parts(self) -> (String, Vec<StyledRun>) {
        (self.text, self.runs)
    }
}

impl fmt::Display for StyledText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl From<&str> for StyledText {
    fn from(text: &str) -> Self {
        Self::plain(text)
    }
}

impl From<String> for StyledText {
    fn from(text: String) -> Self {
        Self::plain(text)
    }
}

pub(crate) fn check_range(text: &str, start: usize, end: usize) -> Result<(), StyleError> {
    if start > end {
        return Err(StyleError::Inverted { start, end });
    }
    if end > text.len() {
        return Err(StyleError::OutOfBounds {
            start,
            end,
            len: text.len(),
        });
    }
    for offset in [start, end] {
        if !text.is_char_boundary(offset) {
            return Err(StyleError::NotCharBoundary { offset });
        }
    }
    Ok(())
}
