//! # Tincture Text
//!
//! Styled text as a plain string plus an ordered list of attribute runs.
//!
//! This crate holds the data model shared by the markup parser and the
//! manual builders:
//!
//! - [`StyledText`]: a base string paired with ordered [`StyledRun`]s
//! - [`StyledRun`]: a byte range over the base string plus [`Attributes`]
//! - [`Attribute`]: an opaque style value (bold, a font, a colour, a link...)
//! - [`StyledTextBuilder`]: attaches attributes to ranges or substrings
//! - [`build_bold_text`]: bolds the first occurrence of each requested substring
//!
//! Runs may overlap. When two runs set the same [`AttributeKey`] over the same
//! character, the run recorded later wins.
//!
//! Offsets are UTF-8 byte offsets and always fall on `char` boundaries. Hosts
//! that count UTF-16 code units can convert with [`StyledText::utf16_range`].
//!
//! Nothing here renders text. Attributes are carried, never interpreted.
//!
//! ## Example
//!
//! ```rust
//! use tincture_text::{build_bold_text, PointSize};
//!
//! let size = PointSize::new(14.0).unwrap();
//! let styled = build_bold_text("Total: 42 items", ["42"], size);
//!
//! assert_eq!(styled.text(), "Total: 42 items");
//! assert_eq!(styled.runs().len(), 1);
//! assert_eq!(styled.runs()[0].range(), 7..9);
//! assert!(styled.is_bold_at(7));
//! assert!(!styled.is_bold_at(0));
//! ```

mod attribute;
mod builder;
mod error;
mod styled;

pub use attribute::{
    Attribute, AttributeKey, Attributes, Baseline, Color, Font, FontWeight, PointSize,
};
pub use builder::{build_bold_text, StyledTextBuilder};
pub use error::{InvalidPointSize, StyleError};
pub use styled::{Segment, StyledRun, StyledText};
