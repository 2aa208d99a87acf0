//! Style attributes attached to runs of text.
//!
//! Attributes are opaque to this crate: they are recorded against ranges and
//! handed to whatever presentation layer draws the text. Each attribute has an
//! [`AttributeKey`], and an [`Attributes`] set holds at most one value per key.
//! Inserting a second value for a key replaces the first, which is how
//! "later run wins" is resolved for overlapping runs.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::InvalidPointSize;

/// A font size in points, guaranteed finite and strictly positive.
///
/// # Example
///
/// ```rust
/// use tincture_text::PointSize;
///
/// assert_eq!(PointSize::new(12.0).unwrap().get(), 12.0);
/// assert!(PointSize::new(0.0).is_err());
/// assert!(PointSize::new(f32::NAN).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f32", into = "f32")]
pub struct PointSize(f32);

impl PointSize {
    /// Twelve points, used wherever no size is given.
    pub const DEFAULT: PointSize = PointSize(12.0);

    /// Creates a point size, rejecting zero, negative and non-finite values.
    pub fn new(points: f32) -> Result<Self, InvalidPointSize> {
        if points.is_finite() && points > 0.0 {
            Ok(Self(points))
        } else {
            Err(InvalidPointSize(points))
        }
    }

    /// Returns the size in points.
    pub fn get(self) -> f32 {
        self.0
    }
}

impl TryFrom<f32> for PointSize {
    type Error = InvalidPointSize;

    fn try_from(points: f32) -> Result<Self, Self::Error> {
        Self::new(points)
    }
}

impl From<PointSize> for f32 {
    fn from(size: PointSize) -> Self {
        size.0
    }
}

impl fmt::Display for PointSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}pt", self.0)
    }
}

/// Font weight carried by an explicit [`Font`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontWeight {
    Regular,
    Bold,
}

/// An explicit font face: a weight at a size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Font {
    pub weight: FontWeight,
    pub size: PointSize,
}

impl Font {
    /// The bold system font at `size`.
    pub fn bold(size: PointSize) -> Self {
        Self {
            weight: FontWeight::Bold,
            size,
        }
    }

    /// The regular system font at `size`.
    pub fn regular(size: PointSize) -> Self {
        Self {
            weight: FontWeight::Regular,
            size,
        }
    }

    pub fn is_bold(&self) -> bool {
        self.weight == FontWeight::Bold
    }
}

/// An sRGB colour with alpha.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    /// An opaque colour.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Formats as `#rrggbb`, or `#rrggbbaa` when not fully opaque.
    ///
    /// ```rust
    /// use tincture_text::Color;
    ///
    /// assert_eq!(Color::rgb(255, 0, 128).to_hex(), "#ff0080");
    /// assert_eq!(Color::rgba(0, 0, 0, 0).to_hex(), "#00000000");
    /// ```
    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

/// Vertical shift of a run relative to the surrounding text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Baseline {
    Superscript,
    Subscript,
}

/// Identifies the slot an [`Attribute`] occupies in an [`Attributes`] set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeKey {
    Bold,
    Italic,
    Underline,
    Strikethrough,
    Monospace,
    Font,
    FontSize,
    Foreground,
    Background,
    Link,
    Baseline,
}

/// A single style attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Attribute {
    Bold,
    Italic,
    Underline,
    Strikethrough,
    Monospace,
    /// An explicit face, as attached by [`build_bold_text`](crate::build_bold_text).
    Font(Font),
    /// A size without a weight, as produced by `font-size` in markup.
    FontSize(PointSize),
    Foreground(Color),
    Background(Color),
    /// Link target, kept verbatim.
    Link(String),
    Baseline(Baseline),
}

impl Attribute {
    pub fn key(&self) -> AttributeKey {
        match self {
            Attribute::Bold => AttributeKey::Bold,
            Attribute::Italic => AttributeKey::Italic,
            Attribute::Underline => AttributeKey::Underline,
            Attribute::Strikethrough => AttributeKey::Strikethrough,
            Attribute::Monospace => AttributeKey::Monospace,
            Attribute::Font(_) => AttributeKey::Font,
            Attribute::FontSize(_) => AttributeKey::FontSize,
            Attribute::Foreground(_) => AttributeKey::Foreground,
            Attribute::Background(_) => AttributeKey::Background,
            Attribute::Link(_) => AttributeKey::Link,
            Attribute::Baseline(_) => AttributeKey::Baseline,
        }
    }
}

/// A set of attributes with at most one value per [`AttributeKey`].
///
/// Iteration order follows the key order, not insertion order, so two sets
/// holding the same values compare equal.
///
/// # Example
///
/// ```rust
/// use tincture_text::{Attribute, AttributeKey, Attributes, Color};
///
/// let attrs = Attributes::new()
///     .with(Attribute::Foreground(Color::rgb(255, 0, 0)))
///     .with(Attribute::Bold)
///     .with(Attribute::Foreground(Color::rgb(0, 0, 255)));
///
/// assert_eq!(attrs.len(), 2);
/// assert_eq!(
///     attrs.get(AttributeKey::Foreground),
///     Some(&Attribute::Foreground(Color::rgb(0, 0, 255)))
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<Attribute>", into = "Vec<Attribute>")]
pub struct Attributes {
    entries: BTreeMap<AttributeKey, Attribute>,
}

impl Attributes {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an attribute, returning the updated set for chaining.
    pub fn with(mut self, attribute: Attribute) -> Self {
        self.insert(attribute);
        self
    }

    /// Adds an attribute, returning the value it replaced for the same key.
    ///
    /// [`Attribute::Bold`] and a regular [`Font`] never coexist: a regular
    /// font clears the bold flag, and the bold flag turns a regular font
    /// bold. Whichever was inserted last decides the weight.
    pub fn insert(&mut self, attribute: Attribute) -> Option<Attribute> {
        match &attribute {
            Attribute::Font(font) if !font.is_bold() => {
                self.entries.remove(&AttributeKey::Bold);
            }
            Attribute::Bold => {
                if let Some(Attribute::Font(font)) = self.entries.get_mut(&AttributeKey::Font) {
                    font.weight = FontWeight::Bold;
                }
            }
            _ => {}
        }
        self.entries.insert(attribute.key(), attribute)
    }

    /// Copies every attribute of `other` into this set; `other` wins on conflicts.
    pub fn merge(&mut self, other: &Attributes) {
        for attribute in other.iter() {
            self.insert(attribute.clone());
        }
    }

    pub fn get(&self, key: AttributeKey) -> Option<&Attribute> {
        self.entries.get(&key)
    }

    pub fn contains(&self, key: AttributeKey) -> bool {
        self.entries.contains_key(&key)
    }

    /// True if the set carries bold, either directly or through a bold [`Font`].
    pub fn is_bold(&self) -> bool {
        self.contains(AttributeKey::Bold)
            || matches!(self.get(AttributeKey::Font), Some(Attribute::Font(font)) if font.is_bold())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Attribute> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl From<Attribute> for Attributes {
    fn from(attribute: Attribute) -> Self {
        Self::new().with(attribute)
    }
}

impl From<Vec<Attribute>> for Attributes {
    fn from(attributes: Vec<Attribute>) -> Self {
        attributes.into_iter().collect()
    }
}

impl From<Attributes> for Vec<Attribute> {
    fn from(attributes: Attributes) -> Self {
        attributes.entries.into_values().collect()
    }
}

impl FromIterator<Attribute> for Attributes {
    fn from_iter<I: IntoIterator<Item = Attribute>>(iter: I) -> Self {
        let mut set = Attributes::new();
        for attribute in iter {
            set.insert(attribute);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pt(points: f32) -> PointSize {
        PointSize::new(points).unwrap()
    }

    #[test]
    fn test_point_size_rejects_non_positive() {
        assert!(PointSize::new(0.0).is_err());
        assert!(PointSize::new(-1.0).is_err());
        assert!(PointSize::new(f32::INFINITY).is_err());
        assert_eq!(PointSize::new(0.5).unwrap().get(), 0.5);
    }

    #[test]
    fn test_point_size_display() {
        assert_eq!(pt(12.0).to_string(), "12pt");
    }

    #[test]
    fn test_insert_replaces_same_key() {
        let mut attrs = Attributes::new();
        assert!(attrs.insert(Attribute::Link("a".into())).is_none());
        let replaced = attrs.insert(Attribute::Link("b".into()));
        assert_eq!(replaced, Some(Attribute::Link("a".into())));
        assert_eq!(attrs.len(), 1);
    }

    #[test]
    fn test_merge_other_wins() {
        let mut base = Attributes::new()
            .with(Attribute::Italic)
            .with(Attribute::Foreground(Color::rgb(1, 2, 3)));
        let top = Attributes::new().with(Attribute::Foreground(Color::rgb(9, 9, 9)));
        base.merge(&top);

        assert!(base.contains(AttributeKey::Italic));
        assert_eq!(
            base.get(AttributeKey::Foreground),
            Some(&Attribute::Foreground(Color::rgb(9, 9, 9)))
        );
    }

    #[test]
    fn test_is_bold_via_font() {
        let bold_font = Attributes::from(Attribute::Font(Font::bold(pt(10.0))));
        let regular_font = Attributes::from(Attribute::Font(Font::regular(pt(10.0))));
        assert!(bold_font.is_bold());
        assert!(!regular_font.is_bold());
        assert!(Attributes::from(Attribute::Bold).is_bold());
    }

    #[test]
    fn test_regular_font_and_bold_flag_last_wins() {
        let mut unbolded = Attributes::new().with(Attribute::Bold);
        unbolded.merge(&Attributes::from(Attribute::Font(Font::regular(pt(12.0)))));
        assert!(!unbolded.is_bold());
        assert!(!unbolded.contains(AttributeKey::Bold));

        let mut rebolded = Attributes::from(Attribute::Font(Font::regular(pt(12.0))));
        rebolded.insert(Attribute::Bold);
        assert!(rebolded.is_bold());
        assert_eq!(
            rebolded.get(AttributeKey::Font),
            Some(&Attribute::Font(Font::bold(pt(12.0))))
        );

        let kept = Attributes::new()
            .with(Attribute::Bold)
            .with(Attribute::Font(Font::bold(pt(20.0))));
        assert!(kept.contains(AttributeKey::Bold));
    }

    #[test]
    fn test_equality_ignores_insertion_order() {
        let a = Attributes::new()
            .with(Attribute::Bold)
            .with(Attribute::Italic);
        let b = Attributes::new()
            .with(Attribute::Italic)
            .with(Attribute::Bold);
        assert_eq!(a, b);
    }

    #[test]
    fn test_attribute_serialization_shape() {
        let json = serde_json::to_value(Attribute::Font(Font::bold(pt(14.0)))).unwrap();
        assert_eq!(json["kind"], "font");
        assert_eq!(json["value"]["weight"], "bold");
        assert_eq!(json["value"]["size"], 14.0);

        let unit = serde_json::to_value(Attribute::Underline).unwrap();
        assert_eq!(unit["kind"], "underline");
    }

    #[test]
    fn test_point_size_deserialize_validates() {
        let bad: Result<PointSize, _> = serde_json::from_str("-2.0");
        assert!(bad.is_err());
        let good: PointSize = serde_json::from_str("9.5").unwrap();
        assert_eq!(good.get(), 9.5);
    }
}
