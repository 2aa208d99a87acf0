//! Parser configuration.

use serde::Deserialize;
use tincture_text::PointSize;

/// Default nesting limit for [`MarkupOptions::max_depth`].
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Options controlling markup parsing.
///
/// Deserializable so hosts can keep it in their own configuration files;
/// missing fields take their defaults.
///
/// # Example
///
/// ```rust
/// use tincture_markup::{MarkupOptions, MarkupParser};
/// use tincture_text::PointSize;
///
/// let options = MarkupOptions::new()
///     .max_depth(16)
///     .base_font_size(PointSize::new(17.0).unwrap());
/// let parser = MarkupParser::with_options(options);
/// assert_eq!(parser.options().max_depth, 16);
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct MarkupOptions {
    /// Deepest element nesting accepted before parsing fails.
    pub max_depth: usize,
    /// Body size that relative sizes (`em`, `%`, headings, `small`) scale from.
    pub base_font_size: PointSize,
}

impl MarkupOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    pub fn base_font_size(mut self, size: PointSize) -> Self {
        self.base_font_size = size;
        self
    }

    /// `base_font_size` scaled by `factor`, falling back to the base size
    /// when the product is not a valid size.
    pub(crate) fn scaled(&self, factor: f32) -> PointSize {
        PointSize::new(self.base_font_size.get() * factor).unwrap_or(self.base_font_size)
    }
}

impl Default for MarkupOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            base_font_size: PointSize::DEFAULT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = MarkupOptions::default();
        assert_eq!(options.max_depth, DEFAULT_MAX_DEPTH);
        assert_eq!(options.base_font_size.get(), 12.0);
    }

    #[test]
    fn test_deserialize_partial() {
        let options: MarkupOptions = serde_json::from_str(r#"{"max_depth": 8}"#).unwrap();
        assert_eq!(options.max_depth, 8);
        assert_eq!(options.base_font_size, PointSize::DEFAULT);
    }

    #[test]
    fn test_deserialize_rejects_bad_size() {
        let result: Result<MarkupOptions, _> = serde_json::from_str(r#"{"base_font_size": 0}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_scaled() {
        let options = MarkupOptions::new().base_font_size(PointSize::new(10.0).unwrap());
        assert_eq!(options.scaled(2.0).get(), 20.0);
    }
}
