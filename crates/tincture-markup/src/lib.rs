//! # Tincture Markup
//!
//! Parses a restricted HTML subset into [`StyledText`].
//!
//! The plain text of the result is the markup's text content; tags become
//! attribute runs over it:
//!
//! | Tags | Attribute |
//! |------|-----------|
//! | `b`, `strong` | [`Attribute::Bold`] |
//! | `i`, `em`, `cite`, `var`, `dfn` | [`Attribute::Italic`] |
//! | `u`, `ins` | [`Attribute::Underline`] |
//! | `s`, `strike`, `del` | [`Attribute::Strikethrough`] |
//! | `code`, `tt`, `kbd`, `samp`, `pre` | [`Attribute::Monospace`] |
//! | `sup`, `sub` | [`Attribute::Baseline`] |
//! | `a href` | [`Attribute::Link`] |
//! | `mark` | yellow [`Attribute::Background`] |
//! | `small`, `big` | scaled [`Attribute::FontSize`] |
//! | `h1` .. `h6` | bold plus a heading [`Attribute::FontSize`] |
//! | `font color size` | [`Attribute::Foreground`], [`Attribute::FontSize`] |
//!
//! Any element may also carry an inline `style` attribute; `color`,
//! `background-color`, `font-weight`, `font-style`, `font-size`,
//! `font-family: monospace`, `text-decoration` and `vertical-align` are
//! understood, other declarations are ignored.
//!
//! Structure is kept to line breaks: `<br>` inserts one, and block elements
//! (`p`, `div`, `li`, headings, ...) are separated from surrounding text by a
//! single newline. Content of `script`, `style`, `head` and `title` is
//! dropped. Unknown tags are transparent. Whitespace is preserved as written.
//!
//! Parsing is all-or-nothing: unbalanced tags, unknown entities, stray `<`,
//! excessive nesting and invalid UTF-8 all yield a [`ParseError`] and no
//! partial output.
//!
//! ## Example
//!
//! ```rust
//! use tincture_markup::parse_markup;
//!
//! let styled = parse_markup("<b>Hello</b> World").unwrap();
//!
//! assert_eq!(styled.text(), "Hello World");
//! assert_eq!(styled.runs().len(), 1);
//! assert_eq!(styled.runs()[0].range(), 0..5);
//! assert!(styled.is_bold_at(0));
//! assert!(!styled.is_bold_at(6));
//! ```

mod css;
mod error;
mod options;
mod parser;
mod tags;

pub use error::ParseError;
pub use options::MarkupOptions;

pub use tincture_text::{Attribute, StyledText};

/// A markup parser with fixed [`MarkupOptions`].
#[derive(Debug, Clone, Default)]
pub struct MarkupParser {
    options: MarkupOptions,
}

impl MarkupParser {
    /// Creates a parser with default options.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: MarkupOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &MarkupOptions {
        &self.options
    }

    /// Parses markup text.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] if the markup is malformed or nests deeper than
    /// [`MarkupOptions::max_depth`].
    pub fn parse(&self, input: &str) -> Result<StyledText, ParseError> {
        parser::parse(input, &self.options)
    }

    /// Decodes `input` as UTF-8, then parses it.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::Encoding`] for invalid UTF-8, otherwise as
    /// [`parse`](Self::parse).
    pub fn parse_bytes(&self, input: &[u8]) -> Result<StyledText, ParseError> {
        let input = std::str::from_utf8(input)?;
        self.parse(input)
    }
}

/// Parses markup with default options.
///
/// See the [crate docs](crate) for the accepted vocabulary.
pub fn parse_markup(input: &str) -> Result<StyledText, ParseError> {
    MarkupParser::new().parse(input)
}

/// Decodes UTF-8 bytes and parses them as markup with default options.
///
/// ```rust
/// use tincture_markup::{parse_markup_bytes, ParseError};
///
/// let styled = parse_markup_bytes("<i>caf\u{e9}</i>".as_bytes()).unwrap();
/// assert_eq!(styled.text(), "caf\u{e9}");
///
/// let err = parse_markup_bytes(&[b'<', b'b', b'>', 0xff, b'<', b'/', b'b', b'>']).unwrap_err();
/// assert!(matches!(err, ParseError::Encoding(_)));
/// ```
pub fn parse_markup_bytes(input: &[u8]) -> Result<StyledText, ParseError> {
    MarkupParser::new().parse_bytes(input)
}
