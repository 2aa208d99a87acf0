//! # Tincture
//!
//! String helpers for display code: styled text from a small HTML subset,
//! partially bold strings, localized strings that never fail silently, and
//! an email shape check.
//!
//! The pieces live in their own crates and are re-exported here:
//!
//! - [`text`]: the styled-text model ([`StyledText`], [`StyledRun`],
//!   [`Attribute`]) and [`build_bold_text`]
//! - [`markup`]: [`parse_markup`] and the configurable [`MarkupParser`]
//! - [`l10n`]: [`Localizer`], [`Catalog`] and the printf-style
//!   [`format_template`]
//! - [`is_valid_email`], defined here
//!
//! All operations are synchronous and hold no shared mutable state, so they
//! can be called from any number of threads.
//!
//! ## Example
//!
//! ```rust
//! use tincture::{build_bold_text, is_valid_email, parse_markup, Catalog, Localizer, PointSize};
//!
//! let styled = parse_markup("<b>Hello</b> World").unwrap();
//! assert_eq!(styled.text(), "Hello World");
//! assert_eq!(styled.runs()[0].range(), 0..5);
//!
//! let bold = build_bold_text("Due: Friday", ["Friday"], PointSize::DEFAULT);
//! assert!(bold.is_bold_at(5));
//!
//! let localizer = Localizer::new(Catalog::new());
//! assert!(localizer.localize("greeting").contains("greeting"));
//!
//! assert!(is_valid_email("user@domain.com"));
//! ```

mod validate;

pub use tincture_l10n as l10n;
pub use tincture_markup as markup;
pub use tincture_text as text;

pub use validate::{is_valid_email, EMAIL_PATTERN};

pub use tincture_l10n::{
    format_template, Catalog, FormatArg, FormatError, LoadError, Localizer, LocalizerConfig,
    StringsStore,
};
pub use tincture_markup::{parse_markup, parse_markup_bytes, MarkupOptions, MarkupParser, ParseError};
pub use tincture_text::{
    build_bold_text, Attribute, AttributeKey, Attributes, PointSize, StyleError, StyledRun,
    StyledText, StyledTextBuilder,
};
