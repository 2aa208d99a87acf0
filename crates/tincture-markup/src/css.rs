//! Inline `style="..."` declarations.
//!
//! Only the handful of properties that map onto an [`Attribute`] are read.
//! As in CSS, a declaration with an unknown property or an unparseable value
//! is dropped rather than failing the whole document.

use cssparser::color::{parse_hash_color, parse_named_color};
use cssparser::{ParseError, Parser, ParserInput, Token};
use tincture_text::{Attribute, Attributes, Baseline, Color, Font, PointSize};

/// Reads the attributes expressed by an inline style declaration list.
pub(crate) fn parse_inline_style(style: &str, base: PointSize) -> Attributes {
    let mut attributes = Attributes::new();
    for declaration in style.split(';') {
        let Some((property, value)) = declaration.split_once(':') else {
            continue;
        };
        let property = property.trim().to_ascii_lowercase();
        let value = value.trim();
        let parsed = match property.as_str() {
            "color" => parse_color(value).map(|color| vec![Attribute::Foreground(color)]),
            "background-color" | "background" => {
                parse_color(value).map(|color| vec![Attribute::Background(color)])
            }
            "font-weight" => font_weight(value, base),
            "font-style" => font_style(value),
            "font-size" => parse_length(value, base).map(|size| vec![Attribute::FontSize(size)]),
            "font-family" => font_family(value),
            "text-decoration" | "text-decoration-line" => Some(text_decoration(value)),
            "vertical-align" => vertical_align(value),
            _ => None,
        };
        match parsed {
            Some(found) => found.into_iter().for_each(|attribute| {
                attributes.insert(attribute);
            }),
            None => tracing::debug!(%property, value, "ignoring style declaration"),
        }
    }
    attributes
}

/// Parses a CSS colour: `#rgb`, `#rrggbb`, `#rrggbbaa`, a named colour,
/// `transparent`, or `rgb()`/`rgba()` with comma or space separated channels.
pub(crate) fn parse_color(value: &str) -> Option<Color> {
    let mut input = ParserInput::new(value);
    let mut parser = Parser::new(&mut input);
    let token = parser.next().ok()?.clone();
    match token {
        Token::Hash(ref hex) | Token::IDHash(ref hex) => {
            let (r, g, b, alpha) = parse_hash_color(hex.as_bytes()).ok()?;
            Some(Color::rgba(r, g, b, unit_to_byte(alpha)))
        }
        Token::Ident(ref name) if name.eq_ignore_ascii_case("transparent") => {
            Some(Color::rgba(0, 0, 0, 0))
        }
        Token::Ident(ref name) => {
            let (r, g, b) = parse_named_color(&name.to_ascii_lowercase()).ok()?;
            Some(Color::rgb(r, g, b))
        }
        Token::Function(ref name)
            if name.eq_ignore_ascii_case("rgb") || name.eq_ignore_ascii_case("rgba") =>
        {
            parser
                .parse_nested_block(|block| parse_rgb_arguments(block))
                .ok()
        }
        _ => None,
    }
}

fn parse_rgb_arguments<'i>(block: &mut Parser<'i, '_>) -> Result<Color, ParseError<'i, ()>> {
    let r = parse_channel(block)?;
    skip_comma(block);
    let g = parse_channel(block)?;
    skip_comma(block);
    let b = parse_channel(block)?;
    let has_alpha = block.try_parse(|p| p.expect_comma()).is_ok()
        || block.try_parse(|p| p.expect_delim('/')).is_ok();
    let a = if has_alpha { parse_alpha(block)? } else { 255 };
    block.expect_exhausted()?;
    Ok(Color::rgba(r, g, b, a))
}

fn skip_comma(block: &mut Parser<'_, '_>) {
    // Channels may be separated by commas or plain whitespace.
    let _ = block.try_parse(|p| p.expect_comma());
}

fn parse_channel<'i>(block: &mut Parser<'i, '_>) -> Result<u8, ParseError<'i, ()>> {
    let location = block.current_source_location();
    match *block.next()? {
        Token::Number { value, .. } => Ok(clamp_to_byte(value)),
        Token::Percentage { unit_value, .. } => Ok(unit_to_byte(unit_value)),
        ref other => Err(location.new_unexpected_token_error(other.clone())),
    }
}

fn parse_alpha<'i>(block: &mut Parser<'i, '_>) -> Result<u8, ParseError<'i, ()>> {
    let location = block.current_source_location();
    match *block.next()? {
        Token::Number { value, .. } => Ok(unit_to_byte(value)),
        Token::Percentage { unit_value, .. } => Ok(unit_to_byte(unit_value)),
        ref other => Err(location.new_unexpected_token_error(other.clone())),
    }
}

fn clamp_to_byte(value: f32) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

fn unit_to_byte(unit: f32) -> u8 {
    clamp_to_byte(unit * 255.0)
}

/// Parses a font size in `px`, `pt`, `em`, `rem`, `%` or a bare number.
///
/// Pixels are taken as points.
pub(crate) fn parse_length(value: &str, base: PointSize) -> Option<PointSize> {
    let mut input = ParserInput::new(value);
    let mut parser = Parser::new(&mut input);
    let points = match *parser.next().ok()? {
        Token::Dimension {
            value, ref unit, ..
        } => {
            if unit.eq_ignore_ascii_case("px") || unit.eq_ignore_ascii_case("pt") {
                value
            } else if unit.eq_ignore_ascii_case("em") || unit.eq_ignore_ascii_case("rem") {
                value * base.get()
            } else {
                return None;
            }
        }
        Token::Percentage { unit_value, .. } => unit_value * base.get(),
        Token::Number { value, .. } => value,
        _ => return None,
    };
    PointSize::new(points).ok()
}

fn idents(value: &str) -> Vec<String> {
    let mut input = ParserInput::new(value);
    let mut parser = Parser::new(&mut input);
    let mut found = Vec::new();
    while let Ok(token) = parser.next() {
        if let Token::Ident(name) = token {
            found.push(name.to_ascii_lowercase());
        }
    }
    found
}

/// Bold weights set the bold flag; lighter ones attach a regular font at
/// `base` so they can override an enclosing bold element.
fn font_weight(value: &str, base: PointSize) -> Option<Vec<Attribute>> {
    let mut input = ParserInput::new(value);
    let mut parser = Parser::new(&mut input);
    let bold = match *parser.next().ok()? {
        Token::Ident(ref name) => {
            name.eq_ignore_ascii_case("bold") || name.eq_ignore_ascii_case("bolder")
        }
        Token::Number { value, .. } => value >= 600.0,
        _ => return None,
    };
    Some(vec![if bold {
        Attribute::Bold
    } else {
        Attribute::Font(Font::regular(base))
    }])
}

fn font_style(value: &str) -> Option<Vec<Attribute>> {
    let names = idents(value);
    let first = names.first()?;
    Some(if first == "italic" || first == "oblique" {
        vec![Attribute::Italic]
    } else {
        Vec::new()
    })
}

fn font_family(value: &str) -> Option<Vec<Attribute>> {
    let names = idents(value);
    if names.is_empty() {
        return None;
    }
    Some(if names.iter().any(|name| name == "monospace") {
        vec![Attribute::Monospace]
    } else {
        Vec::new()
    })
}

fn text_decoration(value: &str) -> Vec<Attribute> {
    idents(value)
        .iter()
        .filter_map(|name| match name.as_str() {
            "underline" => Some(Attribute::Underline),
            "line-through" => Some(Attribute::Strikethrough),
            _ => None,
        })
        .collect()
}

fn vertical_align(value: &str) -> Option<Vec<Attribute>> {
    let names = idents(value);
    let baseline = match names.first()?.as_str() {
        "super" => Some(Attribute::Baseline(Baseline::Superscript)),
        "sub" => Some(Attribute::Baseline(Baseline::Subscript)),
        _ => None,
    };
    Some(baseline.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tincture_text::AttributeKey;

    fn base() -> PointSize {
        PointSize::new(10.0).unwrap()
    }

    #[test]
    fn test_parse_color_forms() {
        assert_eq!(parse_color("#f00"), Some(Color::rgb(255, 0, 0)));
        assert_eq!(parse_color("#00ff00"), Some(Color::rgb(0, 255, 0)));
        assert_eq!(parse_color("#0000ff80"), Some(Color::rgba(0, 0, 255, 128)));
        assert_eq!(parse_color("Navy"), Some(Color::rgb(0, 0, 128)));
        assert_eq!(parse_color("transparent"), Some(Color::rgba(0, 0, 0, 0)));
        assert_eq!(parse_color("rgb(1, 2, 3)"), Some(Color::rgb(1, 2, 3)));
        assert_eq!(parse_color("rgb(1 2 3 / 0)"), Some(Color::rgba(1, 2, 3, 0)));
        assert_eq!(parse_color("rgba(300, 0, 0, 1)"), Some(Color::rgb(255, 0, 0)));
    }

    #[test]
    fn test_parse_color_rejects_garbage() {
        assert_eq!(parse_color("notacolor"), None);
        assert_eq!(parse_color("#12"), None);
        assert_eq!(parse_color("rgb(1, 2)"), None);
        assert_eq!(parse_color(""), None);
    }

    #[test]
    fn test_parse_length_units() {
        assert_eq!(parse_length("14px", base()).map(PointSize::get), Some(14.0));
        assert_eq!(parse_length("9pt", base()).map(PointSize::get), Some(9.0));
        assert_eq!(parse_length("2em", base()).map(PointSize::get), Some(20.0));
        assert_eq!(parse_length("150%", base()).map(PointSize::get), Some(15.0));
        assert_eq!(parse_length("0px", base()), None);
        assert_eq!(parse_length("3furlongs", base()), None);
    }

    #[test]
    fn test_inline_style_collects_attributes() {
        let attrs = parse_inline_style(
            "color: #ff0000; font-weight: 700; font-style: italic; text-decoration: underline line-through",
            base(),
        );
        assert_eq!(
            attrs.get(AttributeKey::Foreground),
            Some(&Attribute::Foreground(Color::rgb(255, 0, 0)))
        );
        assert!(attrs.contains(AttributeKey::Bold));
        assert!(attrs.contains(AttributeKey::Italic));
        assert!(attrs.contains(AttributeKey::Underline));
        assert!(attrs.contains(AttributeKey::Strikethrough));
    }

    #[test]
    fn test_inline_style_ignores_unknown_and_invalid() {
        let attrs = parse_inline_style("margin: 4px; color: nope; ; garbage", base());
        assert!(attrs.is_empty());
    }

    #[test]
    fn test_inline_style_normal_weight_is_regular_font() {
        for style in ["font-weight: normal", "font-weight: 400", "font-weight: bold; font-weight: lighter"] {
            let attrs = parse_inline_style(style, base());
            assert!(!attrs.is_bold(), "{style} should not be bold");
            assert_eq!(
                attrs.get(AttributeKey::Font),
                Some(&Attribute::Font(Font::regular(base())))
            );
        }
    }

    #[test]
    fn test_inline_style_monospace_and_baseline() {
        let attrs = parse_inline_style(
            "font-family: 'Courier New', monospace; vertical-align: super",
            base(),
        );
        assert!(attrs.contains(AttributeKey::Monospace));
        assert_eq!(
            attrs.get(AttributeKey::Baseline),
            Some(&Attribute::Baseline(Baseline::Superscript))
        );
    }
}
