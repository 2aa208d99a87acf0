//! Tag vocabulary: what each element contributes to the styled result.

use tincture_text::{Attribute, Attributes, Baseline, Color};

use crate::css;
use crate::options::MarkupOptions;

/// Relative heading sizes for `h1` through `h6`.
const HEADING_SCALE: [f32; 6] = [2.0, 1.5, 1.17, 1.0, 0.83, 0.67];

/// Point sizes for the legacy `<font size="1">` through `size="7"`.
const FONT_SIZE_STEPS: [f32; 7] = [10.0, 13.0, 16.0, 18.0, 24.0, 32.0, 48.0];

const MARK_BACKGROUND: Color = Color::rgb(255, 255, 0);

/// What an opening tag does to the output.
#[derive(Debug, Default)]
pub(crate) struct ElementStyle {
    pub attributes: Attributes,
    /// Separated from surrounding text by a line break.
    pub block: bool,
    /// Text content is dropped.
    pub skip: bool,
}

/// Elements that never take a closing tag.
pub(crate) fn is_void(name: &str) -> bool {
    matches!(
        name,
        "br" | "hr"
            | "img"
            | "wbr"
            | "meta"
            | "link"
            | "input"
            | "col"
            | "area"
            | "base"
            | "source"
            | "embed"
            | "param"
            | "track"
    )
}

/// Resolves the style of an element from its name and attributes.
///
/// `attrs` holds lowercase attribute names with decoded values.
pub(crate) fn element_style(
    name: &str,
    attrs: &[(String, String)],
    options: &MarkupOptions,
) -> ElementStyle {
    let mut style = ElementStyle::default();
    let set = &mut style.attributes;
    match name {
        "b" | "strong" => {
            set.insert(Attribute::Bold);
        }
        "i" | "em" | "cite" | "var" | "dfn" => {
            set.insert(Attribute::Italic);
        }
        "u" | "ins" => {
            set.insert(Attribute::Underline);
        }
        "s" | "strike" | "del" => {
            set.insert(Attribute::Strikethrough);
        }
        "code" | "tt" | "kbd" | "samp" => {
            set.insert(Attribute::Monospace);
        }
        "pre" => {
            set.insert(Attribute::Monospace);
            style.block = true;
        }
        "sup" => {
            set.insert(Attribute::Baseline(Baseline::Superscript));
        }
        "sub" => {
            set.insert(Attribute::Baseline(Baseline::Subscript));
        }
        "mark" => {
            set.insert(Attribute::Background(MARK_BACKGROUND));
        }
        "small" => {
            set.insert(Attribute::FontSize(options.scaled(0.83)));
        }
        "big" => {
            set.insert(Attribute::FontSize(options.scaled(1.2)));
        }
        "a" => {
            if let Some(href) = attr(attrs, "href") {
                set.insert(Attribute::Link(href.to_string()));
            }
        }
        "font" => {
            if let Some(color) = attr(attrs, "color").and_then(css::parse_color) {
                set.insert(Attribute::Foreground(color));
            }
            if let Some(size) = attr(attrs, "size").and_then(legacy_font_size) {
                set.insert(Attribute::FontSize(size));
            }
        }
        "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
            let level = usize::from(name.as_bytes()[1] - b'1');
            set.insert(Attribute::Bold);
            set.insert(Attribute::FontSize(options.scaled(HEADING_SCALE[level])));
            style.block = true;
        }
        "p" | "div" | "li" | "ul" | "ol" | "dl" | "dt" | "dd" | "blockquote" | "tr" | "table"
        | "section" | "article" | "header" | "footer" | "aside" | "nav" | "main" | "figure"
        | "figcaption" | "address" => {
            style.block = true;
        }
        "script" | "style" | "head" | "title" | "template" | "noscript" => {
            style.skip = true;
        }
        "span" | "html" | "body" | "td" | "th" | "thead" | "tbody" | "tfoot" | "label" | "abbr"
        | "q" | "bdi" | "bdo" | "time" | "data" => {}
        other => {
            tracing::debug!(tag = other, "unknown tag, treating as transparent");
        }
    }

    if let Some(inline) = attr(attrs, "style") {
        let declared = css::parse_inline_style(inline, options.base_font_size);
        style.attributes.merge(&declared);
    }
    style
}

fn attr<'a>(attrs: &'a [(String, String)], name: &str) -> Option<&'a str> {
    attrs
        .iter()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.as_str())
}

/// Maps `size="N"` (1 to 7) or `size="+N"`/`size="-N"` (relative to 3).
fn legacy_font_size(value: &str) -> Option<tincture_text::PointSize> {
    let value = value.trim();
    let step: i32 = if let Some(delta) = value.strip_prefix('+') {
        3 + delta.parse::<i32>().ok()?
    } else if value.starts_with('-') {
        3 + value.parse::<i32>().ok()?
    } else {
        value.parse().ok()?
    };
    let index = usize::try_from(step.clamp(1, 7) - 1).ok()?;
    tincture_text::PointSize::new(FONT_SIZE_STEPS[index]).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tincture_text::AttributeKey;

    fn attrs(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_bold_tags() {
        let options = MarkupOptions::default();
        for tag in ["b", "strong"] {
            let style = element_style(tag, &[], &options);
            assert!(style.attributes.contains(AttributeKey::Bold), "{tag}");
            assert!(!style.block);
        }
    }

    #[test]
    fn test_heading_is_bold_block_with_size() {
        let options = MarkupOptions::default();
        let style = element_style("h1", &[], &options);
        assert!(style.block);
        assert!(style.attributes.contains(AttributeKey::Bold));
        assert_eq!(
            style.attributes.get(AttributeKey::FontSize),
            Some(&Attribute::FontSize(options.scaled(2.0)))
        );
    }

    #[test]
    fn test_anchor_without_href_has_no_link() {
        let options = MarkupOptions::default();
        assert!(element_style("a", &[], &options).attributes.is_empty());
        let linked = element_style("a", &attrs(&[("href", "https://x.test")]), &options);
        assert_eq!(
            linked.attributes.get(AttributeKey::Link),
            Some(&Attribute::Link("https://x.test".into()))
        );
    }

    #[test]
    fn test_font_tag_color_and_size() {
        let options = MarkupOptions::default();
        let style = element_style("font", &attrs(&[("color", "red"), ("size", "+1")]), &options);
        assert_eq!(
            style.attributes.get(AttributeKey::Foreground),
            Some(&Attribute::Foreground(Color::rgb(255, 0, 0)))
        );
        assert_eq!(
            style.attributes.get(AttributeKey::FontSize),
            Some(&Attribute::FontSize(
                tincture_text::PointSize::new(18.0).unwrap()
            ))
        );
    }

    #[test]
    fn test_legacy_font_size_clamps() {
        assert_eq!(legacy_font_size("1").map(|s| s.get()), Some(10.0));
        assert_eq!(legacy_font_size("9").map(|s| s.get()), Some(48.0));
        assert_eq!(legacy_font_size("-5").map(|s| s.get()), Some(10.0));
        assert_eq!(legacy_font_size("big"), None);
    }

    #[test]
    fn test_style_attribute_overrides_tag_defaults() {
        let options = MarkupOptions::default();
        let style = element_style(
            "mark",
            &attrs(&[("style", "background-color: #000000")]),
            &options,
        );
        assert_eq!(
            style.attributes.get(AttributeKey::Background),
            Some(&Attribute::Background(Color::rgb(0, 0, 0)))
        );
    }

    #[test]
    fn test_skip_and_void() {
        let options = MarkupOptions::default();
        assert!(element_style("script", &[], &options).skip);
        assert!(is_void("br"));
        assert!(!is_void("b"));
    }

    #[test]
    fn test_unknown_tag_is_transparent() {
        let options = MarkupOptions::default();
        let style = element_style("blink", &[], &options);
        assert!(style.attributes.is_empty());
        assert!(!style.block);
        assert!(!style.skip);
    }
}
